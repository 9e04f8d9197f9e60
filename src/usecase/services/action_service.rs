use serde_json::Value;

use crate::domain::entities::action::{
    AccessPolicy, ActionBinding, ActionKind, RowActionEvent, RowActionHandler, DELETED_STATUS,
    TERMINAL_STATUSES,
};
use crate::domain::entities::row::Row;
use crate::domain::error::TableError;

fn row_status(row: &Row) -> Option<String> {
    match row.get("status") {
        Some(Value::String(status)) => Some(status.trim().to_lowercase()),
        _ => None,
    }
}

pub fn is_action_disabled(row: &Row, kind: &ActionKind, access: Option<&AccessPolicy>) -> bool {
    if access.is_some_and(|policy| !policy.allows(kind)) {
        return true;
    }
    let status = row_status(row);
    match kind {
        ActionKind::Edit => {
            matches!(row.get("editable"), Some(Value::Bool(false)))
                || status.is_some_and(|status| TERMINAL_STATUSES.contains(&status.as_str()))
        }
        ActionKind::Delete => status.as_deref() == Some(DELETED_STATUS),
        ActionKind::View | ActionKind::Custom(_) => false,
    }
}

/// View/edit/delete (as enabled by the caller) followed by custom actions.
pub fn bindings_for(
    row: &Row,
    standard: &[ActionKind],
    custom: &[String],
    access: Option<&AccessPolicy>,
) -> Vec<ActionBinding> {
    standard
        .iter()
        .cloned()
        .chain(custom.iter().cloned().map(ActionKind::Custom))
        .map(|kind| ActionBinding {
            disabled: is_action_disabled(row, &kind, access),
            kind,
        })
        .collect()
}

/// Hands the action to the controller unless it is disabled for the row.
pub fn dispatch_action(
    handler: &dyn RowActionHandler,
    kind: ActionKind,
    row: &Row,
    entity_type: Option<&str>,
    access: Option<&AccessPolicy>,
) -> Result<(), TableError> {
    if is_action_disabled(row, &kind, access) {
        tracing::warn!(action = %kind, "rejected disabled row action");
        return Err(TableError::ActionDisabled {
            action: kind.name().to_string(),
        });
    }
    tracing::info!(action = %kind, entity_type = ?entity_type, "dispatching row action");
    handler.handle(RowActionEvent {
        kind,
        row: row.clone(),
        entity_type: entity_type.map(str::to_string),
    });
    Ok(())
}
