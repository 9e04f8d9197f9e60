use std::collections::BTreeSet;
use std::fmt;

use crate::domain::entities::row::Row;

/// Row statuses after which a record can no longer be edited.
pub const TERMINAL_STATUSES: [&str; 6] = [
    "closed",
    "deleted",
    "terminated",
    "delisted",
    "rejected",
    "archived",
];

pub const DELETED_STATUS: &str = "deleted";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    View,
    Edit,
    Delete,
    Custom(String),
}

impl ActionKind {
    pub fn name(&self) -> &str {
        match self {
            ActionKind::View => "view",
            ActionKind::Edit => "edit",
            ActionKind::Delete => "delete",
            ActionKind::Custom(name) => name,
        }
    }

    pub fn label(&self) -> String {
        match self {
            ActionKind::View => "View".to_string(),
            ActionKind::Edit => "Edit".to_string(),
            ActionKind::Delete => "Delete".to_string(),
            ActionKind::Custom(name) => name.clone(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Actions the current caller may not perform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessPolicy {
    denied: BTreeSet<ActionKind>,
}

impl AccessPolicy {
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn deny(mut self, kind: ActionKind) -> Self {
        self.denied.insert(kind);
        self
    }

    pub fn read_only() -> Self {
        Self::allow_all()
            .deny(ActionKind::Edit)
            .deny(ActionKind::Delete)
    }

    pub fn allows(&self, kind: &ActionKind) -> bool {
        !self.denied.contains(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBinding {
    pub kind: ActionKind,
    pub disabled: bool,
}

/// Payload handed to the caller's controller when an action fires.
#[derive(Debug, Clone, PartialEq)]
pub struct RowActionEvent {
    pub kind: ActionKind,
    pub row: Row,
    pub entity_type: Option<String>,
}

/// Caller-supplied controller. The table itself never mutates rows.
pub trait RowActionHandler {
    fn handle(&self, event: RowActionEvent);
}

impl<F> RowActionHandler for F
where
    F: Fn(RowActionEvent),
{
    fn handle(&self, event: RowActionEvent) {
        self(event)
    }
}
