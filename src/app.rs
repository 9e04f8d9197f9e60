use std::sync::Arc;

use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use serde_json::Value;

use crate::config::AppConfig;
use crate::domain::entities::action::{AccessPolicy, ActionKind, RowActionEvent};
use crate::domain::entities::filter::{FilterDef, FilterKind};
use crate::domain::entities::row::{resolve, stringify, Row};
use crate::domain::entities::table::{ColumnDef, TableAction, TableKey};
use crate::infra::export::csv::export_rows_to_csv;
use crate::infra::import::json::{load_rows_from_json, parse_rows};
use crate::infra::sqlite::repo::SqliteRepo;
use crate::ui::components::table::{use_table_handle, DataTable};
use crate::ui::state::app_state::AppState;
use crate::usecase::services::table_state_service::TableStateService;
use crate::usecase::services::view_service::ordered_rows;

pub const ENTITY_TYPE: &str = "symbol";
pub const APPROVE_ACTION: &str = "Approve";
pub const REJECT_ACTION: &str = "Reject";

pub fn sample_symbol_rows() -> Vec<Row> {
    match parse_rows(include_str!("../assets/sample_symbols.json")) {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(%err, "bundled sample rows are invalid");
            Vec::new()
        }
    }
}

fn format_tags(row: &Row) -> String {
    match resolve(row, "tags") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| stringify(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        other => stringify(other),
    }
}

fn format_price(row: &Row) -> String {
    resolve(row, "last_price")
        .and_then(Value::as_f64)
        .map(|price| format!("{price:.2}"))
        .unwrap_or_default()
}

fn format_active(row: &Row) -> String {
    match resolve(row, "is_active") {
        Some(Value::Bool(true)) => "Yes".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        other => stringify(other),
    }
}

pub fn symbol_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("symbol", "Symbol"),
        ColumnDef::new("company_profile.company_name", "Company"),
        ColumnDef::new("exchange", "Exchange"),
        ColumnDef::new("status", "Status"),
        ColumnDef::new("tags", "Tags").with_format(format_tags).unsorted(),
        ColumnDef::new("listed_at", "Listed"),
        ColumnDef::new("last_price", "Last").with_format(format_price),
        ColumnDef::new("is_active", "Active").with_format(format_active),
    ]
}

pub fn symbol_filters() -> Vec<FilterDef> {
    vec![
        FilterDef::new("exchange", FilterKind::Select).with_placeholder("All exchanges"),
        FilterDef::new("status", FilterKind::MultiSelect).with_placeholder("Any status"),
        FilterDef::new("tags", FilterKind::MultiSelect).with_placeholder("Any tag"),
        FilterDef::new("company_profile.country", FilterKind::Select)
            .with_placeholder("All countries"),
        FilterDef::new("is_active", FilterKind::Select).with_placeholder("Active?"),
        FilterDef::new("listed_at", FilterKind::DateRange).with_placeholder("Listed"),
    ]
}

fn row_label(row: &Row) -> String {
    let symbol = stringify(resolve(row, "symbol"));
    if symbol.is_empty() {
        stringify(resolve(row, "id"))
    } else {
        symbol
    }
}

/// Parent-owned status change for the approval buttons.
fn set_row_status(rows: &mut [Row], target: &Row, status: &str) -> bool {
    match rows.iter_mut().find(|row| *row == target) {
        Some(row) => {
            row.insert("status".to_string(), Value::String(status.to_string()));
            true
        }
        None => false,
    }
}

#[component]
pub fn App() -> Element {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            return rsx! {
                div {
                    p { "Unable to load configuration: {err}" }
                }
            };
        }
    };

    let AppState {
        mut rows,
        mut selected_row,
        mut read_only,
        mut busy,
        mut status,
    } = AppState::new(sample_symbol_rows);

    let table_key = TableKey(config.table_key.clone());
    let service = Arc::new(TableStateService::new(Arc::new(SqliteRepo {
        db_path: config.db_path.clone(),
    })));
    let handle = use_table_handle(config.page_size);

    let service_for_init = service.clone();
    let key_for_init = table_key.clone();
    use_effect(move || {
        *busy.write() = true;
        match service_for_init
            .init()
            .and_then(|_| service_for_init.restore(&key_for_init))
        {
            Ok(Some(saved)) => {
                handle.dispatch(TableAction::Restore(saved));
                *status.write() = "Restored saved filters".to_string();
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%err, "failed to restore table state");
                *status.write() = format!("Failed to restore filters: {err}");
            }
        }
        *busy.write() = false;
    });

    let service_for_persist = service.clone();
    let key_for_persist = table_key.clone();
    use_effect(move || {
        let saved = handle.saved_state();
        if let Err(err) = service_for_persist.persist(&key_for_persist, &saved) {
            tracing::warn!(%err, "failed to persist table state");
        }
    });

    let service_for_forget = service.clone();
    let key_for_forget = table_key.clone();

    let access = if read_only() {
        AccessPolicy::read_only()
    } else {
        AccessPolicy::allow_all()
    };
    let status_text = status();
    let active_filters = handle.column_filters().normalized().len();
    let selected_json = selected_row()
        .and_then(|row| serde_json::to_string_pretty(&row).ok())
        .unwrap_or_default();

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 12px; padding: 12px; height: 100vh; box-sizing: border-box; font-family: sans-serif;",
            div { style: "display: flex; align-items: center; gap: 8px;",
                h2 { style: "margin: 0 12px 0 0;", "Symbols" }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let Some(file_path) = FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .add_filter("All files", &["*"])
                            .pick_file()
                        else {
                            return;
                        };
                        *busy.write() = true;
                        match load_rows_from_json(&file_path) {
                            Ok(loaded) => {
                                *status.write() = format!("Loaded {} rows from {}", loaded.len(), file_path.display());
                                rows.set(loaded);
                                selected_row.set(None);
                            }
                            Err(err) => {
                                *status.write() = format!("Import failed: {err:#}");
                            }
                        }
                        *busy.write() = false;
                    },
                    "Import JSON"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let Some(file_path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_file_name("symbols.csv")
                            .save_file()
                        else {
                            return;
                        };
                        let current_rows = rows.read();
                        let visible = ordered_rows(&current_rows, &handle.snapshot());
                        match export_rows_to_csv(&file_path, &symbol_columns(), &visible) {
                            Ok(written) => {
                                *status.write() = format!("Exported {written} rows to {}", file_path.display());
                            }
                            Err(err) => {
                                *status.write() = format!("Export failed: {err:#}");
                            }
                        }
                    },
                    "Export CSV"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        handle.dispatch(TableAction::ResetFilters);
                        let remaining = service_for_forget
                            .forget(&key_for_forget)
                            .and_then(|_| service_for_forget.saved_tables());
                        match remaining {
                            Ok(remaining) => {
                                *status.write() = format!(
                                    "Cleared saved filters ({} other table(s) still saved)",
                                    remaining.len()
                                );
                            }
                            Err(err) => *status.write() = format!("Failed to clear saved filters: {err}"),
                        }
                    },
                    "Forget saved filters"
                }
                label { style: "margin-left: auto;", "Read-only" }
                input {
                    r#type: "checkbox",
                    checked: read_only(),
                    onchange: move |event| {
                        let checked = event.value().parse::<bool>().unwrap_or(false);
                        read_only.set(checked);
                    }
                }
            }

            div { style: "color: #555;", "{status_text} · {active_filters} active filter(s)" }

            div { style: "flex: 1; min-height: 0; overflow: auto;",
                DataTable {
                    rows: rows(),
                    columns: symbol_columns(),
                    filters: symbol_filters(),
                    access: access,
                    entity_type: ENTITY_TYPE.to_string(),
                    custom_actions: vec![APPROVE_ACTION.to_string(), REJECT_ACTION.to_string()],
                    handle: handle,
                    on_row_click: move |row: Row| selected_row.set(Some(row)),
                    on_action: move |event: RowActionEvent| {
                        let label = row_label(&event.row);
                        match &event.kind {
                            ActionKind::View => {
                                selected_row.set(Some(event.row.clone()));
                                *status.write() = format!("Viewing {label}");
                            }
                            ActionKind::Edit => {
                                selected_row.set(Some(event.row.clone()));
                                *status.write() = format!("Editing {label}");
                            }
                            ActionKind::Delete => {
                                let confirm = MessageDialog::new()
                                    .set_level(MessageLevel::Warning)
                                    .set_title("Delete symbol")
                                    .set_description(format!("Delete {label}?"))
                                    .set_buttons(MessageButtons::YesNo)
                                    .show();
                                if confirm != MessageDialogResult::Yes {
                                    return;
                                }
                                rows.write().retain(|row| *row != event.row);
                                selected_row.set(None);
                                *status.write() = format!("Deleted {label}");
                            }
                            ActionKind::Custom(name) => {
                                let next_status = if name == APPROVE_ACTION { "approved" } else { "rejected" };
                                if set_row_status(&mut rows.write(), &event.row, next_status) {
                                    *status.write() = format!("{label} {next_status}");
                                }
                            }
                        }
                        tracing::info!(
                            action = %event.kind,
                            entity_type = ?event.entity_type,
                            row = %label,
                            "handled row action"
                        );
                    },
                }
            }

            if !selected_json.is_empty() {
                div { style: "border-top: 1px solid #ccc; padding-top: 8px;",
                    div { style: "display: flex; justify-content: space-between; align-items: center;",
                        strong { "Selected row" }
                        button {
                            onclick: move |_| selected_row.set(None),
                            "Close"
                        }
                    }
                    pre { style: "max-height: 200px; overflow: auto; background: #f7f7f7; padding: 8px;",
                        "{selected_json}"
                    }
                }
            }
        }
    }
}
