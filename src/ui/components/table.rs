use dioxus::prelude::*;

use crate::domain::entities::action::{AccessPolicy, ActionKind, RowActionEvent};
use crate::domain::entities::filter::{
    parse_date_text, toggle_option, ColumnFilters, FilterDef, FilterKind, FilterOption,
    FilterValue,
};
use crate::domain::entities::row::Row;
use crate::domain::entities::table::{
    ColumnDef, SavedTableState, SortDirection, TableAction, TableState,
};
use crate::usecase::services::action_service::{bindings_for, dispatch_action};
use crate::usecase::services::option_service::build_options;
use crate::usecase::services::view_service::build_view;

pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 25, 50, 100];
const ALL_PAGES_VALUE: &str = "all";

/// Parent-side accessor for the table's state, e.g. to persist filters.
#[derive(Clone, Copy, PartialEq)]
pub struct TableHandle {
    state: Signal<TableState>,
}

impl TableHandle {
    pub fn column_filters(&self) -> ColumnFilters {
        self.state.read().filters.clone()
    }

    pub fn saved_state(&self) -> SavedTableState {
        self.state.read().saved()
    }

    /// Current state without subscribing the caller to changes.
    pub fn snapshot(&self) -> TableState {
        self.state.peek().clone()
    }

    pub fn dispatch(&self, action: TableAction) {
        dispatch(self.state, action);
    }
}

pub fn use_table_handle(page_size: Option<usize>) -> TableHandle {
    let state = use_signal(|| TableState::with_page_size(page_size));
    TableHandle { state }
}

fn dispatch(mut state: Signal<TableState>, action: TableAction) {
    let next = state.peek().reduce(action);
    let changed = next != *state.peek();
    if changed {
        state.set(next);
    }
}

pub fn default_actions() -> Vec<ActionKind> {
    vec![ActionKind::View, ActionKind::Edit, ActionKind::Delete]
}

pub fn table_header_cell_style(sortable: bool) -> String {
    let cursor = if sortable { "pointer" } else { "default" };
    format!(
        "position: sticky; top: 0; background: #f4f6fa; border: 1px solid #ccc; padding: 6px 8px; text-align: left; cursor: {cursor}; white-space: nowrap;"
    )
}

pub fn table_body_cell_style() -> &'static str {
    "border: 1px solid #ddd; padding: 6px 8px; vertical-align: top;"
}

fn sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => "",
    }
}

/// Generic table over JSON rows: search, column filters, sort, paging and row
/// actions. The parent owns the rows and handles every action.
///
/// `page_size` seeds the table's own state. With a `handle`, the state lives in
/// the handle and its page size comes from `use_table_handle(page_size)`, so the
/// prop is not consulted.
#[component]
pub fn DataTable(
    rows: Vec<Row>,
    columns: Vec<ColumnDef>,
    #[props(default)] filters: Vec<FilterDef>,
    page_size: Option<usize>,
    access: Option<AccessPolicy>,
    entity_type: Option<String>,
    #[props(default = default_actions())] actions: Vec<ActionKind>,
    #[props(default)] custom_actions: Vec<String>,
    handle: Option<TableHandle>,
    on_action: EventHandler<RowActionEvent>,
    on_row_click: Option<EventHandler<Row>>,
) -> Element {
    let local_state = use_signal(|| TableState::with_page_size(page_size));
    let state = handle.map(|handle| handle.state).unwrap_or(local_state);

    let current = state.read().clone();
    let view = build_view(&rows, &current);

    let filtered_rows = view.filtered_rows;
    use_effect(use_reactive((&filtered_rows,), move |(filtered_rows,)| {
        dispatch(state, TableAction::Clamp { row_count: filtered_rows });
    }));

    let search = current.search.clone();
    let page_label = format!("Page {} of {}", view.page + 1, view.page_count);
    let count_label = format!("{} of {} rows", view.filtered_rows, view.total_rows);
    let page = view.page;
    let has_prev = view.page > 0;
    let has_next = view.page + 1 < view.page_count;
    let page_size_value = current
        .page_size
        .map(|size| size.to_string())
        .unwrap_or_else(|| ALL_PAGES_VALUE.to_string());
    let action_column = !actions.is_empty() || !custom_actions.is_empty();

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 8px;",
            div { style: "display: flex; flex-wrap: wrap; align-items: center; gap: 8px;",
                input {
                    r#type: "search",
                    placeholder: "Search",
                    value: "{search}",
                    style: "padding: 4px 8px; min-width: 220px;",
                    oninput: move |event| dispatch(state, TableAction::SetSearch(event.value())),
                }
                {filters.iter().map(|def| {
                    let column = def.column_id.clone();
                    let key = def.column_id.clone();
                    let value = current.filters.get(&def.column_id).cloned().unwrap_or_default();
                    rsx!(
                        FilterControl {
                            key: "{key}",
                            def: def.clone(),
                            options: build_options(&def.column_id, &rows),
                            value: value,
                            on_change: move |value: FilterValue| {
                                dispatch(state, TableAction::SetFilter { column: column.clone(), value });
                            },
                        }
                    )
                })}
                button {
                    onclick: move |_| dispatch(state, TableAction::ResetFilters),
                    "Clear filters"
                }
            }

            div { style: "overflow: auto;",
                table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                    thead {
                        tr {
                            {columns.iter().map(|column| {
                                let id = column.id.clone();
                                let sortable = column.sortable;
                                let header = format!(
                                    "{}{}",
                                    column.header,
                                    sort_indicator(current.sort.direction_for(&column.id))
                                );
                                rsx!(
                                    th {
                                        style: "{table_header_cell_style(sortable)}",
                                        onclick: move |_| {
                                            if sortable {
                                                dispatch(state, TableAction::ToggleSort(id.clone()));
                                            }
                                        },
                                        "{header}"
                                    }
                                )
                            })}
                            if action_column {
                                th { style: "{table_header_cell_style(false)}", "Actions" }
                            }
                        }
                    }
                    tbody {
                        {view.rows.iter().enumerate().map(|(idx, row)| {
                            let clicked = (*row).clone();
                            let cells: Vec<String> =
                                columns.iter().map(|column| column.cell_text(row)).collect();
                            let bindings = bindings_for(row, &actions, &custom_actions, access.as_ref());
                            let owned_row = (*row).clone();
                            let access = access.clone();
                            let entity_type = entity_type.clone();
                            rsx!(
                                tr {
                                    key: "{idx}",
                                    style: "cursor: default;",
                                    onclick: move |_| {
                                        if let Some(handler) = on_row_click {
                                            handler.call(clicked.clone());
                                        }
                                    },
                                    {cells.into_iter().map(|text| rsx!(
                                        td { style: "{table_body_cell_style()}", "{text}" }
                                    ))}
                                    if action_column {
                                        td { style: "{table_body_cell_style()} white-space: nowrap;",
                                            {bindings.into_iter().map(|binding| {
                                                let row = owned_row.clone();
                                                let access = access.clone();
                                                let entity_type = entity_type.clone();
                                                let kind = binding.kind.clone();
                                                let label = binding.kind.label();
                                                rsx!(
                                                    button {
                                                        style: "margin-right: 4px;",
                                                        disabled: binding.disabled,
                                                        onclick: move |event| {
                                                            event.stop_propagation();
                                                            let handler = |action: RowActionEvent| on_action.call(action);
                                                            if let Err(err) = dispatch_action(
                                                                &handler,
                                                                kind.clone(),
                                                                &row,
                                                                entity_type.as_deref(),
                                                                access.as_ref(),
                                                            ) {
                                                                tracing::warn!(%err, "row action not dispatched");
                                                            }
                                                        },
                                                        "{label}"
                                                    }
                                                )
                                            })}
                                        }
                                    }
                                }
                            )
                        })}
                    }
                }
            }

            div { style: "display: flex; align-items: center; gap: 8px;",
                button {
                    disabled: !has_prev,
                    onclick: move |_| dispatch(state, TableAction::GoToPage(page.saturating_sub(1))),
                    "Previous"
                }
                span { "{page_label}" }
                button {
                    disabled: !has_next,
                    onclick: move |_| dispatch(state, TableAction::GoToPage(page + 1)),
                    "Next"
                }
                span { style: "color: #666;", "{count_label}" }
                select {
                    value: "{page_size_value}",
                    onchange: move |event| {
                        let value = event.value();
                        let page_size = if value == ALL_PAGES_VALUE {
                            None
                        } else {
                            value.parse::<usize>().ok()
                        };
                        dispatch(state, TableAction::SetPageSize(page_size));
                    },
                    {PAGE_SIZE_CHOICES.iter().map(|size| {
                        let value = size.to_string();
                        let selected = value == page_size_value;
                        rsx!(option { value: "{value}", selected: selected, "{value} / page" })
                    })}
                    option {
                        value: ALL_PAGES_VALUE,
                        selected: current.page_size.is_none(),
                        "All"
                    }
                }
            }
        }
    }
}

#[component]
fn FilterControl(
    def: FilterDef,
    options: Vec<FilterOption>,
    value: FilterValue,
    on_change: EventHandler<FilterValue>,
) -> Element {
    let placeholder = def.placeholder.clone();
    match def.kind {
        FilterKind::Select => {
            let selected = match &value {
                FilterValue::Exact(text) => text.clone(),
                _ => String::new(),
            };
            rsx! {
                select {
                    value: "{selected}",
                    onchange: move |event| on_change.call(FilterValue::exact(event.value())),
                    option { value: "", "{placeholder}" }
                    {options.iter().map(|opt| {
                        let value = opt.value.clone();
                        let label = opt.label.clone();
                        let is_selected = value == selected;
                        rsx!(option { value: "{value}", selected: is_selected, "{label}" })
                    })}
                }
            }
        }
        FilterKind::MultiSelect => {
            let selected = match &value {
                FilterValue::MultiSelect(items) => items.clone(),
                _ => Vec::new(),
            };
            let summary_text = if selected.is_empty() {
                placeholder
            } else {
                selected
                    .iter()
                    .map(|item| item.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            rsx! {
                details { style: "position: relative;",
                    summary { style: "cursor: pointer; padding: 4px 8px; border: 1px solid #bbb; border-radius: 6px;",
                        "{summary_text}"
                    }
                    div {
                        style: "position: absolute; min-width: 200px; max-height: 280px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;",
                        {options.iter().map(|opt| {
                            let checked = selected.iter().any(|item| item.value == opt.value);
                            let next = toggle_option(&selected, opt);
                            let option_label = opt.label.clone();
                            rsx!(
                                label {
                                    style: "display: flex; align-items: center; gap: 8px; padding: 4px;",
                                    input {
                                        r#type: "checkbox",
                                        checked: checked,
                                        onclick: move |_| {
                                            on_change.call(next.clone());
                                        }
                                    }
                                    span { "{option_label}" }
                                }
                            )
                        })}
                    }
                }
            }
        }
        FilterKind::DateRange => {
            let (start, end) = match &value {
                FilterValue::DateRange { start, end } => (*start, *end),
                _ => (None, None),
            };
            let start_text = start
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let end_text = end
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            rsx! {
                span { style: "display: inline-flex; align-items: center; gap: 4px;",
                    span { "{placeholder}" }
                    input {
                        r#type: "date",
                        value: "{start_text}",
                        oninput: move |event| {
                            on_change.call(range_or_empty(parse_date_text(&event.value()), end));
                        }
                    }
                    span { "–" }
                    input {
                        r#type: "date",
                        value: "{end_text}",
                        oninput: move |event| {
                            on_change.call(range_or_empty(start, parse_date_text(&event.value())));
                        }
                    }
                }
            }
        }
    }
}

fn range_or_empty(
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
) -> FilterValue {
    if start.is_none() && end.is_none() {
        FilterValue::Empty
    } else {
        FilterValue::DateRange { start, end }
    }
}
