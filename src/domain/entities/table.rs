use crate::domain::entities::filter::{ColumnFilters, FilterValue};
use crate::domain::entities::row::{resolve, stringify, Row};

/// Identifies one table instance for persisted state, e.g. `symbols`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey(pub String);

impl From<&str> for TableKey {
    fn from(value: &str) -> Self {
        TableKey(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Single active sort column. `direction == None` keeps the filtered order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction: Some(direction),
        }
    }

    /// Same column cycles asc -> desc -> none; another column starts at asc.
    pub fn toggled(&self, column: &str) -> SortState {
        if self.column.as_deref() != Some(column) {
            return SortState::by(column, SortDirection::Asc);
        }
        match self.direction {
            None => SortState::by(column, SortDirection::Asc),
            Some(SortDirection::Asc) => SortState::by(column, SortDirection::Desc),
            Some(SortDirection::Desc) => SortState::default(),
        }
    }

    pub fn active(&self) -> Option<(&str, SortDirection)> {
        match (&self.column, self.direction) {
            (Some(column), Some(direction)) => Some((column.as_str(), direction)),
            _ => None,
        }
    }

    pub fn direction_for(&self, column: &str) -> Option<SortDirection> {
        self.active()
            .filter(|(active, _)| *active == column)
            .map(|(_, direction)| direction)
    }
}

/// Persistable part of the table state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedTableState {
    pub search: String,
    pub filters: ColumnFilters,
    pub sort: SortState,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableState {
    pub search: String,
    pub filters: ColumnFilters,
    pub sort: SortState,
    pub page: usize,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    SetSearch(String),
    SetFilter { column: String, value: FilterValue },
    ResetFilters,
    ToggleSort(String),
    GoToPage(usize),
    SetPageSize(Option<usize>),
    Restore(SavedTableState),
    Clamp { row_count: usize },
}

impl TableState {
    pub fn with_page_size(page_size: Option<usize>) -> Self {
        Self {
            page_size: normalize_page_size(page_size),
            ..Self::default()
        }
    }

    pub fn reduce(&self, action: TableAction) -> TableState {
        let mut next = self.clone();
        match action {
            TableAction::SetSearch(search) => next.search = search,
            TableAction::SetFilter { column, value } => {
                if value == FilterValue::Empty {
                    next.filters.remove(&column);
                } else {
                    next.filters.set(column, value);
                }
            }
            TableAction::ResetFilters => {
                next.search.clear();
                next.filters = ColumnFilters::new();
            }
            TableAction::ToggleSort(column) => next.sort = self.sort.toggled(&column),
            TableAction::GoToPage(page) => next.page = page,
            TableAction::SetPageSize(page_size) => {
                next.page_size = normalize_page_size(page_size);
                next.page = 0;
            }
            TableAction::Restore(saved) => {
                next.search = saved.search;
                next.filters = saved.filters;
                next.sort = saved.sort;
                next.page_size = normalize_page_size(saved.page_size);
                next.page = 0;
            }
            TableAction::Clamp { row_count } => {
                next.page = clamp_page(self.page, page_count(row_count, self.page_size));
            }
        }
        next
    }

    pub fn saved(&self) -> SavedTableState {
        SavedTableState {
            search: self.search.clone(),
            filters: self.filters.clone(),
            sort: self.sort.clone(),
            page_size: self.page_size,
        }
    }
}

fn normalize_page_size(page_size: Option<usize>) -> Option<usize> {
    page_size.filter(|size| *size > 0)
}

/// A missing page size renders every row on one page.
pub fn page_count(row_count: usize, page_size: Option<usize>) -> usize {
    match normalize_page_size(page_size) {
        Some(size) => row_count.div_ceil(size).max(1),
        None => 1,
    }
}

pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.min(page_count.saturating_sub(1))
}

/// Column definition supplied by the parent view.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub id: String,
    pub header: String,
    pub sortable: bool,
    pub format: Option<fn(&Row) -> String>,
}

impl ColumnDef {
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            sortable: true,
            format: None,
        }
    }

    pub fn unsorted(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn with_format(mut self, format: fn(&Row) -> String) -> Self {
        self.format = Some(format);
        self
    }

    pub fn cell_text(&self, row: &Row) -> String {
        match self.format {
            Some(format) => format(row),
            None => stringify(resolve(row, &self.id)),
        }
    }
}

/// One rendered page of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub rows: Vec<&'a Row>,
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
    pub filtered_rows: usize,
}
