use std::cmp::Ordering;

use serde_json::Value;

use crate::domain::entities::row::{stringify, ColumnPath, Row};
use crate::domain::entities::table::{
    clamp_page, page_count, SortDirection, SortState, TableState, TableView,
};
use crate::usecase::services::predicate_service::filter_rows;

/// Stable sort of already-filtered rows; ties keep their filtered order.
pub fn sort_rows<'a>(rows: &mut [&'a Row], sort: &SortState) {
    let Some((column, direction)) = sort.active() else {
        return;
    };
    let path = ColumnPath::parse(column);
    rows.sort_by(|left, right| {
        let ordering = compare_values(path.resolve(left), path.resolve(right));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Sort key of one cell. Types rank null < bool < number < text so mixed
/// columns still compare as a total order.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Null,
    Bool(bool),
    Number(f64),
    Text { folded: String, raw: String },
}

impl SortKey {
    fn of(value: Option<&Value>) -> SortKey {
        match value {
            None | Some(Value::Null) => SortKey::Null,
            Some(Value::Bool(flag)) => SortKey::Bool(*flag),
            Some(Value::Number(number)) => match number.as_f64() {
                Some(number) if number.is_finite() => SortKey::Number(number),
                _ => SortKey::text(number.to_string()),
            },
            // "12" sorts with 12 so backends mixing both still order numerically.
            Some(Value::String(text)) => match text.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => SortKey::Number(number),
                _ => SortKey::text(text.clone()),
            },
            Some(other) => SortKey::text(stringify(Some(other))),
        }
    }

    fn text(raw: String) -> SortKey {
        SortKey::Text {
            folded: raw.to_lowercase(),
            raw,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Text { .. } => 3,
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Bool(left), SortKey::Bool(right)) => left.cmp(right),
            (SortKey::Number(left), SortKey::Number(right)) => left.total_cmp(right),
            (
                SortKey::Text { folded: left, raw: left_raw },
                SortKey::Text { folded: right, raw: right_raw },
            ) => left.cmp(right).then_with(|| left_raw.cmp(right_raw)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Absent/null first, then booleans, numbers (numeric strings included) and
/// case-insensitive text.
pub fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    SortKey::of(left).compare(&SortKey::of(right))
}

/// Rows of the current page with the page index clamped to the page count.
pub fn paginate<'a>(rows: &[&'a Row], page: usize, page_size: Option<usize>) -> (Vec<&'a Row>, usize, usize) {
    let pages = page_count(rows.len(), page_size);
    let page = clamp_page(page, pages);
    let visible = match page_size.filter(|size| *size > 0) {
        Some(size) => rows.iter().skip(page * size).take(size).copied().collect(),
        None => rows.to_vec(),
    };
    (visible, page, pages)
}

/// Full pipeline: filter, sort, then slice the requested page.
pub fn build_view<'a>(rows: &'a [Row], state: &TableState) -> TableView<'a> {
    let filtered = ordered_rows(rows, state);
    let filtered_rows = filtered.len();
    let (visible, page, page_count) = paginate(&filtered, state.page, state.page_size);

    TableView {
        rows: visible,
        page,
        page_count,
        total_rows: rows.len(),
        filtered_rows,
    }
}

/// Filtered and sorted rows across every page, for export.
pub fn ordered_rows<'a>(rows: &'a [Row], state: &TableState) -> Vec<&'a Row> {
    let mut filtered = filter_rows(rows, &state.search, &state.filters);
    sort_rows(&mut filtered, &state.sort);
    filtered
}
