use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::entities::filter::{parse_date_value, ColumnFilters, FilterOption, FilterValue};
use crate::domain::entities::row::{flatten_leaves, stringify, ColumnPath, Row};

/// Compiled column constraint: the path is split once, not per row.
#[derive(Debug, Clone)]
struct ColumnPredicate {
    path: ColumnPath,
    value: FilterValue,
}

/// Filters `rows` by a free-text `search` term and per-column `filters`.
///
/// With no active constraints every row is returned in its original order.
/// With column filters present, each row must satisfy all of them and the
/// search term only narrows plain-string (exact) filters. Without column
/// filters the search term is matched against every leaf value of the row.
pub fn filter_rows<'a>(rows: &'a [Row], search: &str, filters: &ColumnFilters) -> Vec<&'a Row> {
    if rows.is_empty() {
        return Vec::new();
    }

    let search = search.trim();
    let filters = filters.normalized();

    if search.is_empty() && filters.is_empty() {
        return rows.iter().collect();
    }

    let needle = search.to_lowercase();
    let kept: Vec<&Row> = if filters.is_empty() {
        rows.iter()
            .filter(|row| row_contains_text(row, &needle))
            .collect()
    } else {
        let predicates: Vec<ColumnPredicate> = filters
            .iter()
            .map(|(column, value)| ColumnPredicate {
                path: ColumnPath::parse(column),
                value: value.clone(),
            })
            .collect();
        rows.iter()
            .filter(|row| {
                predicates
                    .iter()
                    .all(|predicate| column_matches(row, predicate, &needle))
            })
            .collect()
    };

    tracing::debug!(
        total = rows.len(),
        kept = kept.len(),
        active_filters = filters.len(),
        "filtered table rows"
    );
    kept
}

/// Row passes when any flattened leaf contains the lowercased needle.
pub fn row_contains_text(row: &Row, needle: &str) -> bool {
    flatten_leaves(row)
        .into_iter()
        .any(|leaf| stringify(Some(leaf)).to_lowercase().contains(needle))
}

fn column_matches(row: &Row, predicate: &ColumnPredicate, needle: &str) -> bool {
    let cell = predicate.path.resolve(row);
    match (&predicate.value, cell) {
        (FilterValue::MultiSelect(options), _) if options.is_empty() => true,
        (FilterValue::Exact(expected), Some(Value::Array(items))) => {
            items.iter().any(|item| stringify(Some(item)) == *expected)
        }
        (FilterValue::MultiSelect(options), Some(Value::Array(items))) => items
            .iter()
            .any(|item| option_selected(options, &stringify(Some(item)))),
        (FilterValue::MultiSelect(options), cell) => option_selected(options, &stringify(cell)),
        (FilterValue::DateRange { start, end }, cell) => {
            date_in_range(cell.and_then(parse_date_value), *start, *end)
        }
        (FilterValue::Exact(expected), cell) => exact_matches(&stringify(cell), expected, needle),
        (FilterValue::Empty, _) => true,
    }
}

fn option_selected(options: &[FilterOption], value: &str) -> bool {
    options.iter().any(|option| option.value == value)
}

/// Case-sensitive equality, narrowed further by the search needle if any.
fn exact_matches(actual: &str, expected: &str, needle: &str) -> bool {
    if actual != expected {
        return false;
    }
    needle.is_empty() || actual.to_lowercase().contains(needle)
}

/// Both bounds inclusive; an unparsable cell never matches.
fn date_in_range(date: Option<NaiveDate>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    let Some(date) = date else {
        return false;
    };
    start.map_or(true, |start| date >= start) && end.map_or(true, |end| date <= end)
}
