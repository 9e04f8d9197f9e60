use std::collections::HashSet;

use serde_json::Value;

use crate::domain::entities::filter::FilterOption;
use crate::domain::entities::row::{stringify, ColumnPath, Row};

/// Distinct values of `column_id` across `rows`, in first-seen order.
///
/// Array cells contribute each element; `null`, absent values and nested
/// objects are skipped.
pub fn build_options(column_id: &str, rows: &[Row]) -> Vec<FilterOption> {
    let path = ColumnPath::parse(column_id);
    let mut seen = HashSet::new();
    let mut options = Vec::new();

    let mut push = |value: &Value| {
        if matches!(value, Value::Null | Value::Object(_) | Value::Array(_)) {
            return;
        }
        let text = stringify(Some(value));
        if seen.insert(text.clone()) {
            options.push(FilterOption::new(text));
        }
    };

    for row in rows {
        match path.resolve(row) {
            Some(Value::Array(items)) => items.iter().for_each(&mut push),
            Some(value) => push(value),
            None => {}
        }
    }

    options
}
