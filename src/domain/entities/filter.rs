use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

use crate::domain::entities::row::stringify;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let label = display_label(&value);
        Self { value, label }
    }
}

fn display_label(value: &str) -> String {
    match value {
        "true" => "Yes".to_string(),
        "false" => "No".to_string(),
        other => other.to_string(),
    }
}

/// Column constraint, resolved once from the widget's runtime shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    #[default]
    Empty,
    Exact(String),
    MultiSelect(Vec<FilterOption>),
    DateRange {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl FilterValue {
    pub fn exact(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            FilterValue::Empty
        } else {
            FilterValue::Exact(value)
        }
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::MultiSelect(values.into_iter().map(FilterOption::new).collect())
    }

    pub fn date_range(start: &str, end: &str) -> Self {
        FilterValue::DateRange {
            start: parse_date_text(start),
            end: parse_date_text(end),
        }
    }

    /// Inactive values are pruned before evaluation.
    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::Empty => false,
            FilterValue::Exact(value) => !value.is_empty(),
            FilterValue::MultiSelect(_) => true,
            FilterValue::DateRange { start, end } => start.is_some() || end.is_some(),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FilterValue::Empty,
            Value::String(text) => FilterValue::exact(text.clone()),
            Value::Array(items) => FilterValue::MultiSelect(
                items.iter().filter_map(option_from_json).collect(),
            ),
            Value::Object(object)
                if object.contains_key("startDate") || object.contains_key("endDate") =>
            {
                FilterValue::DateRange {
                    start: object.get("startDate").and_then(parse_date_value),
                    end: object.get("endDate").and_then(parse_date_value),
                }
            }
            other => FilterValue::exact(stringify(Some(other))),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::Empty => Value::String(String::new()),
            FilterValue::Exact(value) => Value::String(value.clone()),
            FilterValue::MultiSelect(options) => Value::Array(
                options
                    .iter()
                    .map(|option| json!({"value": option.value, "label": option.label}))
                    .collect(),
            ),
            FilterValue::DateRange { start, end } => json!({
                "startDate": start.map(|date| date.format("%Y-%m-%d").to_string()),
                "endDate": end.map(|date| date.format("%Y-%m-%d").to_string()),
            }),
        }
    }
}

/// Flips `option` in a multi-select. Clearing the last box yields `Empty`, so
/// the column drops out of the filter map instead of lingering as `[]`.
pub fn toggle_option(selected: &[FilterOption], option: &FilterOption) -> FilterValue {
    let mut next: Vec<FilterOption> = selected
        .iter()
        .filter(|item| item.value != option.value)
        .cloned()
        .collect();
    if next.len() == selected.len() {
        next.push(option.clone());
    }
    if next.is_empty() {
        FilterValue::Empty
    } else {
        FilterValue::MultiSelect(next)
    }
}

fn option_from_json(item: &Value) -> Option<FilterOption> {
    match item {
        Value::Null => None,
        Value::Object(object) => {
            let value = stringify(object.get("value"));
            let label = object
                .get("label")
                .map(|label| stringify(Some(label)))
                .unwrap_or_else(|| display_label(&value));
            Some(FilterOption { value, label })
        }
        scalar => Some(FilterOption::new(stringify(Some(scalar)))),
    }
}

/// Column id -> filter value. Ordered so evaluation and persistence are stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnFilters(BTreeMap<String, FilterValue>);

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl Into<String>, value: FilterValue) {
        self.0.insert(column.into(), value);
    }

    pub fn with(mut self, column: impl Into<String>, value: FilterValue) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&FilterValue> {
        self.0.get(column)
    }

    pub fn remove(&mut self, column: &str) -> Option<FilterValue> {
        self.0.remove(column)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    pub fn normalized(&self) -> ColumnFilters {
        ColumnFilters(
            self.0
                .iter()
                .filter(|(_, value)| value.is_active())
                .map(|(column, value)| (column.clone(), value.clone()))
                .collect(),
        )
    }

    pub fn from_json(value: &Value) -> Self {
        let mut filters = ColumnFilters::new();
        if let Value::Object(object) = value {
            for (column, raw) in object {
                filters.set(column.clone(), FilterValue::from_json(raw));
            }
        }
        filters
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(column, value)| (column.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, FilterValue)> for ColumnFilters {
    fn from_iter<T: IntoIterator<Item = (String, FilterValue)>>(iter: T) -> Self {
        ColumnFilters(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Select,
    MultiSelect,
    DateRange,
}

/// Declares a filter widget for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDef {
    pub column_id: String,
    pub kind: FilterKind,
    pub placeholder: String,
}

impl FilterDef {
    pub fn new(column_id: impl Into<String>, kind: FilterKind) -> Self {
        let column_id = column_id.into();
        let placeholder = format!("All {column_id}");
        Self {
            column_id,
            kind,
            placeholder,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Day-granularity date of a cell value; numbers are epoch milliseconds.
pub fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(text) => parse_date_text(text),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|timestamp| timestamp.date_naive()),
        _ => None,
    }
}

pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    if let Some(date) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(date.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
