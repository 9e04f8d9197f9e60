use serde_json::{Map, Value};

/// One record of the displayed dataset. Rows carry no fixed schema.
pub type Row = Map<String, Value>;

/// Column id split into path segments, e.g. `company_profile.company_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnPath {
    key: String,
    segments: Vec<String>,
}

impl ColumnPath {
    pub fn parse(column_id: &str) -> Self {
        Self {
            key: column_id.to_string(),
            segments: column_id.split('.').map(str::to_string).collect(),
        }
    }

    /// Walks nested objects when the first segment holds an object, otherwise
    /// falls back to the literal column key (fields named `a.b` stay reachable).
    pub fn resolve<'a>(&self, row: &'a Row) -> Option<&'a Value> {
        if self.segments.len() > 1 {
            if let Some(Value::Object(parent)) = row.get(&self.segments[0]) {
                return resolve_in(parent, &self.segments[1..]);
            }
        }
        row.get(&self.key)
    }
}

fn resolve_in<'a>(object: &'a Map<String, Value>, segments: &[String]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let value = object.get(first)?;
    if rest.is_empty() {
        return Some(value);
    }
    match value {
        Value::Object(child) => resolve_in(child, rest),
        _ => None,
    }
}

pub fn resolve<'a>(row: &'a Row, column_id: &str) -> Option<&'a Value> {
    ColumnPath::parse(column_id).resolve(row)
}

/// Display form of a cell value. Absent and `null` become the empty string.
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => format_number(number),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| stringify(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(object @ Value::Object(_)) => object.to_string(),
    }
}

fn format_number(number: &serde_json::Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    number
        .as_f64()
        .map(|float| float.to_string())
        .unwrap_or_else(|| number.to_string())
}

/// Depth-first leaf scalars of a row, through nested objects and arrays.
pub fn flatten_leaves(row: &Row) -> Vec<&Value> {
    let mut leaves = Vec::new();
    for value in row.values() {
        collect_leaves(value, &mut leaves);
    }
    leaves
}

fn collect_leaves<'a>(value: &'a Value, leaves: &mut Vec<&'a Value>) {
    match value {
        Value::Object(object) => {
            for child in object.values() {
                collect_leaves(child, leaves);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_leaves(item, leaves);
            }
        }
        scalar => leaves.push(scalar),
    }
}
