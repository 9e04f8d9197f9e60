use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::entities::row::Row;

/// Parses a JSON array of objects. A top-level `{"data": [...]}` envelope, as
/// returned by the listing endpoints, is unwrapped.
pub fn parse_rows(text: &str) -> Result<Vec<Row>> {
    let document: Value = serde_json::from_str(text).context("failed to parse json rows")?;
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(items)) => items,
            _ => anyhow::bail!("json document must be an array of rows or contain a `data` array"),
        },
        _ => anyhow::bail!("json document must be an array of rows"),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(row) => Ok(row),
            other => anyhow::bail!("row #{idx} is not an object: {other}"),
        })
        .collect()
}

pub fn load_rows_from_json(json_path: &Path) -> Result<Vec<Row>> {
    let text = std::fs::read_to_string(json_path)
        .with_context(|| format!("failed to read json: {}", json_path.display()))?;
    let rows = parse_rows(&text)
        .with_context(|| format!("failed to load rows from {}", json_path.display()))?;
    tracing::info!(path = %json_path.display(), rows = rows.len(), "loaded rows");
    Ok(rows)
}
