use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::domain::entities::filter::ColumnFilters;
use crate::domain::entities::table::{SavedTableState, SortDirection, SortState};
use crate::domain::error::TableError;
use crate::infra::sqlite::schema::open_connection;

pub fn save_table_state(db_path: &Path, table_key: &str, state: &SavedTableState) -> Result<()> {
    let conn = open_connection(db_path)?;
    let filters = serde_json::to_string(&state.filters.to_json())
        .context("failed to serialize column filters")?;
    let sort_dir = state.sort.direction.map(SortDirection::as_str);
    let page_size = state.page_size.map(|size| size as i64);

    conn.execute(
        "INSERT INTO table_state(table_key, search, filters, sort_col, sort_dir, page_size, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, CURRENT_TIMESTAMP)
         ON CONFLICT(table_key) DO UPDATE SET
             search = excluded.search,
             filters = excluded.filters,
             sort_col = excluded.sort_col,
             sort_dir = excluded.sort_dir,
             page_size = excluded.page_size,
             updated_at = excluded.updated_at",
        params![
            table_key,
            state.search,
            filters,
            state.sort.column,
            sort_dir,
            page_size
        ],
    )
    .with_context(|| format!("failed to save table state: {table_key}"))?;
    Ok(())
}

type StoredStateRow = (String, String, Option<String>, Option<String>, Option<i64>);

pub fn load_table_state(db_path: &Path, table_key: &str) -> Result<Option<SavedTableState>> {
    let conn = open_connection(db_path)?;
    let stored: Option<StoredStateRow> = conn
        .query_row(
            "SELECT search, filters, sort_col, sort_dir, page_size
             FROM table_state
             WHERE table_key = ?1",
            [table_key],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
        )
        .optional()
        .with_context(|| format!("failed to query table state: {table_key}"))?;

    let Some((search, filters, sort_col, sort_dir, page_size)) = stored else {
        return Ok(None);
    };

    let filters_json: serde_json::Value =
        serde_json::from_str(&filters).context("failed to parse stored column filters")?;
    let direction = match sort_dir {
        Some(text) => Some(
            SortDirection::parse(&text).ok_or(TableError::InvalidSortDirection(text))?,
        ),
        None => None,
    };
    let page_size = match page_size {
        Some(size) if size <= 0 => return Err(TableError::InvalidPageSize(size).into()),
        Some(size) => Some(size as usize),
        None => None,
    };

    Ok(Some(SavedTableState {
        search,
        filters: ColumnFilters::from_json(&filters_json),
        sort: SortState {
            column: sort_col,
            direction,
        },
        page_size,
    }))
}

pub fn clear_table_state(db_path: &Path, table_key: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute("DELETE FROM table_state WHERE table_key = ?1", [table_key])
        .with_context(|| format!("failed to clear table state: {table_key}"))?;
    Ok(())
}

pub fn list_table_keys(db_path: &Path) -> Result<Vec<String>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT table_key
             FROM table_state
             ORDER BY table_key ASC",
        )
        .context("failed to prepare table key query")?;

    let keys = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("failed to query table keys")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect table keys")?;

    Ok(keys)
}
