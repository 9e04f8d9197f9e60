use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::row::Row;
use crate::domain::entities::table::ColumnDef;

pub fn write_rows_csv<W: Write>(writer: W, columns: &[ColumnDef], rows: &[&Row]) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(columns.iter().map(|column| column.header.as_str()))
        .context("failed to write csv header")?;

    for row in rows {
        writer
            .write_record(columns.iter().map(|column| column.cell_text(row)))
            .context("failed to write csv record")?;
    }

    writer.flush().context("failed to flush csv writer")?;
    Ok(rows.len())
}

pub fn export_rows_to_csv(csv_path: &Path, columns: &[ColumnDef], rows: &[&Row]) -> Result<usize> {
    let file = std::fs::File::create(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    let written = write_rows_csv(file, columns, rows)?;
    tracing::info!(path = %csv_path.display(), rows = written, "exported rows to csv");
    Ok(written)
}
