//! Rendering and export of ranked report rows.
//!
//! Supports a console table, JSON serialization and CSV export.

use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;
use tabled::Table;
use tabled::settings::Style;
use tracing::debug;

use crate::analyzers::types::{Report, ReportRow};
use crate::error::{ReportError, Result};

/// Renders rows as a console table with one column per report field.
pub fn render_table(rows: &[ReportRow]) -> String {
    Table::new(rows).with(Style::psql()).to_string()
}

/// Serializes a [`Report`] as pretty-printed JSON.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes rows to a CSV file at `path`, replacing any existing file.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV report");

    let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| ReportError::io(path, e))?;

    Ok(())
}
