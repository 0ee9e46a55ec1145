//! CSV snapshot writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::core::models::{EnrichedMessage, OutputConfig};
use crate::error::Result;

/// Snapshot column order.
pub(crate) const SNAPSHOT_COLUMNS: [&str; 7] = [
    "tweet_id",
    "author_id",
    "inbound",
    "created_at",
    "text",
    "conversation_id",
    "turn",
];

/// Writes rows to a CSV file.
///
/// # Format
/// - Delimiter: from `OutputConfig` (default `,`)
/// - Columns: `tweet_id`, `author_id`, `inbound`, `created_at`, `text`,
///   `conversation_id`, `turn`
/// - Timestamps: RFC 3339, UTC
/// - The header row is written even when `rows` is empty
pub fn write_csv(
    rows: &[EnrichedMessage],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path)?;
    write_rows(rows, file, config)?;
    info!(rows = rows.len(), path = %path.display(), "Wrote CSV snapshot");
    Ok(())
}

/// Converts rows to a CSV string.
pub fn to_csv(rows: &[EnrichedMessage], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_rows(rows, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_rows<W: Write>(rows: &[EnrichedMessage], sink: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(false)
        .from_writer(sink);

    writer.write_record(SNAPSHOT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
