//! JSON snapshot writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::core::models::{EnrichedMessage, OutputConfig};
use crate::error::Result;

/// Writes rows to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"tweet_id":1,"author_id":"sprintcare","inbound":false,"created_at":"2017-10-31T22:10:47Z","text":"hi","conversation_id":0,"turn":0}
/// ]
/// ```
pub fn write_json(
    rows: &[EnrichedMessage],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let path = output_path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    if config.pretty {
        serde_json::to_writer_pretty(&mut writer, rows)?;
    } else {
        serde_json::to_writer(&mut writer, rows)?;
    }
    writer.flush()?;
    info!(rows = rows.len(), path = %path.display(), "Wrote JSON snapshot");
    Ok(())
}

/// Converts rows to a JSON array string.
pub fn to_json(rows: &[EnrichedMessage], config: &OutputConfig) -> Result<String> {
    let json = if config.pretty {
        serde_json::to_string_pretty(rows)?
    } else {
        serde_json::to_string(rows)?
    };
    Ok(json)
}
