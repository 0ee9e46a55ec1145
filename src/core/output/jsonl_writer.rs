//! JSON Lines (JSONL) snapshot writer.
//!
//! One row per line; suited to large tables and line-oriented tooling.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::core::models::{EnrichedMessage, OutputConfig};
use crate::error::Result;

/// Writes rows to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"tweet_id":1,"author_id":"115712","inbound":true,"created_at":"2017-10-31T22:10:47Z","text":"hi","conversation_id":0,"turn":0}
/// {"tweet_id":2,"author_id":"sprintcare","inbound":false,"created_at":"2017-10-31T22:11:02Z","text":"hello","conversation_id":0,"turn":1}
/// ```
///
/// `config.pretty` is ignored; every row stays on one line.
pub fn write_jsonl(
    rows: &[EnrichedMessage],
    output_path: impl AsRef<Path>,
    _config: &OutputConfig,
) -> Result<()> {
    let path = output_path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_lines(rows, &mut writer)?;
    writer.flush()?;
    info!(rows = rows.len(), path = %path.display(), "Wrote JSONL snapshot");
    Ok(())
}

/// Converts rows to a JSONL string.
pub fn to_jsonl(rows: &[EnrichedMessage], _config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(rows, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(rows: &[EnrichedMessage], writer: &mut W) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut *writer, row)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
