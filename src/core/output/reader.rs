//! Snapshot readers.
//!
//! Load a table written by the snapshot writers back into memory.

use std::fs::File;
#[cfg(feature = "json-output")]
use std::io::BufRead;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::core::models::{EnrichedMessage, OutputConfig};
use crate::error::{Result, ThreadpackError};

/// Reads a CSV snapshot.
pub fn read_csv(path: impl AsRef<Path>, config: &OutputConfig) -> Result<Vec<EnrichedMessage>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let rows = decode_csv(BufReader::new(file), config).map_err(|e| {
        ThreadpackError::snapshot_parse("CSV snapshot", e, Some(path.to_path_buf()))
    })?;
    info!(rows = rows.len(), path = %path.display(), "Loaded CSV snapshot");
    Ok(rows)
}

/// Parses a CSV snapshot from a string.
pub fn from_csv(content: &str, config: &OutputConfig) -> Result<Vec<EnrichedMessage>> {
    decode_csv(content.as_bytes(), config)
        .map_err(|e| ThreadpackError::snapshot_parse("CSV snapshot", e, None))
}

fn decode_csv<R: Read>(
    reader: R,
    config: &OutputConfig,
) -> std::result::Result<Vec<EnrichedMessage>, csv::Error> {
    csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_reader(reader)
        .deserialize()
        .collect()
}

/// Reads a JSON array snapshot.
#[cfg(feature = "json-output")]
pub fn read_json(path: impl AsRef<Path>) -> Result<Vec<EnrichedMessage>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let rows: Vec<EnrichedMessage> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        ThreadpackError::snapshot_parse("JSON snapshot", e, Some(path.to_path_buf()))
    })?;
    info!(rows = rows.len(), path = %path.display(), "Loaded JSON snapshot");
    Ok(rows)
}

/// Parses a JSON array snapshot from a string.
#[cfg(feature = "json-output")]
pub fn from_json(content: &str) -> Result<Vec<EnrichedMessage>> {
    serde_json::from_str(content)
        .map_err(|e| ThreadpackError::snapshot_parse("JSON snapshot", e, None))
}

/// Reads a JSONL snapshot. Blank lines are skipped.
#[cfg(feature = "json-output")]
pub fn read_jsonl(path: impl AsRef<Path>) -> Result<Vec<EnrichedMessage>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let mut rows = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line).map_err(|e| {
            ThreadpackError::snapshot_parse("JSONL snapshot", e, Some(path.to_path_buf()))
        })?;
        rows.push(row);
    }

    info!(rows = rows.len(), path = %path.display(), "Loaded JSONL snapshot");
    Ok(rows)
}

/// Parses a JSONL snapshot from a string.
#[cfg(feature = "json-output")]
pub fn from_jsonl(content: &str) -> Result<Vec<EnrichedMessage>> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .map_err(|e| ThreadpackError::snapshot_parse("JSONL snapshot", e, None))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::output::to_csv;
    use chrono::{TimeZone, Utc};

    fn rows() -> Vec<EnrichedMessage> {
        vec![EnrichedMessage {
            tweet_id: 8,
            author_id: "AppleSupport".into(),
            inbound: false,
            created_at: Utc.with_ymd_and_hms(2017, 11, 11, 9, 0, 0).unwrap(),
            text: "we're here to help; \"quoted\"".into(),
            conversation_id: 12,
            turn: 2,
        }]
    }

    #[test]
    fn test_csv_snapshot_reloads() {
        let config = OutputConfig::new().with_delimiter(b';');
        let csv = to_csv(&rows(), &config).unwrap();
        assert_eq!(from_csv(&csv, &config).unwrap(), rows());
    }

    #[test]
    fn test_from_csv_rejects_bad_turn() {
        let content = "tweet_id,author_id,inbound,created_at,text,conversation_id,turn\n\
                       1,a,true,2017-11-11T09:00:00Z,hi,0,-1\n";
        let err = from_csv(content, &OutputConfig::new()).unwrap_err();
        assert!(err.is_parse());
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_from_jsonl_skips_blank_lines() {
        let content = "\n{\"tweet_id\":1,\"author_id\":\"a\",\"inbound\":true,\"created_at\":\"2017-11-11T09:00:00Z\",\"text\":\"hi\",\"conversation_id\":0,\"turn\":0}\n\n";
        let parsed = from_jsonl(content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].tweet_id, 1);
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_from_json_invalid() {
        let err = from_json("[{\"tweet_id\":\"x\"}]").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("JSON snapshot"));
    }
}
