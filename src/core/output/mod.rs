//! Snapshot writers and readers.
//!
//! The reconstructed table is persisted so downstream queries can run without
//! re-processing the export:
//! - [`write_csv`] / [`to_csv`] - CSV with a header row
//! - [`write_json`] / [`to_json`] - JSON array of rows - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one row per line - requires `json-output` feature
//!
//! [`read_snapshot`] loads any of them back into [`EnrichedMessage`] rows.
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | CSV | Spreadsheets, SQL `COPY` |
//! | JSON | Small datasets, APIs |
//! | JSONL | Large datasets, line-oriented tools |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "json-output")]
//! # fn main() -> threadpack::Result<()> {
//! use threadpack::core::output::{read_jsonl, write_jsonl};
//! use threadpack::core::models::OutputConfig;
//!
//! # let rows = Vec::new();
//! write_jsonl(&rows, "output/dataset.jsonl", &OutputConfig::new())?;
//! let reloaded = read_jsonl("output/dataset.jsonl")?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
mod reader;

pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
pub use reader::{from_csv, read_csv};
#[cfg(feature = "json-output")]
pub use reader::{from_json, from_jsonl, read_json, read_jsonl};

use std::path::Path;

use super::models::{EnrichedMessage, OutputConfig};
use crate::error::{Result, ThreadpackError};

/// Snapshot file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotFormat {
    Csv,
    Json,
    Jsonl,
}

impl SnapshotFormat {
    /// Detects the format from a file extension (case-insensitive).
    ///
    /// ```
    /// use threadpack::core::output::SnapshotFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(SnapshotFormat::from_path(Path::new("out/data.JSONL")), Some(SnapshotFormat::Jsonl));
    /// assert_eq!(SnapshotFormat::from_path(Path::new("out/data.pkl")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            SnapshotFormat::Csv => "csv",
            SnapshotFormat::Json => "json",
            SnapshotFormat::Jsonl => "jsonl",
        }
    }
}

impl std::fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

impl std::str::FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(SnapshotFormat::Csv),
            "json" => Ok(SnapshotFormat::Json),
            "jsonl" | "ndjson" => Ok(SnapshotFormat::Jsonl),
            _ => Err(format!(
                "Unknown snapshot format: '{}'. Expected one of: csv, json, jsonl",
                s
            )),
        }
    }
}

/// Writes `rows` to `path` in the given format.
pub fn write_snapshot(
    rows: &[EnrichedMessage],
    path: &Path,
    format: SnapshotFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        SnapshotFormat::Csv => write_csv(rows, path, config),
        #[cfg(feature = "json-output")]
        SnapshotFormat::Json => write_json(rows, path, config),
        #[cfg(feature = "json-output")]
        SnapshotFormat::Jsonl => write_jsonl(rows, path, config),
        #[cfg(not(feature = "json-output"))]
        SnapshotFormat::Json | SnapshotFormat::Jsonl => Err(json_disabled(format)),
    }
}

/// Reads a snapshot, detecting the format from the file extension.
pub fn read_snapshot(path: &Path, config: &OutputConfig) -> Result<Vec<EnrichedMessage>> {
    let format = SnapshotFormat::from_path(path).ok_or_else(|| {
        ThreadpackError::invalid_format(
            "snapshot",
            format!("unsupported extension: {}", path.display()),
        )
    })?;

    match format {
        SnapshotFormat::Csv => read_csv(path, config),
        #[cfg(feature = "json-output")]
        SnapshotFormat::Json => read_json(path),
        #[cfg(feature = "json-output")]
        SnapshotFormat::Jsonl => read_jsonl(path),
        #[cfg(not(feature = "json-output"))]
        SnapshotFormat::Json | SnapshotFormat::Jsonl => Err(json_disabled(format)),
    }
}

#[cfg(not(feature = "json-output"))]
fn json_disabled(format: SnapshotFormat) -> ThreadpackError {
    ThreadpackError::invalid_format(
        "snapshot",
        format!("{format} snapshots require the `json-output` feature"),
    )
}
