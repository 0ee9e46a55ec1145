//! Unified error types for threadpack.
//!
//! This module provides a single [`ThreadpackError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! Processing is a batch job: a malformed row, an unparseable timestamp or a
//! non-numeric reply id rejects the whole input. There is no partial-success
//! mode. Queries that find nothing (unknown tweet id, empty day) return empty
//! values, not errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for threadpack operations.
///
/// # Example
///
/// ```rust
/// use threadpack::error::Result;
/// use threadpack::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ThreadpackError>;

/// The error type for all threadpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThreadpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when the input file doesn't exist, permission
    /// is denied, or the disk is full while writing a snapshot.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse the input file.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "twcs CSV", "JSONL snapshot")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A single field of an input row could not be interpreted.
    #[error("Invalid {field} '{value}' on line {line}: {reason}")]
    InvalidField {
        /// Column name, e.g. `created_at`
        field: &'static str,
        /// The raw value that was rejected
        value: String,
        /// 1-based line number in the source file (0 if unknown)
        line: u64,
        /// What was expected
        reason: String,
    },

    /// The input header lacks a required column.
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    /// The same `tweet_id` appears on more than one row.
    #[error("Duplicate tweet_id {tweet_id} (rows {first_row} and {row})")]
    DuplicateTweetId {
        /// The repeated identifier
        tweet_id: u64,
        /// 0-based position of the first occurrence
        first_row: usize,
        /// 0-based position of the repeated occurrence
        row: usize,
    },

    /// The file format doesn't match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date in a filter or query.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// UTF-8 encoding error.
    ///
    /// Occurs when output conversion produces bytes that are not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// CSV decoding error
    #[error("{0}")]
    Csv(#[from] csv::Error),
    /// JSON decoding error
    #[cfg(feature = "json-output")]
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ThreadpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ThreadpackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ThreadpackError {
    /// Creates a parse error for the twcs CSV input.
    pub fn twcs_parse(source: csv::Error, path: Option<PathBuf>) -> Self {
        ThreadpackError::Parse {
            format: "twcs CSV",
            source: ParseErrorKind::Csv(source),
            path,
        }
    }

    /// Creates a parse error for a snapshot file.
    pub fn snapshot_parse(
        format: &'static str,
        source: impl Into<ParseErrorKind>,
        path: Option<PathBuf>,
    ) -> Self {
        ThreadpackError::Parse {
            format,
            source: source.into(),
            path,
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(
        field: &'static str,
        value: impl Into<String>,
        line: u64,
        reason: impl Into<String>,
    ) -> Self {
        ThreadpackError::InvalidField {
            field,
            value: value.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ThreadpackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ThreadpackError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ThreadpackError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ThreadpackError::Parse { .. })
    }

    /// Returns `true` if a field of an input row was rejected.
    pub fn is_invalid_field(&self) -> bool {
        matches!(self, ThreadpackError::InvalidField { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ThreadpackError::InvalidDate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ThreadpackError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
        assert!(err.is_io());
    }

    #[test]
    fn test_parse_error_with_path() {
        let err = ThreadpackError::Parse {
            format: "twcs CSV",
            source: ParseErrorKind::Csv(csv::Error::from(io::Error::other("bad row"))),
            path: Some(PathBuf::from("/data/twcs.csv")),
        };
        let display = err.to_string();
        assert!(display.contains("twcs CSV"));
        assert!(display.contains("/data/twcs.csv"));
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_error_without_path() {
        let err = ThreadpackError::Parse {
            format: "JSONL snapshot",
            source: ParseErrorKind::Csv(csv::Error::from(io::Error::other("truncated"))),
            path: None,
        };
        assert!(!err.to_string().contains("file:"));
    }

    #[test]
    fn test_invalid_field_display() {
        let err = ThreadpackError::invalid_field(
            "created_at",
            "yesterday",
            12,
            "expected '%a %b %d %H:%M:%S %z %Y'",
        );
        let display = err.to_string();
        assert!(display.contains("created_at"));
        assert!(display.contains("yesterday"));
        assert!(display.contains("line 12"));
        assert!(err.is_invalid_field());
        assert!(!err.is_parse());
    }

    #[test]
    fn test_duplicate_tweet_id_display() {
        let err = ThreadpackError::DuplicateTweetId {
            tweet_id: 42,
            first_row: 2,
            row: 9,
        };
        let display = err.to_string();
        assert!(display.contains("42"));
        assert!(display.contains("rows 2 and 9"));
    }

    #[test]
    fn test_missing_column_display() {
        let err = ThreadpackError::MissingColumn("tweet_id");
        assert!(err.to_string().contains("tweet_id"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = ThreadpackError::invalid_date("2017-02-30");
        let display = err.to_string();
        assert!(display.contains("2017-02-30"));
        assert!(display.contains("YYYY-MM-DD"));
        assert!(err.is_invalid_date());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = ThreadpackError::from(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_csv_error() {
        let csv_err = csv::Error::from(io::Error::other("test"));
        let err: ThreadpackError = csv_err.into();
        assert!(err.to_string().contains("CSV error"));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ThreadpackError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_from_utf8_error() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: ThreadpackError = utf8_err.into();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_error_debug() {
        let err = ThreadpackError::invalid_date("bad");
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidDate"));
    }
}
