//! Configuration types for ingest and statistics.
//!
//! This module provides plain configuration structs for library usage.
//!
//! - [`TwcsConfig`] - how the support export CSV is read and normalised
//! - [`StatsConfig`] - thresholds used by the stats engine
//!
//! Snapshot output is configured by [`OutputConfig`](crate::core::models::OutputConfig).
//!
//! # Example
//!
//! ```rust
//! use threadpack::config::TwcsConfig;
//! use threadpack::parsers::TwcsParser;
//!
//! let config = TwcsConfig::new()
//!     .with_strip_mentions(true)
//!     .with_lowercase(false);
//!
//! let parser = TwcsParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Timestamp layout used by the support export, e.g. `Tue Oct 31 22:10:47 +0000 2017`.
pub const TWCS_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Configuration for reading the support export CSV.
///
/// # Example
///
/// ```rust
/// use threadpack::config::TwcsConfig;
///
/// let config = TwcsConfig::new().with_delimiter(b';');
/// assert_eq!(config.delimiter, b';');
/// assert!(config.strip_mentions);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwcsConfig {
    /// Field delimiter (default: `,`)
    pub delimiter: u8,

    /// Remove `@handle` tokens from message text (default: true)
    pub strip_mentions: bool,

    /// Lowercase message text (default: true)
    pub lowercase: bool,

    /// chrono format string for `created_at` (default: [`TWCS_TIMESTAMP_FORMAT`])
    pub timestamp_format: String,
}

impl Default for TwcsConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            strip_mentions: true,
            lowercase: true,
            timestamp_format: TWCS_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl TwcsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that keeps message text exactly as exported.
    pub fn raw_text() -> Self {
        Self {
            strip_mentions: false,
            lowercase: false,
            ..Self::default()
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether `@handle` tokens are removed.
    #[must_use]
    pub fn with_strip_mentions(mut self, strip: bool) -> Self {
        self.strip_mentions = strip;
        self
    }

    /// Sets whether text is lowercased.
    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Sets the `created_at` format string.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }
}

/// Configuration for the stats engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Minimum uses of the most frequent text for an author to be reported (default: 5)
    pub author_usage_threshold: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            author_usage_threshold: 5,
        }
    }
}

impl StatsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-author usage threshold.
    #[must_use]
    pub fn with_author_usage_threshold(mut self, threshold: usize) -> Self {
        self.author_usage_threshold = threshold;
        self
    }
}
