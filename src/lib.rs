//! # Threadpack
//!
//! A Rust library for reconstructing threaded conversations from
//! customer-support reply chains and querying the result.
//!
//! ## Overview
//!
//! Support exports such as the Twitter Customer Support dataset store each
//! message as one row with reply pointers (`response_tweet_id`,
//! `in_response_to_tweet_id`). Threadpack:
//!
//! 1. **Ingests** the CSV export into normalised [`Message`]s
//!    (mentions stripped, text lowercased, timestamps read as UTC)
//! 2. **Reconstructs** conversations, tagging every row with a
//!    `conversation_id` and a `turn` (distance from the conversation root)
//! 3. **Persists** the enriched table as a CSV, JSON or JSONL snapshot
//! 4. **Answers queries** over the table: most repeated reply of a day,
//!    conversation membership, per-turn and per-author counts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use threadpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let messages = TwcsParser::new().parse("twcs.csv".as_ref())?;
//!     let (rows, summary) = process_with_stats(messages)?;
//!     println!("{} conversations", summary.conversation_count);
//!
//!     write_csv(&rows, "dataset.csv", &OutputConfig::new())?;
//!
//!     let stats = DatasetStats::new(&rows);
//!     if let Some(usage) = stats.most_common_usage(2017, 10, 31)? {
//!         println!("{:?} x{}", usage.most_frequent, usage.count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsers`] - [`ExportParser`](parsers::ExportParser) trait and the
//!   [`TwcsParser`](parsers::TwcsParser)
//! - [`parsing`] - Field-level parsing helpers shared by the parsers
//! - [`config`] - [`TwcsConfig`](config::TwcsConfig), [`StatsConfig`](config::StatsConfig)
//! - [`core`] - Core types and functionality
//!   - [`core::models`] - [`EnrichedMessage`](core::models::EnrichedMessage), [`OutputConfig`](core::models::OutputConfig)
//!   - [`core::processor`] - [`process`](core::processor::process), [`ProcessingStats`](core::processor::ProcessingStats)
//!   - [`core::filter`] - [`FilterConfig`](core::filter::FilterConfig), [`apply_filters`](core::filter::apply_filters)
//!   - [`core::output`] - Snapshot writers and readers
//! - `stats` - [`DatasetStats`](stats::DatasetStats) query engine (`stats` feature)
//! - [`error`] - Unified error types ([`ThreadpackError`], [`Result`])
//! - [`prelude`] - Convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `json-output` | JSON and JSONL snapshots | `serde_json` |
//! | `stats` | Query engine | `md-5`, `hex` |
//! | `full` (default) | Everything | all of the above |
//!
//! ## Logging
//!
//! The library emits [`tracing`] events (batch totals at `info`, skipped reply
//! ids at `debug`, fan-in conflicts at `warn`). No subscriber is installed;
//! binaries and tests choose their own.

pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parsers;
pub mod parsing;
#[cfg(feature = "stats")]
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use error::{Result, ThreadpackError};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use threadpack::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{Result, ThreadpackError};

    // Parsers and configuration
    pub use crate::config::{StatsConfig, TwcsConfig};
    pub use crate::parsers::{ExportParser, TwcsParser};

    // Models
    pub use crate::core::models::{EnrichedMessage, OutputConfig};

    // Filtering
    pub use crate::core::filter::{FilterConfig, apply_filters};

    // Processing
    pub use crate::core::processor::{
        ProcessingStats, process, process_file, process_with_stats,
    };

    // Output (file writers, string converters, reader)
    pub use crate::core::output::{SnapshotFormat, read_snapshot, to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    // Queries
    #[cfg(feature = "stats")]
    pub use crate::stats::{ConversationStats, DatasetStats, MostCommonUsage};
}
