//! Core processing logic for threadpack.
//!
//! This module contains:
//! - [`models`] - The enriched row type and output configuration
//! - [`processor`] - Conversation reconstruction
//! - [`filter`] - Row filtering by date, author and direction
//! - [`output`] - Snapshot writers and readers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use threadpack::core::{
//!     EnrichedMessage, FilterConfig, OutputConfig, ProcessingStats,
//!     apply_filters, process, process_with_stats, write_csv,
//! };
//! ```

pub mod filter;
pub mod models;
pub mod output;
pub mod processor;

// Re-export main types for convenience
pub use filter::{FilterConfig, apply_filters};
pub use models::{EnrichedMessage, OutputConfig};
pub use output::{SnapshotFormat, read_snapshot, to_csv, write_csv, write_snapshot};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
pub use processor::{ProcessingStats, process, process_file, process_with_stats};
