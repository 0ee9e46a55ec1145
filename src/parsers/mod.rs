//! Export parsers.
//!
//! Each parser implements the [`ExportParser`] trait, which turns a file or an
//! in-memory string into the [`Message`] rows fed to
//! [`process`](crate::core::processor::process).
//!
//! # Available Parsers
//!
//! - [`TwcsParser`] - Parses the customer-support CSV export
//!
//! # Example
//!
//! ```rust
//! use threadpack::parsers::{ExportParser, TwcsParser};
//!
//! let parser = TwcsParser::new();
//! assert_eq!(parser.name(), "twcs CSV");
//! // let messages = parser.parse("data/twcs.csv".as_ref())?;
//! ```

mod twcs;

pub use twcs::{TwcsParser, TwcsRows};

use std::path::Path;

use crate::Message;
use crate::error::ThreadpackError;

/// Trait for parsing message exports.
pub trait ExportParser: Send + Sync {
    /// Returns the name of the parser (e.g., "twcs CSV").
    fn name(&self) -> &'static str;

    /// Parses an export file and returns every row as a [`Message`].
    ///
    /// # Errors
    ///
    /// Returns a [`ThreadpackError`] if the file cannot be read or any row
    /// is malformed. No rows are returned in that case.
    fn parse(&self, path: &Path) -> Result<Vec<Message>, ThreadpackError>;

    /// Parses export content from a string.
    fn parse_str(&self, content: &str) -> Result<Vec<Message>, ThreadpackError>;
}
