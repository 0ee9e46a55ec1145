//! Shared parsing utilities.
//!
//! This module contains the field-level parsers used by the in-memory
//! [`TwcsParser`](crate::parsers::TwcsParser) and by the row iterator it
//! exposes for large files.

pub mod twcs;

// Re-export commonly used items
pub use twcs::{
    REQUIRED_COLUMNS, TwcsRawRecord, normalize_text, parse_created_at, parse_inbound,
    parse_parent_id, parse_reply_ids, parse_tweet_id, strip_mentions,
};
