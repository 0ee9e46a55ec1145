//! Core data models for the reconstructed table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;

/// A message tagged with its conversation and turn.
///
/// This is one row of the table produced by
/// [`process`](crate::core::processor::process). The reply pointer columns of
/// the input are dropped; the reply structure is captured by
/// `conversation_id` and `turn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedMessage {
    /// Unique message identifier
    pub tweet_id: u64,
    /// Author of the message
    pub author_id: String,
    /// `true` if sent by a customer
    pub inbound: bool,
    /// When the message was sent
    pub created_at: DateTime<Utc>,
    /// Normalised message text
    pub text: String,
    /// Conversation this message belongs to
    pub conversation_id: u64,
    /// BFS depth from the conversation root (0 for roots and orphans)
    pub turn: u32,
}

impl EnrichedMessage {
    /// Tags a message with its conversation and turn.
    pub fn from_message(msg: Message, conversation_id: u64, turn: u32) -> Self {
        Self {
            tweet_id: msg.tweet_id,
            author_id: msg.author_id,
            inbound: msg.inbound,
            created_at: msg.created_at,
            text: msg.text,
            conversation_id,
            turn,
        }
    }

    /// Returns `true` if the message was sent by a business account.
    pub fn is_outbound(&self) -> bool {
        !self.inbound
    }
}

/// Configuration for snapshot output.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// CSV field delimiter (default: `,`)
    pub delimiter: u8,
    /// Pretty-print JSON arrays (default: false)
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            pretty: false,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}
