//! Raw input message type.
//!
//! This module provides [`Message`], one row of a customer-support export after
//! ingest: the text has been normalised, the timestamp is UTC, and both reply
//! pointers are parsed into integers.
//!
//! # Overview
//!
//! A message consists of:
//! - **Identity**: `tweet_id`, `author_id`, `inbound`
//! - **Payload**: `text`, `created_at`
//! - **Reply chain**: `in_response_to_tweet_id` (parent) and
//!   `response_tweet_id` (direct replies)
//!
//! # Examples
//!
//! ```
//! use threadpack::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2017, 10, 31, 22, 10, 47).unwrap();
//! let msg = Message::new(1, "sprintcare", "how can we help?", ts)
//!     .with_inbound(false)
//!     .with_responses([2, 3]);
//!
//! assert!(msg.is_root());
//! assert_eq!(msg.response_tweet_id(), &[2, 3]);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single support message with its reply pointers.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `tweet_id` | `u64` | Unique identifier |
/// | `author_id` | `String` | Customer id or business handle |
/// | `inbound` | `bool` | `true` when sent by a customer |
/// | `created_at` | `DateTime<Utc>` | When the message was sent |
/// | `text` | `String` | Normalised text |
/// | `response_tweet_id` | `Vec<u64>` | Ids of direct replies |
/// | `in_response_to_tweet_id` | `Option<u64>` | Parent id, `None` for roots |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub tweet_id: u64,

    /// Author of the message.
    pub author_id: String,

    /// `true` if sent by a customer, `false` if sent by a business account.
    pub inbound: bool,

    /// When the message was sent.
    pub created_at: DateTime<Utc>,

    /// Message text.
    pub text: String,

    /// Ids of the messages that reply to this one.
    #[serde(default)]
    pub response_tweet_id: Vec<u64>,

    /// Id of the message this one replies to. `None` marks a conversation root.
    #[serde(default)]
    pub in_response_to_tweet_id: Option<u64>,
}

impl Message {
    /// Creates an inbound root message without replies.
    pub fn new(
        tweet_id: u64,
        author_id: impl Into<String>,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tweet_id,
            author_id: author_id.into(),
            inbound: true,
            created_at,
            text: text.into(),
            response_tweet_id: Vec::new(),
            in_response_to_tweet_id: None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the direction of the message.
    #[must_use]
    pub fn with_inbound(mut self, inbound: bool) -> Self {
        self.inbound = inbound;
        self
    }

    /// Builder method to set the parent message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use threadpack::Message;
    /// use chrono::Utc;
    ///
    /// let msg = Message::new(2, "115712", "still broken", Utc::now())
    ///     .with_parent(1);
    /// assert!(!msg.is_root());
    /// ```
    #[must_use]
    pub fn with_parent(mut self, parent: u64) -> Self {
        self.in_response_to_tweet_id = Some(parent);
        self
    }

    /// Builder method to set the direct replies.
    #[must_use]
    pub fn with_responses(mut self, responses: impl IntoIterator<Item = u64>) -> Self {
        self.response_tweet_id = responses.into_iter().collect();
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the message id.
    pub fn tweet_id(&self) -> u64 {
        self.tweet_id
    }

    /// Returns the author id.
    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the ids of direct replies.
    pub fn response_tweet_id(&self) -> &[u64] {
        &self.response_tweet_id
    }

    /// Returns the parent id, if any.
    pub fn in_response_to_tweet_id(&self) -> Option<u64> {
        self.in_response_to_tweet_id
    }

    /// Returns `true` if this message starts a conversation.
    pub fn is_root(&self) -> bool {
        self.in_response_to_tweet_id.is_none()
    }

    /// Returns `true` if any message replies to this one.
    pub fn has_responses(&self) -> bool {
        !self.response_tweet_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 10, 31, 22, 10, 47).unwrap()
    }

    #[test]
    fn test_message_new_is_inbound_root() {
        let msg = Message::new(7, "115712", "help", ts());
        assert_eq!(msg.tweet_id(), 7);
        assert_eq!(msg.author_id(), "115712");
        assert_eq!(msg.text(), "help");
        assert!(msg.inbound);
        assert!(msg.is_root());
        assert!(!msg.has_responses());
    }

    #[test]
    fn test_message_builder() {
        let msg = Message::new(3, "sprintcare", "dm us", ts())
            .with_inbound(false)
            .with_parent(1)
            .with_responses([4, 5]);

        assert!(!msg.inbound);
        assert_eq!(msg.in_response_to_tweet_id(), Some(1));
        assert_eq!(msg.response_tweet_id(), &[4, 5]);
        assert!(msg.has_responses());
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::new(1, "a", "hi", ts()).with_responses([2]);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"tweet_id\":1"));
        assert!(json.contains("2017-10-31T22:10:47Z"));

        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
