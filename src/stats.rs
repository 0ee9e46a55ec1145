//! Queries over a reconstructed table.
//!
//! [`DatasetStats`] borrows the rows produced by
//! [`process`](crate::core::processor::process) (or reloaded with
//! [`read_snapshot`](crate::core::output::read_snapshot)) and answers
//! questions about conversations, turns and repeated replies.
//!
//! # Example
//!
//! ```
//! use threadpack::Message;
//! use threadpack::core::processor::process;
//! use threadpack::stats::DatasetStats;
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> threadpack::Result<()> {
//! let ts = Utc.with_ymd_and_hms(2017, 10, 31, 22, 10, 0).unwrap();
//! let rows = process(vec![
//!     Message::new(1, "115712", "help", ts).with_responses([2]),
//!     Message::new(2, "sprintcare", "dm us", ts).with_inbound(false).with_parent(1),
//!     Message::new(3, "115713", "hello?", ts),
//! ])?;
//!
//! let stats = DatasetStats::new(&rows);
//! assert!(stats.check_conversation_group((1, 2)));
//! assert!(!stats.check_conversation_group((1, 3)));
//! assert_eq!(stats.num_conversations(0), 2);
//! assert_eq!(stats.num_conversations_by_author_id("sprintcare"), 1);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use md5::{Digest, Md5};
use serde::Serialize;

use crate::config::StatsConfig;
use crate::core::filter::{FilterConfig, apply_filters};
use crate::core::models::EnrichedMessage;
use crate::error::Result;

/// The most repeated text of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostCommonUsage {
    /// The text itself
    pub most_frequent: String,
    /// How many messages that day carried it
    pub count: usize,
    /// Authors who sent it at least `author_usage_threshold` times that day
    pub authors_usage: BTreeMap<String, usize>,
}

/// Per-author activity for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationStats {
    /// Distinct conversations the author replied in
    pub count: usize,
    /// Mean turn of the author's replies
    pub mean: f64,
    /// Deepest turn the author replied at
    pub max: u32,
}

/// Read-only query engine over enriched rows.
pub struct DatasetStats<'a> {
    rows: &'a [EnrichedMessage],
    index: HashMap<u64, usize>,
    config: StatsConfig,
}

impl<'a> DatasetStats<'a> {
    /// Indexes `rows` with the default [`StatsConfig`].
    pub fn new(rows: &'a [EnrichedMessage]) -> Self {
        Self::with_config(rows, StatsConfig::default())
    }

    /// Indexes `rows` with a custom configuration.
    pub fn with_config(rows: &'a [EnrichedMessage], config: StatsConfig) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            index.entry(row.tweet_id).or_insert(pos);
        }
        Self {
            rows,
            index,
            config,
        }
    }

    /// Returns the rows being queried.
    pub fn rows(&self) -> &'a [EnrichedMessage] {
        self.rows
    }

    /// Finds the most repeated text among the messages of one UTC day.
    ///
    /// Returns `None` when the day is empty or no text occurs more than once.
    /// When several texts share the highest count, the one whose MD5 hex
    /// digest sorts last wins, so the answer does not depend on row order.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadpackError::InvalidDate`](crate::ThreadpackError::InvalidDate)
    /// if the date does not exist.
    pub fn most_common_usage(
        &self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Option<MostCommonUsage>> {
        let filter = FilterConfig::new().with_day(year, month, day)?;
        let day_rows = apply_filters(self.rows, &filter);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for row in &day_rows {
            *counts.entry(row.text.as_str()).or_default() += 1;
        }

        let Some((most_frequent, count)) = counts
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .max_by_key(|&(text, count)| (count, text_digest(text)))
        else {
            return Ok(None);
        };

        let mut authors_usage: BTreeMap<String, usize> = BTreeMap::new();
        for row in day_rows.iter().filter(|row| row.text == most_frequent) {
            *authors_usage.entry(row.author_id.clone()).or_default() += 1;
        }
        authors_usage.retain(|_, uses| *uses >= self.config.author_usage_threshold);

        Ok(Some(MostCommonUsage {
            most_frequent: most_frequent.to_string(),
            count,
            authors_usage,
        }))
    }

    /// Returns every row in the conversation containing `tweet_id`, in input
    /// order. Unknown ids yield an empty vector.
    pub fn get_conversation(&self, tweet_id: u64) -> Vec<&'a EnrichedMessage> {
        let Some(conversation_id) = self.conversation_of(tweet_id) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter(|row| row.conversation_id == conversation_id)
            .collect()
    }

    /// Returns `true` if both tweets exist and share a conversation.
    pub fn check_conversation_group(&self, (first, second): (u64, u64)) -> bool {
        match (self.conversation_of(first), self.conversation_of(second)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Counts distinct conversations that contain a message at `turn`.
    pub fn num_conversations(&self, turn: u32) -> usize {
        self.rows
            .iter()
            .filter(|row| row.turn == turn)
            .map(|row| row.conversation_id)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Counts distinct conversations `author_id` took part in.
    pub fn num_conversations_by_author_id(&self, author_id: &str) -> usize {
        self.rows
            .iter()
            .filter(|row| row.author_id == author_id)
            .map(|row| row.conversation_id)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Summarises business replies (`inbound = false`) of one UTC day, keyed
    /// by author.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadpackError::InvalidDate`](crate::ThreadpackError::InvalidDate)
    /// if the date does not exist.
    pub fn conversation_stats(
        &self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<BTreeMap<String, ConversationStats>> {
        let filter = FilterConfig::new()
            .with_day(year, month, day)?
            .with_inbound(false);

        let mut groups: BTreeMap<&str, AuthorAccumulator> = BTreeMap::new();
        for row in apply_filters(self.rows, &filter) {
            groups.entry(row.author_id.as_str()).or_default().push(row);
        }

        Ok(groups
            .into_iter()
            .map(|(author, acc)| (author.to_string(), acc.finish()))
            .collect())
    }

    fn conversation_of(&self, tweet_id: u64) -> Option<u64> {
        self.index
            .get(&tweet_id)
            .map(|&pos| self.rows[pos].conversation_id)
    }
}

#[derive(Default)]
struct AuthorAccumulator {
    conversations: HashSet<u64>,
    turn_sum: u64,
    rows: usize,
    max_turn: u32,
}

impl AuthorAccumulator {
    fn push(&mut self, row: &EnrichedMessage) {
        self.conversations.insert(row.conversation_id);
        self.turn_sum += u64::from(row.turn);
        self.rows += 1;
        self.max_turn = self.max_turn.max(row.turn);
    }

    fn finish(self) -> ConversationStats {
        ConversationStats {
            count: self.conversations.len(),
            mean: self.turn_sum as f64 / self.rows as f64,
            max: self.max_turn,
        }
    }
}

fn text_digest(text: &str) -> String {
    hex::encode(Md5::digest(text.as_bytes()))
}
