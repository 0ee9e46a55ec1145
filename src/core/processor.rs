//! Conversation reconstruction.
//!
//! [`process`] walks the forest of reply pointers and tags every message with a
//! `conversation_id` and a `turn`.
//!
//! # Ordering contract
//!
//! Input order matters in exactly one place: conversation ids. Roots (messages
//! without `in_response_to_tweet_id`) receive ids `0, 1, 2, …` in the order
//! they appear in the input. Messages no root reaches are then given fresh ids,
//! also in input order, starting right after the last root id. Output rows keep
//! the input order.
//!
//! # Traversal
//!
//! Breadth-first from each root. Layer `k + 1` is every message listed in the
//! `response_tweet_id` of any layer-`k` message; the layer index is the turn.
//!
//! - A message listed under several parents (fan-in) keeps its first
//!   assignment.
//! - A root is never claimed by another root's traversal.
//! - Reply ids that name no row in the input are skipped.
//!
//! # Example
//!
//! ```
//! use threadpack::Message;
//! use threadpack::core::processor::process;
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let messages = vec![
//!     Message::new(1, "a", "hi", now).with_responses([2]),
//!     Message::new(2, "b", "hello", now).with_parent(1),
//!     Message::new(5, "c", "alone", now),
//! ];
//!
//! let rows = process(messages)?;
//! assert_eq!((rows[0].conversation_id, rows[0].turn), (0, 0));
//! assert_eq!((rows[1].conversation_id, rows[1].turn), (0, 1));
//! assert_eq!((rows[2].conversation_id, rows[2].turn), (1, 0));
//! # Ok::<(), threadpack::ThreadpackError>(())
//! ```

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use super::models::{EnrichedMessage, OutputConfig};
use super::output::{SnapshotFormat, write_snapshot};
use crate::Message;
use crate::error::{Result, ThreadpackError};
use crate::parsers::{ExportParser, TwcsParser};

/// Statistics about a reconstruction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Rows in (and out)
    pub message_count: usize,
    /// Distinct conversations, including singletons
    pub conversation_count: usize,
    /// Messages without a parent pointer
    pub root_count: usize,
    /// Messages no root reached
    pub orphan_count: usize,
    /// Deepest turn assigned
    pub max_turn: u32,
    /// Reply ids naming no row in the input
    pub dangling_references: usize,
    /// Reply links skipped because the target was already assigned, either
    /// through fan-in or a cycle back into the tree
    pub fan_in_conflicts: usize,
    /// Reply links skipped because the target is itself a conversation root
    pub root_links: usize,
}

impl ProcessingStats {
    /// Share of messages that ended up in singleton fallback conversations, in percent.
    pub fn orphan_ratio(&self) -> f64 {
        if self.message_count == 0 {
            return 0.0;
        }
        (self.orphan_count as f64 / self.message_count as f64) * 100.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Assignment {
    conversation_id: u64,
    turn: u32,
}

/// Reconstructs conversations and returns one enriched row per input message.
///
/// # Errors
///
/// Returns [`ThreadpackError::DuplicateTweetId`] if two rows share a `tweet_id`.
pub fn process(messages: Vec<Message>) -> Result<Vec<EnrichedMessage>> {
    process_with_stats(messages).map(|(rows, _)| rows)
}

/// Same as [`process`], also returning run statistics.
pub fn process_with_stats(
    messages: Vec<Message>,
) -> Result<(Vec<EnrichedMessage>, ProcessingStats)> {
    let index = build_index(&messages)?;
    let mut walker = Walker::new(&messages, &index);

    let mut next_id: u64 = 0;
    for (pos, msg) in messages.iter().enumerate() {
        if msg.is_root() {
            walker.traverse(pos, next_id);
            next_id += 1;
        }
    }
    let root_count = next_id as usize;

    // Unreached messages continue the id sequence after the last root.
    let mut orphan_count = 0;
    for slot in &mut walker.assignments {
        if slot.is_none() {
            *slot = Some(Assignment {
                conversation_id: next_id,
                turn: 0,
            });
            next_id += 1;
            orphan_count += 1;
        }
    }

    let stats = ProcessingStats {
        message_count: messages.len(),
        conversation_count: next_id as usize,
        root_count,
        orphan_count,
        max_turn: walker.max_turn,
        dangling_references: walker.dangling_references,
        fan_in_conflicts: walker.fan_in_conflicts,
        root_links: walker.root_links,
    };

    let assignments = walker.assignments;
    let rows = messages
        .into_iter()
        .zip(assignments)
        .map(|(msg, slot)| {
            let Assignment {
                conversation_id,
                turn,
            } = slot.unwrap_or(Assignment {
                conversation_id: 0,
                turn: 0,
            });
            EnrichedMessage::from_message(msg, conversation_id, turn)
        })
        .collect();

    info!(
        messages = stats.message_count,
        conversations = stats.conversation_count,
        roots = stats.root_count,
        orphans = stats.orphan_count,
        max_turn = stats.max_turn,
        dangling = stats.dangling_references,
        fan_in = stats.fan_in_conflicts,
        root_links = stats.root_links,
        "Reconstructed conversations"
    );

    Ok((rows, stats))
}

/// Full batch pipeline: parse the CSV export, reconstruct, write a snapshot.
///
/// The snapshot format is chosen from the output file extension.
pub fn process_file(
    input: &Path,
    output: &Path,
    config: &OutputConfig,
) -> Result<ProcessingStats> {
    let format = SnapshotFormat::from_path(output).ok_or_else(|| {
        ThreadpackError::invalid_format(
            "snapshot",
            format!("unsupported output extension: {}", output.display()),
        )
    })?;

    let messages = TwcsParser::new().parse(input)?;
    let (rows, stats) = process_with_stats(messages)?;
    write_snapshot(&rows, output, format, config)?;

    Ok(stats)
}

/// Maps every `tweet_id` to its position in the input.
fn build_index(messages: &[Message]) -> Result<HashMap<u64, usize>> {
    let mut index = HashMap::with_capacity(messages.len());
    for (pos, msg) in messages.iter().enumerate() {
        if let Some(first) = index.insert(msg.tweet_id, pos) {
            return Err(ThreadpackError::DuplicateTweetId {
                tweet_id: msg.tweet_id,
                first_row: first,
                row: pos,
            });
        }
    }
    Ok(index)
}

/// Traversal state shared across all roots of one batch.
struct Walker<'a> {
    messages: &'a [Message],
    index: &'a HashMap<u64, usize>,
    assignments: Vec<Option<Assignment>>,
    max_turn: u32,
    dangling_references: usize,
    fan_in_conflicts: usize,
    root_links: usize,
}

impl<'a> Walker<'a> {
    fn new(messages: &'a [Message], index: &'a HashMap<u64, usize>) -> Self {
        Self {
            messages,
            index,
            assignments: vec![None; messages.len()],
            max_turn: 0,
            dangling_references: 0,
            fan_in_conflicts: 0,
            root_links: 0,
        }
    }

    /// Breadth-first walk of the tree rooted at `root`.
    fn traverse(&mut self, root: usize, conversation_id: u64) {
        self.assignments[root] = Some(Assignment {
            conversation_id,
            turn: 0,
        });

        let mut frontier = vec![root];
        let mut turn = 0u32;

        while !frontier.is_empty() {
            turn += 1;
            let mut next = Vec::new();

            for &parent in &frontier {
                let parent_msg = &self.messages[parent];
                for &reply_id in &parent_msg.response_tweet_id {
                    let Some(&child) = self.index.get(&reply_id) else {
                        debug!(
                            parent = parent_msg.tweet_id,
                            reply = reply_id,
                            "Reply pointer names no message"
                        );
                        self.dangling_references += 1;
                        continue;
                    };

                    if self.messages[child].is_root() {
                        debug!(
                            parent = parent_msg.tweet_id,
                            reply = reply_id,
                            "Reply pointer names a conversation root, skipping"
                        );
                        self.root_links += 1;
                        continue;
                    }

                    if self.assignments[child].is_some() {
                        warn!(
                            parent = parent_msg.tweet_id,
                            reply = reply_id,
                            conversation_id,
                            "Reply already assigned by fan-in or a cycle, keeping first visit"
                        );
                        self.fan_in_conflicts += 1;
                        continue;
                    }

                    self.assignments[child] = Some(Assignment {
                        conversation_id,
                        turn,
                    });
                    next.push(child);
                }
            }

            if !next.is_empty() {
                self.max_turn = self.max_turn.max(turn);
            }
            frontier = next;
        }
    }
}
