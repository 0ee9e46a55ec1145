//! Filter enriched rows by date, author and direction.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for selecting rows from a reconstructed table.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Day | [`with_day`](FilterConfig::with_day) | Messages on one UTC calendar day |
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Author | [`with_author`](FilterConfig::with_author) | Messages from one author |
//! | Direction | [`with_inbound`](FilterConfig::with_inbound) | Customer or business messages |
//!
//! # Examples
//!
//! ```
//! use threadpack::core::filter::{FilterConfig, apply_filters};
//! use threadpack::core::models::EnrichedMessage;
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> threadpack::Result<()> {
//! let row = |id, inbound, day| EnrichedMessage {
//!     tweet_id: id,
//!     author_id: "sprintcare".into(),
//!     inbound,
//!     created_at: Utc.with_ymd_and_hms(2017, 10, day, 12, 0, 0).unwrap(),
//!     text: "hi".into(),
//!     conversation_id: 0,
//!     turn: 0,
//! };
//! let rows = vec![row(1, false, 10), row(2, true, 10), row(3, false, 11)];
//!
//! let config = FilterConfig::new().with_day(2017, 10, 10)?.with_inbound(false);
//! let filtered = apply_filters(&rows, &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].tweet_id, 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Dates are UTC calendar days; bounds are inclusive
//! - Author matching is exact (author ids are handles or numeric ids)
//! - Multiple filters are combined with AND logic

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::models::EnrichedMessage;
use crate::error::ThreadpackError;

/// Configuration for filtering rows.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages on or after this timestamp.
    pub after: Option<DateTime<Utc>>,

    /// Include only messages before this timestamp (exclusive).
    pub before: Option<DateTime<Utc>>,

    /// Include only messages from this author.
    pub author: Option<String>,

    /// Include only messages with this direction.
    pub inbound: Option<bool>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all rows pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one UTC calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadpackError::InvalidDate`] if the date does not exist.
    pub fn with_day(mut self, year: i32, month: u32, day: u32) -> Result<Self, ThreadpackError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ThreadpackError::invalid_date(format!("{year:04}-{month:02}-{day:02}"))
        })?;
        self.after = Some(start_of(date));
        self.before = Some(start_of(next_day(date)?));
        Ok(self)
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadpackError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ThreadpackError> {
        let date = parse_date(date_str)?;
        self.after = Some(start_of(date));
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadpackError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ThreadpackError> {
        let date = parse_date(date_str)?;
        self.before = Some(start_of(next_day(date)?));
        Ok(self)
    }

    /// Sets the author filter.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Keeps only customer (`true`) or business (`false`) messages.
    #[must_use]
    pub fn with_inbound(mut self, inbound: bool) -> Self {
        self.inbound = Some(inbound);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some()
            || self.before.is_some()
            || self.author.is_some()
            || self.inbound.is_some()
    }

    /// Returns `true` if `row` passes every active filter.
    pub fn matches(&self, row: &EnrichedMessage) -> bool {
        if self.author.as_deref().is_some_and(|a| a != row.author_id) {
            return false;
        }
        if self.inbound.is_some_and(|inbound| inbound != row.inbound) {
            return false;
        }
        if self.after.is_some_and(|after| row.created_at < after) {
            return false;
        }
        if self.before.is_some_and(|before| row.created_at >= before) {
            return false;
        }
        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ThreadpackError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ThreadpackError::invalid_date(date_str))
}

fn next_day(date: NaiveDate) -> Result<NaiveDate, ThreadpackError> {
    date.succ_opt()
        .ok_or_else(|| ThreadpackError::invalid_date(date.to_string()))
}

fn start_of(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Selects the rows that match all active filters, preserving order.
///
/// If no filters are active, every row is returned.
pub fn apply_filters<'a>(
    rows: &'a [EnrichedMessage],
    config: &FilterConfig,
) -> Vec<&'a EnrichedMessage> {
    if !config.is_active() {
        return rows.iter().collect();
    }

    rows.iter().filter(|row| config.matches(row)).collect()
}
