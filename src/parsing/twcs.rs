//! Field parsers for the customer-support export.
//!
//! Every function here is strict: a value that cannot be interpreted is an
//! error carrying the column name, the raw value and the line number, and
//! the caller rejects the batch.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;

use crate::Message;
use crate::config::TwcsConfig;
use crate::error::{Result, ThreadpackError};

/// Columns that must be present in the CSV header.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "tweet_id",
    "author_id",
    "inbound",
    "created_at",
    "text",
    "response_tweet_id",
    "in_response_to_tweet_id",
];

static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\S+").unwrap());

/// One CSV row before any field is interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct TwcsRawRecord {
    pub tweet_id: String,
    pub author_id: String,
    pub inbound: String,
    pub created_at: String,
    pub text: String,
    pub response_tweet_id: String,
    pub in_response_to_tweet_id: String,
}

impl TwcsRawRecord {
    /// Interprets every field and builds a [`Message`].
    ///
    /// `line` is only used for error reporting.
    pub fn into_message(self, config: &TwcsConfig, line: u64) -> Result<Message> {
        let tweet_id = parse_tweet_id("tweet_id", &self.tweet_id, line)?;
        let inbound = parse_inbound(&self.inbound, line)?;
        let created_at = parse_created_at(&self.created_at, &config.timestamp_format, line)?;
        let response_tweet_id = parse_reply_ids(&self.response_tweet_id, line)?;
        let in_response_to_tweet_id = parse_parent_id(&self.in_response_to_tweet_id, line)?;

        Ok(Message {
            tweet_id,
            author_id: self.author_id,
            inbound,
            created_at,
            text: normalize_text(&self.text, config),
            response_tweet_id,
            in_response_to_tweet_id,
        })
    }
}

/// Removes `@handle` tokens and surrounding whitespace.
///
/// ```
/// use threadpack::parsing::strip_mentions;
///
/// assert_eq!(strip_mentions("@sprintcare my phone is dead"), "my phone is dead");
/// assert_eq!(strip_mentions("thanks @AskPlayStation!"), "thanks");
/// ```
pub fn strip_mentions(text: &str) -> String {
    MENTION_RE.replace_all(text, "").trim().to_string()
}

/// Applies the text normalisation selected in `config`.
pub fn normalize_text(text: &str, config: &TwcsConfig) -> String {
    let text = if config.strip_mentions {
        strip_mentions(text)
    } else {
        text.to_string()
    };

    if config.lowercase {
        text.to_lowercase()
    } else {
        text
    }
}

/// Parses a `created_at` value into UTC.
///
/// `format` must contain an offset specifier so the value is validated, but
/// the clock time is always read as UTC: the export only ever carries `+0000`
/// and the offset is not applied.
pub fn parse_created_at(value: &str, format: &str, line: u64) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(value.trim(), format)
        .map(|dt| dt.naive_local().and_utc())
        .map_err(|e| {
            ThreadpackError::invalid_field(
                "created_at",
                value,
                line,
                format!("expected '{format}' ({e})"),
            )
        })
}

/// Parses a mandatory integer id column.
///
/// Spreadsheet exports write nullable id columns as floats (`3.0`); an
/// all-zero fraction is accepted, anything else is rejected.
pub fn parse_tweet_id(field: &'static str, value: &str, line: u64) -> Result<u64> {
    parse_id(value.trim())
        .ok_or_else(|| ThreadpackError::invalid_field(field, value, line, "expected an integer id"))
}

fn parse_id(token: &str) -> Option<u64> {
    let digits = match token.split_once('.') {
        Some((int, frac)) if !frac.is_empty() && frac.bytes().all(|b| b == b'0') => int,
        Some(_) => return None,
        None => token,
    };
    digits.parse().ok()
}

/// Parses `in_response_to_tweet_id`. An empty field marks a root.
pub fn parse_parent_id(value: &str, line: u64) -> Result<Option<u64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_tweet_id("in_response_to_tweet_id", trimmed, line).map(Some)
}

/// Parses the comma-separated `response_tweet_id` list.
///
/// An empty field yields an empty list. Every token must be an integer.
///
/// ```
/// use threadpack::parsing::parse_reply_ids;
///
/// assert_eq!(parse_reply_ids("2, 3", 1).unwrap(), vec![2, 3]);
/// assert!(parse_reply_ids("", 1).unwrap().is_empty());
/// assert!(parse_reply_ids("2,x", 1).is_err());
/// ```
pub fn parse_reply_ids(value: &str, line: u64) -> Result<Vec<u64>> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(',')
        .map(|token| {
            parse_id(token.trim()).ok_or_else(|| {
                ThreadpackError::invalid_field(
                    "response_tweet_id",
                    value,
                    line,
                    format!("'{}' is not an integer id", token.trim()),
                )
            })
        })
        .collect()
}

/// Parses the `inbound` flag (`True`/`False`, any case, or `1`/`0`).
pub fn parse_inbound(value: &str, line: u64) -> Result<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        Ok(false)
    } else {
        Err(ThreadpackError::invalid_field(
            "inbound",
            value,
            line,
            "expected True or False",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TWCS_TIMESTAMP_FORMAT;
    use chrono::TimeZone;

    fn raw(tweet_id: &str, responses: &str, parent: &str) -> TwcsRawRecord {
        TwcsRawRecord {
            tweet_id: tweet_id.into(),
            author_id: "sprintcare".into(),
            inbound: "False".into(),
            created_at: "Tue Oct 31 22:10:47 +0000 2017".into(),
            text: "@115712 I understand. Please DM us".into(),
            response_tweet_id: responses.into(),
            in_response_to_tweet_id: parent.into(),
        }
    }

    #[test]
    fn test_strip_mentions() {
        assert_eq!(strip_mentions("@a @b hello"), "hello");
        assert_eq!(strip_mentions("hi @sprintcare there"), "hi  there");
        assert_eq!(strip_mentions("no tags"), "no tags");
        assert_eq!(strip_mentions("@only"), "");
    }

    #[test]
    fn test_normalize_text() {
        let config = TwcsConfig::default();
        assert_eq!(normalize_text("@AppleSupport HELP Me", &config), "help me");

        let raw = TwcsConfig::raw_text();
        assert_eq!(normalize_text("@AppleSupport HELP", &raw), "@AppleSupport HELP");
    }

    #[test]
    fn test_parse_created_at() {
        let ts = parse_created_at("Tue Oct 31 22:10:47 +0000 2017", TWCS_TIMESTAMP_FORMAT, 2)
            .unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2017, 10, 31, 22, 10, 47).unwrap());
    }

    #[test]
    fn test_parse_created_at_ignores_offset() {
        let ts = parse_created_at("Tue Oct 31 23:30:00 -0500 2017", TWCS_TIMESTAMP_FORMAT, 2)
            .unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2017, 10, 31, 23, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_created_at_invalid() {
        let err = parse_created_at("2017-10-31 22:10:47", TWCS_TIMESTAMP_FORMAT, 5).unwrap_err();
        assert!(err.is_invalid_field());
        assert!(err.to_string().contains("line 5"));
    }

    #[test]
    fn test_parse_reply_ids() {
        assert_eq!(parse_reply_ids("1", 1).unwrap(), vec![1]);
        assert_eq!(parse_reply_ids("1,2,3", 1).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_reply_ids(" 4 , 5 ", 1).unwrap(), vec![4, 5]);
        assert!(parse_reply_ids("   ", 1).unwrap().is_empty());
    }

    #[test]
    fn test_parse_reply_ids_rejects_garbage() {
        assert!(parse_reply_ids("1,,2", 1).is_err());
        assert!(parse_reply_ids("1.5", 1).is_err());
        assert!(parse_reply_ids("-3", 1).is_err());
        assert!(parse_reply_ids("1.01", 1).is_err());
    }

    #[test]
    fn test_parse_parent_id() {
        assert_eq!(parse_parent_id("", 1).unwrap(), None);
        assert_eq!(parse_parent_id("119237", 1).unwrap(), Some(119237));
        assert_eq!(parse_parent_id("3.0", 1).unwrap(), Some(3));
        assert!(parse_parent_id("3.", 1).is_err());
        assert!(parse_parent_id("abc", 1).is_err());
    }

    #[test]
    fn test_parse_inbound() {
        assert!(parse_inbound("True", 1).unwrap());
        assert!(parse_inbound("true", 1).unwrap());
        assert!(parse_inbound("1", 1).unwrap());
        assert!(!parse_inbound("False", 1).unwrap());
        assert!(!parse_inbound("0", 1).unwrap());
        assert!(parse_inbound("maybe", 1).is_err());
    }

    #[test]
    fn test_into_message() {
        let msg = raw("2", "", "1")
            .into_message(&TwcsConfig::default(), 3)
            .unwrap();
        assert_eq!(msg.tweet_id, 2);
        assert!(!msg.inbound);
        assert_eq!(msg.text, "i understand. please dm us");
        assert_eq!(msg.in_response_to_tweet_id, Some(1));
        assert!(msg.response_tweet_id.is_empty());
    }

    #[test]
    fn test_into_message_bad_id() {
        let err = raw("x1", "", "")
            .into_message(&TwcsConfig::default(), 4)
            .unwrap_err();
        assert!(matches!(
            err,
            ThreadpackError::InvalidField {
                field: "tweet_id",
                line: 4,
                ..
            }
        ));
    }
}
