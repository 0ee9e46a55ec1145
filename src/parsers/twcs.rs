//! Customer-support CSV export parser.
//!
//! Reads the columns `tweet_id, author_id, inbound, created_at, text,
//! response_tweet_id, in_response_to_tweet_id` by header name, so column order
//! does not matter and extra columns are ignored.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{StringRecord, StringRecordsIntoIter};
use tracing::info;

use super::ExportParser;
use crate::Message;
use crate::config::TwcsConfig;
use crate::error::{Result, ThreadpackError};
use crate::parsing::{REQUIRED_COLUMNS, TwcsRawRecord};

/// Parser for the customer-support CSV export.
pub struct TwcsParser {
    config: TwcsConfig,
}

impl TwcsParser {
    /// Creates a parser with default settings.
    pub fn new() -> Self {
        Self {
            config: TwcsConfig::default(),
        }
    }

    /// Creates a parser with the given configuration.
    pub fn with_config(config: TwcsConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &TwcsConfig {
        &self.config
    }

    /// Returns a row iterator over `reader`.
    ///
    /// Use this for files that should be validated or inspected row by row.
    /// The header is checked eagerly; each row is interpreted lazily.
    pub fn rows<R: Read>(&self, reader: R) -> Result<TwcsRows<R>> {
        self.rows_with_path(reader, None)
    }

    /// Reads every row from `reader`, failing on the first malformed one.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<Message>> {
        let messages = self.rows(reader)?.collect::<Result<Vec<_>>>()?;
        info!(rows = messages.len(), "Parsed twcs export");
        Ok(messages)
    }

    fn rows_with_path<R: Read>(&self, reader: R, path: Option<PathBuf>) -> Result<TwcsRows<R>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| ThreadpackError::twcs_parse(e, path.clone()))?
            .clone();

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(ThreadpackError::MissingColumn(column));
            }
        }

        Ok(TwcsRows {
            records: reader.into_records(),
            headers: trim_headers(&headers),
            config: self.config.clone(),
            path,
        })
    }
}

impl Default for TwcsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportParser for TwcsParser {
    fn name(&self) -> &'static str {
        "twcs CSV"
    }

    fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let file = File::open(path)?;
        let messages = self
            .rows_with_path(BufReader::new(file), Some(path.to_path_buf()))?
            .collect::<Result<Vec<_>>>()?;
        info!(
            rows = messages.len(),
            path = %path.display(),
            "Parsed twcs export"
        );
        Ok(messages)
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        self.parse_reader(content.as_bytes())
    }
}

/// Iterator over the rows of a support export.
///
/// Yields one [`Message`] per CSV row. A malformed row yields an error; callers
/// running a batch should stop at the first one.
pub struct TwcsRows<R> {
    records: StringRecordsIntoIter<R>,
    headers: StringRecord,
    config: TwcsConfig,
    path: Option<PathBuf>,
}

impl<R: Read> TwcsRows<R> {
    fn decode(&self, record: &StringRecord) -> Result<Message> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw: TwcsRawRecord = record
            .deserialize(Some(&self.headers))
            .map_err(|e| ThreadpackError::twcs_parse(e, self.path.clone()))?;
        raw.into_message(&self.config, line)
    }
}

impl<R: Read> Iterator for TwcsRows<R> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(ThreadpackError::twcs_parse(e, self.path.clone()))),
        };
        Some(self.decode(&record))
    }
}

fn trim_headers(headers: &StringRecord) -> StringRecord {
    headers.iter().map(str::trim).collect()
}
