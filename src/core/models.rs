//! Output configuration and the flattened record shape shared by writers.

use serde::Serialize;

use crate::Message;

/// Configuration for output format.
/// Controls which metadata fields are included in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include the record date
    pub include_dates: bool,
    /// Include the `HH:MM` time
    pub include_times: bool,
    /// Include the source line number
    pub include_lines: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Date and time columns enabled, line numbers off.
    pub fn full() -> Self {
        Self::new().with_dates().with_times()
    }

    #[must_use]
    pub fn with_dates(mut self) -> Self {
        self.include_dates = true;
        self
    }

    #[must_use]
    pub fn with_times(mut self) -> Self {
        self.include_times = true;
        self
    }

    #[must_use]
    pub fn with_lines(mut self) -> Self {
        self.include_lines = true;
        self
    }
}

/// Returns the date to print for a record: ISO `YYYY-MM-DD` when the phrase
/// normalizes, otherwise the phrase itself, otherwise empty.
pub(crate) fn display_date(msg: &Message) -> String {
    match msg.calendar_date() {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => msg.date.clone().unwrap_or_default(),
    }
}

/// Minimal message structure for JSON and JSONL output.
/// Only includes fields enabled in `OutputConfig`.
#[cfg_attr(not(feature = "json-output"), allow(dead_code))]
#[derive(Debug, Serialize)]
pub(crate) struct OutputRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<&'a str>,
    pub user: &'a str,
    pub message: &'a str,
}

#[cfg_attr(not(feature = "json-output"), allow(dead_code))]
impl<'a> OutputRecord<'a> {
    pub fn from_message(msg: &'a Message, config: &OutputConfig) -> Self {
        Self {
            line: config.include_lines.then_some(msg.line),
            date: config.include_dates.then(|| display_date(msg)),
            time: config.include_times.then_some(msg.time.as_str()),
            user: &msg.user,
            message: &msg.text,
        }
    }
}
