//! Record post-processing and statistics.

use chrono::NaiveDate;
use serde::Serialize;

use crate::Message;

/// Replaces missing dates with the most recent earlier date.
///
/// Records before the first dated record keep `date: None`. Applying this
/// twice gives the same result as applying it once.
///
/// # Example
/// Input:  `[None, Some(d1), None, Some(d2), None]`
/// Output: `[None, Some(d1), Some(d1), Some(d2), Some(d2)]`
pub fn forward_fill_dates(messages: Vec<Message>) -> Vec<Message> {
    let mut last: Option<String> = None;

    messages
        .into_iter()
        .map(|mut msg| {
            match msg.date {
                Some(ref date) => last = Some(date.clone()),
                None => msg.date.clone_from(&last),
            }
            msg
        })
        .collect()
}

/// The earliest and latest calendar dates present in a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    /// Earliest normalized date
    pub start: NaiveDate,
    /// Latest normalized date
    pub end: NaiveDate,
}

impl DateSpan {
    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Returns the analyzable date range, or `None` if no record has a usable date.
pub fn date_span(messages: &[Message]) -> Option<DateSpan> {
    messages
        .iter()
        .filter_map(Message::calendar_date)
        .fold(None, |span, date| match span {
            None => Some(DateSpan {
                start: date,
                end: date,
            }),
            Some(DateSpan { start, end }) => Some(DateSpan {
                start: start.min(date),
                end: end.max(date),
            }),
        })
}

/// Statistics about one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingStats {
    /// Records produced by the parser
    pub parsed: usize,
    /// Records left after the date/user filter
    pub in_range: usize,
    /// Records that contained an issue keyword
    pub matched: usize,
}

impl ProcessingStats {
    /// Share of in-range records that matched, as a percentage.
    pub fn match_ratio(&self) -> f64 {
        if self.in_range == 0 {
            return 0.0;
        }
        (self.matched as f64 / self.in_range as f64) * 100.0
    }
}
