//! The message record produced by the chat-log parser.
//!
//! A [`Message`] is one decoded chat line: the date phrase of the most recent
//! date header, the speaker, a normalized 24-hour time and the body text.
//!
//! # Examples
//!
//! ```
//! use issueradar::Message;
//!
//! let msg = Message::new("민수", "09:05", "배송이 아직 안 왔어요")
//!     .with_date("2024년 3월 5일 화요일");
//!
//! assert_eq!(msg.user(), "민수");
//! assert_eq!(msg.date(), Some("2024년 3월 5일 화요일"));
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::parsing::kakao::normalize_date;

/// A single chat message recovered from an export.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `date` | `Option<String>` | Localized date phrase from the last header, if any |
/// | `user` | `String` | Display name of the speaker |
/// | `time` | `String` | Zero-padded 24-hour `HH:MM` |
/// | `text` | `String` | Single-line message body |
/// | `line` | `usize` | 1-based line number in the source export |
///
/// Records keep source order; `line` is the witness of that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Date phrase exactly as written in the header, e.g. `2024년 3월 5일 화요일`.
    ///
    /// `None` for messages that appeared before any header (only kept under
    /// [`PreHeaderPolicy::Keep`](crate::config::PreHeaderPolicy::Keep)).
    #[serde(default)]
    pub date: Option<String>,

    /// Display name of the speaker. May be a system account.
    pub user: String,

    /// Time of day as `HH:MM` on a 24-hour clock.
    pub time: String,

    /// Message body.
    pub text: String,

    /// 1-based source line number.
    #[serde(default)]
    pub line: usize,
}

impl Message {
    /// Creates a record without a date or line number.
    pub fn new(user: impl Into<String>, time: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date: None,
            user: user.into(),
            time: time.into(),
            text: text.into(),
            line: 0,
        }
    }

    /// Builder method to set the date phrase.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Builder method to set the source line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Returns the date phrase, if any.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Returns the speaker name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the `HH:MM` time.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the calendar date of this record.
    ///
    /// Only the `<year>년 <month>월 <day>일` part of the phrase is used;
    /// anything unparseable yields `None`.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(normalize_date)
    }
}
