//! Filter messages by date range and user.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | User | [`with_user`](FilterConfig::with_user) | Messages from a specific user |
//!
//! # Examples
//!
//! ## Filter by Date Range
//!
//! ```
//! use issueradar::core::filter::{FilterConfig, apply_filters};
//! use issueradar::Message;
//!
//! # fn main() -> issueradar::Result<()> {
//! let messages = vec![
//!     Message::new("민수", "09:00", "지난달").with_date("2024년 2월 28일 수요일"),
//!     Message::new("지은", "10:00", "이번달").with_date("2024년 3월 5일 화요일"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-03-01")?
//!     .with_date_to("2024-03-31")?;
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "이번달");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Dates come from the `<year>년 <month>월 <day>일` part of each record's
//!   date phrase; records without one are **excluded** when date filters are active
//! - Both bounds are inclusive
//! - User matching is exact, except ASCII letters compare case-insensitively
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;

use crate::Message;
use crate::error::{RadarError, Result};

/// Configuration for filtering messages by date and user.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterConfig {
    /// Include only messages on or after this date.
    pub from_date: Option<NaiveDate>,

    /// Include only messages on or before this date.
    pub to_date: Option<NaiveDate>,

    /// Include only messages from this user.
    pub user: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.from_date = Some(parse_iso_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.to_date = Some(parse_iso_date(date_str)?);
        Ok(self)
    }

    /// Sets the start date directly.
    #[must_use]
    pub fn with_from(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    /// Sets the end date directly.
    #[must_use]
    pub fn with_to(mut self, date: NaiveDate) -> Self {
        self.to_date = Some(date);
        self
    }

    /// Sets the user filter.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_user_filter()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.from_date.is_some() || self.to_date.is_some()
    }

    /// Returns `true` if the user filter is active.
    pub fn has_user_filter(&self) -> bool {
        self.user.is_some()
    }

    /// Returns `true` if `date` lies within the configured bounds.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.from_date.is_none_or(|from| date >= from) && self.to_date.is_none_or(|to| date <= to)
    }

    /// Returns `true` if the message passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if let Some(ref user) = self.user {
            if !msg.user.eq_ignore_ascii_case(user) {
                return false;
            }
        }

        if self.has_date_filter() {
            return msg.calendar_date().is_some_and(|d| self.contains_date(d));
        }

        true
    }
}

/// Parses a `YYYY-MM-DD` string.
pub fn parse_iso_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| RadarError::invalid_date(date_str))
}

/// Filters a collection of messages based on the provided configuration.
///
/// Returns a new vector containing only messages that match all active filters.
/// If no filters are active, returns the original messages unchanged.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages.into_iter().filter(|msg| config.matches(msg)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_msg(user: &str, text: &str, date: Option<&str>) -> Message {
        let msg = Message::new(user, "12:00", text);
        match date {
            Some(d) => msg.with_date(d),
            None => msg,
        }
    }

    #[test]
    fn test_filter_by_user() {
        let messages = vec![
            make_msg("Alice", "Hello", None),
            make_msg("민수", "안녕", None),
            make_msg("alice", "Bye", None),
        ];

        let filtered = apply_filters(messages, &FilterConfig::new().with_user("Alice"));
        assert_eq!(filtered.len(), 2);

        let messages = vec![make_msg("민수", "안녕", None), make_msg("지은", "네", None)];
        let filtered = apply_filters(messages, &FilterConfig::new().with_user("민수"));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_filter_by_date_from() {
        let messages = vec![
            make_msg("a", "Old", Some("2024년 1월 1일 월요일")),
            make_msg("a", "New", Some("2024년 6월 15일 토요일")),
        ];

        let config = FilterConfig::new().with_date_from("2024-06-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text, "New");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let messages = vec![
            make_msg("a", "first", Some("2024년 3월 1일")),
            make_msg("a", "last", Some("2024년 3월 31일")),
            make_msg("a", "after", Some("2024년 4월 1일")),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-03-01")
            .unwrap()
            .with_date_to("2024-03-31")
            .unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[1].text, "last");
    }

    #[test]
    fn test_undated_excluded_only_when_date_filter() {
        let messages = vec![
            make_msg("a", "dated", Some("2024년 6월 15일")),
            make_msg("a", "undated", None),
            make_msg("a", "bad date", Some("2024년 2월 30일")),
        ];

        let all = apply_filters(messages.clone(), &FilterConfig::new());
        assert_eq!(all.len(), 3);

        let config = FilterConfig::new().with_date_from("2024-01-01").unwrap();
        let filtered = apply_filters(messages, &config);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text, "dated");
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("2024년 1월 1일");
        assert!(matches!(result, Err(RadarError::InvalidDate { .. })));
        assert!(FilterConfig::new().with_date_to("2024-13-01").is_err());
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterConfig::new().is_active());
        assert!(FilterConfig::new().with_user("민수").is_active());
        assert!(
            FilterConfig::new()
                .with_date_to("2024-01-01")
                .unwrap()
                .has_date_filter()
        );
    }
}
