//! Memoized analysis state for interactive front ends.
//!
//! A session remembers the last result and the key of the input that
//! produced it. Asking again with the same key returns the stored result;
//! any change in records, keywords or date range recomputes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::Message;
use crate::core::FilterConfig;

/// Fingerprint of an analysis input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisKey(u64);

impl AnalysisKey {
    pub fn new(records: &[Message], keywords: &[String], filter: &FilterConfig) -> Self {
        let mut hasher = DefaultHasher::new();
        records.hash(&mut hasher);
        keywords.hash(&mut hasher);
        filter.hash(&mut hasher);
        Self(hasher.finish())
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// What a session currently holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState<T> {
    #[default]
    Idle,
    Completed { key: AnalysisKey, result: T },
}

/// Holds at most one computed result.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession<T> {
    state: SessionState<T>,
    computations: usize,
}

impl<T> AnalysisSession<T> {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            computations: 0,
        }
    }

    pub fn state(&self) -> &SessionState<T> {
        &self.state
    }

    /// The stored result, if any.
    pub fn result(&self) -> Option<&T> {
        match &self.state {
            SessionState::Completed { result, .. } => Some(result),
            SessionState::Idle => None,
        }
    }

    /// How many times `compute` has actually run.
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Returns the stored result when `key` matches, otherwise runs
    /// `compute` and stores its result under `key`.
    pub fn get_or_compute<F>(&mut self, key: AnalysisKey, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        let fresh = matches!(&self.state, SessionState::Completed { key: stored, .. } if *stored == key);
        if fresh {
            debug!(key = key.value(), "reusing session result");
        } else {
            self.computations += 1;
            self.state = SessionState::Completed {
                key,
                result: compute(),
            };
        }

        match &self.state {
            SessionState::Completed { result, .. } => result,
            SessionState::Idle => unreachable!("session was just completed"),
        }
    }

    /// Forgets the stored result.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Message> {
        vec![Message::new("민수", "09:05", "배송 지연").with_date("2024년 3월 5일")]
    }

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_same_key_reuses_result() {
        let mut session = AnalysisSession::new();
        let key = AnalysisKey::new(&records(), &kw(&["배송"]), &FilterConfig::new());

        assert_eq!(*session.get_or_compute(key, || 1), 1);
        assert_eq!(*session.get_or_compute(key, || 2), 1);
        assert_eq!(session.computations(), 1);
    }

    #[test]
    fn test_changed_range_recomputes() {
        let mut session = AnalysisSession::new();
        let all = AnalysisKey::new(&records(), &kw(&["배송"]), &FilterConfig::new());
        let ranged = AnalysisKey::new(
            &records(),
            &kw(&["배송"]),
            &FilterConfig::new().with_date_from("2024-03-06").unwrap(),
        );
        assert_ne!(all, ranged);

        session.get_or_compute(all, || "all");
        assert_eq!(*session.get_or_compute(ranged, || "ranged"), "ranged");
        assert_eq!(session.computations(), 2);
    }

    #[test]
    fn test_changed_keywords_or_records_recompute() {
        let base = AnalysisKey::new(&records(), &kw(&["배송"]), &FilterConfig::new());
        assert_ne!(base, AnalysisKey::new(&records(), &kw(&["누락"]), &FilterConfig::new()));
        assert_ne!(base, AnalysisKey::new(&[], &kw(&["배송"]), &FilterConfig::new()));
    }

    #[test]
    fn test_reset() {
        let mut session = AnalysisSession::new();
        let key = AnalysisKey::new(&[], &[], &FilterConfig::new());
        session.get_or_compute(key, || 5);
        assert_eq!(session.result(), Some(&5));

        session.reset();
        assert_eq!(session.state(), &SessionState::Idle);
        assert_eq!(*session.get_or_compute(key, || 6), 6);
    }
}
