//! Issue extraction: keyword matching and token frequency ranking.
//!
//! A record is an issue when its text contains any configured keyword as a
//! plain, case-sensitive substring. The matched texts are then split into
//! Hangul tokens (maximal runs of U+AC00..=U+D7A3) and the most frequent
//! tokens are reported.
//!
//! ```
//! use issueradar::Message;
//! use issueradar::core::extract::extract;
//!
//! let records = vec![
//!     Message::new("민수", "09:05", "배송 지연 배송"),
//!     Message::new("지은", "10:00", "좋은 아침"),
//! ];
//! let keywords = vec!["배송".to_string()];
//!
//! let result = extract(&records, &keywords);
//! assert_eq!(result.matched.len(), 1);
//! assert_eq!(result.ranked[0].token, "배송");
//! assert_eq!(result.ranked[0].count, 2);
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Message;

/// Size of the ranked keyword list.
pub const TOP_KEYWORDS: usize = 10;

static HANGUL_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{AC00}-\x{D7A3}]+").expect("hangul pattern is valid"));

/// A token and the number of times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordCount {
    pub token: String,
    pub count: usize,
}

impl KeywordCount {
    pub fn new(token: impl Into<String>, count: usize) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

/// Result of [`extract`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Records containing at least one keyword, in input order.
    pub matched: Vec<Message>,
    /// Up to [`TOP_KEYWORDS`] tokens, most frequent first, ties in encounter order.
    pub ranked: Vec<KeywordCount>,
}

impl Extraction {
    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Returns the matched message bodies.
    pub fn texts(&self) -> Vec<&str> {
        self.matched.iter().map(Message::text).collect()
    }

    /// Returns the `n` highest-ranked tokens.
    pub fn top_tokens(&self, n: usize) -> impl Iterator<Item = &str> {
        self.ranked.iter().take(n).map(|k| k.token.as_str())
    }
}

/// Returns `true` if `text` contains any non-empty keyword.
pub fn contains_keyword(text: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|k| !k.is_empty() && text.contains(k.as_str()))
}

/// Splits text into maximal runs of Hangul syllables.
///
/// ```
/// use issueradar::core::extract::hangul_tokens;
///
/// let tokens: Vec<_> = hangul_tokens("배송이 2일째 지연!! OK 누락").collect();
/// assert_eq!(tokens, vec!["배송이", "일째", "지연", "누락"]);
/// ```
pub fn hangul_tokens(text: &str) -> impl Iterator<Item = &str> {
    HANGUL_RUN_RE.find_iter(text).map(|m| m.as_str())
}

/// Counts Hangul tokens across texts and returns the `limit` most frequent.
///
/// Ordering is by descending count; equal counts keep first-encounter order.
pub fn rank_tokens<'a, I>(texts: I, limit: usize) -> Vec<KeywordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();

    for text in texts {
        for token in hangul_tokens(text) {
            match index.get(token) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(token, counts.len());
                    counts.push(KeywordCount::new(token, 1));
                }
            }
        }
    }

    // stable: ties stay in encounter order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Selects issue records and ranks their tokens.
///
/// An empty keyword list matches nothing.
pub fn extract(records: &[Message], keywords: &[String]) -> Extraction {
    let matched: Vec<Message> = records
        .iter()
        .filter(|m| contains_keyword(&m.text, keywords))
        .cloned()
        .collect();

    let ranked = rank_tokens(matched.iter().map(Message::text), TOP_KEYWORDS);

    debug!(
        records = records.len(),
        keywords = keywords.len(),
        matched = matched.len(),
        distinct_ranked = ranked.len(),
        "extracted issues"
    );

    Extraction { matched, ranked }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    fn records(texts: &[&str]) -> Vec<Message> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Message::new("u", "10:00", *t).with_line(i + 1))
            .collect()
    }

    #[test]
    fn test_both_complaints_match() {
        let recs = records(&["배송이 아직 안 왔어요", "교과서 누락됐어요"]);
        let result = extract(&recs, &kw(&["배송", "누락"]));

        assert_eq!(result.matched.len(), 2);
        let tokens: Vec<_> = result.ranked.iter().map(|k| k.token.as_str()).collect();
        assert_eq!(tokens, vec!["배송이", "아직", "안", "왔어요", "교과서", "누락됐어요"]);
        assert!(result.ranked.iter().all(|k| k.count == 1));
    }

    #[test]
    fn test_standalone_keyword_tokens() {
        let recs = records(&["배송 누락 배송", "누락 확인"]);
        let result = extract(&recs, &kw(&["배송", "누락"]));
        assert_eq!(result.ranked[0], KeywordCount::new("배송", 2));
        assert_eq!(result.ranked[1], KeywordCount::new("누락", 2));
        assert_eq!(result.ranked[2], KeywordCount::new("확인", 1));
    }

    #[test]
    fn test_empty_keywords_match_nothing() {
        let recs = records(&["배송 지연"]);
        assert!(extract(&recs, &[]).is_empty());
        assert!(extract(&recs, &kw(&[""])).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let result = extract(&[], &kw(&["배송"]));
        assert!(result.matched.is_empty());
        assert!(result.ranked.is_empty());
    }

    #[test]
    fn test_match_is_case_sensitive_substring() {
        let recs = records(&["Delivery late", "delivery ok"]);
        let result = extract(&recs, &kw(&["Delivery"]));
        assert_eq!(result.matched.len(), 1);
        // no Hangul tokens in the matched text
        assert!(result.ranked.is_empty());
    }

    #[test]
    fn test_ranked_is_capped() {
        let text = "가 나 다 라 마 바 사 아 자 차 카 타 파 하";
        let ranked = rank_tokens([text], TOP_KEYWORDS);
        assert_eq!(ranked.len(), TOP_KEYWORDS);
        assert_eq!(ranked[0].token, "가");
        assert_eq!(ranked[9].token, "차");
    }

    #[test]
    fn test_matched_keeps_input_order() {
        let recs = records(&["누락", "무관", "배송"]);
        let result = extract(&recs, &kw(&["배송", "누락"]));
        let lines: Vec<_> = result.matched.iter().map(|m| m.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_top_tokens() {
        let recs = records(&["오류 오류 오류 지연 지연 누락"]);
        let result = extract(&recs, &kw(&["오류"]));
        let top: Vec<_> = result.top_tokens(2).collect();
        assert_eq!(top, vec!["오류", "지연"]);
    }
}
