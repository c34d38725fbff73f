//! Frequency-based extractive summarizer.

use std::collections::HashMap;

use super::{Summarizer, SummaryLength};
use crate::core::extract::hangul_tokens;
use crate::error::Result;

/// Picks the texts whose Hangul tokens are most frequent across the input.
///
/// A text scores the sum of its tokens' corpus frequencies divided by its
/// token count. The best texts are returned in their original order, one
/// per line.
///
/// ```
/// use issueradar::summarize::{ExtractiveSummarizer, Summarizer, SummaryLength};
///
/// let texts = vec![
///     "배송 지연".to_string(),
///     "배송 누락".to_string(),
///     "감사합니다".to_string(),
/// ];
/// let summary = ExtractiveSummarizer::new()
///     .summarize(&texts, SummaryLength::Sentences(2))
///     .unwrap();
/// assert_eq!(summary, "배송 지연\n배송 누락");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveSummarizer;

impl ExtractiveSummarizer {
    pub fn new() -> Self {
        Self
    }

    /// Scores each text; texts without Hangul tokens score zero.
    pub fn scores(texts: &[String]) -> Vec<f64> {
        let mut frequency: HashMap<&str, usize> = HashMap::new();
        for text in texts {
            for token in hangul_tokens(text) {
                *frequency.entry(token).or_insert(0) += 1;
            }
        }

        texts
            .iter()
            .map(|text| {
                let (sum, count) = hangul_tokens(text)
                    .fold((0usize, 0usize), |(sum, count), t| {
                        (sum + frequency.get(t).copied().unwrap_or(0), count + 1)
                    });
                if count == 0 { 0.0 } else { sum as f64 / count as f64 }
            })
            .collect()
    }
}

impl Summarizer for ExtractiveSummarizer {
    fn name(&self) -> &'static str {
        "extractive"
    }

    fn summarize(&self, texts: &[String], length: SummaryLength) -> Result<String> {
        let keep = length.target(texts.len());
        if keep == 0 {
            return Ok(String::new());
        }

        let scores = Self::scores(texts);
        let mut order: Vec<usize> = (0..texts.len()).collect();
        // stable: equal scores keep the earlier text
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        order.truncate(keep);
        order.sort_unstable();

        Ok(order
            .into_iter()
            .map(|i| texts[i].trim())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
