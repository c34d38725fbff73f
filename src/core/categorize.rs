//! Topic and sentiment labels for ranked keywords.
//!
//! Both tables are plain configuration data; see `[[categories]]` and
//! `[sentiment]` in [`RadarConfig`](crate::config::RadarConfig).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::{CategoryConfig, RadarConfig, SentimentConfig};

use super::extract::KeywordCount;

/// Ordered list of topics. The first topic whose keyword occurs inside a
/// token wins; tokens matching none go to the fallback bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    topics: Vec<CategoryConfig>,
    fallback: String,
}

impl Taxonomy {
    pub fn new(topics: Vec<CategoryConfig>, fallback: impl Into<String>) -> Self {
        Self {
            topics,
            fallback: fallback.into(),
        }
    }

    /// Builds the taxonomy from application configuration.
    pub fn from_config(config: &RadarConfig) -> Self {
        Self::new(config.categories.clone(), config.analysis.uncategorized.clone())
    }

    /// Returns the topic name for `token`.
    ///
    /// ```
    /// use issueradar::config::CategoryConfig;
    /// use issueradar::core::categorize::Taxonomy;
    ///
    /// let taxonomy = Taxonomy::new(
    ///     vec![
    ///         CategoryConfig::new("배송", &["배송", "지연"]),
    ///         CategoryConfig::new("수량", &["누락"]),
    ///     ],
    ///     "기타",
    /// );
    /// assert_eq!(taxonomy.categorize("배송이"), "배송");
    /// assert_eq!(taxonomy.categorize("누락됐어요"), "수량");
    /// assert_eq!(taxonomy.categorize("교과서"), "기타");
    /// ```
    pub fn categorize(&self, token: &str) -> &str {
        self.topics
            .iter()
            .find(|topic| {
                topic
                    .keywords
                    .iter()
                    .any(|k| !k.is_empty() && token.contains(k.as_str()))
            })
            .map(|topic| topic.name.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    /// Returns the fallback bucket name.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Returns the configured topics in priority order.
    pub fn topics(&self) -> &[CategoryConfig] {
        &self.topics
    }
}

/// Exact-match token to sentiment label lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentTable {
    labels: BTreeMap<String, String>,
    default_label: String,
}

impl SentimentTable {
    pub fn new(labels: BTreeMap<String, String>, default_label: impl Into<String>) -> Self {
        Self {
            labels,
            default_label: default_label.into(),
        }
    }

    pub fn from_config(config: &SentimentConfig) -> Self {
        Self::new(config.labels.clone(), config.default_label.clone())
    }

    /// Returns the label for `token`, or the default label.
    pub fn label(&self, token: &str) -> &str {
        self.labels
            .get(token)
            .map(String::as_str)
            .unwrap_or(self.default_label.as_str())
    }
}

/// A ranked keyword with its topic and sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordInsight {
    pub token: String,
    pub count: usize,
    pub category: String,
    pub sentiment: String,
}

/// Labels each ranked keyword, preserving rank order.
pub fn annotate(
    ranked: &[KeywordCount],
    taxonomy: &Taxonomy,
    sentiment: &SentimentTable,
) -> Vec<KeywordInsight> {
    ranked
        .iter()
        .map(|k| KeywordInsight {
            token: k.token.clone(),
            count: k.count,
            category: taxonomy.categorize(&k.token).to_string(),
            sentiment: sentiment.label(&k.token).to_string(),
        })
        .collect()
}

/// Sums keyword counts per topic, in taxonomy order with the fallback last.
/// Topics without hits are omitted.
pub fn category_totals(insights: &[KeywordInsight], taxonomy: &Taxonomy) -> Vec<(String, usize)> {
    let names = taxonomy
        .topics()
        .iter()
        .map(|t| t.name.as_str())
        .chain(std::iter::once(taxonomy.fallback()));

    let mut totals: Vec<(String, usize)> = Vec::new();
    for name in names {
        if totals.iter().any(|(n, _)| n == name) {
            continue;
        }
        let sum: usize = insights
            .iter()
            .filter(|i| i.category == name)
            .map(|i| i.count)
            .sum();
        if sum > 0 {
            totals.push((name.to_string(), sum));
        }
    }
    totals
}
