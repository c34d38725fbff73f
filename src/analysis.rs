//! The core pipeline from parsed records to labeled keyword statistics.
//!
//! ```
//! use issueradar::{Message, RadarConfig};
//! use issueradar::analysis::Analyzer;
//! use issueradar::core::FilterConfig;
//!
//! let records = vec![
//!     Message::new("민수", "09:05", "배송 지연").with_date("2024년 3월 5일 화요일").with_line(2),
//!     Message::new("지은", "14:30", "좋은 하루").with_date("2024년 3월 5일 화요일").with_line(3),
//! ];
//! let analysis = Analyzer::from_config(&RadarConfig::default())
//!     .analyze(&records, &FilterConfig::new());
//!
//! assert_eq!(analysis.stats.matched, 1);
//! assert_eq!(analysis.insights[0].category, "배송");
//! ```

use serde::Serialize;
use tracing::info;

use crate::Message;
use crate::config::RadarConfig;
use crate::core::{
    DateSpan, FilterConfig, KeywordInsight, ProcessingStats, SentimentTable, Taxonomy, annotate,
    apply_filters, category_totals, date_span, extract, forward_fill_dates,
};

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub stats: ProcessingStats,
    /// Date range covered by all parsed records
    pub available: Option<DateSpan>,
    /// Date range covered by the records that passed the filter
    pub analyzed: Option<DateSpan>,
    pub keywords: Vec<String>,
    /// Issue records in source order
    #[serde(skip)]
    pub matched: Vec<Message>,
    /// Ranked tokens with topic and sentiment
    pub insights: Vec<KeywordInsight>,
    /// Keyword hits per topic
    pub categories: Vec<(String, usize)>,
}

impl Analysis {
    pub fn has_matches(&self) -> bool {
        !self.matched.is_empty()
    }

    /// Bodies of the matched records.
    pub fn matched_texts(&self) -> Vec<&str> {
        self.matched.iter().map(Message::text).collect()
    }

    /// The `n` highest-ranked tokens.
    pub fn top_tokens(&self, n: usize) -> Vec<&str> {
        self.insights.iter().take(n).map(|i| i.token.as_str()).collect()
    }
}

/// Keyword list plus the labeling tables.
#[derive(Debug, Clone)]
pub struct Analyzer {
    keywords: Vec<String>,
    taxonomy: Taxonomy,
    sentiment: SentimentTable,
}

impl Analyzer {
    pub fn new(keywords: Vec<String>, taxonomy: Taxonomy, sentiment: SentimentTable) -> Self {
        Self {
            keywords,
            taxonomy,
            sentiment,
        }
    }

    pub fn from_config(config: &RadarConfig) -> Self {
        Self::new(
            config.analysis.keywords.clone(),
            Taxonomy::from_config(config),
            SentimentTable::from_config(&config.sentiment),
        )
    }

    /// Replaces the keyword list.
    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Forward-fills dates, filters, extracts and labels.
    pub fn analyze(&self, records: &[Message], filter: &FilterConfig) -> Analysis {
        let filled = forward_fill_dates(records.to_vec());
        let available = date_span(&filled);
        let in_range = apply_filters(filled, filter);
        let analyzed = date_span(&in_range);

        let extraction = extract(&in_range, &self.keywords);
        let insights = annotate(&extraction.ranked, &self.taxonomy, &self.sentiment);
        let categories = category_totals(&insights, &self.taxonomy);

        let stats = ProcessingStats {
            parsed: records.len(),
            in_range: in_range.len(),
            matched: extraction.matched.len(),
        };
        info!(
            parsed = stats.parsed,
            in_range = stats.in_range,
            matched = stats.matched,
            "analysis complete"
        );

        Analysis {
            stats,
            available,
            analyzed,
            keywords: self.keywords.clone(),
            matched: extraction.matched,
            insights,
            categories,
        }
    }
}
