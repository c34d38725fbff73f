//! Core processing logic for issueradar.
//!
//! This module contains:
//! - [`models`] - Output configuration
//! - [`filter`] - Record filtering by date range and user
//! - [`processor`] - Date forward-fill, analyzable range and statistics
//! - [`extract`] - Keyword matching and token ranking
//! - [`categorize`] - Topic and sentiment labels for ranked tokens
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use issueradar::Message;
//! use issueradar::core::{FilterConfig, apply_filters, extract, forward_fill_dates};
//!
//! # fn main() -> issueradar::Result<()> {
//! let records = vec![
//!     Message::new("민수", "09:05", "배송이 아직 안 왔어요").with_date("2024년 3월 5일 화요일"),
//! ];
//! let records = forward_fill_dates(records);
//! let in_range = apply_filters(records, &FilterConfig::new().with_date_from("2024-03-01")?);
//! let result = extract(&in_range, &["배송".to_string()]);
//! assert_eq!(result.matched.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod categorize;
pub mod extract;
pub mod filter;
pub mod models;
pub mod output;
pub mod processor;

// Re-export main types for convenience
pub use categorize::{KeywordInsight, SentimentTable, Taxonomy, annotate, category_totals};
pub use extract::{Extraction, KeywordCount, TOP_KEYWORDS, extract, hangul_tokens, rank_tokens};
pub use filter::{FilterConfig, apply_filters};
pub use models::OutputConfig;
pub use processor::{DateSpan, ProcessingStats, date_span, forward_fill_dates};

// Re-export Message from the crate root
pub use crate::Message;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
