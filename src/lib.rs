//! # issueradar
//!
//! Finds complaint messages in KakaoTalk chat exports, ranks the words
//! they use, labels them by topic and sentiment, and correlates the top
//! keywords with news search results.
//!
//! ## Overview
//!
//! The pipeline is:
//!
//! 1. **Parse** the export into [`Message`] records ([`parsers::KakaoParser`])
//! 2. **Select** a date range and optional user ([`core::FilterConfig`])
//! 3. **Extract** records containing issue keywords and rank their Hangul
//!    tokens ([`core::extract()`])
//! 4. **Label** the ranked tokens ([`core::Taxonomy`], [`core::SentimentTable`])
//! 5. Optionally **summarize** and **search news** through the external
//!    collaborators in [`summarize`] and [`news`]
//!
//! ## Quick Start
//!
//! ```rust
//! use issueradar::prelude::*;
//!
//! let export = "\
//! --------------- 2024년 3월 5일 화요일 ---------------
//! [민수] [오전 9:05] 배송이 아직 안 왔어요
//! [지은] [오후 2:30] 교과서 누락됐어요
//! ";
//!
//! let records = issueradar::parse(export.as_bytes());
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].time, "14:30");
//!
//! let keywords = vec!["배송".to_string(), "누락".to_string()];
//! let result = extract(&records, &keywords);
//! assert_eq!(result.matched.len(), 2);
//! assert_eq!(result.ranked[0].token, "배송이");
//! ```
//!
//! ## Streaming Large Exports
//!
//! ```rust,no_run
//! use issueradar::prelude::*;
//!
//! let parser = KakaoParser::with_streaming();
//! for result in parser.stream("huge_chat.txt".as_ref())? {
//!     let msg = result?;
//!     println!("{} {}: {}", msg.time, msg.user, msg.text);
//! }
//! # Ok::<(), issueradar::RadarError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - the [`Parser`](parser::Parser) trait
//! - [`parsers`] - [`KakaoParser`](parsers::KakaoParser)
//! - [`parsing`] - line grammar, time conversion and the stateful line decoder
//! - [`streaming`] - line-by-line iterator over a reader
//! - [`core`] - filtering, forward-fill, extraction, labels and writers
//! - [`analysis`] - the end-to-end [`Analyzer`](analysis::Analyzer)
//! - [`session`] - memoized analysis state
//! - [`collab`] - retry, cache and [`Outcome`](collab::Outcome)
//! - [`news`] / [`summarize`] - external collaborators
//! - [`report`] - the printable [`IssueReport`](report::IssueReport)
//! - [`config`] - builder configs and the TOML [`RadarConfig`]
//! - [`error`] - [`RadarError`] and [`Result`]

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod collab;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod news;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod report;
pub mod session;
#[cfg(feature = "streaming")]
pub mod streaming;
pub mod summarize;

pub use config::RadarConfig;
pub use error::{RadarError, Result};
pub use message::Message;

/// Parses a KakaoTalk export with the default configuration.
///
/// Bytes are decoded as UTF-8 (invalid sequences replaced, BOM stripped).
/// Malformed lines are skipped, so this never fails.
pub fn parse(raw: &[u8]) -> Vec<Message> {
    parsers::KakaoParser::new().parse_raw(raw)
}

pub use core::extract::extract;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use issueradar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::error::{RadarError, Result};

    pub use crate::parser::Parser;
    pub use crate::parsers::KakaoParser;

    pub use crate::config::{KakaoConfig, PreHeaderPolicy, RadarConfig};

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;
    pub use crate::core::processor::{ProcessingStats, date_span, forward_fill_dates};

    pub use crate::core::categorize::{SentimentTable, Taxonomy, annotate};
    pub use crate::core::extract::{Extraction, KeywordCount, extract};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::analysis::{Analysis, Analyzer};
    pub use crate::collab::{Outcome, RetryPolicy};
    pub use crate::format::OutputFormat;
    pub use crate::news::{Article, NewsProvider};
    pub use crate::summarize::{Summarizer, SummaryLength};
}
