//! KakaoTalk TXT export parser.
//!
//! KakaoTalk's PC client exports a chat room as plain text. Days are
//! separated by dashed header lines and each message sits on its own line:
//!
//! ```text
//! --------------- 2024년 3월 5일 화요일 ---------------
//! [민수] [오전 9:05] 배송이 아직 안 왔어요
//! ```
//!
//! Anything else (join notices, continuation lines of multi-line messages,
//! blank lines) is ignored.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::Message;
use crate::config::KakaoConfig;
use crate::error::Result;
use crate::parser::Parser;
use crate::parsing::kakao::{LineDecoder, RecordPredicate, strip_bom};

#[cfg(feature = "streaming")]
use crate::parser::{MessageStream, ParseIterator};
#[cfg(feature = "streaming")]
use crate::streaming::{KakaoStreamingParser, StreamingConfig, StreamingParser};

/// Parser for KakaoTalk TXT exports.
///
/// # Example
///
/// ```rust
/// use issueradar::parsers::KakaoParser;
///
/// let export = "\
/// --------------- 2024년 3월 5일 화요일 ---------------
/// [민수] [오전 9:05] 배송이 아직 안 왔어요
/// [지은] [오후 2:30] 교과서 누락됐어요
/// ";
///
/// let messages = KakaoParser::new().parse_text(export);
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[1].time, "14:30");
/// ```
#[derive(Clone)]
pub struct KakaoParser {
    config: KakaoConfig,
    predicate: Option<RecordPredicate>,
}

impl KakaoParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: KakaoConfig::default(),
            predicate: None,
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: KakaoConfig) -> Self {
        Self {
            config,
            predicate: None,
        }
    }

    /// Creates a parser optimized for streaming large files.
    pub fn with_streaming() -> Self {
        Self::with_config(KakaoConfig::streaming())
    }

    /// Adds a predicate that records must satisfy to be kept.
    ///
    /// Runs after the configured system-account and sentinel filters.
    #[must_use]
    pub fn with_record_filter<F>(mut self, keep: F) -> Self
    where
        F: Fn(&Message) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(keep));
        self
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &KakaoConfig {
        &self.config
    }

    /// Decodes the full text of one export.
    ///
    /// Never fails: malformed lines are skipped.
    pub fn parse_text(&self, content: &str) -> Vec<Message> {
        let mut decoder = self.decoder();
        let messages: Vec<Message> = strip_bom(content)
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| decoder.feed(idx + 1, line))
            .collect();

        let stats = decoder.stats();
        debug!(
            lines = stats.lines,
            headers = stats.headers,
            records = stats.records,
            ignored = stats.ignored,
            undated_dropped = stats.undated_dropped,
            filtered = stats.filtered,
            "parsed export"
        );
        messages
    }

    /// Decodes raw export bytes as lossy UTF-8.
    pub fn parse_raw(&self, bytes: &[u8]) -> Vec<Message> {
        self.parse_text(&String::from_utf8_lossy(bytes))
    }

    fn decoder(&self) -> LineDecoder {
        LineDecoder::new(&self.config, self.predicate.clone())
    }
}

impl Default for KakaoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for KakaoParser {
    fn name(&self) -> &'static str {
        "KakaoTalk"
    }

    fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let bytes = fs::read(path)?;
        Ok(self.parse_raw(&bytes))
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        Ok(self.parse_text(content))
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<Message>> {
        Ok(self.parse_raw(bytes))
    }

    #[cfg(feature = "streaming")]
    fn stream(&self, path: &Path) -> Result<MessageStream> {
        if self.config.streaming {
            let streaming_config = StreamingConfig::for_parser(&self.config);
            let streaming_parser = KakaoStreamingParser::with_config(streaming_config)
                .with_kakao_config(self.config.clone())
                .with_record_filter(self.predicate.clone());
            let iterator =
                StreamingParser::stream(&streaming_parser, path.to_str().unwrap_or_default())?;

            Ok(Box::new(ParseIterator::new(iterator)))
        } else {
            let messages = Parser::parse(self, path)?;
            Ok(Box::new(messages.into_iter().map(Ok)))
        }
    }

    #[cfg(feature = "streaming")]
    fn supports_streaming(&self) -> bool {
        self.config.streaming
    }

    #[cfg(feature = "streaming")]
    fn recommended_buffer_size(&self) -> usize {
        self.config.buffer_size
    }
}
