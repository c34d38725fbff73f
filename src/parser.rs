//! Unified parser trait for chat exports.
//!
//! This module provides a single entry point for parsing chat exports, with support
//! for both in-memory and streaming modes.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> issueradar::Result<()> {
//! use issueradar::parser::Parser;
//! use issueradar::parsers::KakaoParser;
//! use std::path::Path;
//!
//! let parser = KakaoParser::new();
//!
//! // Parse entire file into memory
//! let messages = parser.parse(Path::new("KakaoTalkChats.txt"))?;
//!
//! // Or stream for large files
//! for result in parser.stream(Path::new("KakaoTalkChats.txt"))? {
//!     if let Ok(msg) = result {
//!         println!("{} {}: {}", msg.time, msg.user, msg.text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use crate::Message;
use crate::error::{RadarError, Result};

#[cfg(feature = "streaming")]
use crate::streaming::MessageIterator;

/// Boxed iterator returned by [`Parser::stream`].
pub type MessageStream = Box<dyn Iterator<Item = Result<Message>> + Send>;

/// Iterator adapter that wraps StreamingError into RadarError.
///
/// Keeps the progress accessors of the underlying [`MessageIterator`].
#[cfg(feature = "streaming")]
pub struct ParseIterator {
    inner: Box<dyn MessageIterator>,
}

#[cfg(feature = "streaming")]
impl ParseIterator {
    /// Creates a new parse iterator from a message iterator.
    pub fn new(inner: Box<dyn MessageIterator>) -> Self {
        Self { inner }
    }

    /// Returns the progress as a percentage (0.0 - 100.0).
    pub fn progress(&self) -> Option<f64> {
        self.inner.progress()
    }

    /// Returns the number of bytes processed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.inner.bytes_processed()
    }

    /// Returns the total file size in bytes, if known.
    pub fn total_bytes(&self) -> Option<u64> {
        self.inner.total_bytes()
    }
}

#[cfg(feature = "streaming")]
impl Iterator for ParseIterator {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|result| result.map_err(RadarError::from))
    }
}

/// Unified trait for parsing chat exports.
///
/// # Implementation Notes
///
/// Parsers must implement:
/// - [`name`](Parser::name) - Parser identifier
/// - [`parse`](Parser::parse) - Load entire file into memory
/// - [`parse_str`](Parser::parse_str) - Parse from a string
///
/// Optionally override:
/// - [`parse_bytes`](Parser::parse_bytes) - Decode raw bytes (default: lossy UTF-8)
/// - [`stream`](Parser::stream) - Streaming for large files (default: falls back to parse)
/// - [`supports_streaming`](Parser::supports_streaming) - Whether native streaming is supported
///
/// Malformed lines never produce an error; only reading the file can fail.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    ///
    /// # Example
    ///
    /// ```rust
    /// use issueradar::parser::Parser;
    /// use issueradar::parsers::KakaoParser;
    ///
    /// let parser = KakaoParser::new();
    /// assert_eq!(parser.name(), "KakaoTalk");
    /// ```
    fn name(&self) -> &'static str;

    /// Parses a chat export file and returns all messages.
    ///
    /// This method loads the entire file into memory. For larger files, use
    /// [`stream`](Parser::stream).
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::Io`] if the file cannot be read.
    fn parse(&self, path: &Path) -> Result<Vec<Message>>;

    /// Parses chat content from a string.
    ///
    /// Useful for testing with inline data or processing content already in
    /// memory.
    fn parse_str(&self, content: &str) -> Result<Vec<Message>>;

    /// Parses raw export bytes.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<Message>> {
        self.parse_str(&String::from_utf8_lossy(bytes))
    }

    /// Parses a chat export file (convenience method accepting &str path).
    fn parse_file(&self, path: &str) -> Result<Vec<Message>> {
        self.parse(Path::new(path))
    }

    /// Streams messages from a file for memory-efficient processing.
    ///
    /// By default, this falls back to loading the entire file and returning
    /// an iterator over the messages. Parsers that support native streaming
    /// should override this method.
    fn stream(&self, path: &Path) -> Result<MessageStream> {
        let messages = self.parse(path)?;
        Ok(Box::new(messages.into_iter().map(Ok)))
    }

    /// Streams messages (convenience method accepting &str path).
    fn stream_file(&self, path: &str) -> Result<MessageStream> {
        self.stream(Path::new(path))
    }

    /// Returns whether this parser supports native streaming.
    fn supports_streaming(&self) -> bool {
        false
    }

    /// Returns the recommended buffer size for streaming.
    fn recommended_buffer_size(&self) -> usize {
        64 * 1024 // 64KB default
    }
}
