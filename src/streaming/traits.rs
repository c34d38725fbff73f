//! Streaming traits and options.

use crate::Message;
use crate::config::KakaoConfig;
use crate::error::Result;

use super::StreamingResult;

/// Lazily decoded export records, with byte-level progress.
///
/// ```no_run
/// # fn main() -> issueradar::Result<()> {
/// use issueradar::streaming::{KakaoStreamingParser, MessageIterator, StreamingParser};
///
/// let mut records = KakaoStreamingParser::new().stream("KakaoTalkChats.txt")?;
/// while let Some(record) = records.next() {
///     let record = record?;
///     if let Some(pct) = records.progress() {
///         eprintln!("\r{pct:.1}% {} {}", record.user, record.time);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub trait MessageIterator: Iterator<Item = StreamingResult<Message>> + Send {
    /// Bytes of the export consumed so far, line terminators included.
    fn bytes_processed(&self) -> u64;

    /// Size of the export, when reading from a file.
    fn total_bytes(&self) -> Option<u64> {
        None
    }

    /// Percentage of the export consumed, or `None` for readers of unknown
    /// or zero size.
    fn progress(&self) -> Option<f64> {
        match self.total_bytes() {
            Some(0) | None => None,
            Some(total) => Some(self.bytes_processed() as f64 / total as f64 * 100.0),
        }
    }
}

/// Opens an export file as a [`MessageIterator`].
pub trait StreamingParser: Send + Sync {
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns [`RadarError::Io`](crate::RadarError::Io) if the file cannot be opened.
    fn stream(&self, file_path: &str) -> Result<Box<dyn MessageIterator>>;

    /// Read buffer size in bytes.
    fn recommended_buffer_size(&self) -> usize {
        64 * 1024
    }
}

/// Reader options for the streaming parser.
///
/// A line longer than `max_line_size` is either skipped with a warning or
/// reported as [`StreamingError::BufferOverflow`](super::StreamingError::BufferOverflow),
/// depending on `skip_invalid`.
///
/// ```
/// use issueradar::streaming::StreamingConfig;
///
/// let config = StreamingConfig::new()
///     .with_buffer_size(128 * 1024)
///     .with_skip_invalid(false);
/// assert!(!config.skip_invalid);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StreamingConfig {
    pub buffer_size: usize,
    pub max_line_size: usize,
    pub skip_invalid: bool,
    /// Emit a debug event every N records; zero disables it.
    pub progress_interval: usize,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
            max_line_size: 1024 * 1024,
            skip_invalid: true,
            progress_interval: 10_000,
        }
    }
}

impl StreamingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader options matching a `[parser]` section: its buffer size, the
    /// default line limit.
    pub fn for_parser(parser: &KakaoConfig) -> Self {
        Self::new().with_buffer_size(parser.buffer_size)
    }

    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    #[must_use]
    pub fn with_max_line_size(mut self, size: usize) -> Self {
        self.max_line_size = size;
        self
    }

    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counted {
        consumed: u64,
        total: Option<u64>,
    }

    impl Iterator for Counted {
        type Item = StreamingResult<Message>;

        fn next(&mut self) -> Option<Self::Item> {
            None
        }
    }

    impl MessageIterator for Counted {
        fn bytes_processed(&self) -> u64 {
            self.consumed
        }

        fn total_bytes(&self) -> Option<u64> {
            self.total
        }
    }

    #[test]
    fn test_progress_from_byte_counts() {
        let half = Counted {
            consumed: 512,
            total: Some(1024),
        };
        assert_eq!(half.progress(), Some(50.0));

        let unsized_reader = Counted {
            consumed: 512,
            total: None,
        };
        assert_eq!(unsized_reader.progress(), None);

        let empty_file = Counted {
            consumed: 0,
            total: Some(0),
        };
        assert_eq!(empty_file.progress(), None);
    }

    #[test]
    fn test_config_for_parser_section() {
        let parser = KakaoConfig::streaming();
        let config = StreamingConfig::for_parser(&parser);
        assert_eq!(config.buffer_size, parser.buffer_size);
        assert_eq!(config.max_line_size, 1024 * 1024);
        assert!(config.skip_invalid);
    }

    #[test]
    fn test_strict_config() {
        let config = StreamingConfig::new()
            .with_max_line_size(4096)
            .with_skip_invalid(false)
            .with_progress_interval(0);
        assert_eq!(config.max_line_size, 4096);
        assert!(!config.skip_invalid);
        assert_eq!(config.progress_interval, 0);
    }
}
