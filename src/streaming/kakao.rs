//! Streaming parser for KakaoTalk TXT exports.
//!
//! Reads the export line by line with a fixed-size buffer, so memory use does
//! not grow with the file. Decoding goes through the same
//! [`LineDecoder`](crate::parsing::LineDecoder) as the in-memory parser.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use tracing::{debug, warn};

use crate::Message;
use crate::config::KakaoConfig;
use crate::error::Result;
use crate::parsing::kakao::{DecodeStats, LineDecoder, RecordPredicate, strip_bom};

use super::{MessageIterator, StreamingConfig, StreamingError, StreamingParser, StreamingResult};

/// Streaming parser for KakaoTalk TXT exports.
pub struct KakaoStreamingParser {
    config: StreamingConfig,
    kakao: KakaoConfig,
    predicate: Option<RecordPredicate>,
}

impl KakaoStreamingParser {
    pub fn new() -> Self {
        Self {
            config: StreamingConfig::default(),
            kakao: KakaoConfig::default(),
            predicate: None,
        }
    }

    pub fn with_config(config: StreamingConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    /// Sets the decoding options (pre-header policy, system filters).
    #[must_use]
    pub fn with_kakao_config(mut self, kakao: KakaoConfig) -> Self {
        self.kakao = kakao;
        self
    }

    /// Sets a predicate records must satisfy to be emitted.
    #[must_use]
    pub fn with_record_filter(mut self, predicate: Option<RecordPredicate>) -> Self {
        self.predicate = predicate;
        self
    }

    /// Streams messages from any buffered reader.
    ///
    /// ```
    /// use issueradar::streaming::KakaoStreamingParser;
    ///
    /// let export = "----------2024년 3월 5일 화요일----------\n[민수] [오전 9:05] 안녕\n";
    /// let messages: Vec<_> = KakaoStreamingParser::new()
    ///     .stream_reader(export.as_bytes())
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    /// assert_eq!(messages.len(), 1);
    /// ```
    pub fn stream_reader<R: BufRead>(&self, reader: R) -> KakaoMessageIterator<R> {
        KakaoMessageIterator::new(reader, None, self.config, self.decoder())
    }

    fn decoder(&self) -> LineDecoder {
        LineDecoder::new(&self.kakao, self.predicate.clone())
    }
}

impl Default for KakaoStreamingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingParser for KakaoStreamingParser {
    fn name(&self) -> &'static str {
        "KakaoTalk (Streaming)"
    }

    fn stream(&self, file_path: &str) -> Result<Box<dyn MessageIterator>> {
        let path = Path::new(file_path);
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        let iterator = KakaoMessageIterator::new(reader, Some(file_size), self.config, self.decoder());

        Ok(Box::new(iterator))
    }

    fn recommended_buffer_size(&self) -> usize {
        self.config.buffer_size
    }
}

/// Iterator over KakaoTalk messages.
pub struct KakaoMessageIterator<R: BufRead> {
    reader: R,
    total_bytes: Option<u64>,
    bytes_read: u64,
    config: StreamingConfig,
    decoder: LineDecoder,
    line_buffer: Vec<u8>,
    line_no: usize,
    finished: bool,
}

impl<R: BufRead> KakaoMessageIterator<R> {
    fn new(
        reader: R,
        total_bytes: Option<u64>,
        config: StreamingConfig,
        decoder: LineDecoder,
    ) -> Self {
        Self {
            reader,
            total_bytes,
            bytes_read: 0,
            config,
            decoder,
            line_buffer: Vec::with_capacity(4096),
            line_no: 0,
            finished: false,
        }
    }

    /// Returns the decoder counters collected so far.
    pub fn decode_stats(&self) -> DecodeStats {
        self.decoder.stats()
    }

    fn finish(&mut self) {
        self.finished = true;
        let stats = self.decoder.stats();
        debug!(
            lines = stats.lines,
            headers = stats.headers,
            records = stats.records,
            ignored = stats.ignored,
            undated_dropped = stats.undated_dropped,
            filtered = stats.filtered,
            bytes = self.bytes_read,
            "finished streaming export"
        );
    }
}

impl<R: BufRead + Send> MessageIterator for KakaoMessageIterator<R> {
    fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }
}

impl<R: BufRead> Iterator for KakaoMessageIterator<R> {
    type Item = StreamingResult<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.line_buffer.clear();
            let bytes = match self.reader.read_until(b'\n', &mut self.line_buffer) {
                Ok(0) => {
                    self.finish();
                    return None;
                }
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(StreamingError::Io(e)));
                }
            };
            self.bytes_read += bytes as u64;
            self.line_no += 1;

            if bytes > self.config.max_line_size {
                if self.config.skip_invalid {
                    warn!(line = self.line_no, bytes, "skipping oversized line");
                    continue;
                }
                return Some(Err(StreamingError::BufferOverflow {
                    line: self.line_no,
                    max_size: self.config.max_line_size,
                    actual_size: bytes,
                }));
            }

            let text = String::from_utf8_lossy(&self.line_buffer);
            let line: &str = if self.line_no == 1 {
                strip_bom(&text)
            } else {
                &text
            };

            if let Some(msg) = self.decoder.feed(self.line_no, line) {
                let records = self.decoder.stats().records;
                if self.config.progress_interval > 0 && records % self.config.progress_interval == 0
                {
                    debug!(records, bytes = self.bytes_read, "streaming progress");
                }
                return Some(Ok(msg));
            }
        }
    }
}
