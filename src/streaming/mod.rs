//! Streaming parser for memory-efficient processing of large chat exports.
//!
//! This module provides a streaming alternative to the standard parser,
//! designed for exports where loading everything into memory is impractical.
//!
//! # Architecture
//!
//! The streaming API is built around two core traits:
//! - [`StreamingParser`] - produces an iterator of messages
//! - [`MessageIterator`] - the actual iterator implementation
//!
//! # Example
//!
//! ```rust,no_run
//! use issueradar::Message;
//! use issueradar::streaming::{KakaoStreamingParser, StreamingParser};
//!
//! let parser = KakaoStreamingParser::new();
//!
//! // Process messages one at a time, never loading all into memory
//! for result in parser.stream("KakaoTalkChats.txt").unwrap() {
//!     match result {
//!         Ok(message) => println!("{}: {}", message.user, message.text),
//!         Err(e) => eprintln!("Skipped line: {}", e),
//!     }
//! }
//!
//! // Or collect with error handling
//! let messages: Vec<Message> = parser
//!     .stream("KakaoTalkChats.txt")
//!     .unwrap()
//!     .filter_map(Result::ok)
//!     .collect();
//! ```

mod error;
mod kakao;
mod traits;

pub use error::{StreamingError, StreamingResult};
pub use kakao::{KakaoMessageIterator, KakaoStreamingParser};
pub use traits::{MessageIterator, StreamingConfig, StreamingParser};
