//! Chat export parsers.
//!
//! - [`KakaoParser`] - Parses KakaoTalk TXT exports
//!
//! # Example
//!
//! ```rust
//! use issueradar::parser::Parser;
//! use issueradar::parsers::KakaoParser;
//!
//! let parser = KakaoParser::new();
//! assert_eq!(parser.name(), "KakaoTalk");
//! // let messages = parser.parse("KakaoTalkChats.txt".as_ref())?;
//! ```

mod kakao;

pub use kakao::KakaoParser;
