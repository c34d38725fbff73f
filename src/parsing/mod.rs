//! Shared parsing utilities.
//!
//! This module contains the line grammar and decoder used by both the
//! standard (in-memory) and streaming parsers to avoid code duplication.

pub mod kakao;

// Re-export commonly used items
pub use kakao::{
    DecodeStats, LineDecoder, LineKind, MessageLine, Period, RecordPredicate, classify_line,
    match_date_header, match_message_line, normalize_date, strip_bom, to_24_hour,
};
