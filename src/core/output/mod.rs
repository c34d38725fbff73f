//! Output format writers for matched records.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines (one JSON per line) - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> issueradar::Result<()> {
//! use issueradar::core::output::{write_csv, write_json, write_jsonl, to_csv};
//! use issueradar::core::models::OutputConfig;
//! use issueradar::Message;
//!
//! let messages = vec![
//!     Message::new("민수", "09:05", "배송이 아직 안 왔어요"),
//!     Message::new("지은", "14:30", "교과서 누락됐어요"),
//! ];
//!
//! let config = OutputConfig::full();
//!
//! write_csv(&messages, "issues.csv", &config)?;
//! write_json(&messages, "issues.json", &config)?;
//! write_jsonl(&messages, "issues.jsonl", &config)?;
//!
//! let csv_string = to_csv(&messages, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
