//! JSON output writer.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::core::models::{OutputConfig, OutputRecord};
use crate::error::Result;

/// Writes messages to JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"date": "2024-03-05", "time": "09:05", "user": "민수", "message": "배송이 아직 안 왔어요"}
/// ]
/// ```
pub fn write_json(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to JSON string as an array.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let records: Vec<OutputRecord<'_>> = messages
        .iter()
        .map(|m| OutputRecord::from_message(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}
