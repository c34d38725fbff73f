//! JSON Lines (JSONL) output writer.
//!
//! One record per line, which suits line-oriented tools and incremental
//! loading.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::Message;
use crate::core::models::{OutputConfig, OutputRecord};
use crate::error::Result;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"user":"민수","message":"배송이 아직 안 왔어요"}
/// {"user":"지은","message":"교과서 누락됐어요"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, messages, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
///
/// Same format as `write_jsonl`, but returns a String instead of writing to file.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(&mut buffer, messages, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(out: &mut W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    for msg in messages {
        let record = OutputRecord::from_message(msg, config);
        serde_json::to_writer(&mut *out, &record)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_to_jsonl_one_object_per_line() {
        let messages = vec![
            Message::new("민수", "09:05", "배송"),
            Message::new("지은", "14:30", "누락"),
        ];
        let jsonl = to_jsonl(&messages, &OutputConfig::new().with_times()).unwrap();
        let lines: Vec<_> = jsonl.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"time":"09:05","user":"민수","message":"배송"}"#);
        for line in lines {
            let _: serde_json::Value = serde_json::from_str(line).unwrap();
        }
    }

    #[test]
    fn test_write_jsonl_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&[Message::new("a", "10:00", "b")], path, &OutputConfig::new()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "{\"user\":\"a\",\"message\":\"b\"}\n");
    }

    #[test]
    fn test_to_jsonl_empty() {
        assert!(to_jsonl(&[], &OutputConfig::new()).unwrap().is_empty());
    }
}
