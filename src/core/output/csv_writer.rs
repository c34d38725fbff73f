//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::core::models::{OutputConfig, display_date};
use crate::error::Result;

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `User`, `Message`
///   - Full: `Date`, `Time`, `User`, `Message`
///   - With lines: `Line` first
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
///
/// Same format as `write_csv`, but returns a String instead of writing to file.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, messages, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(out: W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_lines {
        header.push("Line");
    }
    if config.include_dates {
        header.push("Date");
    }
    if config.include_times {
        header.push("Time");
    }

    header.push("User");
    header.push("Message");

    header
}

/// Build CSV record for a single message.
fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_lines {
        record.push(msg.line.to_string());
    }
    if config.include_dates {
        record.push(display_date(msg));
    }
    if config.include_times {
        record.push(msg.time.clone());
    }

    record.push(msg.user.clone());
    record.push(msg.text.clone());

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample() -> Vec<Message> {
        vec![
            Message::new("민수", "09:05", "배송이 아직 안 왔어요").with_date("2024년 3월 5일 화요일"),
            Message::new("지은", "14:30", "교과서 누락됐어요").with_date("2024년 3월 5일 화요일"),
        ]
    }

    #[test]
    fn test_write_csv_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_csv(&sample(), path, &OutputConfig::new()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();

        assert!(content.starts_with("User;Message\n"));
        assert!(content.contains("민수;배송이 아직 안 왔어요"));
    }

    #[test]
    fn test_to_csv_full() {
        let csv = to_csv(&sample(), &OutputConfig::full()).unwrap();
        assert!(csv.starts_with("Date;Time;User;Message\n"));
        assert!(csv.contains("2024-03-05;14:30;지은;교과서 누락됐어요"));
    }

    #[test]
    fn test_to_csv_quotes_delimiter() {
        let messages = vec![Message::new("a", "10:00", "배송; 지연")];
        let csv = to_csv(&messages, &OutputConfig::new().with_lines()).unwrap();
        assert!(csv.contains("0;a;\"배송; 지연\""));
    }
}
