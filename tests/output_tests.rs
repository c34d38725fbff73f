//! Tests for output writers (JSON, JSONL, CSV) and the issue report.

use std::fs;

use issueradar::Message;
use issueradar::analysis::Analyzer;
use issueradar::collab::Outcome;
use issueradar::config::RadarConfig;
use issueradar::core::output::{write_csv, write_json, write_jsonl};
use issueradar::core::{FilterConfig, OutputConfig};
use issueradar::format::{OutputFormat, to_format_string, write_to_format};
use issueradar::news::{Article, NewsDigest, NewsSection};
use issueradar::report::IssueReport;
use tempfile::tempdir;

fn sample_messages() -> Vec<Message> {
    vec![
        Message::new("민수", "09:05", "배송이 아직 안 왔어요")
            .with_date("2024년 3월 5일 화요일")
            .with_line(2),
        Message::new("지은", "14:30", "교과서 \"누락\"; 확인 부탁")
            .with_date("2024년 3월 5일 화요일")
            .with_line(3),
        Message::new("현우", "00:10", "날짜 없는 배송 문의").with_line(7),
    ]
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_full_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("issues.csv");
    write_csv(&sample_messages(), path.to_str().unwrap(), &OutputConfig::full()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines[0], "Date;Time;User;Message");
    assert_eq!(lines[1], "2024-03-05;09:05;민수;배송이 아직 안 왔어요");
    // quotes are doubled and the field is wrapped
    assert_eq!(lines[2], "2024-03-05;14:30;지은;\"교과서 \"\"누락\"\"; 확인 부탁\"");
    assert_eq!(lines[3], ";00:10;현우;날짜 없는 배송 문의");
}

#[test]
fn test_csv_minimal_and_lines() {
    let csv = to_format_string(&sample_messages(), OutputFormat::Csv, &OutputConfig::new()).unwrap();
    assert!(csv.starts_with("User;Message\n"));

    let csv = to_format_string(
        &sample_messages(),
        OutputFormat::Csv,
        &OutputConfig::new().with_lines(),
    )
    .unwrap();
    assert!(csv.starts_with("Line;User;Message\n"));
    assert!(csv.contains("\n7;현우;"));
}

#[test]
fn test_csv_empty_has_header_only() {
    let csv = to_format_string(&[], OutputFormat::Csv, &OutputConfig::full()).unwrap();
    assert_eq!(csv, "Date;Time;User;Message\n");
}

// ============================================================================
// JSON / JSONL
// ============================================================================

#[test]
fn test_json_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("issues.json");
    write_json(&sample_messages(), path.to_str().unwrap(), &OutputConfig::full()).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["date"], "2024-03-05");
    assert_eq!(records[0]["user"], "민수");
    assert_eq!(records[1]["message"], "교과서 \"누락\"; 확인 부탁");
    assert_eq!(records[2]["date"], "");
    assert!(records[0].get("line").is_none());
}

#[test]
fn test_jsonl_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("issues.jsonl");
    write_jsonl(
        &sample_messages(),
        path.to_str().unwrap(),
        &OutputConfig::new().with_lines(),
    )
    .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["line"], 2);
    assert_eq!(lines[2]["line"], 7);
    assert!(lines[0].get("time").is_none());
    assert!(lines[0].get("date").is_none());
}

#[test]
fn test_write_to_format_dispatch() {
    let dir = tempdir().unwrap();
    for format in [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl] {
        let path = dir.path().join(format!("out.{}", format.extension()));
        let path = path.to_str().unwrap();
        write_to_format(&sample_messages(), path, format, &OutputConfig::full()).unwrap();

        let written = fs::read_to_string(path).unwrap();
        let expected = to_format_string(&sample_messages(), format, &OutputConfig::full()).unwrap();
        assert_eq!(written, expected);
        assert_eq!(OutputFormat::from_path(path).unwrap(), format);
    }
}

#[test]
fn test_write_to_missing_directory_fails() {
    let err = write_to_format(
        &sample_messages(),
        "/nonexistent/dir/out.csv",
        OutputFormat::Csv,
        &OutputConfig::full(),
    )
    .unwrap_err();
    assert!(err.is_io());
}

// ============================================================================
// Issue report
// ============================================================================

fn report() -> IssueReport {
    let records = sample_messages();
    let filter = FilterConfig::new().with_date_from("2024-03-01").unwrap();
    let analysis = Analyzer::from_config(&RadarConfig::default()).analyze(&records, &filter);
    IssueReport::new("KakaoTalkChats.txt", analysis, &filter)
}

#[test]
fn test_report_text() {
    let text = report().to_string();
    assert!(text.contains("KakaoTalkChats.txt"));
    assert!(text.contains("2024-03-01"));
    assert!(text.contains("배송이"));
    assert!(text.contains("누락"));
    // no summary or news requested
    assert!(!text.contains("📝"));
    assert!(!text.contains("📰"));
}

#[test]
fn test_report_collaborator_sections() {
    let digest = NewsDigest {
        keywords: vec![NewsSection {
            query: "배송이 교과서".to_string(),
            outcome: Outcome::Ready(vec![
                Article::new("교과서 배송 지연 보도", "https://news.example/1")
                    .with_source(Some("교육신문")),
            ]),
        }],
        topics: vec![NewsSection {
            query: "비상교육".to_string(),
            outcome: Outcome::Unavailable("HTTP 503".to_string()),
        }],
    };
    let report = report()
        .with_summary(Outcome::NotConfigured("llm"))
        .with_news(Outcome::Ready(digest));
    let text = report.to_string();

    assert!(text.contains("교과서 배송 지연 보도"));
    assert!(text.contains("교육신문"));
    assert!(text.contains("https://news.example/1"));
    assert!(text.contains("HTTP 503"));
    assert!(text.contains("인증 정보가 없어"));
}

#[test]
fn test_report_json() {
    let json = report()
        .with_summary(Outcome::Ready("배송 지연 민원".to_string()))
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["source"], "KakaoTalkChats.txt");
    // the undated record follows dated ones, so it is forward-filled into range
    assert_eq!(value["stats"]["in_range"], 3);
    assert_eq!(value["stats"]["matched"], 3);
    assert_eq!(value["summary"]["status"], "ready");
    assert_eq!(value["summary"]["value"], "배송 지연 민원");
    assert!(value.get("matched").is_none());
    assert!(value["insights"].as_array().is_some_and(|a| !a.is_empty()));
}
