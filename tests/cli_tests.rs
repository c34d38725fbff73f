//! Additional tests for the CLI-facing types: formats, provider names and
//! argument parsing.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use issueradar::cli::Args;
use issueradar::config::{NewsProviderKind, SummarizerKind};
use issueradar::format::OutputFormat;
use issueradar::RadarConfig;

fn args(list: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("issueradar").chain(list.iter().copied())).unwrap()
}

#[test]
fn test_output_format_from_str_all_variants() {
    assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
    assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    assert_eq!(OutputFormat::from_str("jsonl").unwrap(), OutputFormat::Jsonl);
    assert_eq!(OutputFormat::from_str("ndjson").unwrap(), OutputFormat::Jsonl);

    // Case variations
    assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
    assert_eq!(OutputFormat::from_str("Json").unwrap(), OutputFormat::Json);
    assert_eq!(OutputFormat::from_str("NDJSON").unwrap(), OutputFormat::Jsonl);
}

#[test]
fn test_output_format_from_str_errors() {
    assert!(OutputFormat::from_str("").is_err());
    assert!(OutputFormat::from_str("xml").is_err());
    let err = OutputFormat::from_str("yaml").unwrap_err();
    assert!(err.to_string().contains("yaml"));
}

#[test]
fn test_output_format_names_parse() {
    for name in OutputFormat::all_names() {
        assert!(OutputFormat::from_str(name).is_ok(), "{name} should parse");
    }
    for format in [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl] {
        assert_eq!(OutputFormat::from_str(format.extension()).unwrap(), format);
    }
}

#[test]
fn test_news_provider_from_str() {
    assert_eq!(NewsProviderKind::from_str("naver-html").unwrap(), NewsProviderKind::NaverHtml);
    assert_eq!(NewsProviderKind::from_str("rss").unwrap(), NewsProviderKind::Rss);
    assert_eq!(NewsProviderKind::from_str("NAVER-API").unwrap(), NewsProviderKind::NaverApi);
    assert!(NewsProviderKind::from_str("bing").is_err());

    for kind in [NewsProviderKind::NaverHtml, NewsProviderKind::Rss, NewsProviderKind::NaverApi] {
        assert_eq!(NewsProviderKind::from_str(&kind.to_string()).unwrap(), kind);
    }
}

#[test]
fn test_provider_and_summarizer_from_toml() {
    let config = RadarConfig::from_toml_str(
        r#"
[news]
provider = "naver-api"

[summarizer]
kind = "llm"
"#,
    )
    .unwrap();
    assert_eq!(config.news.provider, NewsProviderKind::NaverApi);
    assert_eq!(config.summarizer.kind, SummarizerKind::Llm);

    assert!(RadarConfig::from_toml_str("[news]\nprovider = \"bing\"").is_err());
}

#[test]
fn test_args_format_value_enum() {
    assert_eq!(args(&["chat.txt", "-f", "json"]).format, Some(OutputFormat::Json));
    assert_eq!(args(&["chat.txt", "--format", "ndjson"]).format, Some(OutputFormat::Jsonl));
    assert!(Args::try_parse_from(["issueradar", "chat.txt", "-f", "xml"]).is_err());
}

#[test]
fn test_args_requires_input() {
    assert!(Args::try_parse_from(["issueradar"]).is_err());
    assert_eq!(args(&["some dir/chat.txt"]).input, PathBuf::from("some dir/chat.txt"));
}

#[test]
fn test_args_repeated_keywords() {
    let parsed = args(&["chat.txt", "-k", "배송", "-k", "누락,오류"]);
    assert_eq!(
        parsed.keyword_override().unwrap(),
        vec!["배송".to_string(), "누락".to_string(), "오류".to_string()]
    );

    // an all-blank list leaves nothing to match
    assert!(args(&["chat.txt", "-k", " , "]).keyword_override().unwrap().is_empty());
}
