//! # issueradar CLI
//!
//! Parses a KakaoTalk export, prints the issue report and optionally writes
//! the matched messages to a file.

use std::env;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use issueradar::analysis::Analyzer;
use issueradar::cli::Args;
use issueradar::collab::Outcome;
use issueradar::config::{PreHeaderPolicy, RadarConfig};
use issueradar::core::{FilterConfig, OutputConfig};
use issueradar::format::write_to_format;
use issueradar::news::NewsDesk;
use issueradar::parser::Parser;
use issueradar::parsers::KakaoParser;
use issueradar::report::IssueReport;
use issueradar::summarize::{Selection, SummaryDesk};
use issueradar::{Message, RadarError};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("issueradar={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), RadarError> {
    let started = Instant::now();

    let mut config = RadarConfig::load(args.config.as_deref())?;
    fill_credentials_from_env(&mut config);
    if args.keep_undated {
        config.parser.pre_header = PreHeaderPolicy::Keep;
    }
    if args.streaming {
        config.parser.streaming = true;
    }

    let mut filter = FilterConfig::new();
    if let Some(from) = &args.from {
        filter = filter.with_date_from(from)?;
    }
    if let Some(to) = &args.to {
        filter = filter.with_date_to(to)?;
    }
    if let Some(user) = &args.user {
        filter = filter.with_user(user.clone());
    }

    let records = parse_input(args, &config)?;

    let mut analyzer = Analyzer::from_config(&config);
    if let Some(keywords) = args.keyword_override() {
        analyzer = analyzer.with_keywords(keywords);
    }

    let analysis = analyzer.analyze(&records, &filter);

    if let Some(path) = &args.output {
        let format = args.output_format();
        let mut output_config = OutputConfig::full();
        if args.lines {
            output_config = output_config.with_lines();
        }
        let path = path.to_string_lossy();
        write_to_format(&analysis.matched, &path, format, &output_config)?;
        info!(path = %path, format = %format, records = analysis.matched.len(), "wrote matched messages");
    }

    let source = args
        .input
        .file_name()
        .map_or_else(|| args.input.display().to_string(), |n| n.to_string_lossy().into_owned());
    let mut report = IssueReport::new(source, analysis, &filter);

    if args.summarize {
        let summary = match SummaryDesk::from_config(&config) {
            Ok(desk) => {
                let desk = match args.summary_tail {
                    Some(n) => desk.with_selection(Selection::Tail(n)),
                    None => desk,
                };
                desk.summarize(&report.analysis.matched_texts())
            }
            Err(e) => Outcome::from_result(Err(e)),
        };
        report = report.with_summary(summary);
    }

    if args.news {
        let top = report.analysis.top_tokens(config.analysis.news_keywords);
        let digest = NewsDesk::from_config(&config)
            .map(|desk| desk.digest(&top, &config.news.extra_topics));
        report = report.with_news(Outcome::from_result(digest));
    }

    if args.json_report {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
        if let Some(path) = &args.output {
            println!(
                "💾 민원 메시지 {}건 저장: {} ({})",
                report.analysis.matched.len(),
                path.display(),
                args.output_format()
            );
        }
    }

    info!(elapsed_ms = started.elapsed().as_millis() as u64, "done");
    Ok(())
}

fn parse_input(args: &Args, config: &RadarConfig) -> Result<Vec<Message>, RadarError> {
    let parser = KakaoParser::with_config(config.parser.clone());
    let parse_start = Instant::now();

    let records = if config.parser.streaming {
        parser
            .stream(&args.input)?
            .collect::<Result<Vec<_>, RadarError>>()?
    } else {
        parser.parse(&args.input)?
    };

    info!(
        parser = parser.name(),
        records = records.len(),
        elapsed_ms = parse_start.elapsed().as_millis() as u64,
        "parsed input"
    );
    Ok(records)
}

/// Fills blank credentials from the environment; values in the file win.
fn fill_credentials_from_env(config: &mut RadarConfig) {
    fill_from_env(&mut config.news.naver_client_id, "NAVER_CLIENT_ID");
    fill_from_env(&mut config.news.naver_client_secret, "NAVER_CLIENT_SECRET");
    fill_from_env(&mut config.summarizer.api_key, "OPENAI_API_KEY");
}

fn fill_from_env(slot: &mut Option<String>, var: &str) {
    if slot.as_deref().is_none_or(|v| v.trim().is_empty()) {
        if let Ok(value) = env::var(var) {
            if !value.trim().is_empty() {
                *slot = Some(value);
            }
        }
    }
}
