//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::format::OutputFormat;

/// Find complaint messages in a KakaoTalk chat export, rank their keywords
/// and look up related news.
#[derive(Parser, Debug, Clone)]
#[command(name = "issueradar")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    issueradar chat.txt
    issueradar chat.txt --from 2024-03-01 --to 2024-03-31
    issueradar chat.txt -k 배송,누락 -o issues.csv
    issueradar chat.txt -c config/radar.toml --news --summarize
    issueradar chat.txt --json-report > report.json")]
pub struct Args {
    /// KakaoTalk .txt export
    pub input: PathBuf,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// First day to analyze (YYYY-MM-DD, inclusive)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last day to analyze (YYYY-MM-DD, inclusive)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Issue keywords, comma separated (overrides the config)
    #[arg(short, long, value_delimiter = ',', value_name = "LIST")]
    pub keywords: Option<Vec<String>>,

    /// Only analyze messages from this user
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// Write matched messages to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Format for --output (default: from the file extension, else csv)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Include source line numbers in --output
    #[arg(long)]
    pub lines: bool,

    /// Search news for the top keywords and configured topics
    #[arg(long)]
    pub news: bool,

    /// Summarize the matched messages
    #[arg(long)]
    pub summarize: bool,

    /// Summarize only the last N matched messages
    #[arg(long, value_name = "N", requires = "summarize")]
    pub summary_tail: Option<usize>,

    /// Keep messages that appear before the first date header
    #[arg(long)]
    pub keep_undated: bool,

    /// Read the input line by line instead of all at once
    #[arg(long)]
    pub streaming: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json_report: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Keyword override with blanks removed; `None` keeps the config list.
    pub fn keyword_override(&self) -> Option<Vec<String>> {
        self.keywords.as_ref().map(|list| {
            list.iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect()
        })
    }

    /// Explicit `--format`, else the output file extension, else CSV.
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_else(|| {
            self.output
                .as_ref()
                .and_then(|p| OutputFormat::from_path(p).ok())
                .unwrap_or_default()
        })
    }
}
