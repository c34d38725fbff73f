//! Configuration types for the parser and the analysis pipeline.
//!
//! Two layers live here:
//!
//! - [`KakaoConfig`] - library-level builder for the chat-log parser
//! - [`RadarConfig`] - application configuration loaded from TOML, one
//!   struct per section (`[parser]`, `[analysis]`, `[[categories]]`,
//!   `[sentiment]`, `[news]`, `[summarizer]`, `[retry]`, `[cache]`)
//!
//! Every section falls back to its defaults, so an empty file (or no file at
//! all) is a valid configuration.
//!
//! # Example
//!
//! ```rust
//! use issueradar::config::{KakaoConfig, PreHeaderPolicy, RadarConfig};
//!
//! let parser = KakaoConfig::new()
//!     .with_pre_header(PreHeaderPolicy::Keep)
//!     .with_system_users(vec!["오픈채팅봇".to_string()]);
//! assert_eq!(parser.pre_header, PreHeaderPolicy::Keep);
//!
//! let config = RadarConfig::from_toml_str("[analysis]\nkeywords = [\"배송\"]").unwrap();
//! assert_eq!(config.analysis.keywords, vec!["배송"]);
//! assert_eq!(config.news.max_articles, 5);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RadarError, Result};

/// What to do with messages that appear before the first date header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreHeaderPolicy {
    /// Discard them (default).
    #[default]
    Drop,
    /// Emit them with `date: None`.
    Keep,
}

/// Configuration for KakaoTalk export parsing.
///
/// Exports are plain text; this config controls buffering for large files,
/// how undated messages are handled, and which records count as noise.
///
/// Doubles as the `[parser]` section of [`RadarConfig`].
///
/// # Example
///
/// ```rust
/// use issueradar::config::KakaoConfig;
///
/// let config = KakaoConfig::new()
///     .with_streaming(true)
///     .with_sentinel_prefixes(vec!["삭제된 메시지".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KakaoConfig {
    /// Enable streaming mode for large files (default: false)
    pub streaming: bool,

    /// Buffer size for streaming (default: 64KB)
    pub buffer_size: usize,

    /// Handling of messages before the first date header (default: drop)
    pub pre_header: PreHeaderPolicy,

    /// Speaker names dropped at parse time, matched exactly (default: none)
    pub system_users: Vec<String>,

    /// Message prefixes dropped at parse time (default: none)
    pub sentinel_prefixes: Vec<String>,
}

impl Default for KakaoConfig {
    fn default() -> Self {
        Self {
            streaming: false,
            buffer_size: 64 * 1024, // 64KB
            pre_header: PreHeaderPolicy::Drop,
            system_users: Vec::new(),
            sentinel_prefixes: Vec::new(),
        }
    }
}

impl KakaoConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a streaming-optimized configuration.
    pub fn streaming() -> Self {
        Self {
            streaming: true,
            buffer_size: 256 * 1024, // 256KB for streaming
            ..Self::default()
        }
    }

    /// Enables or disables streaming mode.
    #[must_use]
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.streaming = enabled;
        self
    }

    /// Sets the buffer size for streaming.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets the pre-header policy.
    #[must_use]
    pub fn with_pre_header(mut self, policy: PreHeaderPolicy) -> Self {
        self.pre_header = policy;
        self
    }

    /// Sets the system account names to drop.
    #[must_use]
    pub fn with_system_users(mut self, users: Vec<String>) -> Self {
        self.system_users = users;
        self
    }

    /// Sets the message prefixes to drop.
    #[must_use]
    pub fn with_sentinel_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.sentinel_prefixes = prefixes;
        self
    }

    /// Returns `true` if any system-record filtering is configured.
    pub fn filters_system_records(&self) -> bool {
        !self.system_users.is_empty() || !self.sentinel_prefixes.is_empty()
    }
}

// ============================================================================
// Application configuration
// ============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarConfig {
    /// Chat-log parser settings
    #[serde(default)]
    pub parser: KakaoConfig,

    /// Keyword extraction settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Ordered topic taxonomy for ranked keywords
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,

    /// Keyword sentiment table
    #[serde(default)]
    pub sentiment: SentimentConfig,

    /// News search collaborator
    #[serde(default)]
    pub news: NewsConfig,

    /// Summarization collaborator
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Retry policy for collaborator calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Memo cache for collaborator calls
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for RadarConfig {
    fn default() -> Self {
        RadarConfig {
            parser: KakaoConfig::default(),
            analysis: AnalysisConfig::default(),
            categories: default_categories(),
            sentiment: SentimentConfig::default(),
            news: NewsConfig::default(),
            summarizer: SummarizerConfig::default(),
            retry: RetryConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl RadarConfig {
    /// Parses configuration from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RadarError::config(e, None))
    }

    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| RadarError::config(e, Some(path.to_path_buf())))
    }

    /// Loads configuration from `path` if given, otherwise returns defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// `[analysis]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Issue keywords matched as substrings of message text
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// How many top-ranked keywords get a news lookup
    #[serde(default = "default_news_keywords")]
    pub news_keywords: usize,

    /// Bucket name for tokens that match no category
    #[serde(default = "default_uncategorized")]
    pub uncategorized: String,
}

fn default_keywords() -> Vec<String> {
    ["배송", "지연", "누락", "불량", "부족", "정산", "반품", "추가", "오류"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_news_keywords() -> usize {
    3
}

fn default_uncategorized() -> String {
    "기타".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            keywords: default_keywords(),
            news_keywords: default_news_keywords(),
            uncategorized: default_uncategorized(),
        }
    }
}

/// One `[[categories]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Topic name shown in the report
    pub name: String,

    /// Substrings that place a token in this topic
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryConfig {
    /// Creates a category from a name and keyword list.
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new("배송", &["배송", "지연", "택배", "도착"]),
        CategoryConfig::new("수량", &["누락", "부족", "추가"]),
        CategoryConfig::new("품질", &["불량", "오류", "파손"]),
        CategoryConfig::new("정산", &["정산", "반품", "환불"]),
    ]
}

/// `[sentiment]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Label for tokens absent from the table
    #[serde(default = "default_sentiment_label")]
    pub default_label: String,

    /// Exact token to label mapping
    #[serde(default = "default_sentiment_labels")]
    pub labels: BTreeMap<String, String>,
}

fn default_sentiment_label() -> String {
    "중립".to_string()
}

fn default_sentiment_labels() -> BTreeMap<String, String> {
    [
        ("불량", "부정"),
        ("오류", "부정"),
        ("지연", "부정"),
        ("누락", "부정"),
        ("부족", "부정"),
        ("반품", "부정"),
        ("감사", "긍정"),
        ("해결", "긍정"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Default for SentimentConfig {
    fn default() -> Self {
        SentimentConfig {
            default_label: default_sentiment_label(),
            labels: default_sentiment_labels(),
        }
    }
}

/// News transport selected by `[news].provider`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewsProviderKind {
    /// Scraped search-results page.
    #[default]
    NaverHtml,
    /// RSS search feed.
    Rss,
    /// Authenticated JSON search API.
    NaverApi,
}

impl NewsProviderKind {
    /// Returns the configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            NewsProviderKind::NaverHtml => "naver-html",
            NewsProviderKind::Rss => "rss",
            NewsProviderKind::NaverApi => "naver-api",
        }
    }
}

impl fmt::Display for NewsProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NewsProviderKind {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "naver-html" | "naver" | "html" => Ok(NewsProviderKind::NaverHtml),
            "rss" => Ok(NewsProviderKind::Rss),
            "naver-api" | "api" => Ok(NewsProviderKind::NaverApi),
            _ => Err(RadarError::invalid_format(
                "news provider",
                format!("unknown provider '{s}'. Expected: naver-html, rss, naver-api"),
            )),
        }
    }
}

/// `[news]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Transport to use
    #[serde(default)]
    pub provider: NewsProviderKind,

    /// Term appended to keyword queries (empty for none)
    #[serde(default = "default_domain_term")]
    pub domain_term: String,

    /// Articles kept per query after deduplication
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,

    /// Topics searched verbatim in addition to the ranked keywords
    #[serde(default = "default_extra_topics")]
    pub extra_topics: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_news_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for the scraping transport
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// RSS search endpoint
    #[serde(default = "default_rss_url")]
    pub rss_url: String,

    /// Naver API client id (falls back to `NAVER_CLIENT_ID`)
    #[serde(default)]
    pub naver_client_id: Option<String>,

    /// Naver API client secret (falls back to `NAVER_CLIENT_SECRET`)
    #[serde(default)]
    pub naver_client_secret: Option<String>,
}

fn default_domain_term() -> String {
    "교과서".to_string()
}

fn default_max_articles() -> usize {
    5
}

fn default_extra_topics() -> Vec<String> {
    [
        "교과서",
        "AI 디지털교과서",
        "비상교육",
        "천재교육",
        "천재교과서",
        "미래엔",
        "아이스크림미디어",
        "동아출판",
        "지학사",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_news_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_rss_url() -> String {
    "https://news.google.com/rss/search".to_string()
}

impl NewsConfig {
    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        NewsConfig {
            provider: NewsProviderKind::default(),
            domain_term: default_domain_term(),
            max_articles: default_max_articles(),
            extra_topics: default_extra_topics(),
            timeout_secs: default_news_timeout(),
            user_agent: default_user_agent(),
            rss_url: default_rss_url(),
            naver_client_id: None,
            naver_client_secret: None,
        }
    }
}

/// Summarizer implementation selected by `[summarizer].kind`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerKind {
    /// Local frequency-based sentence selection.
    #[default]
    Extractive,
    /// OpenAI-compatible chat completions endpoint.
    Llm,
}

/// `[summarizer]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Implementation to use
    #[serde(default)]
    pub kind: SummarizerKind,

    /// Fraction of texts kept by the extractive summarizer
    #[serde(default = "default_ratio")]
    pub ratio: f64,

    /// Fixed number of texts to keep; overrides `ratio` when set
    #[serde(default)]
    pub sentences: Option<usize>,

    /// Summarize only the last N matched texts (default: all)
    #[serde(default)]
    pub tail: Option<usize>,

    /// Chat completions base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name sent to the endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (falls back to `OPENAI_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_ratio() -> f64 {
    0.3
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_llm_timeout() -> u64 {
    30
}

impl SummarizerConfig {
    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        SummarizerConfig {
            kind: SummarizerKind::default(),
            ratio: default_ratio(),
            sentences: None,
            tail: None,
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// `[retry]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Backoff multiplier applied per retry
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Upper bound on a single delay, in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_multiplier() -> f64 {
    2.0
}

fn default_max_delay_ms() -> u64 {
    8_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            multiplier: default_multiplier(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Memoize collaborator results
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Entry lifetime in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    3600
}

impl CacheConfig {
    /// Returns the entry lifetime.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            enabled: true,
            ttl_secs: default_ttl_secs(),
        }
    }
}
