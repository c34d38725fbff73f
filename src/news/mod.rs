//! News search collaborators.
//!
//! Three transports implement [`NewsProvider`]:
//!
//! | Provider | Kind | Credentials |
//! |----------|------|-------------|
//! | [`NaverHtmlProvider`] | `naver-html` | none |
//! | [`RssProvider`] | `rss` | none |
//! | [`NaverApiProvider`] | `naver-api` | client id + secret |
//!
//! [`NewsDesk`] ties a provider to the retry policy, the optional cache and
//! the query conventions used by the report.

mod api;
mod html;
mod rss;

use std::sync::LazyLock;

use chrono::DateTime;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::collab::{Outcome, RetryPolicy, TtlCache};
use crate::config::{NewsConfig, NewsProviderKind, RadarConfig};
use crate::error::Result;

pub use api::{NaverApiProvider, parse_api_response};
pub use html::{NaverHtmlProvider, parse_search_html};
pub use rss::{RssProvider, parse_rss};

/// Placeholder for an article whose publisher could not be found.
pub const UNKNOWN_SOURCE: &str = "언론사 미확인";
/// Placeholder for an article whose publication date could not be found.
pub const UNKNOWN_DATE: &str = "날짜 미확인";

/// A news search hit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    /// Publisher name, or [`UNKNOWN_SOURCE`]
    pub source: String,
    /// Publication date as displayed, or [`UNKNOWN_DATE`]
    pub published: String,
}

impl Article {
    /// Creates an article with placeholder source and date.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: UNKNOWN_SOURCE.to_string(),
            published: UNKNOWN_DATE.to_string(),
        }
    }

    /// Sets the publisher; blank values keep the placeholder.
    #[must_use]
    pub fn with_source(mut self, source: Option<&str>) -> Self {
        if let Some(s) = source.map(str::trim).filter(|s| !s.is_empty()) {
            self.source = s.to_string();
        }
        self
    }

    /// Sets the publication date; blank values keep the placeholder.
    #[must_use]
    pub fn with_published(mut self, published: Option<&str>) -> Self {
        if let Some(p) = published.map(str::trim).filter(|p| !p.is_empty()) {
            self.published = p.to_string();
        }
        self
    }
}

/// Capability trait for news search backends.
pub trait NewsProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Searches for articles matching `query`.
    fn search(&self, query: &str) -> Result<Vec<Article>>;
}

impl<P: NewsProvider + ?Sized> NewsProvider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn search(&self, query: &str) -> Result<Vec<Article>> {
        (**self).search(query)
    }
}

/// Memoizes search results by exact query text.
pub struct CachedNewsProvider<P> {
    inner: P,
    cache: TtlCache<String, Vec<Article>>,
}

impl<P: NewsProvider> CachedNewsProvider<P> {
    pub fn new(inner: P, ttl: std::time::Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl),
        }
    }
}

impl<P: NewsProvider> NewsProvider for CachedNewsProvider<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn search(&self, query: &str) -> Result<Vec<Article>> {
        let key = query.to_string();
        if let Some(hit) = self.cache.get(&key) {
            debug!(provider = self.inner.name(), query, "news cache hit");
            return Ok(hit);
        }
        let articles = self.inner.search(query)?;
        self.cache.insert(key, articles.clone());
        Ok(articles)
    }
}

/// Builds the query for a ranked keyword: `<keyword> <domain_term>`.
///
/// ```
/// use issueradar::news::news_query;
///
/// assert_eq!(news_query("배송", "교과서"), "배송 교과서");
/// assert_eq!(news_query("교과서", "교과서"), "교과서");
/// assert_eq!(news_query("누락", ""), "누락");
/// ```
pub fn news_query(keyword: &str, domain_term: &str) -> String {
    let keyword = keyword.trim();
    let domain_term = domain_term.trim();
    if domain_term.is_empty() || keyword.contains(domain_term) {
        keyword.to_string()
    } else {
        format!("{keyword} {domain_term}")
    }
}

/// Drops repeated titles (first wins) and keeps at most `max` articles.
pub fn dedupe_and_limit(articles: Vec<Article>, max: usize) -> Vec<Article> {
    let mut seen = std::collections::HashSet::new();
    articles
        .into_iter()
        .filter(|a| seen.insert(a.title.trim().to_string()))
        .take(max)
        .collect()
}

/// Creates the provider selected by `[news].provider`.
///
/// Fails with [`RadarError::MissingCredentials`](crate::RadarError::MissingCredentials)
/// when `naver-api` is selected without a client id and secret.
pub fn create_provider(config: &NewsConfig) -> Result<Box<dyn NewsProvider>> {
    Ok(match config.provider {
        NewsProviderKind::NaverHtml => Box::new(NaverHtmlProvider::new(config)?),
        NewsProviderKind::Rss => Box::new(RssProvider::new(config)?),
        NewsProviderKind::NaverApi => Box::new(NaverApiProvider::new(config)?),
    })
}

/// A provider plus retry, cache and query conventions.
pub struct NewsDesk {
    provider: Box<dyn NewsProvider>,
    retry: RetryPolicy,
    domain_term: String,
    max_articles: usize,
}

impl NewsDesk {
    pub fn new(provider: Box<dyn NewsProvider>, retry: RetryPolicy, config: &NewsConfig) -> Self {
        Self {
            provider,
            retry,
            domain_term: config.domain_term.clone(),
            max_articles: config.max_articles,
        }
    }

    /// Builds the desk described by the application config.
    pub fn from_config(config: &RadarConfig) -> Result<Self> {
        let provider = create_provider(&config.news)?;
        let provider: Box<dyn NewsProvider> = if config.cache.enabled {
            Box::new(CachedNewsProvider::new(provider, config.cache.ttl()))
        } else {
            provider
        };
        info!(provider = provider.name(), "news provider ready");
        Ok(Self::new(
            provider,
            RetryPolicy::from_config(&config.retry),
            &config.news,
        ))
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Searches `query` verbatim.
    pub fn search(&self, query: &str) -> Outcome<Vec<Article>> {
        let result = self
            .retry
            .run(self.provider.name(), || self.provider.search(query))
            .map(|articles| dedupe_and_limit(articles, self.max_articles));
        if let Err(e) = &result {
            warn!(provider = self.provider.name(), query, error = %e, "news search unavailable");
        }
        Outcome::from_result(result)
    }

    /// Searches news for a ranked keyword, suffixed with the domain term.
    pub fn keyword_news(&self, keyword: &str) -> NewsSection {
        let query = news_query(keyword, &self.domain_term);
        let outcome = self.search(&query);
        NewsSection { query, outcome }
    }

    /// Searches every keyword (with the domain term) and every topic (verbatim).
    pub fn digest<S: AsRef<str>>(&self, keywords: &[&str], topics: &[S]) -> NewsDigest {
        NewsDigest {
            keywords: keywords.iter().map(|k| self.keyword_news(k)).collect(),
            topics: topics
                .iter()
                .map(|t| NewsSection {
                    query: t.as_ref().to_string(),
                    outcome: self.search(t.as_ref()),
                })
                .collect(),
        }
    }
}

/// Search results for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsSection {
    pub query: String,
    pub outcome: Outcome<Vec<Article>>,
}

/// News for the top keywords and the standing topic list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewsDigest {
    pub keywords: Vec<NewsSection>,
    pub topics: Vec<NewsSection>,
}

// ============================================================================
// Markup helpers shared by the providers
// ============================================================================

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity pattern is valid")
});

static SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("space pattern is valid"));

/// Decodes the common named entities and numeric character references.
pub(crate) fn unescape_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ if entity.starts_with('#') => {
                    entity[1..].parse::<u32>().ok().and_then(char::from_u32)
                }
                _ => None,
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

/// Removes tags, decodes entities and collapses whitespace.
pub(crate) fn clean_text(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, "");
    let decoded = unescape_entities(&stripped);
    SPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}

/// Renders RFC 2822 timestamps as `YYYY-MM-DD`; other text passes through.
pub(crate) fn display_published(raw: &str) -> String {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
