//! RSS news search (Google News by default).

use std::sync::LazyLock;

use regex::Regex;
use reqwest::blocking::Client;
use tracing::debug;

use super::{Article, NewsProvider, clean_text, display_published};
use crate::collab::{check_status, http_client};
use crate::config::NewsConfig;
use crate::error::{RadarError, Result};

const SERVICE: &str = "rss";

static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<item\b[^>]*>(.*?)</item>").expect("item pattern is valid"));

static CDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("cdata pattern is valid"));

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| element_re("title"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| element_re("link"));
static SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| element_re("source"));
static PUB_DATE_RE: LazyLock<Regex> = LazyLock::new(|| element_re("pubDate"));

fn element_re(tag: &str) -> Regex {
    Regex::new(&format!(r"(?s)<{tag}\b[^>]*>(.*?)</{tag}>")).expect("element pattern is valid")
}

/// Searches an RSS endpoint that accepts a `q` parameter.
pub struct RssProvider {
    client: Client,
    feed_url: String,
}

impl RssProvider {
    pub fn new(config: &NewsConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(SERVICE, config.timeout(), &config.user_agent)?,
            feed_url: config.rss_url.clone(),
        })
    }
}

impl NewsProvider for RssProvider {
    fn name(&self) -> &'static str {
        SERVICE
    }

    fn search(&self, query: &str) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(&self.feed_url)
            .query(&[("q", query), ("hl", "ko"), ("gl", "KR"), ("ceid", "KR:ko")])
            .send()
            .map_err(|e| RadarError::http(SERVICE, e))?;
        let body = check_status(SERVICE, response)?
            .text()
            .map_err(|e| RadarError::http(SERVICE, e))?;

        let articles = parse_rss(&body);
        debug!(query, articles = articles.len(), "parsed rss feed");
        Ok(articles)
    }
}

/// Extracts `<item>` entries from an RSS 2.0 document.
///
/// Items without a title or link are skipped. `pubDate` is shown as
/// `YYYY-MM-DD` when it is a valid RFC 2822 timestamp.
pub fn parse_rss(xml: &str) -> Vec<Article> {
    ITEM_RE
        .captures_iter(xml)
        .filter_map(|item| {
            let body = &item[1];
            let title = element_text(&TITLE_RE, body)?;
            let link = element_text(&LINK_RE, body)?;
            let source = element_text(&SOURCE_RE, body);
            let published = element_text(&PUB_DATE_RE, body).map(|p| display_published(&p));

            Some(
                Article::new(title, link)
                    .with_source(source.as_deref())
                    .with_published(published.as_deref()),
            )
        })
        .collect()
}

fn element_text(re: &Regex, body: &str) -> Option<String> {
    let raw = re.captures(body)?;
    let unwrapped = CDATA_RE.replace_all(&raw[1], "$1");
    let text = clean_text(&unwrapped);
    (!text.is_empty()).then_some(text)
}
