//! Naver open API news search (`/v1/search/news.json`).

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Article, NewsProvider, clean_text, display_published};
use crate::collab::{check_status, http_client};
use crate::config::NewsConfig;
use crate::error::{RadarError, Result};

const SERVICE: &str = "naver-api";
const API_URL: &str = "https://openapi.naver.com/v1/search/news.json";
const CREDENTIALS_HINT: &str = "NAVER_CLIENT_ID and NAVER_CLIENT_SECRET";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
    #[serde(default)]
    originallink: String,
    #[serde(default)]
    link: String,
    #[serde(default, rename = "pubDate")]
    pub_date: Option<String>,
}

/// Authenticated Naver news search.
pub struct NaverApiProvider {
    client: Client,
    client_id: String,
    client_secret: String,
    display: usize,
}

impl NaverApiProvider {
    /// Fails with a missing-credentials error unless both the client id and
    /// secret are set and non-blank.
    pub fn new(config: &NewsConfig) -> Result<Self> {
        let credential = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let (Some(client_id), Some(client_secret)) = (
            credential(&config.naver_client_id),
            credential(&config.naver_client_secret),
        ) else {
            return Err(RadarError::missing_credentials(SERVICE, CREDENTIALS_HINT));
        };

        Ok(Self {
            client: http_client(SERVICE, config.timeout(), &config.user_agent)?,
            client_id,
            client_secret,
            // extra results leave room for duplicate titles
            display: (config.max_articles * 2).clamp(1, 100),
        })
    }
}

impl NewsProvider for NaverApiProvider {
    fn name(&self) -> &'static str {
        SERVICE
    }

    fn search(&self, query: &str) -> Result<Vec<Article>> {
        let display = self.display.to_string();
        let response = self
            .client
            .get(API_URL)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .query(&[("query", query), ("display", display.as_str()), ("sort", "date")])
            .send()
            .map_err(|e| RadarError::http(SERVICE, e))?;
        let body = check_status(SERVICE, response)?
            .text()
            .map_err(|e| RadarError::http(SERVICE, e))?;

        let articles = parse_api_response(&body)?;
        debug!(query, articles = articles.len(), "parsed naver api response");
        Ok(articles)
    }
}

/// Converts a Naver search API JSON body into articles.
///
/// Highlight tags such as `<b>` are stripped from titles. The publisher is
/// the host of `originallink` (or `link`), without a leading `www.`.
///
/// ```
/// use issueradar::news::parse_api_response;
///
/// let body = r#"{"items":[{
///     "title": "<b>교과서</b> 배송 지연",
///     "originallink": "https://www.edunews.kr/view/1",
///     "link": "https://n.news.naver.com/1",
///     "pubDate": "Tue, 05 Mar 2024 09:00:00 +0900"
/// }]}"#;
///
/// let articles = parse_api_response(body).unwrap();
/// assert_eq!(articles[0].title, "교과서 배송 지연");
/// assert_eq!(articles[0].source, "edunews.kr");
/// assert_eq!(articles[0].published, "2024-03-05");
/// ```
pub fn parse_api_response(json: &str) -> Result<Vec<Article>> {
    let response: SearchResponse = serde_json::from_str(json)?;

    Ok(response
        .items
        .into_iter()
        .filter_map(|item| {
            let title = clean_text(&item.title);
            let url = if item.originallink.is_empty() {
                item.link
            } else {
                item.originallink
            };
            if title.is_empty() || url.is_empty() {
                return None;
            }
            let source = url_host(&url).map(str::to_owned);
            let published = item.pub_date.as_deref().map(display_published);
            Some(
                Article::new(title, url)
                    .with_source(source.as_deref())
                    .with_published(published.as_deref()),
            )
        })
        .collect())
}

/// Host part of an absolute URL, without `www.`.
fn url_host(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.rsplit('@').next()?;
    let host = host.split(':').next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    (!host.is_empty()).then_some(host)
}
