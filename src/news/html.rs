//! Scraped Naver news search results.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::blocking::Client;
use tracing::debug;

use super::{Article, NewsProvider, clean_text, unescape_entities};
use crate::collab::{check_status, http_client};
use crate::config::NewsConfig;
use crate::error::{RadarError, Result};

const SERVICE: &str = "naver-html";
const SEARCH_URL: &str = "https://search.naver.com/search.naver";

static NEWS_AREA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="[^"]*\bnews_area\b[^"]*""#).expect("news_area pattern is valid")
});

static TITLE_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\b([^>]*\bclass="[^"]*\bnews_tit\b[^"]*"[^>]*)>(.*?)</a>"#)
        .expect("news_tit pattern is valid")
});

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bhref="([^"]*)""#).expect("href pattern is valid"));

static TITLE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\btitle="([^"]*)""#).expect("title pattern is valid"));

static INFO_GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)class="[^"]*\binfo_group\b[^"]*"[^>]*>(.*?)</div>"#)
        .expect("info_group pattern is valid")
});

static SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<span\b[^>]*>(.*?)</span>").expect("span pattern is valid"));

/// Scrapes `search.naver.com` news results.
pub struct NaverHtmlProvider {
    client: Client,
    endpoint: String,
}

impl NaverHtmlProvider {
    pub fn new(config: &NewsConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(SERVICE, config.timeout(), &config.user_agent)?,
            endpoint: SEARCH_URL.to_string(),
        })
    }
}

impl NewsProvider for NaverHtmlProvider {
    fn name(&self) -> &'static str {
        SERVICE
    }

    fn search(&self, query: &str) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("where", "news"), ("query", query)])
            .send()
            .map_err(|e| RadarError::http(SERVICE, e))?;
        let body = check_status(SERVICE, response)?
            .text()
            .map_err(|e| RadarError::http(SERVICE, e))?;

        let articles = parse_search_html(&body);
        debug!(query, bytes = body.len(), articles = articles.len(), "parsed naver results");
        Ok(articles)
    }
}

/// Extracts articles from a Naver news search results page.
///
/// Each result block (`news_area`) contributes its `news_tit` anchor as
/// title and link. The first two `<span>`s of its `info_group` are the
/// publisher and the date.
///
/// ```
/// use issueradar::news::parse_search_html;
///
/// let html = r#"
/// <div class="news_area">
///   <div class="info_group"><span>교육신문</span><span>1일 전</span></div>
///   <a href="https://edu.kr/1" class="news_tit" title="교과서 배송 지연">교과서 배송 지연</a>
/// </div>"#;
///
/// let articles = parse_search_html(html);
/// assert_eq!(articles[0].title, "교과서 배송 지연");
/// assert_eq!(articles[0].source, "교육신문");
/// assert_eq!(articles[0].published, "1일 전");
/// ```
pub fn parse_search_html(html: &str) -> Vec<Article> {
    let mut starts: Vec<usize> = NEWS_AREA_RE.find_iter(html).map(|m| m.start()).collect();
    if starts.is_empty() {
        starts = TITLE_ANCHOR_RE.find_iter(html).map(|m| m.start()).collect();
    }

    let mut articles = Vec::new();
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(html.len());
        if let Some(article) = parse_block(&html[start..end]) {
            articles.push(article);
        }
    }
    articles
}

fn parse_block(block: &str) -> Option<Article> {
    let anchor = TITLE_ANCHOR_RE.captures(block)?;
    let attrs = anchor.get(1).map_or("", |m| m.as_str());

    let url = HREF_RE
        .captures(attrs)
        .map(|c| unescape_entities(&c[1]))
        .filter(|u| !u.is_empty())?;

    let mut title = clean_text(&anchor[2]);
    if title.is_empty() {
        title = TITLE_ATTR_RE
            .captures(attrs)
            .map(|c| clean_text(&c[1]))
            .unwrap_or_default();
    }
    if title.is_empty() {
        return None;
    }

    let spans: Vec<String> = INFO_GROUP_RE
        .captures(block)
        .map(|info| {
            SPAN_RE
                .captures_iter(&info[1])
                .map(|s| clean_text(&s[1]))
                .collect()
        })
        .unwrap_or_default();

    Some(
        Article::new(title, url)
            .with_source(spans.first().map(String::as_str))
            .with_published(spans.get(1).map(String::as_str)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{UNKNOWN_DATE, UNKNOWN_SOURCE};

    const PAGE: &str = r#"
<ul class="list_news">
  <li class="bx"><div class="news_wrap api_ani_send"><div class="news_area">
    <div class="news_info"><div class="info_group">
      <span class="info press">한국교육신문</span><span class="info">2024.03.05.</span>
    </div></div>
    <a href="https://news.example.kr/a?x=1&amp;y=2" class="news_tit" target="_blank" title="AI 디지털교과서 &quot;배송&quot; 지연">AI <mark>디지털교과서</mark> &quot;배송&quot; 지연</a>
  </div></div></li>
  <li class="bx"><div class="news_wrap"><div class="news_area">
    <a href="https://news.example.kr/b" class="news_tit" title="누락 확인"></a>
  </div></div></li>
  <li class="bx"><div class="news_area"><a class="news_tit">링크 없음</a></div></li>
</ul>"#;

    #[test]
    fn test_parse_full_block() {
        let articles = parse_search_html(PAGE);
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.title, r#"AI 디지털교과서 "배송" 지연"#);
        assert_eq!(first.url, "https://news.example.kr/a?x=1&y=2");
        assert_eq!(first.source, "한국교육신문");
        assert_eq!(first.published, "2024.03.05.");
    }

    #[test]
    fn test_title_attribute_fallback_and_placeholders() {
        let articles = parse_search_html(PAGE);
        let second = &articles[1];
        assert_eq!(second.title, "누락 확인");
        assert_eq!(second.source, UNKNOWN_SOURCE);
        assert_eq!(second.published, UNKNOWN_DATE);
    }

    #[test]
    fn test_anchors_without_result_blocks() {
        let html = r#"<a class="news_tit" href="/1">하나</a><p></p><a class="news_tit" href="/2">둘</a>"#;
        let titles: Vec<_> = parse_search_html(html).into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["하나", "둘"]);
    }

    #[test]
    fn test_no_results() {
        assert!(parse_search_html("<html><body>검색결과가 없습니다</body></html>").is_empty());
        assert!(parse_search_html("").is_empty());
    }
}
