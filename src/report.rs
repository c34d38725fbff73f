//! The issue report shown by the CLI.
//!
//! [`IssueReport`] is serializable for `--json-report` and renders as
//! terminal text through [`Display`](std::fmt::Display).

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::Analysis;
use crate::collab::Outcome;
use crate::core::{DateSpan, FilterConfig};
use crate::news::{NewsDigest, NewsSection};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Everything the CLI prints after a run.
#[derive(Debug, Clone, Serialize)]
pub struct IssueReport {
    /// Input file name
    pub source: String,
    /// Selected range start (inclusive)
    pub from: Option<NaiveDate>,
    /// Selected range end (inclusive)
    pub to: Option<NaiveDate>,
    #[serde(flatten)]
    pub analysis: Analysis,
    /// `None` when no summary was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Outcome<String>>,
    /// `None` when no news was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news: Option<Outcome<NewsDigest>>,
}

impl IssueReport {
    pub fn new(source: impl Into<String>, analysis: Analysis, filter: &FilterConfig) -> Self {
        Self {
            source: source.into(),
            from: filter.from_date,
            to: filter.to_date,
            analysis,
            summary: None,
            news: None,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: Outcome<String>) -> Self {
        self.summary = Some(summary);
        self
    }

    #[must_use]
    pub fn with_news(mut self, news: Outcome<NewsDigest>) -> Self {
        self.news = Some(news);
        self
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn span_text(span: Option<&DateSpan>) -> String {
    match span {
        Some(s) => format!("{} ~ {} ({}일)", s.start, s.end, s.days()),
        None => "날짜 미확인".to_string(),
    }
}

fn bound_text(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "전체".to_string(), |d| d.to_string())
}

fn write_unavailable(f: &mut fmt::Formatter<'_>, indent: &str, reason: &str) -> fmt::Result {
    writeln!(f, "{indent}⚠️  일시적으로 불러올 수 없습니다. 잠시 후 다시 시도해 주세요. ({reason})")
}

fn write_not_configured(f: &mut fmt::Formatter<'_>, what: &str, service: &str) -> fmt::Result {
    writeln!(f, "ℹ️  {what}: {service} 인증 정보가 없어 건너뜁니다.")
}

fn write_section(f: &mut fmt::Formatter<'_>, section: &NewsSection) -> fmt::Result {
    writeln!(f, "   🔑 {}", section.query)?;
    match &section.outcome {
        Outcome::Ready(articles) if articles.is_empty() => writeln!(f, "      검색 결과가 없습니다."),
        Outcome::Ready(articles) => {
            for article in articles {
                writeln!(f, "      • {} | {} ({})", article.title, article.source, article.published)?;
                writeln!(f, "        {}", article.url)?;
            }
            Ok(())
        }
        Outcome::Unavailable(reason) => write_unavailable(f, "      ", reason),
        Outcome::NotConfigured(service) => write_not_configured(f, "뉴스", service),
    }
}

impl fmt::Display for IssueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = &self.analysis;
        let stats = &analysis.stats;

        writeln!(f, "📡 issueradar v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "📂 입력:       {}", self.source)?;
        writeln!(f, "📅 분석 가능:  {}", span_text(analysis.available.as_ref()))?;
        writeln!(f, "🔎 선택 기간:  {} ~ {}", bound_text(self.from), bound_text(self.to))?;
        writeln!(f, "🏷️  키워드:     {}", analysis.keywords.join(", "))?;
        writeln!(f)?;
        writeln!(f, "📊 통계:")?;
        writeln!(f, "   전체 메시지: {}건", stats.parsed)?;
        writeln!(f, "   기간 내:     {}건", stats.in_range)?;
        writeln!(f, "   민원 메시지: {}건 ({:.1}%)", stats.matched, stats.match_ratio())?;
        writeln!(f)?;

        if !analysis.has_matches() {
            writeln!(f, "✅ 선택한 기간에 민원 메시지가 없습니다.")?;
        } else {
            writeln!(f, "🚨 민원 키워드 TOP {}:", analysis.insights.len())?;
            for (rank, insight) in analysis.insights.iter().enumerate() {
                writeln!(
                    f,
                    "   {:>2}. {} ({}회) [{} / {}]",
                    rank + 1,
                    insight.token,
                    insight.count,
                    insight.category,
                    insight.sentiment
                )?;
            }
            writeln!(f)?;

            if !analysis.categories.is_empty() {
                writeln!(f, "🗂️  분류별 합계:")?;
                for (name, total) in &analysis.categories {
                    writeln!(f, "   {name}: {total}")?;
                }
                writeln!(f)?;
            }
        }

        match &self.summary {
            None => {}
            Some(Outcome::Ready(summary)) => {
                writeln!(f, "📝 요약:")?;
                if summary.is_empty() {
                    writeln!(f, "   요약할 메시지가 없습니다.")?;
                }
                for line in summary.lines() {
                    writeln!(f, "   {line}")?;
                }
                writeln!(f)?;
            }
            Some(Outcome::Unavailable(reason)) => {
                writeln!(f, "📝 요약:")?;
                write_unavailable(f, "   ", reason)?;
                writeln!(f)?;
            }
            Some(Outcome::NotConfigured(service)) => {
                write_not_configured(f, "요약", service)?;
                writeln!(f)?;
            }
        }

        match &self.news {
            None => {}
            Some(Outcome::Ready(digest)) => {
                if !digest.keywords.is_empty() {
                    writeln!(f, "📰 키워드 관련 뉴스:")?;
                    for section in &digest.keywords {
                        write_section(f, section)?;
                    }
                    writeln!(f)?;
                }
                if !digest.topics.is_empty() {
                    writeln!(f, "📚 주요 주제 뉴스:")?;
                    for section in &digest.topics {
                        write_section(f, section)?;
                    }
                    writeln!(f)?;
                }
            }
            Some(Outcome::Unavailable(reason)) => {
                writeln!(f, "📰 뉴스:")?;
                write_unavailable(f, "   ", reason)?;
                writeln!(f)?;
            }
            Some(Outcome::NotConfigured(service)) => {
                write_not_configured(f, "뉴스", service)?;
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
