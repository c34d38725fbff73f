//! Summarization collaborators.
//!
//! [`ExtractiveSummarizer`] runs locally and never fails; [`LlmSummarizer`]
//! calls an OpenAI-compatible chat completions endpoint. Both sit behind
//! [`Summarizer`] and are selected by `[summarizer].kind`.

mod extractive;
mod llm;

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::collab::{Outcome, RetryPolicy, TtlCache};
use crate::config::{RadarConfig, SummarizerConfig, SummarizerKind};
use crate::error::Result;

pub use extractive::ExtractiveSummarizer;
pub use llm::{LlmSummarizer, build_prompt, parse_completion};

/// Requested summary size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryLength {
    /// Keep about this many sentences.
    Sentences(usize),
    /// Keep about this share of the input, in percent (1..=100).
    Percent(u8),
}

impl SummaryLength {
    /// `sentences` wins over `ratio` when both are configured.
    pub fn from_config(config: &SummarizerConfig) -> Self {
        match config.sentences {
            Some(n) => SummaryLength::Sentences(n.max(1)),
            None => {
                let percent = (config.ratio * 100.0).round().clamp(1.0, 100.0);
                SummaryLength::Percent(percent as u8)
            }
        }
    }

    /// Number of items to keep out of `total`; at least one when `total > 0`.
    ///
    /// ```
    /// use issueradar::summarize::SummaryLength;
    ///
    /// assert_eq!(SummaryLength::Percent(30).target(10), 3);
    /// assert_eq!(SummaryLength::Percent(30).target(2), 1);
    /// assert_eq!(SummaryLength::Sentences(4).target(2), 2);
    /// assert_eq!(SummaryLength::Sentences(4).target(0), 0);
    /// ```
    pub fn target(&self, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        let wanted = match *self {
            SummaryLength::Sentences(n) => n,
            SummaryLength::Percent(p) => (total * usize::from(p)).div_ceil(100),
        };
        wanted.clamp(1, total)
    }
}

/// Which matched texts are fed to the summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    /// The last `n` texts.
    Tail(usize),
}

impl Selection {
    pub fn from_config(config: &SummarizerConfig) -> Self {
        config.tail.map_or(Selection::All, Selection::Tail)
    }

    /// Returns the selected trailing slice of `items`.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match *self {
            Selection::All => items,
            Selection::Tail(n) => &items[items.len().saturating_sub(n)..],
        }
    }
}

/// Capability trait for summarization backends.
pub trait Summarizer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Summarizes `texts`. Empty input yields an empty summary.
    fn summarize(&self, texts: &[String], length: SummaryLength) -> Result<String>;
}

impl<S: Summarizer + ?Sized> Summarizer for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn summarize(&self, texts: &[String], length: SummaryLength) -> Result<String> {
        (**self).summarize(texts, length)
    }
}

/// Memoizes summaries keyed on the exact texts and length.
pub struct CachedSummarizer<S> {
    inner: S,
    cache: TtlCache<(Vec<String>, SummaryLength), String>,
}

impl<S: Summarizer> CachedSummarizer<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl),
        }
    }
}

impl<S: Summarizer> Summarizer for CachedSummarizer<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn summarize(&self, texts: &[String], length: SummaryLength) -> Result<String> {
        let key = (texts.to_vec(), length);
        if let Some(hit) = self.cache.get(&key) {
            debug!(summarizer = self.inner.name(), texts = texts.len(), "summary cache hit");
            return Ok(hit);
        }
        let summary = self.inner.summarize(texts, length)?;
        self.cache.insert(key, summary.clone());
        Ok(summary)
    }
}

/// Creates the summarizer selected by `[summarizer].kind`.
pub fn create_summarizer(config: &SummarizerConfig) -> Result<Box<dyn Summarizer>> {
    Ok(match config.kind {
        SummarizerKind::Extractive => Box::new(ExtractiveSummarizer::new()),
        SummarizerKind::Llm => Box::new(LlmSummarizer::new(config)?),
    })
}

/// A summarizer plus retry, cache, input selection and target length.
pub struct SummaryDesk {
    summarizer: Box<dyn Summarizer>,
    retry: RetryPolicy,
    selection: Selection,
    length: SummaryLength,
}

impl SummaryDesk {
    pub fn new(summarizer: Box<dyn Summarizer>, retry: RetryPolicy, length: SummaryLength) -> Self {
        Self {
            summarizer,
            retry,
            selection: Selection::All,
            length,
        }
    }

    /// Builds the desk described by the application config.
    pub fn from_config(config: &RadarConfig) -> Result<Self> {
        let summarizer = create_summarizer(&config.summarizer)?;
        let summarizer: Box<dyn Summarizer> = if config.cache.enabled {
            Box::new(CachedSummarizer::new(summarizer, config.cache.ttl()))
        } else {
            summarizer
        };
        info!(summarizer = summarizer.name(), "summarizer ready");
        Ok(Self::new(
            summarizer,
            RetryPolicy::from_config(&config.retry),
            SummaryLength::from_config(&config.summarizer),
        )
        .with_selection(Selection::from_config(&config.summarizer)))
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn summarizer_name(&self) -> &'static str {
        self.summarizer.name()
    }

    /// Summarizes the selected texts, degrading to an outcome on failure.
    pub fn summarize(&self, texts: &[&str]) -> Outcome<String> {
        let selected: Vec<String> = self
            .selection
            .apply(texts)
            .iter()
            .map(|t| (*t).to_string())
            .collect();
        let result = self.retry.run(self.summarizer.name(), || {
            self.summarizer.summarize(&selected, self.length)
        });
        if let Err(e) = &result {
            warn!(summarizer = self.summarizer.name(), error = %e, "summary unavailable");
        }
        Outcome::from_result(result)
    }
}
