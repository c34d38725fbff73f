//! Generative summaries from an OpenAI-compatible chat completions API.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Summarizer, SummaryLength};
use crate::collab::{check_status, http_client};
use crate::config::SummarizerConfig;
use crate::error::{RadarError, Result};

const SERVICE: &str = "llm";
const CREDENTIALS_HINT: &str = "OPENAI_API_KEY or [summarizer].api_key";
const USER_AGENT: &str = concat!("issueradar/", env!("CARGO_PKG_VERSION"));

const SYSTEM_PROMPT: &str = "당신은 고객 채팅에서 반복되는 민원을 정리하는 분석가입니다. \
                             사실만 간결하게 한국어로 요약하세요.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Summarizes through `POST <base_url>/chat/completions` with bearer auth.
pub struct LlmSummarizer {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl LlmSummarizer {
    /// Fails with a missing-credentials error when no API key is set.
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| RadarError::missing_credentials(SERVICE, CREDENTIALS_HINT))?
            .to_string();

        Ok(Self {
            client: http_client(SERVICE, config.timeout(), USER_AGENT)?,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Summarizer for LlmSummarizer {
    fn name(&self) -> &'static str {
        SERVICE
    }

    fn summarize(&self, texts: &[String], length: SummaryLength) -> Result<String> {
        if texts.is_empty() {
            return Ok(String::new());
        }

        let prompt = build_prompt(texts, length);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: 0.2,
        };

        debug!(model = %self.model, texts = texts.len(), "requesting summary");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| RadarError::http(SERVICE, e))?;
        let body = check_status(SERVICE, response)?
            .text()
            .map_err(|e| RadarError::http(SERVICE, e))?;

        parse_completion(&body)
    }
}

/// Builds the user prompt: an instruction sized by `length`, then one
/// message per line.
///
/// ```
/// use issueradar::summarize::{SummaryLength, build_prompt};
///
/// let prompt = build_prompt(&["배송 지연".to_string()], SummaryLength::Sentences(2));
/// assert!(prompt.contains("2문장"));
/// assert!(prompt.ends_with("- 배송 지연"));
/// ```
pub fn build_prompt(texts: &[String], length: SummaryLength) -> String {
    let size = match length {
        SummaryLength::Sentences(n) => format!("{n}문장 이내로"),
        SummaryLength::Percent(p) => format!("원문의 약 {p}% 분량으로"),
    };
    let mut prompt = format!(
        "다음은 채팅방에서 수집한 민원 메시지 {}건입니다. 핵심 이슈를 {size} 요약해 주세요.\n",
        texts.len()
    );
    for text in texts {
        prompt.push_str("\n- ");
        prompt.push_str(text.trim());
    }
    prompt
}

/// Returns the first choice's content, trimmed.
pub fn parse_completion(json: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(json)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .ok_or_else(|| RadarError::invalid_format("chat completion", "response has no choices"))
}
