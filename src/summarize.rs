//! Note combining and summarization via the chat-completions API.

use crate::config::OpenAiConfig;
use crate::error::{DigestError, Result};
use crate::scanner::ScannedNote;
use regex::Regex;
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::info;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const SYSTEM_PROMPT: &str = "You are an expert at summarizing notes. Each note \
is delimited by a 【title】 marker; when a note has a title, summarize it in \
the context of that title.";

/// Notice returned when no note has summarizable content.
pub const NO_CONTENT_NOTICE: &str =
    "No notes with summarizable content were found; the AI summary was skipped.";

// Inline tags carry no meaning for the summary.
static TAG_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").unwrap());

/// Join the extracted notes into the prompt payload.
///
/// Each note contributes a `【title】` marker (its file stem) plus its
/// de-tagged, trimmed text; notes left empty after stripping are dropped.
/// Returns `None` when nothing remains.
pub fn combine_notes(notes: &[ScannedNote]) -> Option<String> {
    let mut combined = Vec::new();

    for note in notes {
        let title = note
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let stripped = TAG_STRIP.replace_all(&note.content, "");
        let content = stripped.trim();
        if content.is_empty() {
            continue;
        }

        combined.push(format!("【{}】\n{}", title, content));
    }

    if combined.is_empty() {
        None
    } else {
        Some(combined.join("\n\n---\n\n"))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    reasoning_effort: &'a str,
    max_completion_tokens: u32,
    store: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
struct ContentPart<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    text: &'a str,
}

impl<'a> ChatMessage<'a> {
    fn text(role: &'a str, text: &'a str) -> Self {
        Self {
            role,
            content: vec![ContentPart { kind: "text", text }],
        }
    }
}

/// Blocking client for the chat-completions endpoint.
pub struct Summarizer<'a> {
    client: Client,
    config: &'a OpenAiConfig,
}

impl<'a> Summarizer<'a> {
    pub fn new(config: &'a OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Summarize the extracted notes in a single API call.
    pub fn summarize(&self, notes: &[ScannedNote]) -> Result<String> {
        let Some(combined) = combine_notes(notes) else {
            info!("{}", NO_CONTENT_NOTICE);
            return Ok(NO_CONTENT_NOTICE.to_string());
        };

        let system_prompt = match self.config.additional_prompt.as_deref() {
            Some(extra) if !extra.is_empty() => format!("{} {}", SYSTEM_PROMPT, extra),
            _ => SYSTEM_PROMPT.to_string(),
        };

        info!("notes submitted for summarization:\n{}", combined);
        info!("system prompt: {}", system_prompt);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage::text("developer", &system_prompt),
                ChatMessage::text("user", &combined),
            ],
            reasoning_effort: "medium",
            max_completion_tokens: self.config.max_tokens,
            store: true,
        };

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()?
            .error_for_status()?
            .json::<Value>()?;

        extract_summary(response)
    }
}

fn extract_summary(value: Value) -> Result<String> {
    value
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or_else(|| DigestError::SummaryResponse(format!("missing message content: {}", value)))
}
