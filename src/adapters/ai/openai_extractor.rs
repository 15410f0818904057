//! OpenAI-backed extraction oracle.
//!
//! Sends the turn text to the chat completions API with a fixed extraction
//! system prompt and parses the JSON the model answers with into an
//! [`ExpenseDraft`]. Temperature defaults to 0 so extraction stays as
//! repeatable as the model allows.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let extractor = OpenAiExtractor::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::expense::ExpenseDraft;
use crate::ports::{ExpenseExtractor, ExtractionError};

/// System prompt for the extraction call. Missing fields come back as JSON
/// nulls so the draft keeps them `None`.
const EXTRACTION_PROMPT: &str = "Extract expense information from the following text. \
If any information is missing, leave those fields as null.\n\
The output should be in JSON format with the following fields:\n\
- title: The item or service purchased\n\
- amount: The cost as a number (without currency symbols)\n\
- category: The type of expense (e.g., food, transport, entertainment)\n\n\
Only respond with the JSON, no additional text.";

/// Configuration for the OpenAI extractor.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout. An unresponsive oracle must not stall the session.
    pub timeout: Duration,
    /// Sampling temperature.
    pub temperature: f32,
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            temperature: 0.0,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI chat completions implementation of the extraction oracle.
pub struct OpenAiExtractor {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiExtractor {
    /// Creates a new extractor with the given configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Builds the wire request for one extraction.
    fn to_chat_request(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: EXTRACTION_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: self.config.temperature,
        }
    }

    /// Maps a non-success HTTP status to an extraction error.
    async fn handle_response_status(&self, response: Response) -> Result<Response, ExtractionError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(ExtractionError::AuthenticationFailed),
            429 => Err(ExtractionError::rate_limited(parse_retry_after(&error_body))),
            400..=499 => Err(ExtractionError::InvalidRequest(error_body)),
            500..=599 => Err(ExtractionError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(ExtractionError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ExtractionError {
        if err.is_timeout() {
            ExtractionError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else if err.is_connect() {
            ExtractionError::network(format!("Connection failed: {}", err))
        } else {
            ExtractionError::network(err.to_string())
        }
    }
}

#[async_trait]
impl ExpenseExtractor for OpenAiExtractor {
    async fn extract(&self, text: &str) -> Result<ExpenseDraft, ExtractionError> {
        let request = self.to_chat_request(text);

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = self.handle_response_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::parse(e.to_string()))?;

        let content = body
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| ExtractionError::parse("response contained no choices"))?;

        parse_draft(content)
    }
}

/// Parses the model's answer into a draft.
///
/// Models occasionally wrap the JSON in Markdown code fences despite the
/// "JSON only" instruction, so fences are stripped before parsing.
fn parse_draft(content: &str) -> Result<ExpenseDraft, ExtractionError> {
    let json = strip_code_fences(content);
    serde_json::from_str(json)
        .map_err(|e| ExtractionError::parse(format!("{}: {}", e, json)))
}

/// Removes a surrounding ``` or ```json fence, if present.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Pulls a "try again in Xs" hint out of a rate-limit error body, defaulting
/// to 30 seconds.
fn parse_retry_after(error_body: &str) -> u32 {
    let parsed: serde_json::Value = match serde_json::from_str(error_body) {
        Ok(value) => value,
        Err(_) => return 30,
    };

    let Some(message) = parsed
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    else {
        return 30;
    };

    if let Some(idx) = message.find("try again in ") {
        let rest = &message[idx + 13..];
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if let Ok(secs) = digits.parse::<u32>() {
            return secs;
        }
    }

    30
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_carries_prompt_and_text() {
        let extractor = OpenAiExtractor::new(OpenAiConfig::new("sk-test"));

        let request = extractor.to_chat_request("taxi ride home 150");

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert!(request.messages[0].content.contains("Extract expense information"));
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.messages[1].content, "taxi ride home 150");
    }

    #[test]
    fn config_builder_overrides_defaults() {
        let config = OpenAiConfig::new("sk-test")
            .with_model("gpt-4o")
            .with_base_url("http://localhost:8080/v1")
            .with_timeout(Duration::from_secs(5))
            .with_temperature(0.2);

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.temperature, 0.2);
    }

    #[test]
    fn parse_draft_accepts_plain_json() {
        let draft =
            parse_draft(r#"{"title": "Taxi", "amount": 150, "category": "transport"}"#).unwrap();

        assert_eq!(draft.title.as_deref(), Some("Taxi"));
        assert_eq!(draft.amount, Some(150.0));
        assert_eq!(draft.category.as_deref(), Some("transport"));
    }

    #[test]
    fn parse_draft_accepts_nulls_and_omissions() {
        let draft = parse_draft(r#"{"title": "Taxi", "amount": null}"#).unwrap();

        assert_eq!(draft.title.as_deref(), Some("Taxi"));
        assert_eq!(draft.amount, None);
        assert_eq!(draft.category, None);
    }

    #[test]
    fn parse_draft_strips_code_fences() {
        let fenced = "```json\n{\"title\": \"Lunch\", \"amount\": 50, \"category\": \"food\"}\n```";
        let draft = parse_draft(fenced).unwrap();

        assert_eq!(draft.title.as_deref(), Some("Lunch"));
    }

    #[test]
    fn parse_draft_rejects_non_json() {
        let result = parse_draft("Sure! The expense is a taxi ride.");
        assert!(matches!(result, Err(ExtractionError::Parse(_))));
    }

    #[test]
    fn strip_code_fences_leaves_plain_text_alone() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```{\"a\": 1}```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn parse_retry_after_reads_hint_from_error_body() {
        let body = r#"{"error": {"message": "Rate limit reached, try again in 7s."}}"#;
        assert_eq!(parse_retry_after(body), 7);
    }

    #[test]
    fn parse_retry_after_defaults_to_thirty_seconds() {
        assert_eq!(parse_retry_after("not json"), 30);
        assert_eq!(parse_retry_after(r#"{"error": {"message": "slow down"}}"#), 30);
    }
}
