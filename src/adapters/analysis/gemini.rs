//! Gemini Research Client
//!
//! Sends a fixed research prompt to the `generateContent` endpoint and
//! returns the text found at `candidates[0].content.parts[0].text`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::super::http::{join_url, require_key, send_with_retry, HttpSettings};
use crate::ports::{AnalysisService, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
const SOURCE_NAME: &str = "gemini";
const API_KEY_NAME: &str = "GEMINI_API_KEY";

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub http: HttpSettings,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            http: HttpSettings::default(),
        }
    }
}

/// Build the research prompt for a project
pub fn research_prompt(project_name: &str) -> String {
    format!(
        "Collect detailed information about the cryptocurrency project {project_name} \
         from ICO Drops, Token Unlocks, Dextools.\n\
         Provide:\n\
         - Whitepaper link or summary\n\
         - Roadmap details\n\
         - Launchpad or presale details\n\
         - Estimated ROI potential\n\
         - Risk level (1-5) and reasons\n\
         - Expected exchanges for listing\n\
         - Token unlock schedule (if available)\n\
         - Any relevant links"
    )
}

/// Analysis adapter backed by the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, SourceError> {
        let http = config.http.build_client()?;
        Ok(Self { config, http })
    }

    fn endpoint(&self) -> String {
        join_url(
            &self.config.base_url,
            &format!("/v1beta/models/{}:generateContent", self.config.model),
        )
    }
}

#[async_trait]
impl AnalysisService for GeminiClient {
    async fn analyze(&self, project_name: &str) -> Result<String, SourceError> {
        let api_key = require_key(self.config.api_key.as_deref(), API_KEY_NAME)?;
        let url = self.endpoint();
        let request_body = json!({
            "contents": [{ "parts": [{ "text": research_prompt(project_name) }] }]
        });

        let response = send_with_retry(&self.config.http.retry, SOURCE_NAME, || {
            self.http
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&request_body)
                .send()
        })
        .await?;

        let body = response.text().await?;
        parse_generated_text(&body)
    }
}

/// Extract the first candidate's first text part
///
/// A missing path or blank text is a parse error.
pub fn parse_generated_text(body: &str) -> Result<String, SourceError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| SourceError::Parse("no text in candidates[0].content.parts[0]".into()))
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = GeminiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_prompt_mentions_project_and_topics() {
        let prompt = research_prompt("AlphaCoin");
        assert!(prompt.contains("AlphaCoin"));
        for topic in ["Whitepaper", "Roadmap", "Launchpad", "ROI", "Risk", "exchanges", "unlock", "links"] {
            assert!(prompt.contains(topic), "prompt missing {topic}");
        }
    }

    #[test]
    fn test_parse_generated_text() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Whitepaper: link\nRisk: 2 — low"}], "role": "model"}, "finishReason": "STOP"}
            ]
        }"#;
        assert_eq!(parse_generated_text(body).unwrap(), "Whitepaper: link\nRisk: 2 — low");
    }

    #[test]
    fn test_parse_missing_text_is_error() {
        assert!(matches!(parse_generated_text(r#"{"candidates": []}"#), Err(SourceError::Parse(_))));
        assert!(matches!(parse_generated_text(r#"{"promptFeedback": {}}"#), Err(SourceError::Parse(_))));
        assert!(matches!(
            parse_generated_text(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(parse_generated_text("oops"), Err(SourceError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        assert_eq!(
            client.analyze("AlphaCoin").await,
            Err(SourceError::MissingCredential(API_KEY_NAME.to_string()))
        );
    }
}
