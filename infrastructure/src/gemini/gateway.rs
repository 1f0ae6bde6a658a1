//! Gemini HTTP gateway
//!
//! Implements the application `ReasoningGateway` port against the
//! `generateContent` REST endpoint. The API key comes from `GEMINI_API_KEY`
//! (or `GOOGLE_API_KEY` as a fallback).

use super::prompts;
use async_trait::async_trait;
use consenso_application::ports::reasoning_gateway::{
    EscalationRequest, GatewayError, ReasoningGateway,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini adapter for the reasoning gateway port
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiGateway {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Read the API key from the environment.
    pub fn from_env(model: impl Into<String>) -> Result<Self, GatewayError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| GatewayError::MissingApiKey)?;
        Ok(Self::new(api_key, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ReasoningGateway for GeminiGateway {
    async fn reason(&self, request: &EscalationRequest) -> Result<String, GatewayError> {
        let prompt = prompts::build_prompt(request);
        debug!(model = %self.model, prompt_len = prompt.len(), "consultando a Gemini");

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let text = payload.text().ok_or(GatewayError::EmptyResponse)?;
        info!(model = %self.model, response_len = text.len(), "respuesta recibida");
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, `None` when empty
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}
