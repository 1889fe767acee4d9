//! Google generative-language API backend
//!
//! Single non-streaming `generateContent` call per request, no retries.
//! The mentor persona and task instruction are folded into one text part,
//! with the context serialized as pretty JSON.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::EvaluatedContext;
use crate::prompts::{PromptId, PromptLibrary};

use super::{compose_prompt, AIBackend};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Timeout for a single generation request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini backend
#[derive(Clone)]
pub struct GeminiBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
    prompts: Arc<RwLock<PromptLibrary>>,
}

impl GeminiBackend {
    /// Create a new Gemini backend against the public API
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, model)
    }

    /// Create a backend against a custom base URL (used by tests)
    pub fn with_base_url(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            prompts: Arc::new(RwLock::new(PromptLibrary::new())),
        }
    }

    /// Create from environment variables
    ///
    /// Requires `GEMINI_API_KEY`; `GEMINI_MODEL` defaults to gemini-1.5-flash.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(Self::new(&api_key, &model))
    }

    /// Issue one generateContent call and extract the first candidate's text
    async fn generate(&self, prompt: String) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .http_client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let body: GenerateContentResponse = response.json().await?;
        debug!(model = %self.model, "Gemini response received");

        body.candidates
            .into_iter()
            .flatten()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::Backend("Gemini response contained no candidates".into()))
    }
}

/// Request to the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Response from the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[async_trait]
impl AIBackend for GeminiBackend {
    async fn explain_decision(&self, context: &EvaluatedContext) -> Result<String> {
        let context_json = serde_json::to_string_pretty(context)?;
        let mut vars = HashMap::new();
        vars.insert("context", context_json.as_str());
        let prompt = compose_prompt(&self.prompts, PromptId::ExplainDecision, &vars)?;
        self.generate(prompt).await
    }

    async fn answer_question(&self, query: &str, context: &serde_json::Value) -> Result<String> {
        let context_json = serde_json::to_string_pretty(context)?;
        let mut vars = HashMap::new();
        vars.insert("context", context_json.as_str());
        vars.insert("query", query);
        let prompt = compose_prompt(&self.prompts, PromptId::AskQuestion, &vars)?;
        self.generate(prompt).await
    }

    async fn generate_nudge(&self, context: &serde_json::Value) -> Result<String> {
        let context_json = serde_json::to_string_pretty(context)?;
        let mut vars = HashMap::new();
        vars.insert("context", context_json.as_str());
        let prompt = compose_prompt(&self.prompts, PromptId::GenerateNudge, &vars)?;
        self.generate(prompt).await
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/v1beta/models?key={}", self.base_url, self.api_key);
        match self
            .http_client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
