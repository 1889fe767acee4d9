//! Ollama backend implementation
//!
//! HTTP client for a local Ollama server. Useful for running the coach
//! without a cloud API key; the prompt shape is identical to Gemini's.

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

const DEFAULT_MODEL: &str = "llama3.2";

/// Timeout for a single generation request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Ollama backend
#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
    prompts: Arc<RwLock<PromptLibrary>>,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            prompts: Arc::new(RwLock::new(PromptLibrary::new())),
        }
    }

    /// Create from environment variables
    ///
    /// Requires `OLLAMA_HOST`; `OLLAMA_MODEL` defaults to llama3.2.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OLLAMA_HOST").ok()?;
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(Self::new(&host, &model))
    }

    /// Issue one non-streaming generate call
    async fn generate(&self, prompt: String) -> Result<String> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let ollama_response: OllamaResponse = response.json().await?;
        debug!(model = %self.model, "Ollama response received");

        Ok(ollama_response.response)
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl AIBackend for OllamaBackend {
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
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
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
