//! Pluggable text-generation backend abstraction
//!
//! The coach never makes decisions with the model; it only asks for prose.
//! All backends take the same three task shapes (explain a decision, answer a
//! question, produce a nudge) and return plain text.
//!
//! # Architecture
//!
//! - `AIBackend` trait: defines the interface for all text-generation tasks
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `OllamaBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `LIM_AI_BACKEND`: Backend to use (gemini, ollama, mock). Default: gemini
//! - `GEMINI_API_KEY`: API key (required for gemini backend)
//! - `GEMINI_MODEL`: Model name (default: gemini-1.5-flash)
//! - `OLLAMA_HOST`: Ollama server URL (required for ollama backend)
//! - `OLLAMA_MODEL`: Model name (default: llama3.2)

mod gemini;
mod mock;
mod ollama;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use ollama::OllamaBackend;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::EvaluatedContext;
use crate::prompts::{PromptId, PromptLibrary};

/// Trait defining the interface for all text-generation backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Explain an evaluated spend decision in the mentor's voice
    async fn explain_decision(&self, context: &EvaluatedContext) -> Result<String>;

    /// Answer a free-text user question against their financial context
    async fn answer_question(&self, query: &str, context: &serde_json::Value) -> Result<String>;

    /// Produce a short proactive nudge for the given context
    async fn generate_nudge(&self, context: &serde_json::Value) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Render a full prompt: mentor persona followed by the rendered task section.
///
/// Mirrors the single-prompt shape the backends expect; both Gemini and
/// Ollama receive the same text.
pub(crate) fn compose_prompt(
    prompts: &Arc<RwLock<PromptLibrary>>,
    task: PromptId,
    vars: &HashMap<&str, &str>,
) -> Result<String> {
    let mut library = prompts
        .write()
        .map_err(|_| Error::InvalidData("Failed to acquire prompt library lock".into()))?;

    let system = library
        .get(PromptId::MentorSystem)?
        .system_section()
        .ok_or_else(|| Error::InvalidData("mentor_system prompt has no # System section".into()))?
        .to_string();

    let user = library.get(task)?.render_user(vars);

    Ok(format!("{}\n\n{}", system, user))
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
/// All variants implement the same AIBackend operations.
#[derive(Clone)]
pub enum AIClient {
    /// Google generative-language API backend
    Gemini(GeminiBackend),
    /// Ollama backend (local HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `LIM_AI_BACKEND` to determine which backend to use:
    /// - `gemini` (default): Uses GEMINI_API_KEY and GEMINI_MODEL
    /// - `ollama`: Uses OLLAMA_HOST and OLLAMA_MODEL
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("LIM_AI_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "gemini" => GeminiBackend::from_env().map(AIClient::Gemini),
            "ollama" => OllamaBackend::from_env().map(AIClient::Ollama),
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown LIM_AI_BACKEND, falling back to gemini");
                GeminiBackend::from_env().map(AIClient::Gemini)
            }
        }
    }

    /// Create a Gemini backend directly
    pub fn gemini(api_key: &str, model: &str) -> Self {
        AIClient::Gemini(GeminiBackend::new(api_key, model))
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        AIClient::Ollama(OllamaBackend::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn explain_decision(&self, context: &EvaluatedContext) -> Result<String> {
        match self {
            AIClient::Gemini(b) => b.explain_decision(context).await,
            AIClient::Ollama(b) => b.explain_decision(context).await,
            AIClient::Mock(b) => b.explain_decision(context).await,
        }
    }

    async fn answer_question(&self, query: &str, context: &serde_json::Value) -> Result<String> {
        match self {
            AIClient::Gemini(b) => b.answer_question(query, context).await,
            AIClient::Ollama(b) => b.answer_question(query, context).await,
            AIClient::Mock(b) => b.answer_question(query, context).await,
        }
    }

    async fn generate_nudge(&self, context: &serde_json::Value) -> Result<String> {
        match self {
            AIClient::Gemini(b) => b.generate_nudge(context).await,
            AIClient::Ollama(b) => b.generate_nudge(context).await,
            AIClient::Mock(b) => b.generate_nudge(context).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Gemini(b) => b.health_check().await,
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Gemini(b) => b.model(),
            AIClient::Ollama(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Gemini(b) => b.host(),
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
