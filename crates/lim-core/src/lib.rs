//! LIM Core Library
//!
//! Shared functionality for the LIM student spending guardrails:
//! - Deterministic spend-decision policy (the backend owns approval, not the AI)
//! - Proactive nudge trigger detection with injectable day-of-week
//! - Pluggable text-generation backends (Gemini, Ollama, mock)
//! - Prompt library with user-overridable mentor prompts
//! - Coach orchestration with fixed fallback lines on backend failure

pub mod ai;
pub mod coach;
pub mod error;
pub mod models;
pub mod policy;
pub mod prompts;
pub mod triggers;

pub use ai::{AIBackend, AIClient, GeminiBackend, MockBackend, OllamaBackend};
pub use coach::{Coach, CoachReply, NudgeReply, ASK_FALLBACK, EXPLAIN_FALLBACK, NUDGE_FALLBACK};
pub use error::{Error, Result};
pub use models::{
    DecisionTier, EvaluatedContext, NudgeTrigger, SpendingContext, UserSpendingSnapshot,
};
pub use policy::evaluate_spend;
pub use prompts::{Prompt, PromptId, PromptInfo, PromptLibrary};
pub use triggers::detect_trigger;
