//! Coach orchestration: evaluate first, then explain
//!
//! The coach owns the boundary between the deterministic core and the
//! text-generation backend. Decisions are always computed locally; the
//! backend only supplies prose, and any backend failure is swallowed into a
//! fixed fallback line so callers never see a transport error.

use chrono::Weekday;
use serde::Serialize;
use tracing::warn;

use crate::ai::{AIBackend, AIClient};
use crate::error::Result;
use crate::models::{DecisionTier, NudgeTrigger, SpendingContext, UserSpendingSnapshot};
use crate::policy::evaluate_spend;
use crate::triggers::detect_trigger;

/// Fallback when a decision explanation cannot be generated
pub const EXPLAIN_FALLBACK: &str = "Limits are active. Explanation is temporarily unavailable.";

/// Fallback when a question cannot be answered
pub const ASK_FALLBACK: &str =
    "I'm having trouble connecting right now. Please try again in a bit.";

/// Fallback when a nudge cannot be generated
pub const NUDGE_FALLBACK: &str = "Stay disciplined! Small wins today protect your goals.";

/// Reply to a spend-evaluation request
#[derive(Debug, Clone, Serialize)]
pub struct CoachReply {
    /// Mentor-voice explanation (or the fallback line)
    pub message: String,
    /// Deterministic decision computed by the policy
    pub decision: DecisionTier,
    /// Deterministic impact line computed by the policy
    pub impact: String,
}

/// Reply to a nudge request
#[derive(Debug, Clone, Serialize)]
pub struct NudgeReply {
    /// Short nudge text (or the fallback line)
    pub message: String,
    /// Which rule fired, if any
    pub trigger: Option<NudgeTrigger>,
}

/// The AI coach: pairs the decision policy with a text-generation backend
#[derive(Clone)]
pub struct Coach {
    client: AIClient,
}

impl Coach {
    pub fn new(client: AIClient) -> Self {
        Self { client }
    }

    /// Create from environment variables, if a backend is configured
    pub fn from_env() -> Option<Self> {
        AIClient::from_env().map(Self::new)
    }

    pub fn client(&self) -> &AIClient {
        &self.client
    }

    /// Evaluate a spend attempt and explain the outcome.
    ///
    /// Validation errors from the policy propagate (the caller sent a
    /// degenerate context); backend failures do not.
    pub async fn explain_spend(&self, context: &SpendingContext) -> Result<CoachReply> {
        let evaluated = evaluate_spend(context)?;

        let message = match self.client.explain_decision(&evaluated).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, decision = %evaluated.decision, "Explanation backend failed, using fallback");
                EXPLAIN_FALLBACK.to_string()
            }
        };

        Ok(CoachReply {
            message,
            decision: evaluated.decision,
            impact: evaluated.impact,
        })
    }

    /// Answer a free-text question against the caller's financial context
    pub async fn answer_question(&self, query: &str, context: &serde_json::Value) -> String {
        match self.client.answer_question(query, context).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Question backend failed, using fallback");
                ASK_FALLBACK.to_string()
            }
        }
    }

    /// Run the trigger detector and generate a nudge for the snapshot.
    ///
    /// The fired trigger (if any) is folded into the context handed to the
    /// backend so the nudge can reference it.
    pub async fn nudge(
        &self,
        snapshot: &UserSpendingSnapshot,
        weekday: Weekday,
    ) -> Result<NudgeReply> {
        let trigger = detect_trigger(snapshot, weekday)?;

        let context = serde_json::json!({
            "spent_today": snapshot.spent_today,
            "today_limit": snapshot.today_limit,
            "recent_breaches": snapshot.recent_breaches,
            "trigger": trigger.map(|t| t.as_str()),
        });

        let message = match self.client.generate_nudge(&context).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Nudge backend failed, using fallback");
                NUDGE_FALLBACK.to_string()
            }
        };

        Ok(NudgeReply { message, trigger })
    }
}
