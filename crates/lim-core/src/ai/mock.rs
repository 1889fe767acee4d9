//! Mock backend for testing
//!
//! Returns deterministic canned text for all tasks. The unhealthy variant
//! fails every call, which is how the coach's fallback substitution is
//! exercised in tests.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::EvaluatedContext;

use super::AIBackend;

/// Mock AI backend for testing
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether calls should succeed
    pub healthy: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create a mock backend whose every call fails
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }

    fn check(&self) -> Result<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(Error::Backend("mock backend is unavailable".into()))
        }
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn explain_decision(&self, context: &EvaluatedContext) -> Result<String> {
        self.check()?;
        Ok(format!(
            "Your spend attempt came out as {}: {} You have ₹{:.2} of today's ₹{:.2} limit used.",
            context.decision, context.impact, context.spent_today, context.today_limit
        ))
    }

    async fn answer_question(&self, query: &str, _context: &serde_json::Value) -> Result<String> {
        self.check()?;
        Ok(format!(
            "Here's a thought on \"{}\": check how much of today's limit is left before deciding.",
            query
        ))
    }

    async fn generate_nudge(&self, context: &serde_json::Value) -> Result<String> {
        self.check()?;
        let trigger = context
            .get("trigger")
            .and_then(|t| t.as_str())
            .unwrap_or("NONE");
        Ok(format!(
            "Quick check-in ({}): a small pause now keeps your week on track.",
            trigger
        ))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
