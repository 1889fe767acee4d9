//! Domain types shared across the decision policy, trigger detector and coach

use serde::{Deserialize, Serialize};

/// Snapshot of today's spending handed in by the caller for one evaluation.
///
/// Ephemeral by design: constructed per call, never persisted. `spent_today`
/// and `attempted_spend` default to zero when the caller omits them;
/// `today_limit` is required and validated by the policy before any
/// percentage math runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingContext {
    /// Permitted spend for the current day (currency units)
    pub today_limit: f64,
    /// Amount already spent today
    #[serde(default)]
    pub spent_today: f64,
    /// Amount of the prospective new transaction
    #[serde(default)]
    pub attempted_spend: f64,
}

/// Ordered severity classification of a spend attempt.
///
/// The derived ordering is load-bearing: `Allow < Warn < SoftBlock < Block`,
/// and the tier is monotone non-decreasing in the attempted amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionTier {
    Allow,
    Warn,
    SoftBlock,
    Block,
}

impl DecisionTier {
    /// Wire/display form (`ALLOW`, `WARN`, `SOFT_BLOCK`, `BLOCK`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Warn => "WARN",
            Self::SoftBlock => "SOFT_BLOCK",
            Self::Block => "BLOCK",
        }
    }
}

impl std::fmt::Display for DecisionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A [`SpendingContext`] extended with the computed decision and impact line.
///
/// Immutable once produced; a new context is evaluated from scratch rather
/// than mutating an old result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedContext {
    pub today_limit: f64,
    pub spent_today: f64,
    pub attempted_spend: f64,
    pub decision: DecisionTier,
    /// Human-readable sentence describing the consequence of the decision
    pub impact: String,
}

/// Input to the nudge trigger detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSpendingSnapshot {
    /// Amount already spent today
    #[serde(default)]
    pub spent_today: f64,
    /// Permitted spend for the current day
    pub today_limit: f64,
    /// Count of prior days where the limit was exceeded
    #[serde(default)]
    pub recent_breaches: u32,
}

/// Proactive nudge category, at most one per detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NudgeTrigger {
    LimitApproaching,
    RepetitiveBreaches,
    WeekendSpendingPattern,
}

impl NudgeTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LimitApproaching => "LIMIT_APPROACHING",
            Self::RepetitiveBreaches => "REPETITIVE_BREACHES",
            Self::WeekendSpendingPattern => "WEEKEND_SPENDING_PATTERN",
        }
    }
}

impl std::fmt::Display for NudgeTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(DecisionTier::Allow < DecisionTier::Warn);
        assert!(DecisionTier::Warn < DecisionTier::SoftBlock);
        assert!(DecisionTier::SoftBlock < DecisionTier::Block);
    }

    #[test]
    fn test_tier_wire_format() {
        let json = serde_json::to_string(&DecisionTier::SoftBlock).unwrap();
        assert_eq!(json, "\"SOFT_BLOCK\"");
        let tier: DecisionTier = serde_json::from_str("\"BLOCK\"").unwrap();
        assert_eq!(tier, DecisionTier::Block);
    }

    #[test]
    fn test_context_optional_fields_default_to_zero() {
        let ctx: SpendingContext = serde_json::from_str(r#"{"today_limit": 500}"#).unwrap();
        assert_eq!(ctx.spent_today, 0.0);
        assert_eq!(ctx.attempted_spend, 0.0);
    }

    #[test]
    fn test_trigger_wire_format() {
        let json = serde_json::to_string(&NudgeTrigger::WeekendSpendingPattern).unwrap();
        assert_eq!(json, "\"WEEKEND_SPENDING_PATTERN\"");
    }
}
