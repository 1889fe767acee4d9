//! Deterministic spend-decision policy
//!
//! Pure classifier over four ordered severity tiers. The AI coach only ever
//! explains the outcome; approval and blocking are decided here.

use crate::error::{Error, Result};
use crate::models::{DecisionTier, EvaluatedContext, SpendingContext};

/// Fraction of the daily limit above which overspending is hard-blocked
const BLOCK_OVERAGE_RATIO: f64 = 0.5;

/// Fraction of the daily limit at which a warning starts
const WARN_RATIO: f64 = 0.8;

/// Classify a prospective spend against today's limit.
///
/// Thresholds are strict: spending exactly at the limit yields `Warn`
/// (not a block) and spending at exactly 80% of the limit yields `Allow`.
/// Equality always falls to the lower-severity tier.
///
/// A non-positive or non-finite `today_limit` makes the percentage math
/// meaningless, so it is rejected with [`Error::InvalidContext`] instead of
/// letting NaN propagate into a decision.
pub fn evaluate_spend(context: &SpendingContext) -> Result<EvaluatedContext> {
    validate_context(context)?;

    let total_after_spend = context.spent_today + context.attempted_spend;

    let (decision, impact) = if total_after_spend > context.today_limit {
        let overage = total_after_spend - context.today_limit;

        if overage > context.today_limit * BLOCK_OVERAGE_RATIO {
            (
                DecisionTier::Block,
                "Budget severely exceeded. Transaction prohibited to protect your monthly goal."
                    .to_string(),
            )
        } else {
            (
                DecisionTier::SoftBlock,
                format!(
                    "Overage of ₹{:.2} detected. Next 2 days limit will be reduced to compensate.",
                    overage
                ),
            )
        }
    } else if total_after_spend > context.today_limit * WARN_RATIO {
        (
            DecisionTier::Warn,
            "Approaching daily limit. Stay mindful!".to_string(),
        )
    } else {
        (DecisionTier::Allow, "Normal spending".to_string())
    };

    Ok(EvaluatedContext {
        today_limit: context.today_limit,
        spent_today: context.spent_today,
        attempted_spend: context.attempted_spend,
        decision,
        impact,
    })
}

/// Reject contexts the percentage math cannot handle
fn validate_context(context: &SpendingContext) -> Result<()> {
    if !context.today_limit.is_finite() || context.today_limit <= 0.0 {
        return Err(Error::InvalidContext(format!(
            "today_limit must be a positive amount, got {}",
            context.today_limit
        )));
    }
    if !context.spent_today.is_finite() || context.spent_today < 0.0 {
        return Err(Error::InvalidContext(format!(
            "spent_today must be a non-negative amount, got {}",
            context.spent_today
        )));
    }
    if !context.attempted_spend.is_finite() || context.attempted_spend < 0.0 {
        return Err(Error::InvalidContext(format!(
            "attempted_spend must be a non-negative amount, got {}",
            context.attempted_spend
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(limit: f64, spent: f64, attempt: f64) -> SpendingContext {
        SpendingContext {
            today_limit: limit,
            spent_today: spent,
            attempted_spend: attempt,
        }
    }

    #[test]
    fn test_normal_spending_allows() {
        let result = evaluate_spend(&ctx(100.0, 10.0, 20.0)).unwrap();
        assert_eq!(result.decision, DecisionTier::Allow);
        assert_eq!(result.impact, "Normal spending");
    }

    #[test]
    fn test_approaching_limit_warns() {
        let result = evaluate_spend(&ctx(100.0, 50.0, 35.0)).unwrap();
        assert_eq!(result.decision, DecisionTier::Warn);
        assert!(result.impact.contains("Approaching"));
    }

    #[test]
    fn test_exactly_at_limit_warns_not_blocks() {
        // total == limit is not over the limit; strict comparison
        let result = evaluate_spend(&ctx(100.0, 0.0, 100.0)).unwrap();
        assert_eq!(result.decision, DecisionTier::Warn);
    }

    #[test]
    fn test_exactly_at_eighty_percent_allows() {
        let result = evaluate_spend(&ctx(100.0, 0.0, 80.0)).unwrap();
        assert_eq!(result.decision, DecisionTier::Allow);
    }

    #[test]
    fn test_severe_overage_blocks() {
        // total 160, overage 60 > 50% of limit
        let result = evaluate_spend(&ctx(100.0, 90.0, 70.0)).unwrap();
        assert_eq!(result.decision, DecisionTier::Block);
        assert!(result.impact.contains("severely exceeded"));
    }

    #[test]
    fn test_moderate_overage_soft_blocks_with_formatted_amount() {
        // total 110, overage 10 <= 50% of limit
        let result = evaluate_spend(&ctx(100.0, 90.0, 20.0)).unwrap();
        assert_eq!(result.decision, DecisionTier::SoftBlock);
        assert!(result.impact.contains("10.00"), "impact: {}", result.impact);
        assert!(result.impact.contains("Next 2 days"));
    }

    #[test]
    fn test_overage_at_exactly_half_limit_soft_blocks() {
        // overage 50 == 50% of limit falls to the lower tier
        let result = evaluate_spend(&ctx(100.0, 100.0, 50.0)).unwrap();
        assert_eq!(result.decision, DecisionTier::SoftBlock);
    }

    #[test]
    fn test_tier_monotone_in_attempted_spend() {
        let mut last = DecisionTier::Allow;
        for attempt in 0..400 {
            let result = evaluate_spend(&ctx(100.0, 30.0, attempt as f64)).unwrap();
            assert!(
                result.decision >= last,
                "severity dropped from {} to {} at attempt {}",
                last,
                result.decision,
                attempt
            );
            last = result.decision;
        }
        assert_eq!(last, DecisionTier::Block);
    }

    #[test]
    fn test_idempotent() {
        let input = ctx(250.0, 180.0, 90.0);
        let a = evaluate_spend(&input).unwrap();
        let b = evaluate_spend(&input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = evaluate_spend(&ctx(0.0, 10.0, 10.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidContext(_)));
    }

    #[test]
    fn test_negative_limit_rejected() {
        assert!(evaluate_spend(&ctx(-50.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_nan_fields_rejected() {
        assert!(evaluate_spend(&ctx(f64::NAN, 0.0, 0.0)).is_err());
        assert!(evaluate_spend(&ctx(100.0, f64::NAN, 0.0)).is_err());
        assert!(evaluate_spend(&ctx(100.0, 0.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_zero_spend_on_fresh_day_allows() {
        let result = evaluate_spend(&ctx(100.0, 0.0, 0.0)).unwrap();
        assert_eq!(result.decision, DecisionTier::Allow);
    }
}
