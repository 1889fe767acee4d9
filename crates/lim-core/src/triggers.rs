//! Proactive nudge trigger detection
//!
//! At most one trigger fires per pass, in priority order. The current day of
//! week is an explicit parameter so the weekend rule stays testable without
//! touching the system clock; callers inject `Local::now().weekday()` at the
//! edge.

use chrono::Weekday;

use crate::error::{Error, Result};
use crate::models::{NudgeTrigger, UserSpendingSnapshot};

/// Usage percentage at which the limit-approaching nudge fires
const LIMIT_APPROACHING_PERCENT: f64 = 80.0;

/// Usage percentage above which weekend spending is called out
const WEEKEND_PATTERN_PERCENT: f64 = 50.0;

/// Breach count above which the repetitive-breaches nudge fires
const REPETITIVE_BREACH_COUNT: u32 = 2;

/// Decide whether to fire a nudge for the given snapshot.
///
/// Rules short-circuit: a snapshot at 90% usage with five recent breaches
/// reports `LimitApproaching`, never `RepetitiveBreaches`. Note the first
/// rule is inclusive (`>= 80`) while the weekend rule is strict (`> 50`).
pub fn detect_trigger(
    snapshot: &UserSpendingSnapshot,
    weekday: Weekday,
) -> Result<Option<NudgeTrigger>> {
    validate_snapshot(snapshot)?;

    let usage_percent = (snapshot.spent_today / snapshot.today_limit) * 100.0;

    if usage_percent >= LIMIT_APPROACHING_PERCENT {
        return Ok(Some(NudgeTrigger::LimitApproaching));
    }

    if snapshot.recent_breaches > REPETITIVE_BREACH_COUNT {
        return Ok(Some(NudgeTrigger::RepetitiveBreaches));
    }

    if is_weekend(weekday) && usage_percent > WEEKEND_PATTERN_PERCENT {
        return Ok(Some(NudgeTrigger::WeekendSpendingPattern));
    }

    Ok(None)
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Reject snapshots that would divide by zero or produce NaN percentages
fn validate_snapshot(snapshot: &UserSpendingSnapshot) -> Result<()> {
    if !snapshot.today_limit.is_finite() || snapshot.today_limit <= 0.0 {
        return Err(Error::InvalidContext(format!(
            "today_limit must be a positive amount, got {}",
            snapshot.today_limit
        )));
    }
    if !snapshot.spent_today.is_finite() || snapshot.spent_today < 0.0 {
        return Err(Error::InvalidContext(format!(
            "spent_today must be a non-negative amount, got {}",
            snapshot.spent_today
        )));
    }
    Ok(())
}
