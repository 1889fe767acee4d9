//! Deterministic command implementations (evaluate, triggers)

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, Weekday};

use lim_core::{detect_trigger, evaluate_spend, SpendingContext, UserSpendingSnapshot};

/// Resolve an optional day-of-week argument, defaulting to today
pub fn resolve_weekday(day: Option<&str>) -> Result<Weekday> {
    match day {
        Some(s) => s
            .parse::<Weekday>()
            .map_err(|_| anyhow!("Invalid day of week: {} (use mon..sun)", s)),
        None => Ok(Local::now().weekday()),
    }
}

/// Evaluate a spend attempt and print the decision
pub fn cmd_evaluate(limit: f64, spent: f64, attempt: f64, json: bool) -> Result<()> {
    let context = SpendingContext {
        today_limit: limit,
        spent_today: spent,
        attempted_spend: attempt,
    };

    let evaluated = evaluate_spend(&context)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluated)?);
        return Ok(());
    }

    println!("Decision: {}", evaluated.decision);
    println!("Impact:   {}", evaluated.impact);
    println!();
    println!(
        "  Limit ₹{:.2}  spent ₹{:.2}  attempting ₹{:.2}  total after ₹{:.2}",
        evaluated.today_limit,
        evaluated.spent_today,
        evaluated.attempted_spend,
        evaluated.spent_today + evaluated.attempted_spend
    );

    Ok(())
}

/// Run the nudge trigger detector and print the result
pub fn cmd_triggers(limit: f64, spent: f64, breaches: u32, day: Option<&str>) -> Result<()> {
    let weekday = resolve_weekday(day)?;

    let snapshot = UserSpendingSnapshot {
        spent_today: spent,
        today_limit: limit,
        recent_breaches: breaches,
    };

    match detect_trigger(&snapshot, weekday)? {
        Some(trigger) => println!("Trigger ({}): {}", weekday, trigger),
        None => println!("Trigger ({}): none", weekday),
    }

    Ok(())
}
