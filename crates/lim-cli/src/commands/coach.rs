//! AI coach command implementations (explain, ask, nudge)

use anyhow::Result;
use tracing::warn;

use lim_core::{AIClient, Coach, MockBackend, SpendingContext, UserSpendingSnapshot};

use super::core::resolve_weekday;

/// Build a coach from the environment.
///
/// Without a configured backend the coach still evaluates deterministically;
/// every generated message degrades to its fallback line, same as the server
/// behaves when the provider is unreachable.
fn make_coach() -> Coach {
    match Coach::from_env() {
        Some(coach) => coach,
        None => {
            warn!("No AI backend configured (set GEMINI_API_KEY or OLLAMA_HOST); coach replies will use fallback text");
            Coach::new(AIClient::Mock(MockBackend::unhealthy()))
        }
    }
}

/// Evaluate a spend attempt and print the coach's explanation
pub async fn cmd_explain(limit: f64, spent: f64, attempt: f64) -> Result<()> {
    let context = SpendingContext {
        today_limit: limit,
        spent_today: spent,
        attempted_spend: attempt,
    };

    let reply = make_coach().explain_spend(&context).await?;

    println!("Decision: {}", reply.decision);
    println!("Impact:   {}", reply.impact);
    println!();
    println!("{}", reply.message);

    Ok(())
}

/// Ask the coach a free-text question
pub async fn cmd_ask(query: &str, limit: f64, spent: f64) -> Result<()> {
    let context = serde_json::json!({
        "today_limit": limit,
        "spent_today": spent,
    });

    let answer = make_coach().answer_question(query, &context).await;
    println!("{}", answer);

    Ok(())
}

/// Generate a proactive nudge for a spending snapshot
pub async fn cmd_nudge(limit: f64, spent: f64, breaches: u32, day: Option<&str>) -> Result<()> {
    let weekday = resolve_weekday(day)?;

    let snapshot = UserSpendingSnapshot {
        spent_today: spent,
        today_limit: limit,
        recent_breaches: breaches,
    };

    let reply = make_coach().nudge(&snapshot, weekday).await?;

    match reply.trigger {
        Some(trigger) => println!("Trigger: {}", trigger),
        None => println!("Trigger: none"),
    }
    println!("{}", reply.message);

    Ok(())
}
