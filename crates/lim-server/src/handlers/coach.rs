//! Coach endpoint handlers
//!
//! Bodies arrive as raw JSON so missing sections produce a 400 with a
//! usable reason ("Context is required") instead of the framework's 422,
//! and so the permissive field defaults stay at the serde boundary.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{Datelike, Local, Weekday};
use serde_json::Value;

use lim_core::{CoachReply, NudgeReply, SpendingContext, UserSpendingSnapshot};

use crate::{AppError, AppState};

/// Health check
pub async fn health() -> &'static str {
    "LIM AI backend is running"
}

/// Evaluate a spend attempt and explain the decision
///
/// Body: `{ "context": {...}, "attempted_spend": 50.0 }`. An
/// `attempted_spend` at the top level overrides the one inside the context,
/// defaulting to 0 when absent in both.
pub async fn explain(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<CoachReply>, AppError> {
    let context_value = body
        .get("context")
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::bad_request("Context is required"))?;

    let mut context: SpendingContext = serde_json::from_value(context_value.clone())
        .map_err(|e| AppError::bad_request(&format!("Invalid context: {}", e)))?;

    if let Some(attempted) = body.get("attempted_spend").and_then(Value::as_f64) {
        context.attempted_spend = attempted;
    }

    let reply = state.coach.explain_spend(&context).await?;
    Ok(Json(reply))
}

/// Answer a free-text question against the caller's financial context
///
/// Body: `{ "query": "...", "context": {...} }`.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let query = body
        .get("query")
        .and_then(Value::as_str)
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Query and Context are required"))?;

    let context = body
        .get("context")
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::bad_request("Query and Context are required"))?;

    let message = state.coach.answer_question(query, context).await;
    Ok(Json(serde_json::json!({ "message": message })))
}

/// Generate a proactive nudge for the caller's spending snapshot
///
/// Body: `{ "context": {...}, "day_of_week": "sat" }`. The day of week is
/// optional and defaults to the server's local day; accepting it as input
/// keeps the weekend rule reachable from any client clock.
pub async fn nudge(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<NudgeReply>, AppError> {
    let context_value = body
        .get("context")
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::bad_request("Context is required"))?;

    let snapshot: UserSpendingSnapshot = serde_json::from_value(context_value.clone())
        .map_err(|e| AppError::bad_request(&format!("Invalid context: {}", e)))?;

    let weekday = match body.get("day_of_week").and_then(Value::as_str) {
        Some(day) => day
            .parse::<Weekday>()
            .map_err(|_| AppError::bad_request(&format!("Invalid day_of_week: {}", day)))?,
        None => Local::now().weekday(),
    };

    let reply = state.coach.nudge(&snapshot, weekday).await?;
    Ok(Json(reply))
}
