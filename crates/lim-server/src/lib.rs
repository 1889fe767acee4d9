//! LIM Web Server
//!
//! Axum-based REST API wrapping the coach. Three endpoints mirror the
//! front end's needs: evaluate-and-explain a spend attempt, answer a
//! free-text question, and produce a proactive nudge.
//!
//! Error responses are sanitized: validation problems come back as 400 with
//! a short reason, everything else is a generic 500 with the detail only
//! logged. Backend outages never surface here at all; the coach converts
//! them to fixed fallback text.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use lim_core::ai::AIBackend;
use lim_core::Coach;

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = allow any origin; the API is consumed
    /// directly from the browser)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub coach: Coach,
}

/// Create the application router
pub fn create_router(coach: Coach, config: ServerConfig) -> Router {
    let state = Arc::new(AppState { coach });

    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .route("/", get(handlers::health))
        .route("/lim-ai/explain", post(handlers::explain))
        .route("/lim-ai/ask", post(handlers::ask))
        .route("/lim-ai/nudge", post(handlers::nudge))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(coach: Coach, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    check_ai_connection(&coach).await;

    let app = create_router(coach, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection(coach: &Coach) {
    let client = coach.client();
    if client.health_check().await {
        info!(
            "AI backend connected: {} (model: {})",
            client.host(),
            client.model()
        );
    } else {
        warn!(
            "AI backend not responding: {} (model: {}) - coach replies will use fallback text",
            client.host(),
            client.model()
        );
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<lim_core::Error> for AppError {
    fn from(err: lim_core::Error) -> Self {
        match err {
            // Degenerate caller input: surface the reason
            lim_core::Error::InvalidContext(msg) => Self {
                status: StatusCode::BAD_REQUEST,
                message: msg,
                internal: None,
            },
            // Everything else: generic message, detail only logged
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error occurred".to_string(),
                internal: Some(other.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests;
