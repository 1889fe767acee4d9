//! Server command implementation

use anyhow::Result;
use tracing::warn;

use lim_core::{AIBackend, AIClient, Coach, MockBackend};
use lim_server::ServerConfig;

pub async fn cmd_serve(host: &str, port: u16, origins: Option<&str>) -> Result<()> {
    println!("Starting LIM web server...");
    println!("   Listening: http://{}:{}", host, port);

    let allowed_origins: Vec<String> = origins
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if allowed_origins.is_empty() {
        println!("   CORS: any origin");
    } else {
        println!("   CORS: {}", allowed_origins.join(", "));
    }

    let coach = match Coach::from_env() {
        Some(coach) => {
            println!(
                "   AI backend: {} (model: {})",
                coach.client().host(),
                coach.client().model()
            );
            coach
        }
        None => {
            warn!("No AI backend configured (set GEMINI_API_KEY or OLLAMA_HOST)");
            println!("   AI backend: none - coach replies will use fallback text");
            Coach::new(AIClient::Mock(MockBackend::unhealthy()))
        }
    };

    let config = ServerConfig { allowed_origins };

    lim_server::serve(coach, host, port, config).await
}
