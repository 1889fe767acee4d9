//! LIM CLI - Spending guardrails and AI coach for students
//!
//! Usage:
//!   lim evaluate --limit 100 --spent 90 --attempt 20   Classify a spend attempt
//!   lim triggers --limit 100 --spent 85                Check nudge triggers
//!   lim explain --limit 100 --spent 90 --attempt 20    Evaluate + AI explanation
//!   lim serve --port 3000                              Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Evaluate {
            limit,
            spent,
            attempt,
            json,
        } => commands::cmd_evaluate(limit, spent, attempt, json),
        Commands::Triggers {
            limit,
            spent,
            breaches,
            day,
        } => commands::cmd_triggers(limit, spent, breaches, day.as_deref()),
        Commands::Explain {
            limit,
            spent,
            attempt,
        } => commands::cmd_explain(limit, spent, attempt).await,
        Commands::Ask {
            query,
            limit,
            spent,
        } => commands::cmd_ask(&query, limit, spent).await,
        Commands::Nudge {
            limit,
            spent,
            breaches,
            day,
        } => commands::cmd_nudge(limit, spent, breaches, day.as_deref()).await,
        Commands::Serve {
            port,
            host,
            origins,
        } => commands::cmd_serve(&host, port, origins.as_deref()).await,
        Commands::Prompts { action } => match action {
            None | Some(PromptsAction::List) => commands::cmd_prompts_list(),
            Some(PromptsAction::Show { prompt_id }) => commands::cmd_prompts_show(&prompt_id),
            Some(PromptsAction::Path) => commands::cmd_prompts_path(),
        },
    }
}
