//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use clap::{Parser, Subcommand};

/// LIM - Spending guardrails and AI coach for students
#[derive(Parser)]
#[command(name = "lim")]
#[command(about = "Deterministic spending limits with an AI mentor on top", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a spend attempt against today's limit
    Evaluate {
        /// Today's spending limit
        #[arg(short, long)]
        limit: f64,

        /// Amount already spent today
        #[arg(short, long, default_value = "0")]
        spent: f64,

        /// Amount of the prospective transaction
        #[arg(short, long, default_value = "0")]
        attempt: f64,

        /// Output as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Check which proactive nudge trigger (if any) would fire
    Triggers {
        /// Today's spending limit
        #[arg(short, long)]
        limit: f64,

        /// Amount already spent today
        #[arg(short, long, default_value = "0")]
        spent: f64,

        /// Count of recent days where the limit was breached
        #[arg(short, long, default_value = "0")]
        breaches: u32,

        /// Day of week to evaluate (mon..sun; defaults to today)
        #[arg(short, long)]
        day: Option<String>,
    },

    /// Evaluate a spend attempt and ask the AI coach to explain it
    Explain {
        /// Today's spending limit
        #[arg(short, long)]
        limit: f64,

        /// Amount already spent today
        #[arg(short, long, default_value = "0")]
        spent: f64,

        /// Amount of the prospective transaction
        #[arg(short, long, default_value = "0")]
        attempt: f64,
    },

    /// Ask the AI coach a free-text question
    Ask {
        /// The question to ask
        query: String,

        /// Today's spending limit
        #[arg(short, long)]
        limit: f64,

        /// Amount already spent today
        #[arg(short, long, default_value = "0")]
        spent: f64,
    },

    /// Generate a proactive nudge for a spending snapshot
    Nudge {
        /// Today's spending limit
        #[arg(short, long)]
        limit: f64,

        /// Amount already spent today
        #[arg(short, long, default_value = "0")]
        spent: f64,

        /// Count of recent days where the limit was breached
        #[arg(short, long, default_value = "0")]
        breaches: u32,

        /// Day of week to evaluate (mon..sun; defaults to today)
        #[arg(short, long)]
        day: Option<String>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origins (comma-separated; default allows any)
        #[arg(long)]
        origins: Option<String>,
    },

    /// Manage coach prompts
    Prompts {
        #[command(subcommand)]
        action: Option<PromptsAction>,
    },
}

#[derive(Subcommand)]
pub enum PromptsAction {
    /// List all prompts and their override status
    List,

    /// Show the content of a specific prompt
    Show {
        /// Prompt ID (e.g. mentor_system, explain_decision)
        prompt_id: String,
    },

    /// Print the prompt override directory path
    Path,
}
