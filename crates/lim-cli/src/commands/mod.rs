//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Deterministic commands (evaluate, triggers) and shared utilities
//! - `coach` - AI coach commands (explain, ask, nudge)
//! - `prompts` - Prompt library management commands
//! - `serve` - Web server command

pub mod coach;
pub mod core;
pub mod prompts;
pub mod serve;

// Re-export command functions for main.rs
pub use coach::*;
pub use core::*;
pub use prompts::*;
pub use serve::*;
