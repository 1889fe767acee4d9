//! Prompts-related command implementations

use anyhow::Result;

use lim_core::prompts::{default_prompts_dir, PromptId, PromptLibrary};

/// List all available prompts and their override status
pub fn cmd_prompts_list() -> Result<()> {
    let mut library = PromptLibrary::new();
    let prompts = library.list();

    println!("Available Prompts:\n");

    println!("{:<25} {:>7}  {}", "ID", "VERSION", "OVERRIDE");
    println!("{}", "-".repeat(50));

    for info in prompts {
        let override_status = if info.has_override {
            "✓ Custom"
        } else {
            "Default"
        };

        println!("{:<25} {:>7}  {}", info.id, info.version, override_status);
    }

    println!();
    println!(
        "Override directory: {}",
        default_prompts_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not available)".to_string())
    );

    println!();
    println!("To customize a prompt:");
    println!("  1. Copy the default to the override directory");
    println!("  2. Edit the file with your changes");
    println!("  3. Restart the server to use the new prompt");

    Ok(())
}

/// Show the content of a specific prompt
pub fn cmd_prompts_show(prompt_id: &str) -> Result<()> {
    let mut library = PromptLibrary::new();

    let id = PromptId::all()
        .iter()
        .copied()
        .find(|id| id.as_str() == prompt_id)
        .ok_or_else(|| {
            let known: Vec<&str> = PromptId::all().iter().map(|id| id.as_str()).collect();
            anyhow::anyhow!("Unknown prompt: {} (known: {})", prompt_id, known.join(", "))
        })?;

    let prompt = library.get(id)?;

    if prompt.is_override {
        println!(
            "Source: override ({})",
            prompt
                .override_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        );
    } else {
        println!("Source: embedded default");
    }
    println!("Version: {}", prompt.metadata.version);
    println!();
    println!("{}", prompt.content);

    Ok(())
}

/// Print the prompt override directory path
pub fn cmd_prompts_path() -> Result<()> {
    match default_prompts_dir() {
        Some(path) => println!("{}", path.display()),
        None => println!("(no data directory available on this platform)"),
    }
    Ok(())
}
