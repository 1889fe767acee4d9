//! Prompt library for the AI coach
//!
//! Prompts are loaded with a two-layer resolution:
//! 1. Check for override in the data dir (~/.local/share/lim/prompts/overrides/)
//! 2. Fall back to embedded defaults (compiled into the binary)
//!
//! This allows users to tune the mentor's voice without modifying the source,
//! while automatically getting new default prompts on upgrade.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default prompts (compiled into binary)
mod defaults {
    pub const MENTOR_SYSTEM: &str = include_str!("../../../prompts/mentor_system.md");
    pub const EXPLAIN_DECISION: &str = include_str!("../../../prompts/explain_decision.md");
    pub const ASK_QUESTION: &str = include_str!("../../../prompts/ask_question.md");
    pub const GENERATE_NUDGE: &str = include_str!("../../../prompts/generate_nudge.md");
}

/// Known prompt IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    /// Immutable mentor persona prepended to every request
    MentorSystem,
    /// Explain an evaluated spend decision
    ExplainDecision,
    /// Answer a free-text user question with context
    AskQuestion,
    /// Produce a short unsolicited nudge
    GenerateNudge,
}

impl PromptId {
    /// Get the string identifier for this prompt
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MentorSystem => "mentor_system",
            Self::ExplainDecision => "explain_decision",
            Self::AskQuestion => "ask_question",
            Self::GenerateNudge => "generate_nudge",
        }
    }

    /// Get all known prompt IDs
    pub fn all() -> &'static [PromptId] {
        &[
            Self::MentorSystem,
            Self::ExplainDecision,
            Self::AskQuestion,
            Self::GenerateNudge,
        ]
    }

    /// Get the default embedded content for this prompt
    fn default_content(&self) -> &'static str {
        match self {
            Self::MentorSystem => defaults::MENTOR_SYSTEM,
            Self::ExplainDecision => defaults::EXPLAIN_DECISION,
            Self::AskQuestion => defaults::ASK_QUESTION,
            Self::GenerateNudge => defaults::GENERATE_NUDGE,
        }
    }
}

/// Prompt frontmatter metadata
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMetadata {
    /// Unique identifier
    pub id: String,
    /// Version number for tracking changes
    pub version: u32,
}

/// A loaded prompt with metadata and content
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Metadata from frontmatter
    pub metadata: PromptMetadata,
    /// The prompt content (system or user section)
    pub content: String,
    /// Whether this came from an override file
    pub is_override: bool,
    /// Path to override file (if any)
    pub override_path: Option<PathBuf>,
}

impl Prompt {
    /// Get the system section of the prompt
    pub fn system_section(&self) -> Option<&str> {
        extract_section(&self.content, "# System")
    }

    /// Get the user section of the prompt
    pub fn user_section(&self) -> Option<&str> {
        extract_section(&self.content, "# User")
    }

    /// Render the prompt with `{{var}}` template variables replaced
    pub fn render(&self, vars: &HashMap<&str, &str>) -> String {
        render_vars(&self.content, vars)
    }

    /// Render just the user section with variables
    pub fn render_user(&self, vars: &HashMap<&str, &str>) -> String {
        match self.user_section() {
            Some(user) => render_vars(user, vars),
            None => self.render(vars),
        }
    }
}

fn render_vars(template: &str, vars: &HashMap<&str, &str>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let pattern = format!("{{{{{}}}}}", key);
        result = result.replace(&pattern, value);
    }
    result
}

/// Prompt library for loading and caching prompts
pub struct PromptLibrary {
    /// Override directory path
    override_dir: Option<PathBuf>,
    /// Cached parsed prompts
    cache: HashMap<PromptId, Prompt>,
}

impl PromptLibrary {
    /// Create a new prompt library with default paths
    pub fn new() -> Self {
        Self {
            override_dir: default_prompts_dir(),
            cache: HashMap::new(),
        }
    }

    /// Create a prompt library with a custom override directory
    pub fn with_override_dir(path: PathBuf) -> Self {
        Self {
            override_dir: Some(path),
            cache: HashMap::new(),
        }
    }

    /// Create a prompt library with no override directory (embedded only)
    pub fn embedded_only() -> Self {
        Self {
            override_dir: None,
            cache: HashMap::new(),
        }
    }

    /// Get a prompt by ID, loading from override or default
    pub fn get(&mut self, id: PromptId) -> Result<&Prompt> {
        if !self.cache.contains_key(&id) {
            let prompt = self.load(id)?;
            self.cache.insert(id, prompt);
        }
        Ok(self.cache.get(&id).unwrap())
    }

    /// Load a prompt (checking override first, then default)
    fn load(&self, id: PromptId) -> Result<Prompt> {
        if let Some(ref override_dir) = self.override_dir {
            let override_path = override_dir.join(format!("{}.md", id.as_str()));
            if override_path.exists() {
                let content = fs::read_to_string(&override_path).map_err(|e| {
                    Error::InvalidData(format!("Failed to read prompt override: {}", e))
                })?;
                let (metadata, body) = parse_prompt(&content)?;
                return Ok(Prompt {
                    metadata,
                    content: body,
                    is_override: true,
                    override_path: Some(override_path),
                });
            }
        }

        let content = id.default_content();
        let (metadata, body) = parse_prompt(content)?;
        Ok(Prompt {
            metadata,
            content: body,
            is_override: false,
            override_path: None,
        })
    }

    /// List all prompts with their override status
    pub fn list(&mut self) -> Vec<PromptInfo> {
        PromptId::all()
            .iter()
            .map(|&id| {
                let has_override = self.has_override(id);
                let prompt = self.get(id).ok();
                PromptInfo {
                    id: id.as_str().to_string(),
                    version: prompt.map(|p| p.metadata.version).unwrap_or(0),
                    has_override,
                    override_path: if has_override {
                        self.override_dir
                            .as_ref()
                            .map(|d| d.join(format!("{}.md", id.as_str())))
                    } else {
                        None
                    },
                }
            })
            .collect()
    }

    /// Check if a prompt has an override file
    pub fn has_override(&self, id: PromptId) -> bool {
        match self.override_dir {
            Some(ref dir) => dir.join(format!("{}.md", id.as_str())).exists(),
            None => false,
        }
    }

    /// Get the override directory path
    pub fn override_dir(&self) -> Option<&PathBuf> {
        self.override_dir.as_ref()
    }

    /// Clear the cache (useful after editing override files)
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Information about a prompt for listing
#[derive(Debug, Clone)]
pub struct PromptInfo {
    /// Prompt identifier
    pub id: String,
    /// Version from metadata
    pub version: u32,
    /// Whether an override exists
    pub has_override: bool,
    /// Path to override file (if exists)
    pub override_path: Option<PathBuf>,
}

/// Default prompts override directory
pub fn default_prompts_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("lim").join("prompts").join("overrides"))
}

/// Parse a prompt file into metadata and body
fn parse_prompt(content: &str) -> Result<(PromptMetadata, String)> {
    let content = content.trim();

    if !content.starts_with("---") {
        return Err(Error::InvalidData(
            "Prompt must start with YAML frontmatter (---)".into(),
        ));
    }

    let rest = &content[3..];
    let end = rest.find("---").ok_or_else(|| {
        Error::InvalidData("Prompt frontmatter not closed (missing second ---)".into())
    })?;

    let frontmatter = &rest[..end].trim();
    let body = &rest[end + 3..].trim();

    let metadata: PromptMetadata = serde_yaml::from_str(frontmatter)
        .map_err(|e| Error::InvalidData(format!("Invalid prompt frontmatter: {}", e)))?;

    Ok((metadata, body.to_string()))
}

/// Extract a section from the prompt content
fn extract_section<'a>(content: &'a str, header: &str) -> Option<&'a str> {
    let start = content.find(header)?;
    let after_header = &content[start + header.len()..];

    // Find the next header or end of content
    let end = after_header.find("\n# ").unwrap_or(after_header.len());

    Some(after_header[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prompt() {
        let content = r#"---
id: test_prompt
version: 3
---

# User
Explain {{thing}} to the user.
"#;

        let (metadata, body) = parse_prompt(content).unwrap();
        assert_eq!(metadata.id, "test_prompt");
        assert_eq!(metadata.version, 3);
        assert!(body.contains("# User"));
    }

    #[test]
    fn test_parse_prompt_missing_frontmatter() {
        assert!(parse_prompt("# User\nno frontmatter").is_err());
    }

    #[test]
    fn test_embedded_defaults_all_parse() {
        let mut lib = PromptLibrary::embedded_only();
        for &id in PromptId::all() {
            let prompt = lib.get(id).unwrap();
            assert_eq!(prompt.metadata.id, id.as_str());
            assert!(!prompt.is_override);
        }
    }

    #[test]
    fn test_mentor_system_has_system_section() {
        let mut lib = PromptLibrary::embedded_only();
        let prompt = lib.get(PromptId::MentorSystem).unwrap();
        let system = prompt.system_section().unwrap();
        assert!(system.contains("financial mentor"));
        assert!(system.contains("80 words"));
    }

    #[test]
    fn test_render_user_substitutes_vars() {
        let mut lib = PromptLibrary::embedded_only();
        let prompt = lib.get(PromptId::AskQuestion).unwrap();
        let mut vars = HashMap::new();
        vars.insert("query", "can I afford pizza?");
        vars.insert("context", r#"{"today_limit":100}"#);
        let rendered = prompt.render_user(&vars);
        assert!(rendered.contains("can I afford pizza?"));
        assert!(rendered.contains(r#"{"today_limit":100}"#));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_override_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let override_content = r#"---
id: generate_nudge
version: 2
---

# User
Custom nudge for {{context}}.
"#;
        fs::write(dir.path().join("generate_nudge.md"), override_content).unwrap();

        let mut lib = PromptLibrary::with_override_dir(dir.path().to_path_buf());
        let prompt = lib.get(PromptId::GenerateNudge).unwrap();
        assert!(prompt.is_override);
        assert_eq!(prompt.metadata.version, 2);
        assert!(prompt.content.contains("Custom nudge"));

        // Other prompts still come from the embedded defaults
        assert!(!lib.has_override(PromptId::MentorSystem));
    }
}
