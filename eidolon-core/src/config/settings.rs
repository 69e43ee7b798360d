//! Settings configuration loaded from TOML files.
//!
//! This module handles non-sensitive configuration stored in TOML format
//! in the XDG config directory (~/.config/eidolon/config.toml).

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# eidolon configuration file
# Located at: ~/.config/eidolon/config.toml
#
# This file contains non-sensitive configuration.
# Secrets (API keys) are loaded from environment variables:
#   - EIDOLON_API_KEY (optional, generative backend)
#   - EIDOLON_EMBEDDING_API_KEY (optional, embedding backend)

[persona]
name = "Marcus Aurelius"
# Inline system prompt, or point prompt_path at a text file instead.
prompt = "You are Marcus Aurelius, Roman emperor and Stoic philosopher. Answer briefly, in his voice."
# prompt_path = "/path/to/persona.txt"

[knowledge]
# JSON file of curated entries with precomputed embeddings
path = "knowledge.json"
# Pin the embedding width; when unset the first entry fixes it.
# dimension = 768

[semantic]
# Minimum cosine similarity for a curated answer to be used
threshold = 0.75

[embedding]
base_url = "http://127.0.0.1:11434"
model = "nomic-embed-text"
timeout_seconds = 10

[generative]
base_url = "http://127.0.0.1:11434/v1"
model = "llama3.1"
timeout_seconds = 40
max_tokens = 512

[logging]
level = "info"
"#;

/// Settings loaded from TOML configuration file.
///
/// These are non-sensitive configuration values that can be safely
/// stored in files and version controlled (excluding secrets).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Persona identity and system prompt
    #[serde(default)]
    pub persona: PersonaSettings,

    /// Knowledge base source
    #[serde(default)]
    pub knowledge: KnowledgeSettings,

    /// Semantic matching configuration
    #[serde(default)]
    pub semantic: SemanticSettings,

    /// Embedding provider configuration
    #[serde(default)]
    pub embedding: EmbeddingSettings,

    /// Generative backend configuration
    #[serde(default)]
    pub generative: GenerativeSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Persona settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PersonaSettings {
    /// Display name for the persona
    #[serde(default = "default_persona_name")]
    pub name: String,

    /// Inline system prompt text
    pub prompt: Option<String>,

    /// Path to a file holding the system prompt (used when `prompt` is unset)
    pub prompt_path: Option<String>,
}

impl PersonaSettings {
    /// Resolve the system prompt: inline text wins, then the prompt file.
    pub fn resolve_prompt(&self) -> Result<String, SettingsError> {
        if let Some(prompt) = &self.prompt
            && !prompt.trim().is_empty()
        {
            return Ok(prompt.clone());
        }

        if let Some(path) = &self.prompt_path {
            return Ok(fs::read_to_string(path)?);
        }

        Err(SettingsError::PersonaPromptNotSet)
    }
}

/// Knowledge base settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KnowledgeSettings {
    /// Path to the knowledge JSON file
    #[serde(default = "default_knowledge_path")]
    pub path: String,

    /// Expected embedding dimensionality (first entry fixes it when unset)
    pub dimension: Option<usize>,
}

/// Semantic matcher settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SemanticSettings {
    /// Minimum cosine similarity for a hit, in (0.0, 1.0]
    #[serde(default = "default_semantic_threshold")]
    pub threshold: f32,
}

/// Embedding provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingSettings {
    /// Embedding provider base URL
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Deadline for a single embedding call, in seconds
    #[serde(default = "default_embedding_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Generative backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerativeSettings {
    /// Chat-completions base URL
    #[serde(default = "default_generative_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_generative_model")]
    pub model: String,

    /// Deadline for a single generation call, in seconds
    #[serde(default = "default_generative_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Maximum tokens requested per generation
    #[serde(default = "default_generative_max_tokens")]
    pub max_tokens: u32,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_persona_name() -> String {
    "Marcus Aurelius".to_string()
}

fn default_knowledge_path() -> String {
    "knowledge.json".to_string()
}

fn default_semantic_threshold() -> f32 {
    0.75
}

fn default_embedding_base_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_embedding_timeout_seconds() -> u64 {
    10
}

fn default_generative_base_url() -> String {
    "http://127.0.0.1:11434/v1".to_string()
}

fn default_generative_model() -> String {
    "llama3.1".to_string()
}

fn default_generative_timeout_seconds() -> u64 {
    40
}

fn default_generative_max_tokens() -> u32 {
    512
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PersonaSettings {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            prompt: None,
            prompt_path: None,
        }
    }
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
            dimension: None,
        }
    }
}

impl Default for SemanticSettings {
    fn default() -> Self {
        Self {
            threshold: default_semantic_threshold(),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            timeout_seconds: default_embedding_timeout_seconds(),
        }
    }
}

impl Default for GenerativeSettings {
    fn default() -> Self {
        Self {
            base_url: default_generative_base_url(),
            model: default_generative_model(),
            timeout_seconds: default_generative_timeout_seconds(),
            max_tokens: default_generative_max_tokens(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("Persona prompt is not configured (set [persona] prompt or prompt_path)")]
    PersonaPromptNotSet,
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    /// The file is located at `~/.config/eidolon/config.toml`.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;

        // Create default config if it doesn't exist
        if !config_path.exists() {
            tracing::info!("Creating default configuration at {:?}", config_path);
            Self::create_default_config(&config_path)?;
        }

        // Read and parse the TOML file
        let content = fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Serialize settings to TOML content.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the configuration file path.
    ///
    /// Uses XDG config directory: `~/.config/eidolon/config.toml`
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(override_dir) = std::env::var("EIDOLON_CONFIG_DIR") {
            let dir = PathBuf::from(override_dir);
            return Ok(dir.join("config.toml"));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("eidolon");

        Ok(config_dir.join("config.toml"))
    }

    /// Create the default configuration file.
    fn create_default_config(path: &PathBuf) -> Result<(), SettingsError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write default TOML config
        fs::write(path, DEFAULT_CONFIG_TOML)?;

        Ok(())
    }

    /// Save settings to the default configuration file path.
    pub fn save(&self) -> Result<(), SettingsError> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save settings to a specific file path.
    pub fn save_to_path(&self, path: &PathBuf) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }
}
