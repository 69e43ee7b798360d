//! Configuration management for eidolon.
//!
//! This module provides a unified configuration system that separates
//! secrets (from environment variables) from settings (from TOML files).
//!
//! # Configuration Sources
//!
//! ## Secrets (Environment Variables)
//! - `EIDOLON_API_KEY` - generative backend API key (optional)
//! - `EIDOLON_EMBEDDING_API_KEY` - embedding backend API key (optional)
//!
//! ## Settings (TOML File)
//! Located at `~/.config/eidolon/config.toml`:
//! ```toml
//! [persona]
//! name = "Marcus Aurelius"
//! prompt = "You are Marcus Aurelius..."
//!
//! [knowledge]
//! path = "knowledge.json"
//!
//! [semantic]
//! threshold = 0.75
//!
//! [generative]
//! base_url = "http://127.0.0.1:11434/v1"
//! model = "llama3.1"
//! timeout_seconds = 40
//! ```

mod secrets;
mod settings;

pub use secrets::{Secrets, SecretsError};
pub use settings::{
    EmbeddingSettings, GenerativeSettings, KnowledgeSettings, LoggingSettings, PersonaSettings,
    SemanticSettings, Settings, SettingsError,
};

/// Combined configuration containing both secrets and settings.
///
/// This is the main configuration type used throughout the application.
/// It separates sensitive secrets (from env) from non-sensitive settings (from TOML).
#[derive(Debug, Clone)]
pub struct Config {
    /// Secrets loaded from environment variables
    pub secrets: Secrets,
    /// Settings loaded from TOML configuration file
    pub settings: Settings,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Secrets error: {0}")]
    Secrets(#[from] SecretsError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Semantic threshold {0} is outside (0.0, 1.0]")]
    ThresholdOutOfRange(f32),

    #[error("Generative timeout must be greater than zero")]
    ZeroTimeout,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// This loads:
    /// 1. Secrets from environment variables
    /// 2. Settings from TOML file (creating defaults if needed)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML file cannot be read or parsed
    /// - The semantic threshold is outside (0.0, 1.0]
    /// - The persona prompt is missing or unreadable
    pub fn load() -> Result<Self, ConfigError> {
        let secrets = Secrets::from_env()?;
        let settings = Settings::load()?;

        Self::validate(secrets, settings)
    }

    /// Validate an already-loaded secrets/settings pair.
    pub fn validate(secrets: Secrets, settings: Settings) -> Result<Self, ConfigError> {
        let threshold = settings.semantic.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(threshold));
        }

        if settings.generative.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        // Resolve once at startup so a missing prompt file fails here,
        // not on the first request.
        settings.persona.resolve_prompt()?;

        Ok(Self { secrets, settings })
    }

    /// The resolved persona system prompt (inline text or file contents).
    pub fn persona_prompt(&self) -> Result<String, ConfigError> {
        Ok(self.settings.persona.resolve_prompt()?)
    }

    /// The persona display name.
    pub fn persona_name(&self) -> &str {
        &self.settings.persona.name
    }

    /// API key for the generative backend (if configured).
    pub fn generative_api_key(&self) -> Option<&str> {
        self.secrets.api_key.as_deref()
    }

    /// API key for the embedding backend (if configured).
    pub fn embedding_api_key(&self) -> Option<&str> {
        self.secrets.embedding_api_key.as_deref()
    }
}

/// Load .env file if it exists (for development convenience).
///
/// This is called automatically by `Config::load()` but is also
/// exported for use in other contexts.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
