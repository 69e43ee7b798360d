pub mod config;
pub mod message;

// Config re-exports
pub use config::{
    Config, ConfigError, EmbeddingSettings, GenerativeSettings, KnowledgeSettings,
    LoggingSettings, PersonaSettings, Secrets, SecretsError, SemanticSettings, Settings,
    SettingsError, load_dotenv,
};

// Message re-exports
pub use message::{
    ConversationContext, ConversationTurn, ResponseCandidate, ResponseTier, Speaker,
};
