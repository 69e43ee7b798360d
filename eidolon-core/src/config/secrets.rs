//! Secrets configuration loaded from environment variables only.
//!
//! This module handles sensitive configuration like API keys that should
//! never be stored in files. All secrets are read from environment variables.

use std::env;

/// Secrets loaded exclusively from environment variables.
///
/// These are sensitive values that should never be written to disk
/// or committed to version control. Both keys are optional because
/// local inference servers typically run unauthenticated.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// Generative backend API key (env: EIDOLON_API_KEY)
    pub api_key: Option<String>,

    /// Embedding backend API key (env: EIDOLON_EMBEDDING_API_KEY)
    pub embedding_api_key: Option<String>,
}

/// Errors that can occur when loading secrets
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("Environment variable {0} is set but is not valid unicode")]
    InvalidUnicode(String),
}

impl Secrets {
    /// Load secrets from environment variables.
    ///
    /// This function also loads .env file if present (for development),
    /// but production should rely on actual environment variables.
    pub fn from_env() -> Result<Self, SecretsError> {
        // Load .env file if present (development convenience)
        let _ = dotenvy::dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from environment without loading .env
    pub(crate) fn from_env_inner() -> Result<Self, SecretsError> {
        Ok(Self {
            api_key: read_var("EIDOLON_API_KEY")?,
            embedding_api_key: read_var("EIDOLON_EMBEDDING_API_KEY")?,
        })
    }

    /// Whether a generative backend key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Whether an embedding backend key is configured.
    pub fn has_embedding_api_key(&self) -> bool {
        self.embedding_api_key.is_some()
    }
}

fn read_var(name: &str) -> Result<Option<String>, SecretsError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(SecretsError::InvalidUnicode(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Use a mutex to ensure tests that modify environment variables don't run concurrently
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        unsafe {
            env::remove_var("EIDOLON_API_KEY");
            env::remove_var("EIDOLON_EMBEDDING_API_KEY");
        }
    }

    #[test]
    fn test_secrets_default_to_none() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();

        let secrets = Secrets::from_env_inner().unwrap();
        assert!(secrets.api_key.is_none());
        assert!(secrets.embedding_api_key.is_none());
        assert!(!secrets.has_api_key());
    }

    #[test]
    fn test_load_api_key() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var("EIDOLON_API_KEY", "sk-test");
        }

        let secrets = Secrets::from_env_inner().unwrap();
        assert_eq!(secrets.api_key, Some("sk-test".to_string()));
        assert!(secrets.embedding_api_key.is_none());
        assert!(secrets.has_api_key());
        assert!(!secrets.has_embedding_api_key());
    }

    #[test]
    fn test_load_both_keys() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var("EIDOLON_API_KEY", "sk-gen");
            env::set_var("EIDOLON_EMBEDDING_API_KEY", "sk-embed");
        }

        let secrets = Secrets::from_env_inner().unwrap();
        assert_eq!(secrets.api_key, Some("sk-gen".to_string()));
        assert_eq!(secrets.embedding_api_key, Some("sk-embed".to_string()));
    }
}
