//! Provider trait for abstracting generative text backends.

use eidolon_core::ConversationContext;

/// Control tokens some model servers leak into completion text.
const CONTROL_TOKENS: [&str; 5] = [
    "<|im_start|>",
    "<|im_end|>",
    "<|endoftext|>",
    "<|eot_id|>",
    "</s>",
];

/// Generation error types
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Generation timed out after {0} seconds")]
    Timeout(u64),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Upstream { status: u16, message: String },
    #[error("No content in response")]
    EmptyResponse,
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

/// Provider trait for generative backends.
///
/// A provider produces one in-character reply per call. There is no retry
/// here; a failed or expired call reports its error and the caller picks
/// the next response source.
#[async_trait::async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Current model
    fn model(&self) -> &str;

    /// Generate a reply to `message` as the persona described by
    /// `persona_prompt`, with `context` supplying prior turns.
    async fn generate(
        &self,
        persona_prompt: &str,
        context: &ConversationContext,
        message: &str,
    ) -> Result<String, GenerateError>;

    /// Clone the provider (boxed)
    fn clone_box(&self) -> Box<dyn GenerativeProvider>;
}

impl Clone for Box<dyn GenerativeProvider> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Remove leaked chat-template tokens and trim surrounding whitespace.
pub fn strip_control_tokens(text: &str) -> String {
    let mut out = text.to_string();
    for token in CONTROL_TOKENS {
        out = out.replace(token, "");
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_control_tokens() {
        let raw = "<|im_start|>assistant\nWaste no more time arguing.<|im_end|><|endoftext|>";
        assert_eq!(
            strip_control_tokens(raw),
            "assistant\nWaste no more time arguing."
        );
    }

    #[test]
    fn test_strip_leaves_plain_text_alone() {
        assert_eq!(
            strip_control_tokens("You have power over your mind."),
            "You have power over your mind."
        );
    }

    #[test]
    fn test_strip_token_only_payload_is_empty() {
        assert_eq!(strip_control_tokens("<|eot_id|></s>"), "");
        assert_eq!(strip_control_tokens("  \n "), "");
    }
}
