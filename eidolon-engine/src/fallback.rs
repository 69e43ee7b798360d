//! Deterministic, non-model-facing messages for the engine.

pub mod common {
    /// Last-resort reply when every response source has failed.
    /// Kept in the persona's voice so degraded service still reads in character.
    pub const FALLBACK_REPLY: &str =
        "Forgive me, friend. My thoughts fail me at this moment. Ask me again in a little while.";

    pub const REPL_GOODBYE: &str = "Farewell. Keep your mind in order.";

    pub fn repl_banner(persona: &str, model: &str) -> String {
        format!(
            "Speaking with {} (generative model: {}). Type a message, or 'exit' to leave.",
            persona, model
        )
    }
}
