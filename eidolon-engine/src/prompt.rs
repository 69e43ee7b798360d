//! Prompt assembly for chat-completions style providers.

use serde::Serialize;

use eidolon_core::{ConversationContext, Speaker};

/// One message in a chat-completions request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Assemble the message list for one generation call.
///
/// The persona prompt goes first as the system message, prior turns follow
/// in conversation order, and the incoming message closes the list.
pub fn build_messages(
    persona_prompt: &str,
    context: &ConversationContext,
    message: &str,
) -> Vec<PromptMessage> {
    let mut messages = Vec::with_capacity(context.turns.len() + 2);
    messages.push(PromptMessage::system(persona_prompt));

    for turn in &context.turns {
        match turn.speaker {
            Speaker::User => messages.push(PromptMessage::user(turn.text.clone())),
            Speaker::Persona => messages.push(PromptMessage::assistant(turn.text.clone())),
        }
    }

    messages.push(PromptMessage::user(message));
    messages
}
