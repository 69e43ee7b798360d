//! Response orchestration across the tiered response sources.

use tracing::{debug, info, warn};

use eidolon_core::{ConversationContext, ResponseCandidate, ResponseTier};
use eidolon_knowledge::{MatchResult, RuleMatcher, SemanticMatcher};

use crate::fallback::common::FALLBACK_REPLY;
use crate::providers::provider::GenerativeProvider;

/// Routes each incoming message through the response sources in order:
/// curated rules, semantic retrieval, generative backend, static fallback.
///
/// `respond` never fails. Any per-request error is logged and the next
/// source is consulted; the fallback reply closes every path.
pub struct ResponseOrchestrator {
    rules: RuleMatcher,
    semantic: SemanticMatcher,
    generative: Box<dyn GenerativeProvider>,
    persona_prompt: String,
}

impl ResponseOrchestrator {
    pub fn new(
        rules: RuleMatcher,
        semantic: SemanticMatcher,
        generative: Box<dyn GenerativeProvider>,
        persona_prompt: impl Into<String>,
    ) -> Self {
        Self {
            rules,
            semantic,
            generative,
            persona_prompt: persona_prompt.into(),
        }
    }

    /// Produce a reply for `message` within `context`.
    pub async fn respond(&self, context: &ConversationContext, message: &str) -> ResponseCandidate {
        let session = &context.session_id;

        if let MatchResult::Hit { entry, confidence } = self.rules.matches(message) {
            info!("[session:{}] rule match on entry '{}'", session, entry.id);
            return ResponseCandidate::new(
                entry.answer.clone(),
                ResponseTier::Rule,
                Some(confidence),
            );
        }
        debug!("[session:{}] no rule match", session);

        match self.semantic.matches(message).await {
            Ok(MatchResult::Hit { entry, confidence }) => {
                info!(
                    "[session:{}] semantic match on entry '{}' (similarity {:.3})",
                    session, entry.id, confidence
                );
                return ResponseCandidate::new(
                    entry.answer.clone(),
                    ResponseTier::Semantic,
                    Some(confidence),
                );
            }
            Ok(MatchResult::Miss) => {
                debug!("[session:{}] no semantic match", session);
            }
            Err(e) => {
                warn!("[session:{}] semantic matching unavailable: {}", session, e);
            }
        }

        match self
            .generative
            .generate(&self.persona_prompt, context, message)
            .await
        {
            // Providers outside this crate may return blank text without
            // raising EmptyResponse; treat that as a failed source too.
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    "[session:{}] generative reply from model '{}'",
                    session,
                    self.generative.model()
                );
                return ResponseCandidate::new(text, ResponseTier::Generative, None);
            }
            Ok(_) => {
                warn!("[session:{}] generative reply was blank", session);
            }
            Err(e) => {
                warn!("[session:{}] generation failed: {}", session, e);
            }
        }

        info!("[session:{}] serving fallback reply", session);
        ResponseCandidate::new(FALLBACK_REPLY, ResponseTier::Fallback, None)
    }
}
