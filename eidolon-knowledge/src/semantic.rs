//! Embedding-backed nearest-entry matching.

use std::sync::Arc;

use tracing::{debug, warn};

use eidolon_core::config::SemanticSettings;

use crate::base::KnowledgeBase;
use crate::embeddings::Embedder;
use crate::errors::KnowledgeResult;
use crate::models::MatchResult;
use crate::similarity::cosine_similarity;

/// Nearest-entry matcher over the knowledge base.
///
/// Embeds the incoming message through the injected provider, scores every
/// entry by cosine similarity, and accepts the best score only at or above
/// the configured threshold. Equal scores resolve to the entry earlier in
/// load order.
pub struct SemanticMatcher {
    base: Arc<KnowledgeBase>,
    embedder: Box<dyn Embedder>,
    threshold: f32,
}

impl SemanticMatcher {
    pub fn new(base: Arc<KnowledgeBase>, embedder: Box<dyn Embedder>, threshold: f32) -> Self {
        Self {
            base,
            embedder,
            threshold,
        }
    }

    pub fn from_settings(
        base: Arc<KnowledgeBase>,
        embedder: Box<dyn Embedder>,
        settings: &SemanticSettings,
    ) -> Self {
        Self::new(base, embedder, settings.threshold)
    }

    /// Find the closest entry, or `Miss` when nothing clears the threshold.
    ///
    /// An embedding provider failure surfaces as an error; whether that
    /// degrades to a miss is the caller's policy, not decided here.
    pub async fn matches(&self, message: &str) -> KnowledgeResult<MatchResult<'_>> {
        if self.base.is_empty() {
            return Ok(MatchResult::Miss);
        }

        let query = self.embedder.embed(message).await?;

        if let Some(dimension) = self.base.dimension()
            && query.len() != dimension
        {
            warn!(
                "query embedding width {} does not match knowledge dimension {}",
                query.len(),
                dimension
            );
        }

        let mut best_index = 0usize;
        let mut best_sim = f32::NEG_INFINITY;
        for (index, entry) in self.base.entries().iter().enumerate() {
            let sim = cosine_similarity(&query, &entry.embedding);
            // Strict `>` keeps the earliest entry on ties.
            if sim > best_sim {
                best_sim = sim;
                best_index = index;
            }
        }

        if best_sim >= self.threshold {
            let entry = &self.base.entries()[best_index];
            debug!(
                "semantic hit: entry '{}' at similarity {:.3} (threshold {})",
                entry.id, best_sim, self.threshold
            );
            Ok(MatchResult::hit(entry, best_sim))
        } else {
            debug!(
                "semantic miss: best similarity {:.3} below threshold {}",
                best_sim, self.threshold
            );
            Ok(MatchResult::Miss)
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}
