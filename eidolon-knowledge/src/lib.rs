//! Curated knowledge and matching subsystem for eidolon.

pub mod base;
pub mod embeddings;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod rules;
pub mod semantic;
pub mod similarity;

pub use eidolon_core::config::{EmbeddingSettings, KnowledgeSettings, SemanticSettings};

pub use base::KnowledgeBase;
pub use embeddings::{Embedder, EmbeddingClient};
pub use errors::{KnowledgeError, KnowledgeResult};
pub use models::{KnowledgeEntry, MatchResult};
pub use normalize::normalize;
pub use rules::RuleMatcher;
pub use semantic::SemanticMatcher;
pub use similarity::cosine_similarity;
