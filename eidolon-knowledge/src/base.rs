//! Knowledge base loading and validation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use eidolon_core::config::KnowledgeSettings;

use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::models::KnowledgeEntry;
use crate::normalize::normalize;

/// Immutable, load-ordered collection of curated entries.
///
/// Built once at startup and shared behind `Arc`; everything downstream
/// only reads. Entry order is the source order, which the matchers rely on
/// for deterministic tie-breaking.
#[derive(Debug)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    dimension: Option<usize>,
}

impl KnowledgeBase {
    /// Load and validate entries from a JSON file.
    ///
    /// Validation is fatal: a duplicate id, empty answer, empty embedding,
    /// or dimension mismatch rejects the whole file.
    pub fn load(path: impl AsRef<Path>, dimension: Option<usize>) -> KnowledgeResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let base = Self::load_from_str(&content, dimension)?;
        info!(
            "Loaded {} knowledge entries from {:?} (dimension: {:?})",
            base.len(),
            path.as_ref(),
            base.dimension()
        );
        Ok(base)
    }

    /// Load from the configured path with the configured pinned dimension.
    pub fn from_settings(settings: &KnowledgeSettings) -> KnowledgeResult<Self> {
        Self::load(&settings.path, settings.dimension)
    }

    /// Parse and validate entries from JSON content.
    ///
    /// Patterns and trigger phrases are normalized here, so matching never
    /// re-normalizes stored text per request. When `dimension` is `None`
    /// the first entry fixes the expected embedding width.
    pub fn load_from_str(content: &str, dimension: Option<usize>) -> KnowledgeResult<Self> {
        let raw: Vec<KnowledgeEntry> = serde_json::from_str(content)?;

        let mut entries: Vec<KnowledgeEntry> = Vec::with_capacity(raw.len());
        let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
        let mut dimension = dimension;

        for mut entry in raw {
            if !seen.insert(entry.id.clone()) {
                return Err(KnowledgeError::DuplicateId(entry.id));
            }
            if entry.answer.trim().is_empty() {
                return Err(KnowledgeError::EmptyAnswer(entry.id));
            }
            if entry.embedding.is_empty() {
                return Err(KnowledgeError::EmptyEmbedding(entry.id));
            }
            match dimension {
                Some(expected) if entry.embedding.len() != expected => {
                    return Err(KnowledgeError::EmbeddingDimMismatch {
                        id: entry.id,
                        expected,
                        actual: entry.embedding.len(),
                    });
                }
                Some(_) => {}
                None => dimension = Some(entry.embedding.len()),
            }

            entry.pattern = normalize(&entry.pattern);
            entry.triggers = entry
                .triggers
                .iter()
                .map(|trigger| normalize(trigger))
                .filter(|trigger| !trigger.is_empty())
                .collect();

            entries.push(entry);
        }

        Ok(Self { entries, dimension })
    }

    /// Entries in load order.
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The validated embedding width; `None` only for an empty base.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}
