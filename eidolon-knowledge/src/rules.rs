//! Deterministic pattern lookup over the knowledge base.

use std::sync::Arc;

use crate::base::KnowledgeBase;
use crate::models::MatchResult;
use crate::normalize::normalize;

/// Exact-pattern and trigger-phrase matcher.
///
/// Pure and synchronous: the exact-equality pass runs over all entries
/// first, then the whole-word trigger pass, each in load order, so the
/// first matching entry per pass is deterministic. O(entries) per call,
/// which is fine for a small curated base.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    base: Arc<KnowledgeBase>,
}

impl RuleMatcher {
    pub fn new(base: Arc<KnowledgeBase>) -> Self {
        Self { base }
    }

    /// Match a raw message. Normalization here is the same function the
    /// loader applied to the stored patterns.
    pub fn matches(&self, message: &str) -> MatchResult<'_> {
        let normalized = normalize(message);
        if normalized.is_empty() {
            return MatchResult::Miss;
        }

        for entry in self.base.entries() {
            if !entry.pattern.is_empty() && entry.pattern == normalized {
                return MatchResult::hit(entry, 1.0);
            }
        }

        let words: Vec<&str> = normalized.split(' ').collect();
        for entry in self.base.entries() {
            if entry
                .triggers
                .iter()
                .any(|trigger| contains_phrase(&words, trigger))
            {
                return MatchResult::hit(entry, 1.0);
            }
        }

        MatchResult::Miss
    }
}

/// Whether `phrase` occurs in `words` as a contiguous whole-word run.
fn contains_phrase(words: &[&str], phrase: &str) -> bool {
    let needle: Vec<&str> = phrase.split(' ').collect();
    if needle.is_empty() || needle.len() > words.len() {
        return false;
    }
    words
        .windows(needle.len())
        .any(|window| window == needle.as_slice())
}
