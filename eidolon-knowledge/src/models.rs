use serde::{Deserialize, Serialize};

/// One curated entry: a matching key, optional trigger phrases, the
/// canonical answer, and a precomputed embedding.
///
/// Entries are immutable after load and owned exclusively by the
/// `KnowledgeBase`; the matchers only ever borrow them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: String,
    /// Matching key for exact rule hits (normalized at load)
    pub pattern: String,
    /// Trigger phrases for whole-word containment hits (normalized at load)
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Canonical answer returned verbatim on a hit
    pub answer: String,
    /// Precomputed embedding; one fixed width per deployment
    pub embedding: Vec<f32>,
}

/// Outcome of a matcher pass.
///
/// A miss is an expected result, not an error. Matcher infrastructure
/// failures (embedding provider unreachable) are reported separately as
/// `KnowledgeError`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchResult<'a> {
    Hit {
        entry: &'a KnowledgeEntry,
        confidence: f32,
    },
    Miss,
}

impl<'a> MatchResult<'a> {
    pub fn hit(entry: &'a KnowledgeEntry, confidence: f32) -> Self {
        Self::Hit { entry, confidence }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, MatchResult::Hit { .. })
    }

    /// The matched entry, if any.
    pub fn entry(&self) -> Option<&'a KnowledgeEntry> {
        match self {
            MatchResult::Hit { entry, .. } => Some(entry),
            MatchResult::Miss => None,
        }
    }
}
