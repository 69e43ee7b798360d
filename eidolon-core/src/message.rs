use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who spoke a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Persona,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Persona => "persona",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Speaker::User),
            "persona" => Ok(Speaker::Persona),
            _ => Err(format!("Unknown speaker: {}", s)),
        }
    }
}

/// A single prior exchange in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn persona(text: impl Into<String>) -> Self {
        Self::new(Speaker::Persona, text)
    }
}

/// Conversation state handed in by the caller with each request.
///
/// Turns are ordered oldest first, most recent last. The core reads this,
/// never mutates or persists it; transcript storage lives outside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    pub session_id: String,
    #[serde(default)]
    pub turns: Vec<ConversationTurn>,
}

impl ConversationContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            turns: Vec::new(),
        }
    }

    /// Append a turn at the most-recent position.
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }
}

/// Which cascade stage produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTier {
    Rule,
    Semantic,
    Generative,
    Fallback,
}

impl ResponseTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseTier::Rule => "rule",
            ResponseTier::Semantic => "semantic",
            ResponseTier::Generative => "generative",
            ResponseTier::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ResponseTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The answer to one request, tagged with its provenance.
///
/// Confidence is 1.0 for rule hits, the cosine similarity for semantic hits,
/// and absent for generative and fallback responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseCandidate {
    pub text: String,
    pub tier: ResponseTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ResponseCandidate {
    pub fn new(text: impl Into<String>, tier: ResponseTier, confidence: Option<f32>) -> Self {
        Self {
            text: text.into(),
            tier,
            confidence,
        }
    }
}
