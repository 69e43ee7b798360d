//! Shared helpers for integration tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use eidolon_core::ConversationContext;
use eidolon_engine::orchestrator::ResponseOrchestrator;
use eidolon_engine::providers::provider::{GenerateError, GenerativeProvider};
use eidolon_knowledge::embeddings::Embedder;
use eidolon_knowledge::errors::{KnowledgeError, KnowledgeResult};
use eidolon_knowledge::{KnowledgeBase, RuleMatcher, SemanticMatcher};

pub const PERSONA_PROMPT: &str =
    "You are Marcus Aurelius, Roman emperor and Stoic philosopher. Answer briefly, in his voice.";

/// Curated entries with 3-wide embeddings picked for easy cosine arithmetic.
pub const KNOWLEDGE_JSON: &str = r#"[
    {
        "id": "greeting",
        "pattern": "hello",
        "triggers": ["good morning"],
        "answer": "Greetings, friend.",
        "embedding": [0.0, 0.0, 1.0]
    },
    {
        "id": "mortality",
        "pattern": "memento mori",
        "answer": "Think of yourself as dead. You have lived your life. Now take what is left and live it properly.",
        "embedding": [1.0, 0.0, 0.0]
    }
]"#;

pub fn knowledge_base() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::load_from_str(KNOWLEDGE_JSON, None).expect("test knowledge is valid"))
}

/// Assemble an orchestrator over the shared test knowledge at threshold 0.75.
pub fn orchestrator(embedder: TableEmbedder, provider: ScriptedProvider) -> ResponseOrchestrator {
    let base = knowledge_base();
    let rules = RuleMatcher::new(Arc::clone(&base));
    let semantic = SemanticMatcher::new(base, Box::new(embedder), 0.75);
    ResponseOrchestrator::new(rules, semantic, Box::new(provider), PERSONA_PROMPT)
}

/// Embedder serving vectors from a fixed table, counting calls.
pub struct TableEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    default: Vec<f32>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl TableEmbedder {
    /// Any message not in the table embeds to `default`.
    pub fn new(default: Vec<f32>) -> Self {
        Self {
            vectors: HashMap::new(),
            default,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    pub fn failing() -> Self {
        let mut embedder = Self::new(vec![0.0, 0.0, 0.0]);
        embedder.fail = true;
        embedder
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl Embedder for TableEmbedder {
    async fn embed(&self, text: &str) -> KnowledgeResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(KnowledgeError::Embedding(
                "embedding backend offline".to_string(),
            ));
        }
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }
}

/// What a scripted provider does when asked to generate.
#[derive(Clone)]
enum ProviderScript {
    Reply(String),
    Blank,
    Fail,
    Timeout(u64),
    Stall {
        delay_seconds: u64,
        deadline_seconds: u64,
    },
}

/// Generative provider following a fixed script, counting calls.
#[derive(Clone)]
pub struct ScriptedProvider {
    script: ProviderScript,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    fn with_script(script: ProviderScript) -> Self {
        Self {
            script,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn reply(text: &str) -> Self {
        Self::with_script(ProviderScript::Reply(text.to_string()))
    }

    pub fn blank() -> Self {
        Self::with_script(ProviderScript::Blank)
    }

    pub fn failing() -> Self {
        Self::with_script(ProviderScript::Fail)
    }

    /// Reports a deadline expiry without waiting.
    pub fn timing_out(deadline_seconds: u64) -> Self {
        Self::with_script(ProviderScript::Timeout(deadline_seconds))
    }

    /// Runs a real deadline against a backend that answers too late.
    pub fn stalling(delay_seconds: u64, deadline_seconds: u64) -> Self {
        Self::with_script(ProviderScript::Stall {
            delay_seconds,
            deadline_seconds,
        })
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl GenerativeProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(
        &self,
        _persona_prompt: &str,
        _context: &ConversationContext,
        _message: &str,
    ) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            ProviderScript::Reply(text) => Ok(text.clone()),
            ProviderScript::Blank => Ok("   ".to_string()),
            ProviderScript::Fail => Err(GenerateError::Upstream {
                status: 500,
                message: "backend unavailable".to_string(),
            }),
            ProviderScript::Timeout(deadline_seconds) => {
                Err(GenerateError::Timeout(*deadline_seconds))
            }
            ProviderScript::Stall {
                delay_seconds,
                deadline_seconds,
            } => {
                let deadline = Duration::from_secs(*deadline_seconds);
                let work = tokio::time::sleep(Duration::from_secs(*delay_seconds));
                match tokio::time::timeout(deadline, work).await {
                    Ok(()) => Ok("a reply that arrived too late to matter".to_string()),
                    Err(_) => Err(GenerateError::Timeout(*deadline_seconds)),
                }
            }
        }
    }

    fn clone_box(&self) -> Box<dyn GenerativeProvider> {
        Box::new(self.clone())
    }
}
