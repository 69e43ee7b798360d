use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eidolon_core::{Config, ConversationContext, ConversationTurn};
use eidolon_engine::fallback::common;
use eidolon_engine::orchestrator::ResponseOrchestrator;
use eidolon_engine::providers::openai_compatible::OpenAiCompatibleClient;
use eidolon_knowledge::embeddings::EmbeddingClient;
use eidolon_knowledge::{KnowledgeBase, RuleMatcher, SemanticMatcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded (persona: {}, generative model: {})",
        config.persona_name(),
        config.settings.generative.model
    );
    let persona_prompt = config.persona_prompt()?;

    // Load curated knowledge; a broken knowledge file is fatal at startup
    let base = Arc::new(KnowledgeBase::from_settings(&config.settings.knowledge)?);

    // Assemble the response sources
    let rules = RuleMatcher::new(Arc::clone(&base));
    let embedder = EmbeddingClient::new(
        &config.settings.embedding,
        config.embedding_api_key().map(String::from),
    );
    let semantic = SemanticMatcher::from_settings(
        Arc::clone(&base),
        Box::new(embedder),
        &config.settings.semantic,
    );
    let generative = OpenAiCompatibleClient::from_settings(
        &config.settings.generative,
        config.generative_api_key().map(String::from),
    );
    let orchestrator =
        ResponseOrchestrator::new(rules, semantic, Box::new(generative), persona_prompt);

    // One session per process run
    let session_id = uuid::Uuid::new_v4().to_string();
    let mut context = ConversationContext::new(session_id.clone());
    info!("[session:{}] session started", session_id);

    println!(
        "{}",
        common::repl_banner(config.persona_name(), &config.settings.generative.model)
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        let candidate = orchestrator.respond(&context, message).await;
        println!("[{}] {}", candidate.tier, candidate.text);

        context.push(ConversationTurn::user(message));
        context.push(ConversationTurn::persona(candidate.text));
    }

    println!("{}", common::REPL_GOODBYE);
    info!("[session:{}] session ended", session_id);

    Ok(())
}
