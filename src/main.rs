//! Dialogue engine - line-oriented front end
//!
//! Reads one JSON turn per stdin line and prints the outbound actions of the
//! turn as one JSON line on stdout. Lines may name a `conversation_id`;
//! unnamed turns go to a single default conversation.

use dialogue_engine::config::{EngineConfig, LogFormat};
use dialogue_engine::manager::DialogueManager;
use dialogue_engine::providers::{Catalog, CatalogRecommender, KeywordTopicSuggester, Recommender, TopicSuggester};
use dialogue_engine::runtime::{Conversation, RuntimeManager, TurnInput};
use serde::Deserialize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONVERSATION: &str = "default";

#[derive(Debug, Deserialize)]
struct InboundLine {
    #[serde(default)]
    conversation_id: Option<String>,
    #[serde(flatten)]
    input: TurnInput,
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dialogue_engine=info".into());
    // stdout carries the protocol, logs go to stderr
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    init_logging(config.log_format);

    let catalog = match &config.catalog {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading catalog");
            Catalog::load(path)?
        }
        None => {
            tracing::warn!("No DIALOGUE_CATALOG configured, recommendations will be empty");
            Catalog::default()
        }
    };
    let catalog = Arc::new(catalog);
    tracing::info!(
        articles = catalog.len(),
        top_k = config.top_k,
        style = %config.default_style,
        "Dialogue engine starting"
    );

    let EngineConfig {
        top_k, default_style, ..
    } = config;
    let runtime = RuntimeManager::new(move || {
        let mut manager = DialogueManager::new(default_style, top_k);
        CatalogRecommender::new(Arc::clone(&catalog)).register_with(manager.bus_mut());
        KeywordTopicSuggester::default().register_with(manager.bus_mut());
        Conversation::new(manager)
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let inbound: InboundLine = match serde_json::from_str(&line) {
            Ok(inbound) => inbound,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed input line");
                continue;
            }
        };
        let conversation_id = inbound
            .conversation_id
            .as_deref()
            .unwrap_or(DEFAULT_CONVERSATION);

        let output = runtime.submit(conversation_id, inbound.input).await?;
        let mut json = serde_json::to_vec(&output)?;
        json.push(b'\n');
        stdout.write_all(&json).await?;
        stdout.flush().await?;
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}
