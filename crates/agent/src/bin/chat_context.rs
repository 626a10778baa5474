//! Interactive chat REPL
//!
//! Reads one message per line from stdin and prints the answer. Commands:
//! `/reset` clears the session's stored context, `/history` prints the
//! recent messages, `/quit` exits.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use chat_context_agent::TurnProcessor;
use chat_context_config::{load_settings, DomainConfig, Settings};
use chat_context_core::{ContextStore, SessionId};
use chat_context_persistence::{InMemoryContextStore, InMemoryMessageLog, MessageLog, ScyllaConfig};

const HISTORY_LIMIT: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("CHAT_CONTEXT_ENV").ok();
    // Missing files fall back to defaults; invalid values abort startup
    let settings = load_settings(env.as_deref()).context("Failed to load settings")?;

    init_tracing(&settings);
    tracing::info!(
        environment = ?settings.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting chat-context"
    );

    let domain = DomainConfig::load(&settings.domain_config_path).with_context(|| {
        format!(
            "Failed to load domain configuration from {}",
            settings.domain_config_path
        )
    })?;

    let (store, log) = init_stores(&settings).await;
    let processor = TurnProcessor::from_config(&settings, &domain, store.clone())
        .context("Failed to build turn processor")?
        .with_message_log(log.clone());

    let session = SessionId::new(uuid::Uuid::new_v4().to_string());
    tracing::info!(session_id = %session, "Session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                match store.clear(&session).await {
                    Ok(()) => println!("Context cleared."),
                    Err(e) => eprintln!("Failed to clear context: {}", e),
                }
                continue;
            }
            "/history" => {
                match log.recent(&session, HISTORY_LIMIT).await {
                    Ok(messages) => {
                        for message in messages {
                            println!(
                                "[{}] {} -> {:?} {:?}",
                                message.created_at.format("%H:%M:%S"),
                                message.raw_text,
                                message.intent,
                                message.entities
                            );
                        }
                    }
                    Err(e) => eprintln!("Failed to read history: {}", e),
                }
                continue;
            }
            _ => {}
        }

        let outcome = match processor.process(&session, line).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Turn failed");
                eprintln!("Error: {}", e);
                continue;
            }
        };

        if settings.output.json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else {
            match &outcome.response {
                Some(response) => println!("{}", response.trim_end()),
                None => println!("Sorry, I did not understand. Could you rephrase?"),
            }
        }
    }

    tracing::info!(session_id = %session, "Session ended");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("chat_context={}", settings.logging.level).into());

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}

/// ScyllaDB stores when enabled and reachable, in-memory otherwise
async fn init_stores(settings: &Settings) -> (Arc<dyn ContextStore>, Arc<dyn MessageLog>) {
    if settings.persistence.enabled {
        let config = ScyllaConfig {
            hosts: settings.persistence.scylla_hosts.clone(),
            keyspace: settings.persistence.keyspace.clone(),
            replication_factor: settings.persistence.replication_factor,
        };
        match chat_context_persistence::init(config).await {
            Ok(layer) => {
                tracing::info!(
                    hosts = ?settings.persistence.scylla_hosts,
                    keyspace = %settings.persistence.keyspace,
                    "ScyllaDB persistence initialized"
                );
                return (Arc::new(layer.context), Arc::new(layer.messages));
            }
            Err(e) => {
                tracing::error!(
                    "Failed to initialize ScyllaDB: {}. Falling back to in-memory.",
                    e
                );
            }
        }
    } else if settings.environment.is_production() {
        tracing::warn!("Persistence disabled in production, context is lost on restart");
    } else {
        tracing::info!("Persistence disabled, using in-memory context store");
    }

    (
        Arc::new(InMemoryContextStore::new()),
        Arc::new(InMemoryMessageLog::new()),
    )
}
