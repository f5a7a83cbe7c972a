//! API testing bot
//!
//! Dialogue engine that lets users model API test cases message by message
//! in a chat room or an issue thread.

mod api;
mod assertion;
mod config;
mod dialogue;
mod services;

use api::create_router;
use config::BotConfig;
use dialogue::{ChannelContextStore, ProductionEngine};
use services::http::{self, HttpFinalizer, HttpProjectDirectory, HttpSpecService};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_testing_bot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = BotConfig::from_env();
    tracing::info!(
        projects = %config.project_service_url,
        specs = %config.spec_service_url,
        persistence = %config.model_persistence_url,
        code_generation = %config.code_generation_url,
        timeout_secs = config.http_timeout.as_secs(),
        "Collaborators configured"
    );

    // Production collaborators share one HTTP client
    let client = http::client(config.http_timeout)?;
    let engine: ProductionEngine = ProductionEngine::new(
        HttpProjectDirectory::new(client.clone(), &config.project_service_url),
        HttpSpecService::new(client.clone(), &config.spec_service_url),
        HttpFinalizer::new(
            client,
            &config.model_persistence_url,
            &config.code_generation_url,
        ),
        Arc::new(ChannelContextStore::new()),
    );

    let app = create_router(Arc::new(engine));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API testing bot listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
