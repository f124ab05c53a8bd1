use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use wanderplan::api::AppState;
use wanderplan::{CompletionClient, Orchestrator, WanderplanConfig, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = WanderplanConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let backend = Arc::new(CompletionClient::new(&config.provider)?);
    let orchestrator = Orchestrator::new(
        backend.clone(),
        config.provider.default_model.clone(),
        Duration::from_millis(config.provider.timeout_ms),
    );

    let state = AppState {
        orchestrator,
        backend,
    };

    web::run(state, config.server.port).await
}
