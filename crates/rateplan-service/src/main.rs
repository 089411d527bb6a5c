//! Rateplan Service Binary
//!
//! State-based insurance quote pricing over HTTP

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rateplan_service::{
    build_router, load_seed, seed_profiles, RateplanService, ServiceConfig, SERVICE_VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServiceConfig::load()?;

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    info!("Starting Rateplan Service v{}", SERVICE_VERSION);
    info!("Loaded configuration: {:?}", config);

    let service = Arc::new(RateplanService::in_memory());

    if config.seed_on_start {
        let seed = load_seed(config.seed_path.as_deref()).await?;
        seed_profiles(service.profiles.as_ref(), &seed).await?;
    } else {
        warn!("Seeding disabled, no pricing profiles loaded");
    }

    let app = build_router(service);

    let addr = config.addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Rateplan API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down Rateplan Service");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
