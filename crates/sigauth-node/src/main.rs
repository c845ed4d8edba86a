//! # SigAuth Node
//!
//! Serves the authenticated HTTP surface. See the library crate docs for the
//! startup sequence.

use std::sync::Arc;

use anyhow::{Context, Result};
use sigauth_core::{AuthService, BrokerIdentity, CredentialSource, SystemClock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sigauth_node::{load_config, router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Refusing to start");
            return Err(e).context("invalid node configuration");
        }
    };
    let clock = Arc::new(SystemClock);

    // No request may be served without a usable session secret.
    let auth = match AuthService::new(&config.auth, clock.clone()) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            error!(error = %e, "Refusing to start");
            return Err(e).context("invalid authentication configuration");
        }
    };

    let identity = BrokerIdentity::new(clock);
    let broker_username = identity
        .username()
        .context("failed to create broker identity")?;
    info!(pubkey = %broker_username, "Broker identity ready");

    let app = router(auth, CredentialSource::from(&config.auth));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Node is running. Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Initiating graceful shutdown...");
        })
        .await
        .context("server error")?;

    info!("Shutdown complete");
    Ok(())
}
