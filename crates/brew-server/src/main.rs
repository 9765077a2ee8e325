mod api;
mod middleware;

use std::sync::Arc;

use brew_airtable::AirtableStoreRepository;
use brew_core::{AppConfig, InMemoryStoreRepository, StoreRepository};
use brew_places::NearbyStoreFetcher;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = brew_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let stores = build_store_repository(&config)?;
    let fetcher = Arc::new(NearbyStoreFetcher::from_config(&config)?);
    let app = build_app(AppState { stores, fetcher });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "brew-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Airtable when credentials are configured. Development falls back to an
/// in-memory table so the server runs without an account.
fn build_store_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn StoreRepository>> {
    match &config.airtable {
        Some(settings) => {
            let repo = AirtableStoreRepository::from_settings(
                settings,
                config.http_timeout_secs,
                &config.user_agent,
            )?;
            tracing::info!(
                base_id = %settings.base_id,
                table = %settings.table,
                "using Airtable store repository"
            );
            Ok(Arc::new(repo))
        }
        None if config.is_development() => {
            tracing::warn!(
                "AIRTABLE_API_KEY or AIRTABLE_BASE_ID not set; votes are kept in memory and lost on restart"
            );
            Ok(Arc::new(InMemoryStoreRepository::new()))
        }
        None => anyhow::bail!(
            "AIRTABLE_API_KEY and AIRTABLE_BASE_ID are required outside development"
        ),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
