use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::app::{app, AppState};
use crate::cli::StoreKind;
use crate::config::{AppConfig, SecurityConfig, ACCESS_TOKEN_TTL_DAYS, PASSWORD_HASH_COSTS};
use crate::database::{
    CustomerRepository, DatabaseManager, InMemoryCustomerRepository, InMemoryRoomRepository,
    PgCustomerRepository, PgRoomRepository, RoomRepository,
};
use crate::secrets::{self, SecretsProvider, POSTGRES_URL};

pub async fn handle(
    port: Option<u16>,
    store: StoreKind,
    mut config: AppConfig,
) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    check_security(&config.security)?;

    info!("Starting hotel booking API in {:?} mode", config.environment);

    let secrets = secrets::from_config(&config.secrets);
    let (customers, rooms) = stores(store, &config, secrets.as_ref()).await?;

    let state = AppState::new(customers, rooms, secrets, &config.security)
        .context("request schemas are malformed")?;
    let router = app(state, config.security.enable_cors);

    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Hotel booking API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

/// Reject settings that would fail every sign-up or mint unusable tokens
fn check_security(security: &SecurityConfig) -> anyhow::Result<()> {
    anyhow::ensure!(
        PASSWORD_HASH_COSTS.contains(&security.password_hash_cost),
        "SECURITY_PASSWORD_HASH_COST must be within {}..={}, got {}",
        PASSWORD_HASH_COSTS.start(),
        PASSWORD_HASH_COSTS.end(),
        security.password_hash_cost
    );
    anyhow::ensure!(
        ACCESS_TOKEN_TTL_DAYS.contains(&security.access_token_ttl_days),
        "SECURITY_ACCESS_TOKEN_TTL_DAYS must be within {}..={}, got {}",
        ACCESS_TOKEN_TTL_DAYS.start(),
        ACCESS_TOKEN_TTL_DAYS.end(),
        security.access_token_ttl_days
    );
    Ok(())
}

async fn stores(
    store: StoreKind,
    config: &AppConfig,
    secrets: &dyn SecretsProvider,
) -> anyhow::Result<(Arc<dyn CustomerRepository>, Arc<dyn RoomRepository>)> {
    match store {
        StoreKind::Memory => {
            warn!("Using in-memory stores, all data is lost on exit");
            Ok((
                Arc::new(InMemoryCustomerRepository::new()),
                Arc::new(InMemoryRoomRepository::new()),
            ))
        }
        StoreKind::Postgres => {
            let url = match &config.database.url {
                Some(url) => url.clone(),
                None => secrets
                    .get(POSTGRES_URL)
                    .await
                    .context("DATABASE_URL is unset and the secrets provider has no POSTGRES_URL")?,
            };

            let pool = DatabaseManager::connect(&url, &config.database).await?;
            DatabaseManager::health_check(&pool)
                .await
                .context("database is not reachable")?;

            Ok((
                Arc::new(PgCustomerRepository::new(pool.clone())),
                Arc::new(PgRoomRepository::new(pool)),
            ))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
