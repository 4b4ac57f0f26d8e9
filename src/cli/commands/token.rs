use anyhow::Context;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims, Role};
use crate::config::{AppConfig, ACCESS_TOKEN_TTL_DAYS};
use crate::secrets::{self, JWT_SIGNING_ACCESS_TOKEN};

/// Print a signed token to stdout. ADMIN tokens are only ever issued this way.
pub async fn handle(
    role: Role,
    customer_id: Option<Uuid>,
    ttl_days: Option<i64>,
    config: AppConfig,
) -> anyhow::Result<()> {
    let ttl_days = ttl_days.unwrap_or(config.security.access_token_ttl_days);
    anyhow::ensure!(
        ACCESS_TOKEN_TTL_DAYS.contains(&ttl_days),
        "--ttl-days must be within {}..={}",
        ACCESS_TOKEN_TTL_DAYS.start(),
        ACCESS_TOKEN_TTL_DAYS.end()
    );

    let secret = secrets::from_config(&config.secrets)
        .get(JWT_SIGNING_ACCESS_TOKEN)
        .await
        .context("signing secret is not available")?;

    let claims = Claims::new(customer_id, Some(role), Utc::now(), Duration::days(ttl_days));
    let token = generate_jwt(&claims, &secret)?;

    tracing::info!("Issued {} token valid for {} days", role, ttl_days);
    println!("{}", token);
    Ok(())
}
