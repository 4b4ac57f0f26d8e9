use chrono::{Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims, JwtError, Role};
use crate::database::{CustomerRepository, DatabaseError};
use crate::secrets::{SecretsError, SecretsProvider, JWT_SIGNING_ACCESS_TOKEN};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("Secrets error: {0}")]
    Secrets(#[from] SecretsError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Background task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutput {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub access_token: String,
}

pub struct LoginService {
    customers: Arc<dyn CustomerRepository>,
    secrets: Arc<dyn SecretsProvider>,
    token_ttl: Duration,
}

impl LoginService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        secrets: Arc<dyn SecretsProvider>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            customers,
            secrets,
            token_ttl,
        }
    }

    /// Check credentials and issue a CUSTOMER access token signed with the current secret
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutput, LoginError> {
        let customer = self
            .customers
            .find_one_by_email(email)
            .await?
            .ok_or(LoginError::InvalidCredentials)?;

        let candidate = password.to_string();
        let hashed = customer.hashed_password.clone();
        let matches =
            tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &hashed)).await?;

        match matches {
            Ok(true) => {}
            Ok(false) => return Err(LoginError::InvalidCredentials),
            Err(e) => {
                tracing::warn!(
                    "Stored password hash for customer {} is unusable: {}",
                    customer.id,
                    e
                );
                return Err(LoginError::InvalidCredentials);
            }
        }

        let secret = self.secrets.get(JWT_SIGNING_ACCESS_TOKEN).await?;
        let claims =
            Claims::new(Some(customer.id), Some(Role::Customer), Utc::now(), self.token_ttl);
        let access_token = generate_jwt(&claims, &secret)?;

        tracing::debug!("Issued access token for customer {}", customer.id);

        Ok(LoginOutput {
            customer_id: customer.id,
            customer_name: customer.name,
            access_token,
        })
    }
}
