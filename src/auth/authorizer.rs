use serde_json::{Map, Value};
use std::sync::Arc;

use super::{validate_jwt, Role};
use crate::secrets::{SecretsProvider, JWT_SIGNING_ACCESS_TOKEN};

/// Answers role questions about raw access tokens.
///
/// Every call fetches the signing secret again, so a rotated secret applies to
/// the very next request. Any failure along the way (secret lookup, parsing,
/// signature, expiry) is reported as "not permitted" rather than as an error.
#[derive(Clone)]
pub struct TokenAuthorizer {
    secrets: Arc<dyn SecretsProvider>,
}

impl TokenAuthorizer {
    pub fn new(secrets: Arc<dyn SecretsProvider>) -> Self {
        Self { secrets }
    }

    pub async fn is_admin(&self, token: &str) -> bool {
        matches!(self.role_claim(token).await.as_deref(), Some("ADMIN"))
    }

    /// Admins are customers too
    pub async fn is_customer(&self, token: &str) -> bool {
        matches!(
            self.role_claim(token).await.as_deref(),
            Some("ADMIN") | Some("CUSTOMER")
        )
    }

    /// Whether `token` grants at least `required`
    pub async fn permits(&self, token: &str, required: Role) -> bool {
        match required {
            Role::Admin => self.is_admin(token).await,
            Role::Customer => self.is_customer(token).await,
        }
    }

    async fn role_claim(&self, token: &str) -> Option<String> {
        let secret = match self.secrets.get(JWT_SIGNING_ACCESS_TOKEN).await {
            Ok(secret) => secret,
            Err(e) => {
                tracing::warn!("Token signing secret unavailable: {}", e);
                return None;
            }
        };

        let claims: Map<String, Value> = match validate_jwt(token, &secret) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Rejected access token: {}", e);
                return None;
            }
        };

        claims.get("role").and_then(Value::as_str).map(str::to_string)
    }
}
