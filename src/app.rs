use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenAuthorizer;
use crate::config::SecurityConfig;
use crate::database::{CustomerRepository, RoomRepository};
use crate::handlers::{protected, public};
use crate::middleware::{require_admin, require_customer};
use crate::secrets::SecretsProvider;
use crate::services::{LoginService, RoomService, SignUpService};
use crate::validation::{RequestSchemas, SchemaError};

/// Everything a handler needs. Built once at startup, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub schemas: Arc<RequestSchemas>,
    pub authorizer: TokenAuthorizer,
    pub sign_up: Arc<SignUpService>,
    pub login: Arc<LoginService>,
    pub rooms: Arc<RoomService>,
}

impl AppState {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        rooms: Arc<dyn RoomRepository>,
        secrets: Arc<dyn SecretsProvider>,
        security: &SecurityConfig,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            schemas: Arc::new(RequestSchemas::new()?),
            authorizer: TokenAuthorizer::new(secrets.clone()),
            sign_up: Arc::new(SignUpService::new(customers.clone(), security.password_hash_cost)),
            login: Arc::new(LoginService::new(
                customers,
                secrets,
                chrono::Duration::days(security.access_token_ttl_days),
            )),
            rooms: Arc::new(RoomService::new(rooms)),
        })
    }
}

pub fn app(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/health", get(public::health_get))
        .merge(public_routes())
        // Role gated
        .merge(admin_routes(&state))
        .merge(customer_routes(&state))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/sign-up", post(public::sign_up_post))
        .route("/api/login-with-email-and-password", post(public::login_post))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/create-room", post(protected::create_room_post))
        .route_layer(from_fn_with_state(state.authorizer.clone(), require_admin))
}

fn customer_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/rooms", get(protected::rooms_get))
        .route_layer(from_fn_with_state(state.authorizer.clone(), require_customer))
}
