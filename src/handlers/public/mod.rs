// handlers/public/mod.rs - Endpoints that need no access token
pub mod health;
pub mod login;
pub mod sign_up;

pub use health::health_get;
pub use login::login_post;
pub use sign_up::sign_up_post;
