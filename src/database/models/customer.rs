use sqlx::FromRow;
use uuid::Uuid;

/// A registered customer. `hashed_password` is a bcrypt hash, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
}
