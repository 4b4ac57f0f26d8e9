use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::Customer;
use crate::database::{CustomerRepository, DatabaseError};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

#[derive(Debug, Error)]
pub enum SignUpError {
    #[error("name must be at least 3 characters long")]
    NameTooShort,

    #[error("email is invalid")]
    InvalidEmail,

    #[error("password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("email address is already associated with another account")]
    EmailTaken,

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Background task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Database error: {0}")]
    Database(DatabaseError),
}

#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct SignUpService {
    customers: Arc<dyn CustomerRepository>,
    hash_cost: u32,
}

impl SignUpService {
    pub fn new(customers: Arc<dyn CustomerRepository>, hash_cost: u32) -> Self {
        Self { customers, hash_cost }
    }

    /// Register a customer. Field rules are checked in order (name, email, password)
    /// and the first failure is returned.
    pub async fn sign_up(&self, input: SignUpInput) -> Result<(), SignUpError> {
        if input.name.chars().count() < 3 {
            return Err(SignUpError::NameTooShort);
        }

        if !EMAIL.is_match(&input.email) {
            return Err(SignUpError::InvalidEmail);
        }

        if input.password.chars().count() < 6 {
            return Err(SignUpError::PasswordTooShort);
        }

        if self
            .customers
            .exists_by_email(&input.email)
            .await
            .map_err(SignUpError::Database)?
        {
            return Err(SignUpError::EmailTaken);
        }

        let cost = self.hash_cost;
        let password = input.password;
        let hashed_password =
            tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

        let customer = Customer {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            hashed_password,
        };

        // A concurrent sign-up can pass the existence check; the store's unique key settles it
        match self.customers.create(&customer).await {
            Ok(()) => {
                tracing::info!("Customer {} signed up", customer.id);
                Ok(())
            }
            Err(DatabaseError::UniqueViolation(_)) => Err(SignUpError::EmailTaken),
            Err(e) => Err(SignUpError::Database(e)),
        }
    }
}
