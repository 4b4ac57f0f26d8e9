use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::Customer;

/// Persistence operations the customer use-cases depend on
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Store a new customer. Returns `UniqueViolation` when the email is taken.
    async fn create(&self, customer: &Customer) -> Result<(), DatabaseError>;

    async fn find_one_by_email(&self, email: &str) -> Result<Option<Customer>, DatabaseError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError>;
}

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO customers (id, name, email, password) VALUES ($1, $2, $3, $4)")
            .bind(customer.id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.hashed_password)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_insert(e, "customers_email_key"))?;

        Ok(())
    }

    async fn find_one_by_email(&self, email: &str) -> Result<Option<Customer>, DatabaseError> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, password AS hashed_password FROM customers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM customers WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }
}
