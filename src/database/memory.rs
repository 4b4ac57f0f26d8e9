// In-process stores. Used by the test suites and by `serve --store memory`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::customers::CustomerRepository;
use super::manager::DatabaseError;
use super::models::{Customer, Room};
use super::rooms::RoomRepository;

#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Customer> {
        self.customers.read().await.clone()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<(), DatabaseError> {
        let mut customers = self.customers.write().await;
        if customers.iter().any(|c| c.email == customer.email) {
            return Err(DatabaseError::UniqueViolation("customers_email_key".to_string()));
        }
        customers.push(customer.clone());
        Ok(())
    }

    async fn find_one_by_email(&self, email: &str) -> Result<Option<Customer>, DatabaseError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().any(|c| c.email == email))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRoomRepository {
    rooms: RwLock<Vec<Room>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, room: &Room) -> Result<(), DatabaseError> {
        let mut rooms = self.rooms.write().await;
        if rooms.iter().any(|r| r.number == room.number) {
            return Err(DatabaseError::UniqueViolation("rooms_number_key".to_string()));
        }
        rooms.push(room.clone());
        Ok(())
    }

    async fn exists_by_room_number(&self, number: &str) -> Result<bool, DatabaseError> {
        let rooms = self.rooms.read().await;
        Ok(rooms.iter().any(|r| r.number == number))
    }

    async fn find_all(&self) -> Result<Vec<Room>, DatabaseError> {
        Ok(self.rooms.read().await.clone())
    }
}
