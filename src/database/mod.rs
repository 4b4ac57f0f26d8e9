pub mod customers;
pub mod manager;
pub mod memory;
pub mod models;
pub mod rooms;

pub use customers::{CustomerRepository, PgCustomerRepository};
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{InMemoryCustomerRepository, InMemoryRoomRepository};
pub use rooms::{PgRoomRepository, RoomRepository};
