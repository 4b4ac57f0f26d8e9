pub mod customer;
pub mod room;

pub use customer::Customer;
pub use room::{Room, RoomError, RoomType};
