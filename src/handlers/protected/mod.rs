// handlers/protected/mod.rs - Endpoints behind a role gate
//
// The gate is attached as a route layer in crate::app, so it runs before any
// of these handlers touch the body.
pub mod rooms;

pub use rooms::{create_room_post, rooms_get};
