use std::sync::Arc;
use thiserror::Error;

use crate::database::models::{Room, RoomError};
use crate::database::{DatabaseError, RoomRepository};

#[derive(Debug, Error)]
pub enum CreateRoomError {
    #[error("the room number '{0}' is already in use. Please assign another room number")]
    NumberTaken(String),

    #[error(transparent)]
    Invalid(#[from] RoomError),

    #[error("Database error: {0}")]
    Database(DatabaseError),
}

#[derive(Debug, Error)]
pub enum ListRoomsError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

#[derive(Debug, Clone)]
pub struct CreateRoomInput {
    pub number: String,
    pub room_type: String,
    pub capacity: u16,
    pub price: u64,
}

/// Room inventory use-cases
pub struct RoomService {
    rooms: Arc<dyn RoomRepository>,
}

impl RoomService {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn create_room(&self, input: CreateRoomInput) -> Result<Room, CreateRoomError> {
        if self
            .rooms
            .exists_by_room_number(&input.number)
            .await
            .map_err(CreateRoomError::Database)?
        {
            return Err(CreateRoomError::NumberTaken(input.number));
        }

        let room = Room::new(&input.number, &input.room_type, input.capacity, input.price)?;

        match self.rooms.create(&room).await {
            Ok(()) => {
                tracing::info!("Created room {} ({})", room.number, room.room_type);
                Ok(room)
            }
            Err(DatabaseError::UniqueViolation(_)) => {
                Err(CreateRoomError::NumberTaken(room.number))
            }
            Err(e) => Err(CreateRoomError::Database(e)),
        }
    }

    /// All rooms, oldest first
    pub async fn list_rooms(&self) -> Result<Vec<Room>, ListRoomsError> {
        Ok(self.rooms.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::RoomType;
    use crate::database::InMemoryRoomRepository;
    use async_trait::async_trait;

    fn input(number: &str, room_type: &str, capacity: u16, price: u64) -> CreateRoomInput {
        CreateRoomInput {
            number: number.to_string(),
            room_type: room_type.to_string(),
            capacity,
            price,
        }
    }

    struct UnavailableRooms;

    #[async_trait]
    impl RoomRepository for UnavailableRooms {
        async fn create(&self, _room: &Room) -> Result<(), DatabaseError> {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
        }

        async fn exists_by_room_number(&self, _number: &str) -> Result<bool, DatabaseError> {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
        }

        async fn find_all(&self) -> Result<Vec<Room>, DatabaseError> {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn creates_and_lists_rooms_in_order() {
        let service = RoomService::new(Arc::new(InMemoryRoomRepository::new()));

        let first = service.create_room(input("101", "SINGLE", 1, 100)).await.unwrap();
        service.create_room(input("102", "SUITE", 4, 450)).await.unwrap();

        assert_eq!(first.room_type, RoomType::Single);

        let rooms = service.list_rooms().await.unwrap();
        let numbers: Vec<&str> = rooms.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["101", "102"]);
        assert_eq!(rooms[1].capacity, 4);
        assert_eq!(rooms[1].price, 450);
    }

    #[tokio::test]
    async fn rejects_duplicate_number() {
        let service = RoomService::new(Arc::new(InMemoryRoomRepository::new()));
        service.create_room(input("101", "SINGLE", 1, 100)).await.unwrap();

        let err = service.create_room(input("101", "DOUBLE", 2, 200)).await.unwrap_err();
        assert!(matches!(err, CreateRoomError::NumberTaken(ref n) if n == "101"));
        assert_eq!(
            err.to_string(),
            "the room number '101' is already in use. Please assign another room number"
        );
        assert_eq!(service.list_rooms().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn surfaces_domain_errors() {
        let service = RoomService::new(Arc::new(InMemoryRoomRepository::new()));

        let err = service.create_room(input("201", "SINGLE", 1, 100)).await.unwrap_err();
        assert!(matches!(err, CreateRoomError::Invalid(RoomError::InvalidNumber)));

        let err = service.create_room(input("101", "PENTHOUSE", 1, 100)).await.unwrap_err();
        assert!(matches!(err, CreateRoomError::Invalid(RoomError::InvalidType)));

        let err = service.create_room(input("101", "TWIN", 0, 100)).await.unwrap_err();
        assert_eq!(err.to_string(), RoomError::InvalidCapacity.to_string());

        assert!(service.list_rooms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failures_are_unexpected() {
        let service = RoomService::new(Arc::new(UnavailableRooms));

        assert!(matches!(
            service.create_room(input("101", "SINGLE", 1, 100)).await,
            Err(CreateRoomError::Database(_))
        ));
        assert!(matches!(service.list_rooms().await, Err(ListRoomsError::Database(_))));
    }
}
