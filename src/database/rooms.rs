use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Room, RoomType};

/// Persistence operations the room use-cases depend on
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Store a new room. Returns `UniqueViolation` when the number is taken.
    async fn create(&self, room: &Room) -> Result<(), DatabaseError>;

    async fn exists_by_room_number(&self, number: &str) -> Result<bool, DatabaseError>;

    /// All rooms, oldest first
    async fn find_all(&self) -> Result<Vec<Room>, DatabaseError>;
}

#[derive(Debug, FromRow)]
struct RoomRow {
    id: Uuid,
    number: String,
    #[sqlx(rename = "type")]
    room_type: String,
    capacity: i32,
    price: i64,
}

impl TryFrom<RoomRow> for Room {
    type Error = DatabaseError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let room_type = row
            .room_type
            .parse::<RoomType>()
            .map_err(|_| corrupt(format!("room {} has type '{}'", row.id, row.room_type)))?;
        let capacity = u16::try_from(row.capacity)
            .map_err(|_| corrupt(format!("room {} has capacity {}", row.id, row.capacity)))?;
        let price = u64::try_from(row.price)
            .map_err(|_| corrupt(format!("room {} has price {}", row.id, row.price)))?;

        Ok(Room::restore(row.id, row.number, room_type, capacity, price))
    }
}

fn corrupt(message: String) -> DatabaseError {
    DatabaseError::CorruptRow(message)
}

pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn create(&self, room: &Room) -> Result<(), DatabaseError> {
        let price = i64::try_from(room.price)
            .map_err(|_| corrupt(format!("room price {} out of range", room.price)))?;

        sqlx::query(
            "INSERT INTO rooms (id, number, type, capacity, price) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(room.id)
        .bind(&room.number)
        .bind(room.room_type.as_str())
        .bind(i32::from(room.capacity))
        .bind(price)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_insert(e, "rooms_number_key"))?;

        Ok(())
    }

    async fn exists_by_room_number(&self, number: &str) -> Result<bool, DatabaseError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM rooms WHERE number = $1)")
                .bind(number)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    async fn find_all(&self) -> Result<Vec<Room>, DatabaseError> {
        let rows = sqlx::query_as::<_, RoomRow>(
            "SELECT id, number, type, capacity, price FROM rooms ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Room::try_from).collect()
    }
}
