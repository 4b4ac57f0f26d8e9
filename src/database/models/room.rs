use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Business-rule violations raised while constructing a [`Room`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error("invalid room number format. Please enter a three-digit room number (e.g. 101) where the first digit indicates the floor number, and the last two digits represent the room number on that floor")]
    InvalidNumber,

    #[error("room type must be SINGLE, DOUBLE, TWIN or SUITE")]
    InvalidType,

    #[error("invalid room capacity. Please enter a capacity of at least one to accommodate guests")]
    InvalidCapacity,

    #[error("invalid room price. Please enter a value greater than zero to ensure proper pricing")]
    InvalidPrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomType {
    Single,
    Double,
    Twin,
    Suite,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "SINGLE",
            RoomType::Double => "DOUBLE",
            RoomType::Twin => "TWIN",
            RoomType::Suite => "SUITE",
        }
    }
}

impl FromStr for RoomType {
    type Err = RoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SINGLE" => Ok(RoomType::Single),
            "DOUBLE" => Ok(RoomType::Double),
            "TWIN" => Ok(RoomType::Twin),
            "SUITE" => Ok(RoomType::Suite),
            _ => Err(RoomError::InvalidType),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable room. Only obtainable through [`Room::new`] or by loading a stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub id: Uuid,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u16,
    pub price: u64,
}

impl Room {
    /// Checks run in a fixed order (number, type, capacity, price) and the first
    /// violation wins.
    pub fn new(
        number: &str,
        room_type: &str,
        capacity: u16,
        price: u64,
    ) -> Result<Self, RoomError> {
        if !is_room_number_valid(number) {
            return Err(RoomError::InvalidNumber);
        }

        let room_type = room_type.parse::<RoomType>()?;

        if capacity == 0 {
            return Err(RoomError::InvalidCapacity);
        }

        if price == 0 {
            return Err(RoomError::InvalidPrice);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            number: number.to_string(),
            room_type,
            capacity,
            price,
        })
    }

    /// Rehydrate a room that was validated before it was stored
    pub fn restore(
        id: Uuid,
        number: String,
        room_type: RoomType,
        capacity: u16,
        price: u64,
    ) -> Self {
        Self {
            id,
            number,
            room_type,
            capacity,
            price,
        }
    }
}

// Only the length and the leading floor digit are enforced; the last two
// characters are unconstrained.
fn is_room_number_valid(number: &str) -> bool {
    number.chars().count() == 3 && number.starts_with('1')
}
