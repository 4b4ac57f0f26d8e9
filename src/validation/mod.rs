pub mod error;
pub mod rule;
pub mod schema;

pub use error::SchemaError;
pub use rule::Rule;
pub use schema::{lookup, Schema, SchemaBuilder};

/// Request body schemas for every endpoint that accepts one.
/// Constructed once in `main`; a declaration mistake stops the process before it serves.
#[derive(Debug, Clone)]
pub struct RequestSchemas {
    pub sign_up: Schema,
    pub login: Schema,
    pub create_room: Schema,
}

impl RequestSchemas {
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            sign_up: Schema::builder()
                .field("name", text())
                .field("email", text())
                .field("password", text())
                .build()?,
            login: Schema::builder()
                .field("email", text())
                .field("password", text())
                .build()?,
            create_room: Schema::builder()
                .field("number", text())
                .field("type", text())
                .field("capacity", whole_number(1_000))
                .field("price", whole_number(1_000_000_000))
                .build()?,
        })
    }
}

fn text() -> [Rule; 4] {
    [Rule::Required, Rule::String, Rule::NotEmpty, Rule::LessThan(256)]
}

fn whole_number(below: u64) -> [Rule; 4] {
    [Rule::Required, Rule::Integer, Rule::Positive, Rule::LessThan(below)]
}
