use thiserror::Error;

/// Mistakes in a schema declaration. Raised while building schemas at startup.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaError {
    #[error("schema field name must not be empty")]
    EmptyFieldName,

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("field '{0}' is declared without rules")]
    NoRules(String),
}
