use thiserror::Error;

#[derive(Error, Debug)]
pub enum QbError {
    /// The factory seeds rules from the first configured field.
    #[error("Configuration error: at least one field is required")]
    EmptyFields,

    #[error("Configuration error: at least one operator is required")]
    EmptyOperators,

    #[error("Configuration error: at least one combinator is required")]
    EmptyCombinators,

    #[error("Unknown property: {0} (expected field, operator, value or combinator)")]
    UnknownProperty(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, QbError>;
