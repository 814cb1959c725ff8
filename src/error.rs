//! Error types shared by the stores, the quiz and the JSON export.

use thiserror::Error;

use crate::models::CardId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ID: flashcard {0} not found")]
    NotFound(CardId),

    #[error("No flashcard IDs left to assign")]
    IdsExhausted,

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

/// Caller-supplied values the core refuses to coerce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a numeric ID")]
    InvalidId(String),

    #[error("'{0}' is not a valid score")]
    InvalidScore(String),

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("{field} must not contain {found:?}")]
    ForbiddenCharacter { field: &'static str, found: char },
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
