use thiserror::Error;

use crate::model::lineup::Slot;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid lineup: {0}")]
    InvalidLineup(String),

    #[error("Slot {slot} is locked; player {player} tipped off or tips off within the hour")]
    LockedSlot { slot: Slot, player: String },

    #[error("Invalid week schedule: {0}")]
    InvalidWeeks(String),

    #[error("Invalid matchup: {0}")]
    InvalidMatchup(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Worker task failed: {0}")]
    Task(String),
}

impl AppError {
    /// Whether the error is a rejected submission rather than an infrastructure failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::InvalidLineup(_)
                | AppError::LockedSlot { .. }
                | AppError::InvalidWeeks(_)
                | AppError::InvalidMatchup(_)
                | AppError::NotFound(_)
        )
    }
}
