//! Application errors.

use pedicare_core::{BookingError, CoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// Growth form rejected. Displays the calculator's fixed message.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Json(_)
                | Self::Core(_)
                | Self::Validation(_)
                | Self::Booking(_)
                | Self::InvalidDate(_)
        )
    }
}
