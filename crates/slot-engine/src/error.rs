//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// The working-hours policy cannot produce a meaningful scan.
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A calendar event carried a start or end that could not be parsed.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid confirmation token: {0}")]
    InvalidToken(String),

    /// The scheduler configuration file was not valid TOML.
    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
