//! Error types for the solitaire engine
//!
//! Rule outcomes (illegal drops, empty piles, undo on an empty log) are plain
//! return values and never show up here. These errors only come from
//! construction, configuration loading and host-side parsing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolitaireError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown pile: {0}")]
    UnknownPile(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SolitaireError>;
