//! Core types shared by every module: composition rules and errors.

pub mod config;
pub mod error;

pub use config::{DeckRules, QuantityPolicy};
pub use error::{DeckError, ErrorKind, TransportError};
