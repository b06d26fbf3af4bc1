//! Error types for deck building and persistence.
//!
//! Every failure is recoverable: a rejected mutation leaves the working deck
//! exactly as it was, and a failed save keeps the deck for another attempt.
//! Errors carry enough context (card, limit, count) to render a precise
//! message to the user.
//!
//! ## Kinds
//!
//! - `Capacity`: a category or copy limit is reached
//! - `Duplicate`: the category forbids a second copy (Battlefield)
//! - `Validation`: the save gate refused the deck
//! - `Transport`: a catalog or storage collaborator failed
//! - `Input`: the caller asked for something meaningless (unknown card,
//!   wrong category, negative quantity)

use thiserror::Error;

use crate::cards::{CardId, Category};

/// Coarse classification of a `DeckError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Capacity,
    Duplicate,
    Validation,
    Transport,
    Input,
}

/// Failure reported by a catalog or deck storage collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The collaborator could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The requested deck does not exist.
    #[error("deck `{0}` not found")]
    NotFound(String),

    /// The collaborator refused the request (e.g. a backend `detail` message).
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Parse(err.to_string())
    }
}

impl From<bincode::Error> for TransportError {
    fn from(err: bincode::Error) -> Self {
        TransportError::Parse(err.to_string())
    }
}

/// Error returned by deck composition, validation and save operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    // === Capacity ===
    #[error("cannot add {card_id}: at most {max} main cards allowed")]
    DeckFull { card_id: CardId, max: usize },

    #[error("cannot add more than {max} copies of {name}")]
    CopyLimit {
        card_id: CardId,
        name: String,
        max: usize,
    },

    #[error("cannot add {card_id}: {category} limit of {max} reached")]
    CategoryFull {
        card_id: CardId,
        category: Category,
        max: usize,
    },

    // === Duplicate ===
    #[error("{name} is already in your {category} cards")]
    DuplicateCard {
        card_id: CardId,
        name: String,
        category: Category,
    },

    // === Validation ===
    #[error("please enter a deck name")]
    MissingName,

    #[error("you must have exactly {required} Battlefield cards (have {actual})")]
    BattlefieldCount { required: usize, actual: usize },

    #[error("you must have exactly 1 Legend card")]
    LegendMissing,

    #[error("you must have exactly {required} Rune cards (have {actual})")]
    RuneCount { required: usize, actual: usize },

    #[error("please add at least {required} cards to your deck (have {actual})")]
    EmptyDeck { required: usize, actual: usize },

    // === Input ===
    #[error("card `{0}` is not in the catalog")]
    UnknownCard(CardId),

    #[error("{card_id} is a {actual} card, expected {expected}")]
    WrongCategory {
        card_id: CardId,
        expected: Category,
        actual: Category,
    },

    #[error("invalid quantity {requested} for {card_id}")]
    InvalidQuantity { card_id: CardId, requested: i64 },

    // === Transport ===
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl DeckError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeckError::DeckFull { .. }
            | DeckError::CopyLimit { .. }
            | DeckError::CategoryFull { .. } => ErrorKind::Capacity,
            DeckError::DuplicateCard { .. } => ErrorKind::Duplicate,
            DeckError::MissingName
            | DeckError::BattlefieldCount { .. }
            | DeckError::LegendMissing
            | DeckError::RuneCount { .. }
            | DeckError::EmptyDeck { .. } => ErrorKind::Validation,
            DeckError::UnknownCard(_)
            | DeckError::WrongCategory { .. }
            | DeckError::InvalidQuantity { .. } => ErrorKind::Input,
            DeckError::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Check whether the save gate produced this error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
