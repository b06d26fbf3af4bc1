//! # rift-deck
//!
//! Deck composition engine for the Riftbound deck builder.
//!
//! ## Design Principles
//!
//! 1. **Checks Before Writes**: Every deck mutation validates first and
//!    either applies fully or not at all. Rejections are typed errors, never
//!    panics.
//!
//! 2. **Derived, Not Stored**: Deck statistics are a pure function of the
//!    Main card list and the catalog, recomputed after every Main change.
//!
//! 3. **Configuration Over Convention**: Limits live in `DeckRules`; the
//!    store reads them instead of hardcoding 40/3/12.
//!
//! ## Architecture
//!
//! - **Composition store** (`DeckBuilder`): owns one `WorkingDeck`.
//! - **Aggregation** (`compute_stats`): colours, costs, type distribution.
//! - **Save gate** (`validate`): exact-count checks before persistence.
//! - **Collaborators** (`DeckStorage`, `CatalogSource`): the backend,
//!   behind traits.
//!
//! ## Modules
//!
//! - `core`: Rules configuration and errors
//! - `cards`: Card definitions and the catalog
//! - `deck`: Working deck, builder, statistics, validation
//! - `storage`: Persistence traits and an in-memory backend

pub mod cards;
pub mod core;
pub mod deck;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{DeckError, DeckRules, ErrorKind, QuantityPolicy, TransportError};

pub use crate::cards::{Card, CardId, CardType, Catalog, Category, Color};

pub use crate::deck::{
    compute_stats, cost_curve, validate, CostCurve, DeckBuilder, DeckPayload, DerivedStats,
    WorkingDeck,
};

pub use crate::storage::{
    CatalogSource, DeckBreakdown, DeckStorage, DeckUpdate, MemoryStorage, SavedDeck,
};
