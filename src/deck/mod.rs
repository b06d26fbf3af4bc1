//! Deck building: composition store, aggregation and the save gate.
//!
//! ## Key Types
//!
//! - `DeckBuilder`: Owns a `WorkingDeck` and enforces composition limits
//! - `WorkingDeck`: The in-progress deck (Main ids + special categories)
//! - `DerivedStats`: Colours, total/average cost, type distribution
//! - `DeckPayload`: What gets sent to storage on save
//!
//! Data flows one way: catalog cards go in through `DeckBuilder::add_card`,
//! every Main change re-runs `compute_stats`, and `validate` runs only when
//! saving.

pub mod builder;
pub mod stats;
pub mod validate;
pub mod working;

pub use builder::{group_by_card, DeckBuilder};
pub use stats::{compute_stats, cost_curve, CostCurve, DerivedStats, TypeDistribution};
pub use validate::{validate, DeckPayload};
pub use working::WorkingDeck;
