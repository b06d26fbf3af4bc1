//! Card system: definitions and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Catalog identifier of a card
//! - `CardType`: Printed card type (Spell, Unit, Rune, ...)
//! - `Category`: Deck category a type maps to (Main, Battlefield, Legend, Rune)
//! - `Card`: Read-only catalog card
//! - `Catalog`: Card lookup by id
//!
//! The type-to-category table lives in `CardType::category` and nowhere else.

pub mod catalog;
pub mod definition;

pub use catalog::Catalog;
pub use definition::{Card, CardId, CardType, Category, Color, Colors, UnknownCardType};
