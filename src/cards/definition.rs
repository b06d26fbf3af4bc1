//! Card definitions - read-only catalog data.
//!
//! A `Card` is what the catalog hands us: identity, display data and the
//! three attributes the deck rules read (`card_type`, `cost`, `color`).
//! Cards are never mutated by the deck builder.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Catalog identifier of a card (e.g. `OGN-001`).
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets hash maps keyed by `CardId` be queried with `&str`.
impl Borrow<str> for CardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Where a card goes when added to a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Counts toward the Main deck size and copy limits.
    Main,
    Battlefield,
    Legend,
    Rune,
}

impl Category {
    /// True for Battlefield, Legend and Rune.
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, Category::Main)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Main => "Main",
            Category::Battlefield => "Battlefield",
            Category::Legend => "Legend",
            Category::Rune => "Rune",
        };
        f.write_str(name)
    }
}

/// Card type as printed on the card.
///
/// Serialized with the catalog's display names (`"Champion Unit"`, ...).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CardType {
    Spell,
    Unit,
    #[serde(rename = "Champion Unit")]
    ChampionUnit,
    #[serde(rename = "Signature Unit")]
    SignatureUnit,
    #[serde(rename = "Signature Spell")]
    SignatureSpell,
    Gear,
    Token,
    Battlefield,
    Legend,
    Rune,
}

impl CardType {
    /// Every type that belongs to the Main category, in display order.
    pub const MAIN: [CardType; 7] = [
        CardType::Spell,
        CardType::Unit,
        CardType::ChampionUnit,
        CardType::SignatureUnit,
        CardType::SignatureSpell,
        CardType::Gear,
        CardType::Token,
    ];

    /// Every card type.
    pub const ALL: [CardType; 10] = [
        CardType::Spell,
        CardType::Unit,
        CardType::ChampionUnit,
        CardType::SignatureUnit,
        CardType::SignatureSpell,
        CardType::Gear,
        CardType::Token,
        CardType::Battlefield,
        CardType::Legend,
        CardType::Rune,
    ];

    /// The deck category this type is placed in.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            CardType::Battlefield => Category::Battlefield,
            CardType::Legend => Category::Legend,
            CardType::Rune => Category::Rune,
            _ => Category::Main,
        }
    }

    /// Display name, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardType::Spell => "Spell",
            CardType::Unit => "Unit",
            CardType::ChampionUnit => "Champion Unit",
            CardType::SignatureUnit => "Signature Unit",
            CardType::SignatureSpell => "Signature Spell",
            CardType::Gear => "Gear",
            CardType::Token => "Token",
            CardType::Battlefield => "Battlefield",
            CardType::Legend => "Legend",
            CardType::Rune => "Rune",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known card type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown card type `{0}`")]
pub struct UnknownCardType(pub String);

impl FromStr for CardType {
    type Err = UnknownCardType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownCardType(s.to_string()))
    }
}

/// Colour (domain) tag, e.g. `Fury` or `Calm`.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Colour tags of a single card. Almost every card has one or two.
pub type Colors = SmallVec<[Color; 2]>;

/// A catalog card.
///
/// ## Example
///
/// ```
/// use rift_deck::cards::{Card, CardType, Category};
///
/// let jinx = Card::new("OGN-001", "Jinx", CardType::ChampionUnit)
///     .with_cost(4)
///     .with_color("Fury");
///
/// assert_eq!(jinx.category(), Category::Main);
/// assert_eq!(jinx.cost, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier within the catalog.
    pub card_id: CardId,

    pub name: String,

    #[serde(default)]
    pub image_path: String,

    #[serde(default)]
    pub set_name: String,

    pub card_type: CardType,

    /// Energy cost. Missing or null costs in catalog data read as 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cost: u32,

    #[serde(default)]
    pub color: Colors,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

impl Card {
    /// Create a card with cost 0, no colours and empty display data.
    #[must_use]
    pub fn new(card_id: impl Into<CardId>, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            card_id: card_id.into(),
            name: name.into(),
            image_path: String::new(),
            set_name: String::new(),
            card_type,
            cost: 0,
            color: Colors::new(),
            rarity: None,
            description: None,
        }
    }

    /// Set the cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Add a colour tag (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color.push(color.into());
        self
    }

    /// Set the set name (builder pattern).
    #[must_use]
    pub fn with_set(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = set_name.into();
        self
    }

    /// Set the image path (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = image_path.into();
        self
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    /// Check whether this card has the given id.
    #[must_use]
    pub fn has_id(&self, card_id: &str) -> bool {
        self.card_id.as_str() == card_id
    }

    /// Deck category of this card.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.card_type.category()
    }

    /// Check whether the card carries a colour tag.
    #[must_use]
    pub fn has_color(&self, tag: &str) -> bool {
        self.color.iter().any(|c| c.as_str() == tag)
    }
}
