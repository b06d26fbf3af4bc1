//! Collaborators outside the deck core: catalog source and deck storage.
//!
//! The core never talks to a network itself. It shapes a `DeckPayload` and
//! hands it to a `DeckStorage`; it reads cards from a `CatalogSource`.
//! Both report failures as `TransportError`, which callers can tell apart
//! from the save gate's validation errors.
//!
//! `MemoryStorage` implements both traits in-process.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Catalog, Category, Color};
use crate::core::TransportError;
use crate::deck::{group_by_card, DeckPayload, TypeDistribution};

pub use memory::MemoryStorage;

/// Source of the card catalog.
pub trait CatalogSource {
    /// Load every card. No retries.
    fn fetch_catalog(&self) -> Result<Catalog, TransportError>;
}

/// Persistent deck storage.
pub trait DeckStorage {
    /// Store a new deck. The storage assigns the id and timestamps.
    fn create_deck(&mut self, payload: &DeckPayload) -> Result<SavedDeck, TransportError>;

    /// All saved decks.
    fn list_decks(&self) -> Result<Vec<SavedDeck>, TransportError>;

    /// One saved deck, `None` if the id is unknown.
    fn get_deck(&self, id: &str) -> Result<Option<SavedDeck>, TransportError>;

    /// Apply a partial update. Unknown ids are `TransportError::NotFound`.
    fn update_deck(&mut self, id: &str, update: &DeckUpdate) -> Result<SavedDeck, TransportError>;

    /// Delete a deck. Unknown ids are `TransportError::NotFound`.
    fn delete_deck(&mut self, id: &str) -> Result<(), TransportError>;
}

/// A persisted deck as returned by storage.
///
/// `card_ids` is flattened: Main, then Battlefield, Rune and Legend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedDeck {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub card_ids: Vec<CardId>,
    #[serde(default)]
    pub deck_colors: Vec<Color>,
    #[serde(default)]
    pub total_cost: u64,
    #[serde(default)]
    pub average_cost: f64,
    #[serde(default)]
    pub card_type_distribution: TypeDistribution,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Card counts of a saved deck per category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckBreakdown {
    pub regular: usize,
    pub battlefield: usize,
    pub legend: usize,
    pub rune: usize,
}

impl SavedDeck {
    /// Build a saved deck from a create request.
    #[must_use]
    pub fn from_payload(
        id: impl Into<String>,
        payload: &DeckPayload,
        timestamp: impl Into<String>,
    ) -> Self {
        let timestamp = timestamp.into();
        Self {
            id: id.into(),
            name: payload.name.clone(),
            description: Some(payload.description.clone()),
            card_ids: payload.card_ids.clone(),
            deck_colors: payload.deck_colors.clone(),
            total_cost: payload.total_cost,
            average_cost: payload.average_cost,
            card_type_distribution: payload.card_type_distribution.clone(),
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }

    /// Apply `update` and stamp `updated_at`.
    pub fn apply(&mut self, update: &DeckUpdate, timestamp: impl Into<String>) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(card_ids) = &update.card_ids {
            self.card_ids = card_ids.clone();
        }
        if let Some(colors) = &update.deck_colors {
            self.deck_colors = colors.clone();
        }
        if let Some(total) = update.total_cost {
            self.total_cost = total;
        }
        if let Some(average) = update.average_cost {
            self.average_cost = average;
        }
        if let Some(distribution) = &update.card_type_distribution {
            self.card_type_distribution = distribution.clone();
        }
        self.updated_at = timestamp.into();
    }

    /// Count cards per category. Ids missing from the catalog are skipped.
    #[must_use]
    pub fn breakdown(&self, catalog: &Catalog) -> DeckBreakdown {
        let mut breakdown = DeckBreakdown::default();
        for card in self.card_ids.iter().filter_map(|id| catalog.get(id.as_str())) {
            match card.category() {
                Category::Main => breakdown.regular += 1,
                Category::Battlefield => breakdown.battlefield += 1,
                Category::Legend => breakdown.legend += 1,
                Category::Rune => breakdown.rune += 1,
            }
        }
        breakdown
    }

    /// Cards with copy counts, first-seen order.
    #[must_use]
    pub fn cards_with_count<'c>(&self, catalog: &'c Catalog) -> Vec<(&'c Card, usize)> {
        group_by_card(&self.card_ids, catalog)
    }
}

/// Partial update of a saved deck. Unset parts are left as they are.
///
/// Cards and stats travel together: they can only be replaced from a
/// `DeckPayload`, which the builder produces after validation.
///
/// ```
/// use rift_deck::storage::DeckUpdate;
///
/// let update = DeckUpdate::rename("Jinx Burn").with_description("v2");
/// assert_eq!(update.to_json().unwrap(), r#"{"name":"Jinx Burn","description":"v2"}"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DeckUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_ids: Option<Vec<CardId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deck_colors: Option<Vec<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_cost: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_type_distribution: Option<TypeDistribution>,
}

impl DeckUpdate {
    /// An update that only changes the name.
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Replace name, description, cards and stats with a new payload.
    #[must_use]
    pub fn from_payload(payload: DeckPayload) -> Self {
        Self {
            name: Some(payload.name),
            description: Some(payload.description),
            card_ids: Some(payload.card_ids),
            deck_colors: Some(payload.deck_colors),
            total_cost: Some(payload.total_cost),
            average_cost: Some(payload.average_cost),
            card_type_distribution: Some(payload.card_type_distribution),
        }
    }

    /// Also change the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when applying this update changes nothing but `updated_at`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.card_ids.is_none()
    }

    /// JSON request body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Deserialize)]
struct DeckListResponse {
    #[serde(default)]
    decks: Vec<SavedDeck>,
}

/// Parse the deck-list endpoint's JSON body: `{"decks": [...]}`.
pub fn parse_deck_list(body: &str) -> Result<Vec<SavedDeck>, TransportError> {
    let response: DeckListResponse = serde_json::from_str(body)?;
    Ok(response.decks)
}
