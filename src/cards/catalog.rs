//! Card catalog for definition lookup.
//!
//! The `Catalog` holds every card the backend knows about. It is read-only
//! input to the deck builder: lookup by `CardId` (or plain `&str`) and
//! iteration in catalog order.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::warn;

use super::definition::{Card, CardId, CardType};
use crate::core::TransportError;

/// Body of the catalog endpoint: `{"cards": [...]}`.
#[derive(Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    cards: Vec<Card>,
}

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use rift_deck::cards::{Card, CardType, Catalog};
///
/// let catalog = Catalog::from_cards(vec![
///     Card::new("OGN-001", "Jinx", CardType::ChampionUnit).with_cost(4),
/// ]);
///
/// let found = catalog.get("OGN-001").unwrap();
/// assert_eq!(found.name, "Jinx");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// Cards in catalog order.
    cards: Vec<Card>,
    /// card_id -> index into `cards`
    index: FxHashMap<CardId, usize>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a card list.
    ///
    /// The first card with a given id wins; later duplicates are dropped.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card);
        }
        catalog
    }

    /// Parse the catalog endpoint's JSON body.
    ///
    /// A missing `cards` field is an empty catalog. Unknown card types are
    /// parse errors.
    pub fn from_json(body: &str) -> Result<Self, TransportError> {
        let response: CatalogResponse = serde_json::from_str(body)?;
        Ok(Self::from_cards(response.cards))
    }

    /// Register a card definition.
    ///
    /// Returns `false` (and keeps the existing card) if the id is taken.
    pub fn register(&mut self, card: Card) -> bool {
        if self.index.contains_key(&card.card_id) {
            warn!("duplicate card id {} in catalog, keeping the first", card.card_id);
            return false;
        }
        self.index.insert(card.card_id.clone(), self.cards.len());
        self.cards.push(card);
        true
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Check if a card ID is in the catalog.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Find cards by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.card_type == card_type)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }
}

impl FromIterator<Card> for Catalog {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self::from_cards(iter)
    }
}
