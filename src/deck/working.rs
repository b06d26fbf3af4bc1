//! The working deck - the in-progress deck of one builder session.
//!
//! Collections are `im::Vector`s so a UI can take a snapshot after every
//! mutation for O(1) and re-render from it while the builder keeps going.
//!
//! Fields are only writable through `DeckBuilder`, which is what keeps the
//! composition invariants true. A deck can be serialized for display but
//! never decoded back, so no deck exists that the builder did not make:
//!
//! ```compile_fail
//! fn decodable<T: serde::de::DeserializeOwned>() {}
//!
//! decodable::<rift_deck::deck::WorkingDeck>();
//! ```

use im::Vector;
use serde::Serialize;

use super::stats::DerivedStats;
use crate::cards::{Card, CardId};

/// In-progress deck: Main card ids, the three special categories and
/// metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkingDeck {
    pub(crate) name: String,
    pub(crate) description: String,
    /// Main category card ids, duplicates allowed up to the copy cap.
    pub(crate) main: Vector<CardId>,
    pub(crate) battlefield: Vector<Card>,
    pub(crate) rune: Vector<Card>,
    pub(crate) legend: Option<Card>,
    /// Always `compute_stats(main, catalog)`.
    pub(crate) stats: DerivedStats,
}

impl WorkingDeck {
    /// Create an empty deck with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            main: Vector::new(),
            battlefield: Vector::new(),
            rune: Vector::new(),
            legend: None,
            stats: DerivedStats::default(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Main card ids in insertion order.
    #[must_use]
    pub fn main_ids(&self) -> &Vector<CardId> {
        &self.main
    }

    #[must_use]
    pub fn battlefield(&self) -> &Vector<Card> {
        &self.battlefield
    }

    #[must_use]
    pub fn runes(&self) -> &Vector<Card> {
        &self.rune
    }

    #[must_use]
    pub fn legend(&self) -> Option<&Card> {
        self.legend.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &DerivedStats {
        &self.stats
    }

    /// Number of Main cards.
    #[must_use]
    pub fn main_len(&self) -> usize {
        self.main.len()
    }

    /// Copies of `card_id` in the Main deck.
    #[must_use]
    pub fn main_copies(&self, card_id: &str) -> usize {
        self.main.iter().filter(|id| id.as_str() == card_id).count()
    }

    /// Copies of `card_id` among the Runes.
    #[must_use]
    pub fn rune_copies(&self, card_id: &str) -> usize {
        self.rune.iter().filter(|c| c.card_id.as_str() == card_id).count()
    }

    /// Check whether a Battlefield with this id is present.
    #[must_use]
    pub fn has_battlefield(&self, card_id: &str) -> bool {
        self.battlefield.iter().any(|c| c.card_id.as_str() == card_id)
    }

    /// True when nothing has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
            && self.battlefield.is_empty()
            && self.rune.is_empty()
            && self.legend.is_none()
    }

    /// All card ids as stored by the backend: Main, then Battlefield, then
    /// Rune, then the Legend.
    #[must_use]
    pub fn flattened_ids(&self) -> Vec<CardId> {
        let mut ids = Vec::with_capacity(
            self.main.len() + self.battlefield.len() + self.rune.len() + 1,
        );
        ids.extend(self.main.iter().cloned());
        ids.extend(self.battlefield.iter().map(|c| c.card_id.clone()));
        ids.extend(self.rune.iter().map(|c| c.card_id.clone()));
        ids.extend(self.legend.iter().map(|c| c.card_id.clone()));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    #[test]
    fn test_new_deck_is_empty() {
        let deck = WorkingDeck::new("My New Deck");
        assert_eq!(deck.name(), "My New Deck");
        assert_eq!(deck.description(), "");
        assert!(deck.is_empty());
        assert_eq!(deck.main_len(), 0);
        assert_eq!(deck.legend(), None);
        assert_eq!(deck.stats(), &DerivedStats::default());
        assert!(deck.flattened_ids().is_empty());
    }

    #[test]
    fn test_flattened_order() {
        let mut deck = WorkingDeck::new("Order");
        deck.main.push_back(CardId::new("m1"));
        deck.main.push_back(CardId::new("m1"));
        let field = Card::new("b1", "Grove", CardType::Battlefield);
        let rune = Card::new("r1", "Fury Rune", CardType::Rune);
        deck.battlefield.push_back(field);
        deck.rune.push_back(rune);
        deck.legend = Some(Card::new("l1", "Jinx, Loose Cannon", CardType::Legend));

        let ids: Vec<_> = deck.flattened_ids().into_iter().map(|id| id.0).collect();
        assert_eq!(ids, vec!["m1", "m1", "b1", "r1", "l1"]);
    }

    #[test]
    fn test_copy_counts() {
        let mut deck = WorkingDeck::new("Counts");
        let rune = Card::new("r1", "Calm Rune", CardType::Rune);
        deck.rune.push_back(rune.clone());
        deck.rune.push_back(rune);
        deck.main.push_back(CardId::new("m1"));

        assert_eq!(deck.rune_copies("r1"), 2);
        assert_eq!(deck.main_copies("m1"), 1);
        assert_eq!(deck.main_copies("r1"), 0);
        assert!(!deck.has_battlefield("r1"));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut deck = WorkingDeck::new("Snap");
        deck.main.push_back(CardId::new("m1"));

        let snapshot = deck.clone();
        deck.main.push_back(CardId::new("m2"));

        assert_eq!(snapshot.main_len(), 1);
        assert_eq!(deck.main_len(), 2);
    }
}
