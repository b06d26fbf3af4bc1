//! Deck composition rules.
//!
//! `DeckRules` holds every limit the composition store and the save gate
//! enforce. `DeckRules::default()` is the Riftbound constructed format:
//! - 40 Main cards at most, 3 copies of any one card
//! - exactly 3 Battlefields (all different)
//! - exactly 12 Runes (duplicates allowed)
//! - exactly 1 Legend
//!
//! The store never hardcodes these numbers - it reads them from here.

use serde::{Deserialize, Serialize};

/// What happens when a quantity change asks for more copies than a cap allows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityPolicy {
    /// Add as many copies as fit and stop at the cap, without an error.
    #[default]
    Clamp,
    /// Refuse the whole change with a capacity error.
    Reject,
}

/// Composition limits for a deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRules {
    /// Maximum number of Main category cards.
    pub max_main_cards: usize,

    /// Maximum copies of a single Main card id.
    pub max_copies: usize,

    /// Battlefields required to save (also the Battlefield cap).
    pub battlefield_count: usize,

    /// Runes required to save (also the Rune cap).
    pub rune_count: usize,

    /// Minimum Main cards required to save.
    ///
    /// 1 means "non-empty". Set to `max_main_cards` for the strict
    /// full-deck variant.
    pub min_main_to_save: usize,

    /// Behaviour of `set_quantity` / `set_rune_quantity` past a cap.
    pub quantity_policy: QuantityPolicy,

    /// Name given to a fresh or reset working deck.
    pub default_deck_name: String,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            max_main_cards: 40,
            max_copies: 3,
            battlefield_count: 3,
            rune_count: 12,
            min_main_to_save: 1,
            quantity_policy: QuantityPolicy::Clamp,
            default_deck_name: "My New Deck".to_string(),
        }
    }
}

impl DeckRules {
    /// Require a full Main deck before saving.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.min_main_to_save = self.max_main_cards;
        self
    }

    /// Set the Main deck size cap.
    #[must_use]
    pub fn with_max_main_cards(mut self, max: usize) -> Self {
        self.max_main_cards = max;
        self
    }

    /// Set the per-card copy cap.
    #[must_use]
    pub fn with_max_copies(mut self, max: usize) -> Self {
        self.max_copies = max;
        self
    }

    /// Set the minimum Main size for saving.
    #[must_use]
    pub fn with_min_main_to_save(mut self, min: usize) -> Self {
        self.min_main_to_save = min;
        self
    }

    /// Set the quantity-change policy.
    #[must_use]
    pub fn with_quantity_policy(mut self, policy: QuantityPolicy) -> Self {
        self.quantity_policy = policy;
        self
    }

    /// Set the name used for fresh decks.
    #[must_use]
    pub fn with_default_deck_name(mut self, name: impl Into<String>) -> Self {
        self.default_deck_name = name.into();
        self
    }
}
