//! Save gate: checks a working deck before it is handed to storage.
//!
//! Checks run in a fixed order and stop at the first failure, so exactly
//! one error is reported per attempt:
//!
//! 1. name is not blank
//! 2. exactly `battlefield_count` Battlefields
//! 3. a Legend is set
//! 4. exactly `rune_count` Runes
//! 5. at least `min_main_to_save` Main cards

use serde::{Deserialize, Serialize};

use super::stats::TypeDistribution;
use super::working::WorkingDeck;
use crate::cards::{CardId, Color};
use crate::core::{DeckError, DeckRules};

/// Run the save checks.
pub fn validate(deck: &WorkingDeck, rules: &DeckRules) -> Result<(), DeckError> {
    if deck.name().trim().is_empty() {
        return Err(DeckError::MissingName);
    }

    if deck.battlefield().len() != rules.battlefield_count {
        return Err(DeckError::BattlefieldCount {
            required: rules.battlefield_count,
            actual: deck.battlefield().len(),
        });
    }

    if deck.legend().is_none() {
        return Err(DeckError::LegendMissing);
    }

    if deck.runes().len() != rules.rune_count {
        return Err(DeckError::RuneCount {
            required: rules.rune_count,
            actual: deck.runes().len(),
        });
    }

    // An empty Main deck never saves, whatever the configured minimum.
    let required = rules.min_main_to_save.max(1);
    if deck.main_len() < required {
        return Err(DeckError::EmptyDeck {
            required,
            actual: deck.main_len(),
        });
    }

    Ok(())
}

/// Request body for creating a deck.
///
/// Field names match the backend's deck document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckPayload {
    pub name: String,
    pub description: String,
    /// Main ++ Battlefield ++ Rune ++ [Legend].
    pub card_ids: Vec<CardId>,
    pub deck_colors: Vec<Color>,
    pub total_cost: u64,
    pub average_cost: f64,
    pub card_type_distribution: TypeDistribution,
}

impl DeckPayload {
    /// Validate `deck` and build its payload.
    ///
    /// Crate-only: the stats are trusted as-is, which holds for decks
    /// built by `DeckBuilder`. Callers go through `DeckBuilder::payload`.
    pub(crate) fn from_deck(deck: &WorkingDeck, rules: &DeckRules) -> Result<Self, DeckError> {
        validate(deck, rules)?;

        let stats = deck.stats().clone();
        Ok(Self {
            name: deck.name().trim().to_string(),
            description: deck.description().to_string(),
            card_ids: deck.flattened_ids(),
            deck_colors: stats.colors,
            total_cost: stats.total_cost,
            average_cost: stats.average_cost,
            card_type_distribution: stats.type_distribution,
        })
    }

    /// JSON request body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
