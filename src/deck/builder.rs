//! Deck composition store.
//!
//! `DeckBuilder` owns the working deck of one session and is the only way
//! to change it. Every operation is atomic: all limits are checked before
//! anything is written, so a rejected call leaves the deck untouched.
//! Every Main mutation recomputes the derived stats.
//!
//! ## Limits (default rules)
//!
//! | Category    | Limit                                   |
//! |-------------|-----------------------------------------|
//! | Main        | 40 cards, 3 copies per id               |
//! | Battlefield | 3 cards, no duplicate ids               |
//! | Rune        | 12 cards, duplicates allowed            |
//! | Legend      | 1 card                                  |
//!
//! ## Usage
//!
//! ```
//! use rift_deck::cards::{Card, CardType, Catalog};
//! use rift_deck::deck::DeckBuilder;
//!
//! let catalog = Catalog::from_cards(vec![
//!     Card::new("OGN-001", "Jinx", CardType::ChampionUnit).with_cost(4),
//! ]);
//! let mut builder = DeckBuilder::new(&catalog);
//!
//! let jinx = catalog.get("OGN-001").unwrap();
//! builder.add_card(jinx).unwrap();
//! builder.add_card(jinx).unwrap();
//!
//! assert_eq!(builder.deck().main_copies("OGN-001"), 2);
//! assert_eq!(builder.deck().stats().total_cost, 8);
//! ```

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use super::stats::{compute_stats, cost_curve, CostCurve};
use super::validate::{validate, DeckPayload};
use super::working::WorkingDeck;
use crate::cards::{Card, CardId, Catalog, Category};
use crate::core::{DeckError, DeckRules, QuantityPolicy};
use crate::storage::{DeckStorage, SavedDeck};

/// Composition store for one deck-building session.
#[derive(Clone, Debug)]
pub struct DeckBuilder<'c> {
    catalog: &'c Catalog,
    rules: DeckRules,
    deck: WorkingDeck,
}

impl<'c> DeckBuilder<'c> {
    /// Start a session with the default rules.
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_rules(catalog, DeckRules::default())
    }

    /// Start a session with custom rules.
    #[must_use]
    pub fn with_rules(catalog: &'c Catalog, rules: DeckRules) -> Self {
        let deck = WorkingDeck::new(rules.default_deck_name.clone());
        Self {
            catalog,
            rules,
            deck,
        }
    }

    /// Current working deck.
    #[must_use]
    pub fn deck(&self) -> &WorkingDeck {
        &self.deck
    }

    /// Cheap copy of the working deck for rendering.
    #[must_use]
    pub fn snapshot(&self) -> WorkingDeck {
        self.deck.clone()
    }

    #[must_use]
    pub fn rules(&self) -> &DeckRules {
        &self.rules
    }

    #[must_use]
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.deck.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.deck.description = description.into();
    }

    fn refresh_stats(&mut self) {
        self.deck.stats = compute_stats(&self.deck.main, self.catalog);
    }

    // === Adding ===

    /// Add one copy of `card` to the category its type maps to.
    pub fn add_card(&mut self, card: &Card) -> Result<(), DeckError> {
        let result = self.check_add(card);
        if let Err(err) = &result {
            debug!("rejected {} ({}): {}", card.card_id, card.category(), err);
            return result;
        }

        match card.category() {
            Category::Main => {
                self.deck.main.push_back(card.card_id.clone());
                self.refresh_stats();
            }
            Category::Battlefield => self.deck.battlefield.push_back(card.clone()),
            Category::Rune => self.deck.rune.push_back(card.clone()),
            Category::Legend => self.deck.legend = Some(card.clone()),
        }
        debug!("added {} to {}", card.card_id, card.category());
        Ok(())
    }

    fn check_add(&self, card: &Card) -> Result<(), DeckError> {
        let rules = &self.rules;
        let full = |category: Category, max: usize| DeckError::CategoryFull {
            card_id: card.card_id.clone(),
            category,
            max,
        };

        match card.category() {
            Category::Main => {
                if self.deck.main.len() >= rules.max_main_cards {
                    return Err(DeckError::DeckFull {
                        card_id: card.card_id.clone(),
                        max: rules.max_main_cards,
                    });
                }
                if self.deck.main_copies(card.card_id.as_str()) >= rules.max_copies {
                    return Err(DeckError::CopyLimit {
                        card_id: card.card_id.clone(),
                        name: card.name.clone(),
                        max: rules.max_copies,
                    });
                }
            }
            Category::Battlefield => {
                if self.deck.battlefield.len() >= rules.battlefield_count {
                    return Err(full(Category::Battlefield, rules.battlefield_count));
                }
                if self.deck.has_battlefield(card.card_id.as_str()) {
                    return Err(DeckError::DuplicateCard {
                        card_id: card.card_id.clone(),
                        name: card.name.clone(),
                        category: Category::Battlefield,
                    });
                }
            }
            Category::Rune => {
                if self.deck.rune.len() >= rules.rune_count {
                    return Err(full(Category::Rune, rules.rune_count));
                }
            }
            Category::Legend => {
                if self.deck.legend.is_some() {
                    return Err(full(Category::Legend, 1));
                }
            }
        }
        Ok(())
    }

    // === Removing ===

    /// Remove every copy of `card_id` from the Main deck.
    ///
    /// Returns the number of copies removed (0 if absent).
    pub fn remove_card(&mut self, card_id: &str) -> usize {
        let before = self.deck.main.len();
        self.deck.main.retain(|id| id.as_str() != card_id);
        let removed = before - self.deck.main.len();
        if removed > 0 {
            self.refresh_stats();
            debug!("removed {removed} x {card_id} from Main");
        }
        removed
    }

    /// Remove a card from a category.
    ///
    /// Battlefield and Rune drop every entry with `card_id`. Legend is
    /// cleared whatever `card_id` says. Main behaves like `remove_card`.
    /// Returns the number of cards removed.
    pub fn remove_special_card(&mut self, category: Category, card_id: &str) -> usize {
        let removed = match category {
            Category::Main => return self.remove_card(card_id),
            Category::Battlefield => {
                let before = self.deck.battlefield.len();
                self.deck.battlefield.retain(|c| !c.has_id(card_id));
                before - self.deck.battlefield.len()
            }
            Category::Rune => {
                let before = self.deck.rune.len();
                self.deck.rune.retain(|c| !c.has_id(card_id));
                before - self.deck.rune.len()
            }
            Category::Legend => usize::from(self.deck.legend.take().is_some()),
        };
        if removed > 0 {
            debug!("removed {removed} x {card_id} from {category}");
        }
        removed
    }

    // === Quantities ===

    /// Set the number of Main copies of `card_id`.
    ///
    /// Decreasing drops copies from the end of the deck. Increasing adds
    /// copies up to the copy cap and the deck size cap; with
    /// `QuantityPolicy::Clamp` the excess is silently dropped, with
    /// `QuantityPolicy::Reject` nothing is added and a capacity error is
    /// returned. Returns the resulting copy count.
    pub fn set_quantity(&mut self, card_id: &str, quantity: i64) -> Result<usize, DeckError> {
        let target = self.parse_quantity(card_id, quantity)?;
        let current = self.deck.main_copies(card_id);

        if target < current {
            let excess = current - target;
            remove_last_matching(&mut self.deck.main, excess, |id| id.as_str() == card_id);
            self.refresh_stats();
            debug!("set {card_id} to {target} copies");
            return Ok(target);
        }
        if target == current {
            return Ok(current);
        }

        let card = self.resolve(card_id, Category::Main)?;
        let (max_copies, max_main) = (self.rules.max_copies, self.rules.max_main_cards);
        let wanted = target - current;
        let copy_room = max_copies.saturating_sub(current);
        let deck_room = max_main.saturating_sub(self.deck.main.len());
        let added = wanted.min(copy_room).min(deck_room);

        if added < wanted && self.rules.quantity_policy == QuantityPolicy::Reject {
            let err = if copy_room < wanted {
                DeckError::CopyLimit {
                    card_id: card.card_id.clone(),
                    name: card.name.clone(),
                    max: max_copies,
                }
            } else {
                DeckError::DeckFull {
                    card_id: card.card_id.clone(),
                    max: max_main,
                }
            };
            debug!("rejected quantity {quantity} for {card_id}: {err}");
            return Err(err);
        }

        if added > 0 {
            for _ in 0..added {
                self.deck.main.push_back(card.card_id.clone());
            }
            self.refresh_stats();
        }
        let copies = current + added;
        debug!("set {card_id} to {copies} copies (asked {target})");
        Ok(copies)
    }

    /// Set the number of Rune copies of `card_id`.
    ///
    /// Same mechanics as `set_quantity`, capped by the total Rune count
    /// instead of a per-card copy limit. Returns the resulting copy count.
    pub fn set_rune_quantity(&mut self, card_id: &str, quantity: i64) -> Result<usize, DeckError> {
        let target = self.parse_quantity(card_id, quantity)?;
        let current = self.deck.rune_copies(card_id);

        if target < current {
            let excess = current - target;
            remove_last_matching(&mut self.deck.rune, excess, |c| c.has_id(card_id));
            debug!("set rune {card_id} to {target} copies");
            return Ok(target);
        }
        if target == current {
            return Ok(current);
        }

        let card = self.resolve(card_id, Category::Rune)?;
        let wanted = target - current;
        let room = self.rules.rune_count.saturating_sub(self.deck.rune.len());
        let added = wanted.min(room);

        if added < wanted && self.rules.quantity_policy == QuantityPolicy::Reject {
            debug!("rejected rune quantity {quantity} for {card_id}");
            return Err(DeckError::CategoryFull {
                card_id: card.card_id.clone(),
                category: Category::Rune,
                max: self.rules.rune_count,
            });
        }

        for _ in 0..added {
            self.deck.rune.push_back(card.clone());
        }
        let copies = current + added;
        debug!("set rune {card_id} to {copies} copies (asked {target})");
        Ok(copies)
    }

    fn parse_quantity(&self, card_id: &str, quantity: i64) -> Result<usize, DeckError> {
        usize::try_from(quantity).map_err(|_| DeckError::InvalidQuantity {
            card_id: CardId::new(card_id),
            requested: quantity,
        })
    }

    fn resolve(&self, card_id: &str, expected: Category) -> Result<&'c Card, DeckError> {
        let card = self
            .catalog
            .get(card_id)
            .ok_or_else(|| DeckError::UnknownCard(CardId::new(card_id)))?;
        if card.category() != expected {
            return Err(DeckError::WrongCategory {
                card_id: card.card_id.clone(),
                expected,
                actual: card.category(),
            });
        }
        Ok(card)
    }

    // === Queries ===

    /// Copies of `card` held in its category.
    #[must_use]
    pub fn card_count(&self, card: &Card) -> usize {
        let id = card.card_id.as_str();
        match card.category() {
            Category::Main => self.deck.main_copies(id),
            Category::Battlefield => usize::from(self.deck.has_battlefield(id)),
            Category::Rune => self.deck.rune_copies(id),
            Category::Legend => match &self.deck.legend {
                Some(legend) if legend.has_id(id) => 1,
                _ => 0,
            },
        }
    }

    /// Check whether one more copy of `card` fits its category.
    ///
    /// Battlefield duplicates are not considered; `add_card` still rejects
    /// them.
    #[must_use]
    pub fn can_add(&self, card: &Card) -> bool {
        let rules = &self.rules;
        match card.category() {
            Category::Main => {
                self.deck.main.len() < rules.max_main_cards
                    && self.deck.main_copies(card.card_id.as_str()) < rules.max_copies
            }
            Category::Battlefield => self.deck.battlefield.len() < rules.battlefield_count,
            Category::Rune => self.deck.rune.len() < rules.rune_count,
            Category::Legend => self.deck.legend.is_none(),
        }
    }

    /// Main cards with their copy counts, in first-added order.
    ///
    /// Ids missing from the catalog are skipped.
    #[must_use]
    pub fn main_cards_with_count(&self) -> Vec<(&'c Card, usize)> {
        group_by_card(&self.deck.main, self.catalog)
    }

    /// Cost curve of the Main deck.
    #[must_use]
    pub fn cost_curve(&self) -> CostCurve {
        cost_curve(&self.deck.main, self.catalog)
    }

    // === Saving ===

    /// Run the save gate against the current deck.
    pub fn validate(&self) -> Result<(), DeckError> {
        validate(&self.deck, &self.rules)
    }

    /// Validate and build the create-deck request.
    pub fn payload(&self) -> Result<DeckPayload, DeckError> {
        DeckPayload::from_deck(&self.deck, &self.rules)
    }

    /// Validate, persist and reset.
    ///
    /// Storage is not called when validation fails. The deck is reset only
    /// after storage confirms; on any error it is left as it was.
    pub fn save<S>(&mut self, storage: &mut S) -> Result<SavedDeck, DeckError>
    where
        S: DeckStorage + ?Sized,
    {
        let payload = self.payload().inspect_err(|err| {
            warn!("deck `{}` not saved: {}", self.deck.name, err);
        })?;

        let saved = storage.create_deck(&payload).map_err(|err| {
            warn!("saving deck `{}` failed: {}", payload.name, err);
            DeckError::from(err)
        })?;

        info!(
            "saved deck `{}` as {} ({} cards)",
            saved.name,
            saved.id,
            saved.card_ids.len()
        );
        self.reset();
        Ok(saved)
    }

    /// Restore the empty defaults.
    pub fn reset(&mut self) {
        self.deck = WorkingDeck::new(self.rules.default_deck_name.clone());
    }
}

/// Remove the last `count` items matching `pred`.
fn remove_last_matching<T, F>(items: &mut im::Vector<T>, count: usize, pred: F)
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    let doomed: Vec<usize> = items
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, item)| pred(item))
        .map(|(i, _)| i)
        .take(count)
        .collect();
    // Descending order keeps the remaining indices valid.
    for i in doomed {
        items.remove(i);
    }
}

/// Group card ids by card, keeping first-seen order. Unresolved ids are
/// skipped.
pub fn group_by_card<'c, 'a>(
    card_ids: impl IntoIterator<Item = &'a CardId>,
    catalog: &'c Catalog,
) -> Vec<(&'c Card, usize)> {
    let mut grouped: Vec<(&'c Card, usize)> = Vec::new();
    let mut slots: FxHashMap<&'c str, usize> = FxHashMap::default();

    for id in card_ids {
        let Some(card) = catalog.get(id.as_str()) else {
            continue;
        };
        match slots.get(card.card_id.as_str()) {
            Some(&slot) => grouped[slot].1 += 1,
            None => {
                slots.insert(card.card_id.as_str(), grouped.len());
                grouped.push((card, 1));
            }
        }
    }
    grouped
}
