//! Deck statistics derived from the Main card list.
//!
//! `compute_stats` is a pure function of the Main card ids and the catalog.
//! The composition store calls it after every Main mutation and keeps the
//! result as an immutable snapshot; nothing else ever writes stats.
//!
//! Ids that no longer resolve in the catalog are skipped everywhere, so a
//! deck built against an older catalog still aggregates cleanly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardType, Catalog, Color};

/// Count of Main cards per card type.
///
/// Every Main type is always present (0 when absent) so the payload has a
/// stable shape.
pub type TypeDistribution = BTreeMap<CardType, usize>;

fn empty_distribution() -> TypeDistribution {
    CardType::MAIN.iter().map(|&t| (t, 0)).collect()
}

/// Aggregates over the Main deck.
///
/// Field names match the backend's deck document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    /// Colours of all resolved cards, first-seen order, no duplicates.
    #[serde(rename = "deck_colors")]
    pub colors: Vec<Color>,

    pub total_cost: u64,

    /// `total_cost / resolved count`, rounded to 2 decimals. 0 for no cards.
    pub average_cost: f64,

    #[serde(rename = "card_type_distribution")]
    pub type_distribution: TypeDistribution,
}

impl Default for DerivedStats {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            total_cost: 0,
            average_cost: 0.0,
            type_distribution: empty_distribution(),
        }
    }
}

impl DerivedStats {
    /// Count for a single card type.
    #[must_use]
    pub fn type_count(&self, card_type: CardType) -> usize {
        self.type_distribution.get(&card_type).copied().unwrap_or(0)
    }
}

/// Cards for `card_ids` in order, skipping ids the catalog lacks.
fn resolve<'c, 'a>(
    card_ids: impl IntoIterator<Item = &'a CardId>,
    catalog: &'c Catalog,
) -> Vec<&'c Card> {
    card_ids
        .into_iter()
        .filter_map(|id| catalog.get(id.as_str()))
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute deck statistics for a Main card list.
///
/// ## Example
///
/// ```
/// use rift_deck::cards::{Card, CardId, CardType, Catalog};
/// use rift_deck::deck::compute_stats;
///
/// let catalog = Catalog::from_cards(vec![
///     Card::new("A", "Alpha", CardType::Unit).with_cost(2).with_color("Fury"),
///     Card::new("B", "Beta", CardType::Spell).with_cost(4).with_color("Calm"),
/// ]);
/// let ids = [CardId::new("A"), CardId::new("A"), CardId::new("B")];
///
/// let stats = compute_stats(&ids, &catalog);
/// assert_eq!(stats.total_cost, 8);
/// assert_eq!(stats.average_cost, 2.67);
/// ```
#[must_use]
pub fn compute_stats<'a>(
    card_ids: impl IntoIterator<Item = &'a CardId>,
    catalog: &Catalog,
) -> DerivedStats {
    let mut stats = DerivedStats::default();
    let mut resolved = 0usize;

    for card in resolve(card_ids, catalog) {
        resolved += 1;
        stats.total_cost += u64::from(card.cost);
        *stats.type_distribution.entry(card.card_type).or_insert(0) += 1;

        for color in &card.color {
            if !stats.colors.contains(color) {
                stats.colors.push(color.clone());
            }
        }
    }

    if resolved > 0 {
        stats.average_cost = round2(stats.total_cost as f64 / resolved as f64);
    }

    stats
}

/// Highest cost with its own bucket; anything above shares the last one.
pub const COST_CURVE_MAX: u32 = 7;

/// Number of Main cards at each cost: buckets `0..=6` and `7+`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCurve {
    buckets: [usize; COST_CURVE_MAX as usize + 1],
}

impl CostCurve {
    /// Count in the bucket that `cost` falls into.
    #[must_use]
    pub fn count(&self, cost: u32) -> usize {
        self.buckets[cost.min(COST_CURVE_MAX) as usize]
    }

    /// Largest bucket, used to scale a chart. 0 for an empty curve.
    #[must_use]
    pub fn peak(&self) -> usize {
        self.buckets.iter().copied().max().unwrap_or(0)
    }

    /// Total cards counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.iter().sum()
    }

    /// Buckets with their labels (`"0"` .. `"6"`, `"7+"`).
    pub fn iter(&self) -> impl Iterator<Item = (String, usize)> + '_ {
        self.buckets.iter().enumerate().map(|(cost, &count)| {
            let label = if cost as u32 == COST_CURVE_MAX {
                format!("{}+", COST_CURVE_MAX)
            } else {
                cost.to_string()
            };
            (label, count)
        })
    }
}

/// Compute the cost curve for a Main card list.
#[must_use]
pub fn cost_curve<'a>(
    card_ids: impl IntoIterator<Item = &'a CardId>,
    catalog: &Catalog,
) -> CostCurve {
    let mut curve = CostCurve::default();
    for card in resolve(card_ids, catalog) {
        curve.buckets[card.cost.min(COST_CURVE_MAX) as usize] += 1;
    }
    curve
}
