//! In-process deck storage.
//!
//! `MemoryStorage` keeps decks in a `Vec` and serves a fixed catalog. It
//! stands in for the backend in tests and offline use.
//!
//! Deck ids look like the backend's (24 hex digits) and come from a seeded
//! ChaCha8 stream, so the same seed always yields the same ids.
//! Timestamps are a logical clock (`"1"`, `"2"`, ...), not wall time.

use std::cell::RefCell;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use super::{CatalogSource, DeckStorage, DeckUpdate, SavedDeck};
use crate::cards::Catalog;
use crate::core::TransportError;
use crate::deck::DeckPayload;

/// In-memory implementation of `CatalogSource` and `DeckStorage`.
#[derive(Clone, Debug)]
pub struct MemoryStorage {
    catalog: Catalog,
    decks: Vec<SavedDeck>,
    rng: ChaCha8Rng,
    clock: u64,
    /// Returned (once) by the next call, to simulate an outage.
    pending_failure: RefCell<Option<TransportError>>,
}

impl MemoryStorage {
    /// Create a storage serving `catalog`, with id seed 0.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_seed(catalog, 0)
    }

    /// Create a storage with a specific id seed.
    #[must_use]
    pub fn with_seed(catalog: Catalog, seed: u64) -> Self {
        Self {
            catalog,
            decks: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock: 0,
            pending_failure: RefCell::new(None),
        }
    }

    /// Make the next storage or catalog call fail with `err`.
    pub fn fail_next(&mut self, err: TransportError) {
        *self.pending_failure.get_mut() = Some(err);
    }

    /// Number of stored decks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Encode all stored decks with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransportError> {
        Ok(bincode::serialize(&self.decks)?)
    }

    /// Replace the stored decks with a `to_bytes` image.
    ///
    /// The clock moves past every loaded timestamp, so later writes never
    /// reuse one. Returns the number of decks loaded. On error nothing
    /// changes.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
        let decks: Vec<SavedDeck> = bincode::deserialize(bytes)?;
        let latest = decks
            .iter()
            .flat_map(|d| [&d.created_at, &d.updated_at])
            .filter_map(|stamp| stamp.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.clock = self.clock.max(latest);
        self.decks = decks;
        Ok(self.decks.len())
    }

    fn tick(&mut self) -> String {
        self.clock += 1;
        self.clock.to_string()
    }

    fn take_failure(&self) -> Result<(), TransportError> {
        match self.pending_failure.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn next_id(&mut self) -> String {
        loop {
            let bytes: [u8; 12] = self.rng.gen();
            let id: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            if !self.decks.iter().any(|d| d.id == id) {
                return id;
            }
        }
    }
}

impl CatalogSource for MemoryStorage {
    fn fetch_catalog(&self) -> Result<Catalog, TransportError> {
        self.take_failure()?;
        Ok(self.catalog.clone())
    }
}

impl DeckStorage for MemoryStorage {
    fn create_deck(&mut self, payload: &DeckPayload) -> Result<SavedDeck, TransportError> {
        self.take_failure()?;

        let id = self.next_id();
        let deck = SavedDeck::from_payload(id, payload, self.tick());
        self.decks.push(deck.clone());
        Ok(deck)
    }

    fn list_decks(&self) -> Result<Vec<SavedDeck>, TransportError> {
        self.take_failure()?;
        Ok(self.decks.clone())
    }

    fn get_deck(&self, id: &str) -> Result<Option<SavedDeck>, TransportError> {
        self.take_failure()?;
        Ok(self.decks.iter().find(|d| d.id == id).cloned())
    }

    fn update_deck(
        &mut self,
        id: &str,
        update: &DeckUpdate,
    ) -> Result<SavedDeck, TransportError> {
        self.take_failure()?;

        let index = self
            .decks
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| TransportError::NotFound(id.to_string()))?;
        let timestamp = self.tick();
        let deck = &mut self.decks[index];
        deck.apply(update, timestamp);
        info!("updated deck `{}` ({})", deck.name, deck.id);
        Ok(deck.clone())
    }

    fn delete_deck(&mut self, id: &str) -> Result<(), TransportError> {
        self.take_failure()?;

        let index = self
            .decks
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| TransportError::NotFound(id.to_string()))?;
        let deck = self.decks.remove(index);
        info!("deleted deck `{}` ({})", deck.name, deck.id);
        Ok(())
    }
}
