//! Deck building session tests.
//!
//! These tests drive a `DeckBuilder` the way the builder page does:
//! - Adding cards of every category from a catalog
//! - Quantity changes from the deck list
//! - Saving through a storage collaborator and resetting

use rift_deck::cards::{Card, CardId, CardType, Catalog, Category};
use rift_deck::core::{DeckError, ErrorKind, TransportError};
use rift_deck::deck::DeckBuilder;
use rift_deck::storage::{CatalogSource, DeckStorage, DeckUpdate, MemoryStorage};

/// A small Origins-like catalog.
fn origins() -> Catalog {
    let mut cards = vec![
        Card::new("OGN-001", "Jinx, Rebel", CardType::ChampionUnit)
            .with_cost(4)
            .with_color("Fury"),
        Card::new("OGN-002", "Get Excited!", CardType::Spell)
            .with_cost(2)
            .with_color("Fury"),
        Card::new("OGN-003", "Tideturner", CardType::Unit)
            .with_cost(3)
            .with_color("Calm"),
        Card::new("OGN-004", "Long Sword", CardType::Gear).with_cost(1),
        Card::new("OGN-005", "Sprite", CardType::Token),
        Card::new("OGN-006", "Jinx's Rocket", CardType::SignatureSpell)
            .with_cost(5)
            .with_color("Fury"),
        Card::new("OGN-100", "Jinx, Loose Cannon", CardType::Legend)
            .with_color("Fury")
            .with_color("Chaos"),
        Card::new("OGN-101", "Fury Rune", CardType::Rune).with_color("Fury"),
        Card::new("OGN-102", "Chaos Rune", CardType::Rune).with_color("Chaos"),
    ];
    let fields = ["The Grand Plaza", "Zaun Warrens", "Obelisk of Power", "Vilemaw's Lair"];
    for (i, name) in fields.iter().enumerate() {
        cards.push(Card::new(format!("OGN-2{i:02}"), *name, CardType::Battlefield));
    }
    for i in 0..20 {
        let id = format!("OGN-3{i:02}");
        let color = if i % 2 == 0 { "Fury" } else { "Chaos" };
        cards.push(
            Card::new(id, format!("Recruit {i}"), CardType::Unit)
                .with_cost(i % 6)
                .with_color(color),
        );
    }
    Catalog::from_cards(cards)
}

fn add(builder: &mut DeckBuilder<'_>, catalog: &Catalog, id: &str) -> Result<(), DeckError> {
    builder.add_card(catalog.get(id).expect("card should exist"))
}

/// Fill the special categories so the deck passes the save gate.
fn fill_specials(builder: &mut DeckBuilder<'_>, catalog: &Catalog) {
    for id in ["OGN-200", "OGN-201", "OGN-202"] {
        add(builder, catalog, id).unwrap();
    }
    add(builder, catalog, "OGN-100").unwrap();
    assert_eq!(builder.set_rune_quantity("OGN-101", 7), Ok(7));
    assert_eq!(builder.set_rune_quantity("OGN-102", 5), Ok(5));
}

/// Test the documented aggregation example end to end.
#[test]
fn test_stats_follow_main_deck() {
    let catalog = Catalog::from_cards(vec![
        Card::new("A", "Alpha", CardType::Unit)
            .with_cost(2)
            .with_color("Fury"),
        Card::new("B", "Beta", CardType::Unit)
            .with_cost(4)
            .with_color("Calm"),
    ]);
    let mut builder = DeckBuilder::new(&catalog);

    add(&mut builder, &catalog, "A").unwrap();
    add(&mut builder, &catalog, "A").unwrap();
    add(&mut builder, &catalog, "B").unwrap();

    let stats = builder.deck().stats();
    assert_eq!(stats.total_cost, 8);
    assert_eq!(stats.average_cost, 2.67);
    let colors: Vec<_> = stats.colors.iter().map(|c| c.as_str()).collect();
    assert_eq!(colors, vec!["Fury", "Calm"]);
    assert_eq!(stats.type_count(CardType::Unit), 3);
    assert_eq!(stats.type_count(CardType::Spell), 0);

    builder.remove_card("A");
    assert_eq!(builder.deck().stats().total_cost, 4);
    assert_eq!(builder.deck().stats().average_cost, 4.0);
}

/// Test that every rejection is a typed, non-mutating error.
#[test]
fn test_rejections_leave_deck_unchanged() {
    let catalog = origins();
    let mut builder = DeckBuilder::new(&catalog);
    fill_specials(&mut builder, &catalog);
    for _ in 0..3 {
        add(&mut builder, &catalog, "OGN-001").unwrap();
    }

    let before = builder.snapshot();
    let attempts = [
        ("OGN-001", ErrorKind::Capacity), // fourth copy
        ("OGN-203", ErrorKind::Capacity), // fourth battlefield
        ("OGN-100", ErrorKind::Capacity), // second legend
        ("OGN-101", ErrorKind::Capacity), // thirteenth rune
    ];
    for (id, kind) in attempts {
        let err = add(&mut builder, &catalog, id).unwrap_err();
        assert_eq!(err.kind(), kind, "{id}: {err}");
        assert_eq!(builder.deck(), &before);
    }

    builder.remove_special_card(Category::Battlefield, "OGN-202");
    let err = add(&mut builder, &catalog, "OGN-200").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Duplicate);
    assert_eq!(builder.deck().battlefield().len(), 2);
}

/// Test that a Main deck of 40 refuses the 41st card.
#[test]
fn test_forty_card_limit() {
    let catalog = origins();
    let mut builder = DeckBuilder::new(&catalog);

    // 13 recruits x 3 copies = 39, plus one more = 40
    for i in 0..13 {
        assert_eq!(builder.set_quantity(&format!("OGN-3{i:02}"), 3), Ok(3));
    }
    add(&mut builder, &catalog, "OGN-004").unwrap();
    assert_eq!(builder.deck().main_len(), 40);

    assert_eq!(
        add(&mut builder, &catalog, "OGN-005"),
        Err(DeckError::DeckFull {
            card_id: CardId::new("OGN-005"),
            max: 40,
        })
    );
    assert_eq!(builder.set_quantity("OGN-005", 2), Ok(0));
    assert_eq!(builder.deck().main_len(), 40);
    assert!(!builder.can_add(catalog.get("OGN-005").unwrap()));
}

/// Test the quantity clamp from the deck list.
#[test]
fn test_quantity_clamp() {
    let catalog = origins();
    let mut builder = DeckBuilder::new(&catalog);
    add(&mut builder, &catalog, "OGN-002").unwrap();

    assert_eq!(builder.set_quantity("OGN-002", 5), Ok(3));
    assert_eq!(builder.deck().main_copies("OGN-002"), 3);
    assert_eq!(builder.deck().stats().total_cost, 6);

    assert_eq!(builder.set_quantity("OGN-002", 1), Ok(1));
    assert_eq!(builder.deck().stats().total_cost, 2);
}

/// Test that a deck with no Battlefields never reaches storage.
#[test]
fn test_save_gate_blocks_storage() {
    let catalog = origins();
    let mut storage = MemoryStorage::new(catalog.clone());
    let mut builder = DeckBuilder::new(&catalog);

    add(&mut builder, &catalog, "OGN-100").unwrap();
    builder.set_rune_quantity("OGN-101", 12).unwrap();
    add(&mut builder, &catalog, "OGN-001").unwrap();

    let err = builder.save(&mut storage).unwrap_err();
    assert_eq!(
        err,
        DeckError::BattlefieldCount {
            required: 3,
            actual: 0,
        }
    );
    assert!(err.is_validation());
    assert!(storage.is_empty());
    assert_eq!(builder.deck().main_len(), 1);
}

/// Test a full save: flattened ids reach storage and the builder resets.
#[test]
fn test_save_success_resets() {
    let catalog = origins();
    let mut storage = MemoryStorage::new(catalog.clone());
    let mut builder = DeckBuilder::new(&catalog);

    builder.set_name("Jinx Burn");
    builder.set_description("Fury/Chaos aggro");
    fill_specials(&mut builder, &catalog);
    add(&mut builder, &catalog, "OGN-001").unwrap();
    add(&mut builder, &catalog, "OGN-002").unwrap();
    add(&mut builder, &catalog, "OGN-002").unwrap();

    let saved = builder.save(&mut storage).unwrap();
    assert_eq!(saved.name, "Jinx Burn");
    assert_eq!(saved.card_ids.len(), 3 + 1 + 12 + 3);
    assert_eq!(saved.card_ids[0].as_str(), "OGN-001");
    assert_eq!(saved.card_ids.last().unwrap().as_str(), "OGN-100");
    assert_eq!(saved.total_cost, 8);

    let breakdown = saved.breakdown(&catalog);
    assert_eq!(breakdown.regular, 3);
    assert_eq!(breakdown.battlefield, 3);
    assert_eq!(breakdown.legend, 1);
    assert_eq!(breakdown.rune, 12);

    assert_eq!(builder.deck().name(), "My New Deck");
    assert!(builder.deck().is_empty());
    assert_eq!(storage.list_decks().unwrap().len(), 1);
}

/// Test that a transport failure keeps the deck for a retry.
#[test]
fn test_save_transport_failure_keeps_deck() {
    let catalog = origins();
    let mut storage = MemoryStorage::new(catalog.clone());
    let mut builder = DeckBuilder::new(&catalog);
    fill_specials(&mut builder, &catalog);
    add(&mut builder, &catalog, "OGN-003").unwrap();

    storage.fail_next(TransportError::Network("connection refused".to_string()));
    let err = builder.save(&mut storage).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!err.is_validation());
    assert_eq!(builder.deck().main_len(), 1);
    assert_eq!(builder.deck().runes().len(), 12);

    // Caller-driven retry succeeds.
    builder.save(&mut storage).unwrap();
    assert_eq!(storage.len(), 1);
}

/// Test viewing and deleting saved decks.
#[test]
fn test_view_and_delete_saved_decks() {
    let catalog = origins();
    let mut storage = MemoryStorage::new(catalog.clone());

    for name in ["First", "Second"] {
        let fetched = storage.fetch_catalog().unwrap();
        let mut builder = DeckBuilder::new(&fetched);
        builder.set_name(name);
        fill_specials(&mut builder, &fetched);
        add(&mut builder, &fetched, "OGN-006").unwrap();
        builder.save(&mut storage).unwrap();
    }

    let decks = storage.list_decks().unwrap();
    assert_eq!(decks.len(), 2);

    let grouped = decks[0].cards_with_count(&catalog);
    assert_eq!(grouped[0].0.name, "Jinx's Rocket");
    let fury = grouped.iter().find(|(c, _)| c.has_id("OGN-101")).unwrap();
    assert_eq!(fury.1, 7);

    storage.delete_deck(&decks[0].id).unwrap();
    assert_eq!(storage.get_deck(&decks[0].id).unwrap(), None);
    assert!(storage.get_deck(&decks[1].id).unwrap().is_some());
    assert!(matches!(
        storage.delete_deck(&decks[0].id),
        Err(TransportError::NotFound(_))
    ));
}

/// Test that stale ids in a saved deck are tolerated.
#[test]
fn test_stale_catalog_entries() {
    let catalog = origins();
    let mut builder = DeckBuilder::new(&catalog);
    add(&mut builder, &catalog, "OGN-001").unwrap();
    let snapshot = builder.snapshot();

    // Same deck read against a catalog that lost OGN-001.
    let trimmed: Catalog = catalog
        .iter()
        .filter(|c| !c.has_id("OGN-001"))
        .cloned()
        .collect();
    let stats = rift_deck::deck::compute_stats(snapshot.main_ids(), &trimmed);
    assert_eq!(stats.total_cost, 0);
    assert_eq!(stats.average_cost, 0.0);
    assert!(stats.colors.is_empty());
}

/// Test renaming a saved deck without touching its cards.
#[test]
fn test_update_saved_deck() {
    let catalog = origins();
    let mut storage = MemoryStorage::new(catalog.clone());
    let mut builder = DeckBuilder::new(&catalog);
    builder.set_name("Draft");
    fill_specials(&mut builder, &catalog);
    add(&mut builder, &catalog, "OGN-001").unwrap();
    let saved = builder.save(&mut storage).unwrap();

    let update = DeckUpdate::rename("Jinx Burn").with_description("v2");
    let updated = storage.update_deck(&saved.id, &update).unwrap();
    assert_eq!(updated.name, "Jinx Burn");
    assert_eq!(updated.card_ids, saved.card_ids);
    assert_eq!(updated.total_cost, saved.total_cost);
    assert!(updated.updated_at > saved.updated_at);

    storage.fail_next(TransportError::Network("offline".to_string()));
    let err = storage.update_deck(&saved.id, &update).unwrap_err();
    assert_eq!(err, TransportError::Network("offline".to_string()));
    assert_eq!(storage.get_deck(&saved.id).unwrap(), Some(updated));
}
