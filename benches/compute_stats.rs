use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rift_deck::cards::{Card, CardId, CardType, Catalog};
use rift_deck::deck::{compute_stats, DeckBuilder};

fn catalog() -> Catalog {
    (0..400u32)
        .map(|i| {
            let card_type = CardType::MAIN[i as usize % 7];
            let color = ["Fury", "Calm", "Mind", "Body", "Chaos", "Order"][i as usize % 6];
            Card::new(format!("OGN-{i:03}"), format!("Card {i}"), card_type)
                .with_cost(i % 9)
                .with_color(color)
        })
        .collect()
}

fn full_deck() -> Vec<CardId> {
    (0..40u32).map(|i| CardId::new(format!("OGN-{:03}", i / 3 * 7))).collect()
}

fn bench_compute_stats(c: &mut Criterion) {
    let catalog = catalog();
    let deck = full_deck();

    c.bench_function("compute_stats_40", |b| {
        b.iter(|| compute_stats(black_box(&deck), black_box(&catalog)))
    });
}

fn bench_fill_deck(c: &mut Criterion) {
    let catalog = catalog();
    let deck = full_deck();

    c.bench_function("add_40_cards", |b| {
        b.iter(|| {
            let mut builder = DeckBuilder::new(&catalog);
            for id in &deck {
                let _ = builder.add_card(catalog.get(id.as_str()).unwrap());
            }
            builder.deck().main_len()
        })
    });
}

criterion_group!(benches, bench_compute_stats, bench_fill_deck);
criterion_main!(benches);
