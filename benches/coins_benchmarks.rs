#![allow(missing_docs)]
//! Benchmarks for COinS span rendering.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use coins::{span, CoinsBuilder, InMemoryProvider, Item, StaticRequest};

fn make_items(count: u64) -> Vec<Item> {
    (0..count)
        .map(|id| {
            Item::new(id)
                .with_type(if id % 2 == 0 { "Artikkeliviite" } else { "Sound" })
                .with_dc("Title", format!("Item number {id}"))
                .with_dc("Creator", "Virtanen, Aino")
                .with_dc("Creator", "Korhonen, Eero")
                .with_dc("Subject", "Local history")
                .with_dc("Description", "A fairly ordinary description ".repeat(10))
                .with_type_field("Alanimeke", "Vuosikirja")
                .with_type_field("Lehden nimi", "Kotiseutu")
        })
        .collect()
}

/// Benchmark rendering spans for 1,000 items.
fn benchmark_spans_1k(c: &mut Criterion) {
    let items = make_items(1_000);
    let provider = InMemoryProvider::new();
    let request = StaticRequest::parse("https://example.org/items/browse").unwrap();
    let builder = CoinsBuilder::new(&provider, request);

    c.bench_function("render_1k_spans", |b| {
        b.iter(|| {
            black_box(&items)
                .iter()
                .map(|item| builder.span(item))
                .collect::<String>()
        });
    });
}

/// Benchmark decoding spans back out of a rendered page.
fn benchmark_extract_1k(c: &mut Criterion) {
    let items = make_items(1_000);
    let provider = InMemoryProvider::new();
    let request = StaticRequest::parse("https://example.org/items/browse").unwrap();
    let page = CoinsBuilder::new(&provider, request).spans(&items);

    c.bench_function("extract_1k_spans", |b| {
        b.iter(|| span::extract(black_box(&page)).len());
    });
}

criterion_group!(benches, benchmark_spans_1k, benchmark_extract_1k);
criterion_main!(benches);
