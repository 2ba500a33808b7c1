//! Performance benchmarks for reading order and segmentation
//!
//! Run with: cargo bench --bench segmentation

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use folio_core::{reading_order, segment_tokens, Block, BoundingBox, ChunkEmitter, Classifier};
use std::hint::black_box;

/// Generate one page of blocks in column-major order
fn generate_page(blocks: usize, page: u32) -> Vec<Block> {
    (0..blocks)
        .map(|i| {
            let column = (i % 2) as f64;
            let row = (i / 2) as f64;
            let top = row * 0.01;
            let text = match i % 7 {
                0 => format!("{}.{}", i % 19 + 1, i),
                3 => "UMPIRING".to_string(),
                5 => (i % 90).to_string(),
                _ => format!("Body text for block {i} that reads like a sentence."),
            };
            Block::new(BoundingBox::new(top, top + 0.008, column * 0.5), text, page, 0)
        })
        .rev()
        .collect()
}

fn bench_reading_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("reading_order");

    for size in [50, 200, 1000] {
        let page = generate_page(size, 1);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("reconstruct", size), &page, |b, page| {
            b.iter(|| reading_order::reconstruct(black_box(page.clone())));
        });
    }

    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");
    let classifier = Classifier::new();

    for pages in [1, 10, 100] {
        let tokens: Vec<_> = (1..=pages)
            .flat_map(|page| reading_order::reconstruct(generate_page(200, page)))
            .map(|block| classifier.classify_block(block))
            .collect();

        group.throughput(Throughput::Elements(tokens.len() as u64));
        group.bench_with_input(BenchmarkId::new("pages", pages), &tokens, |b, tokens| {
            b.iter(|| segment_tokens(black_box(tokens), ChunkEmitter::new("bench")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reading_order, bench_segmentation);
criterion_main!(benches);
