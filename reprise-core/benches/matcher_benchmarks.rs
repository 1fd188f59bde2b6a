//! Performance benchmarks for the fuzzy matcher
//!
//! Run with: cargo bench --bench matcher_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reprise_core::{Comparator, MatchConfig, ReferenceText, TokenizedText};
use std::hint::black_box;

const WORDS: &[&str] = &[
    "the", "sea", "was", "calm", "and", "grey", "under", "a", "low", "sky", "while", "gulls",
    "circled", "above", "harbour", "boats", "rocking", "slowly", "at", "their", "moorings",
];

/// Generate a pseudo-random book of roughly `words` words with chapter markers
fn generate_book(words: usize) -> String {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut book = String::from("{\"title\": \"Bench\"}\n###END METADATA###\n");
    for i in 0..words {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        book.push_str(WORDS[(state % WORDS.len() as u64) as usize]);
        book.push(if i % 12 == 11 { '.' } else { ' ' });
        if i % 5_000 == 4_999 {
            book.push_str("\n###CHAPTER###\n");
        }
    }
    book
}

/// Copy a stretch of the body and perturb every `every`th word
fn generate_output(book: &ReferenceText, start: usize, len: usize, every: usize) -> String {
    let body = book.body();
    let end = (start + len).min(body.len());
    (start..end)
        .map(|i| if i % every == 0 { "zebra" } else { body.word(i) })
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_reference_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_sizes");
    let comparator = Comparator::new(MatchConfig::default());

    for size in [1_000, 10_000, 100_000] {
        let book = ReferenceText::parse(&generate_book(size)).unwrap();
        let output = generate_output(&book, size / 3, 300, 25);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("compare", size), &output, |b, output| {
            b.iter(|| comparator.compare(black_box(output), &book));
        });
    }

    group.finish();
}

fn bench_gap_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("gap_bounds");
    let book = ReferenceText::parse(&generate_book(20_000)).unwrap();
    let output = generate_output(&book, 5_000, 500, 9);

    for max_gap in [0, 1, 2, 4] {
        let config = MatchConfig::builder().max_gap_words(max_gap).build().unwrap();
        let comparator = Comparator::new(config);

        group.bench_with_input(BenchmarkId::new("max_gap", max_gap), &output, |b, output| {
            b.iter(|| comparator.compare(black_box(output), &book));
        });
    }

    group.finish();
}

fn bench_preparation(c: &mut Criterion) {
    let mut group = c.benchmark_group("preparation");
    let raw = generate_book(50_000);

    group.throughput(Throughput::Bytes(raw.len() as u64));
    group.bench_function("load_reference", |b| {
        b.iter(|| ReferenceText::parse(black_box(&raw)).unwrap());
    });
    group.bench_function("tokenize", |b| {
        b.iter(|| TokenizedText::new(black_box(raw.as_str())));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_reference_sizes,
    bench_gap_bounds,
    bench_preparation
);
criterion_main!(benches);
