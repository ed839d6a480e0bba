//! Criterion benchmarks for block registry operations.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure lookup, settings validation, block creation, and
//! the study-level aggregates over growing block lists.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

use study_blocks::config::RegistryConfig;
use study_blocks::core::block::StoredBlock;
use study_blocks::core::{BlockRegistry, BlockTypeId, Settings};
use study_blocks::runtime::summary::StudySummary;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_study(len: usize) -> Vec<StoredBlock> {
    (0..len)
        .map(|i| {
            let type_id = if i % 10 == 9 {
                "retired-block".to_string()
            } else {
                BlockTypeId::ALL[i % BlockTypeId::COUNT].to_string()
            };
            serde_json::from_value(json!({ "type": type_id, "order": i })).unwrap()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Lookup Benchmarks
// ---------------------------------------------------------------------------

fn bench_registry_build(c: &mut Criterion) {
    c.bench_function("registry_build", |b| {
        b.iter(|| black_box(BlockRegistry::builtin(RegistryConfig::default()).count()))
    });
}

fn bench_lookup(c: &mut Criterion) {
    let registry = BlockRegistry::global();
    let mut group = c.benchmark_group("lookup");

    group.bench_function("metadata_known", |b| {
        b.iter(|| black_box(registry.metadata(black_box("file-upload")).is_some()))
    });
    group.bench_function("metadata_unknown", |b| {
        b.iter(|| black_box(registry.metadata(black_box("retired-block")).is_none()))
    });
    group.bench_function("search", |b| b.iter(|| black_box(registry.search(black_box("upload")).len())));
    group.finish();
}

// ---------------------------------------------------------------------------
// Validation Benchmarks
// ---------------------------------------------------------------------------

fn bench_validate(c: &mut Criterion) {
    let registry = BlockRegistry::global();
    let mut group = c.benchmark_group("validate");

    for t in [BlockTypeId::YesNo, BlockTypeId::CardSort, BlockTypeId::FileUpload] {
        let defaults = Value::Object(registry.default_settings(t.as_str()).unwrap());
        group.bench_with_input(BenchmarkId::new("defaults", t), &defaults, |b, settings| {
            b.iter(|| black_box(registry.validate(t.as_str(), settings).valid))
        });
    }

    // Many array elements, each checked individually
    for cards in [10usize, 100] {
        let settings = json!({
            "instruction": "Sort",
            "sortType": "open",
            "cards": (0..cards).map(|i| format!("Card {}", i)).collect::<Vec<_>>(),
        });
        group.bench_with_input(BenchmarkId::new("card_sort_cards", cards), &settings, |b, settings| {
            b.iter(|| black_box(registry.validate("card-sort", settings).valid))
        });
    }
    group.finish();
}

fn bench_create_block(c: &mut Criterion) {
    let registry = BlockRegistry::global();
    let overrides = match json!({"scaleType": "stars", "maxValue": 5}) {
        Value::Object(map) => map,
        _ => Settings::new(),
    };

    c.bench_function("create_block_opinion_scale", |b| {
        b.iter(|| black_box(registry.create_block("opinion-scale", overrides.clone()).unwrap().order))
    });
}

// ---------------------------------------------------------------------------
// Aggregate Benchmarks
// ---------------------------------------------------------------------------

fn bench_aggregates(c: &mut Criterion) {
    let registry = BlockRegistry::global();
    let mut group = c.benchmark_group("aggregates");

    for len in [10usize, 100, 1_000] {
        let study = make_study(len);
        group.bench_with_input(BenchmarkId::new("estimated_duration", len), &study, |b, study| {
            b.iter(|| black_box(registry.estimated_duration(study)))
        });
        group.bench_with_input(BenchmarkId::new("study_summary", len), &study, |b, study| {
            b.iter(|| black_box(StudySummary::compute(registry, study).estimated_minutes))
        });
    }
    group.finish();
}

criterion_group!(lookup_benches, bench_registry_build, bench_lookup);

criterion_group!(validation_benches, bench_validate, bench_create_block);

criterion_group!(aggregate_benches, bench_aggregates);

criterion_main!(lookup_benches, validation_benches, aggregate_benches);
