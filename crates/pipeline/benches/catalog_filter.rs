//! Benchmarks for term extraction and catalog filtering
//!
//! Run with: cargo bench --package pipeline

use catalog::{Catalog, CollegeRecord};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::{FilterPipeline, MatchPolicy};
use query::SearchTerms;

fn load_test_catalog() -> Catalog {
    let builtin = Catalog::builtin().expect("Failed to load built-in catalog");

    // Blow the built-in set up so the parallel path is exercised too
    let mut records: Vec<CollegeRecord> = Vec::new();
    for copy in 0..500 {
        for record in builtin.iter() {
            let mut record = record.clone();
            record.name = format!("{} #{copy}", record.name);
            records.push(record);
        }
    }
    Catalog::from(records)
}

fn bench_extract_terms(c: &mut Criterion) {
    c.bench_function("extract_terms", |b| {
        b.iter(|| {
            let terms = SearchTerms::extract(black_box("Show me the best engineering colleges in Delhi"));
            black_box(terms)
        })
    });
}

fn bench_filter_all(c: &mut Criterion) {
    let catalog = load_test_catalog();
    let pipeline = FilterPipeline::for_policy(MatchPolicy::All);
    let terms = SearchTerms::extract("engineering colleges in Delhi");

    c.bench_function("filter_catalog_all", |b| {
        b.iter(|| {
            let matches = pipeline.filter_catalog(black_box(&catalog), black_box(&terms)).unwrap();
            black_box(matches)
        })
    });
}

fn bench_filter_any(c: &mut Criterion) {
    let catalog = load_test_catalog();
    let pipeline = FilterPipeline::for_policy(MatchPolicy::Any);
    let terms = SearchTerms::extract("MBA Mumbai Jamshedpur");

    c.bench_function("filter_catalog_any", |b| {
        b.iter(|| {
            let matches = pipeline.filter_catalog(black_box(&catalog), black_box(&terms)).unwrap();
            black_box(matches)
        })
    });
}

criterion_group!(benches, bench_extract_terms, bench_filter_all, bench_filter_any);
criterion_main!(benches);
