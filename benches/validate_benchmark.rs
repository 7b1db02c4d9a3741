//! Page-load boundary benchmarks.
//!
//! Covers identifier validation, error classification and a full page render
//! for the mock `express@4.10.5` record.
//!
//! Run with: cargo bench --bench validate_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pkgview::integration::load_page;
use pkgview::model::{classify, PackageIdentifier};
use pkgview::source::MockSource;
use pkgview::view::{render_page, PageOptions};

fn benchmark_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    let cases = [
        ("valid", "npm".to_string(), "express".to_string()),
        ("disallowed", "npm".to_string(), "express/evil".to_string()),
        ("overlong", "npm".to_string(), "a".repeat(300)),
        ("max_length", "npm".to_string(), "a".repeat(256)),
    ];

    for (label, ecosystem, name) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(label), name, |b, name| {
            b.iter(|| {
                PackageIdentifier::validate(
                    black_box(ecosystem.as_str()),
                    black_box(name.as_str()),
                    black_box("4.10.5"),
                )
            })
        });
    }

    group.finish();
}

fn benchmark_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for message in [
        "Package not found in registry",
        "credential SAFEDEP_TENANT rejected by upstream",
        "unexpected database timeout",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(message), message, |b, m| {
            b.iter(|| classify(black_box(m)))
        });
    }

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    // Load once (not timed)
    let outcome = load_page(&MockSource::instant(), "npm", "express", "4.10.5");
    let collapsed = PageOptions::default();
    let expanded = PageOptions {
        show_all_dependencies: true,
        ..PageOptions::default()
    };

    c.bench_function("render_page_collapsed_100", |b| {
        b.iter(|| render_page(black_box(&outcome), black_box(&collapsed), 100))
    });

    c.bench_function("render_page_expanded_100", |b| {
        b.iter(|| render_page(black_box(&outcome), black_box(&expanded), 100))
    });
}

criterion_group!(benches, benchmark_validate, benchmark_classify, benchmark_render);
criterion_main!(benches);
