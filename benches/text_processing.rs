//! Benchmarks for text processing utilities.
//!
//! These benchmarks measure regex performance for text processing operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regex::Regex;

fn bench_regex_compile(c: &mut Criterion) {
    c.bench_function("regex_compile_file_scheme_pattern", |b| {
        b.iter(|| Regex::new(black_box(r"^file://")))
    });
}

fn bench_regex_replace(c: &mut Criterion) {
    let re = Regex::new(r"^file://").unwrap();
    let path = "file:///storage/emulated/0/Documents/meeting%20notes%202024.pdf";

    c.bench_function("regex_replace_file_scheme", |b| {
        b.iter(|| re.replace(black_box(path), "").replace("%20", " "))
    });
}

fn bench_string_replace(c: &mut Criterion) {
    let path = "file:///storage/emulated/0/Documents/meeting%20notes%202024.pdf";

    c.bench_function("string_replace_simple", |b| {
        b.iter(|| black_box(path).replace("file://", ""))
    });
}

criterion_group!(
    benches,
    bench_regex_compile,
    bench_regex_replace,
    bench_string_replace
);
criterion_main!(benches);
