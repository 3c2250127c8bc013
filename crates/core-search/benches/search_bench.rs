use core_search::{Pattern, search};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn corpus() -> String {
    let mut s = String::new();
    for i in 0..20_000 {
        s.push_str("lorem ipsum dolor sit amet ");
        if i % 97 == 0 {
            s.push_str("needle ");
        }
    }
    s
}

fn bench_search(c: &mut Criterion) {
    let text = corpus();
    c.bench_function("search_sparse_needle", |b| {
        b.iter(|| search(black_box(&text), black_box("needle")))
    });
    c.bench_function("search_dense_word", |b| {
        b.iter(|| search(black_box(&text), black_box("ipsum")))
    });
    let compiled = Pattern::new("dolor sit");
    let chars: Vec<char> = text.chars().collect();
    c.bench_function("search_precompiled_chars", |b| {
        b.iter(|| compiled.find_all_chars(black_box(&chars)))
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
