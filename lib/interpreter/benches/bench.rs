use criterion::{criterion_group, criterion_main, Criterion};
use interpreter::run_source;

pub fn criterion_benchmark(c: &mut Criterion) {
    let arithmetic = vec!["(1 + 2 * 3 - 4 / 5) * -(6 - 7)"; 500].join(" + ");
    c.bench_function("long arithmetic", |b| {
        b.iter(|| run_source(&arithmetic).unwrap())
    });

    let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    c.bench_function("deep grouping", |b| b.iter(|| run_source(&deep).unwrap()));

    let concat = vec!["\"lorem ipsum\""; 500].join(" + ");
    c.bench_function("string concatenation", |b| {
        b.iter(|| run_source(&concat).unwrap())
    });

    let comparisons = vec!["(1 < 2) == (3 >= 4) != !nil"; 200].join(" == ");
    c.bench_function("comparisons", |b| b.iter(|| run_source(&comparisons).unwrap()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
