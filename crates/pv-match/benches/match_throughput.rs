use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pv_core::{Claim, ReferenceValue};
use pv_match::{MatchPolicy, Matcher};

fn sample_pool(size: usize) -> Vec<ReferenceValue> {
    (0..size)
        .map(|idx| {
            ReferenceValue::new(
                format!("runs[{}].mae", idx % 50),
                1.0 + (idx as f64) * 0.013,
                format!("model{}/results.json", idx / 50),
            )
        })
        .collect()
}

fn sample_claims(count: usize) -> Vec<Claim> {
    (0..count)
        .map(|idx| {
            let value = 1.0 + (idx as f64) * 0.37;
            Claim::new(
                format!("{value:.2}"),
                value,
                idx + 1,
                vec![format!("model{}", idx % 7), "mae".into()],
                "paper.tex",
            )
        })
        .collect()
}

fn bench_match(c: &mut Criterion) {
    let claims = sample_claims(200);
    let sequential = Matcher::new(
        sample_pool(2_000),
        MatchPolicy {
            parallel: false,
            ..MatchPolicy::default()
        },
    )
    .unwrap();
    let parallel = Matcher::new(sample_pool(2_000), MatchPolicy::default()).unwrap();
    c.bench_function("match_sequential_200x2000", |b| {
        b.iter(|| black_box(sequential.match_all(black_box(&claims))))
    });
    c.bench_function("match_parallel_200x2000", |b| {
        b.iter(|| black_box(parallel.match_all(black_box(&claims))))
    });
}

criterion_group!(benches, bench_match);
criterion_main!(benches);
