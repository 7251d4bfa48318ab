use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use whosthat_core::{generate, normalize_entry, percentage, Catalog, CatalogEntry};

fn make_catalog(size: usize) -> Catalog {
    Catalog::new(
        (1..=size)
            .map(|i| {
                let url = format!("https://example.com/artwork/{i}.png");
                CatalogEntry::new(format!("mon-{i}"), url.clone(), url)
            })
            .collect(),
    )
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    // Four distinct names is the worst case for the rejection draw.
    for size in [4usize, 50, 1000] {
        let catalog = make_catalog(size);
        let mut rng = StdRng::seed_from_u64(0);
        group.bench_function(format!("catalog_{size}"), |b| {
            b.iter(|| generate(black_box(&catalog), &mut rng).unwrap())
        });
    }
    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let record = serde_json::json!({
        "name": "pikachu",
        "sprites": {"other": {"official-artwork": {
            "front_default": "https://example.com/pikachu.png"
        }}}
    });
    c.bench_function("normalize_entry", |b| {
        b.iter(|| normalize_entry(black_box(&record)))
    });
}

fn bench_percentage(c: &mut Criterion) {
    c.bench_function("percentage", |b| {
        b.iter(|| percentage(black_box(33), black_box(50)))
    });
}

criterion_group!(benches, bench_generate, bench_normalize, bench_percentage);
criterion_main!(benches);
