use criterion::{black_box, criterion_group, criterion_main, Criterion};
use field::{Fr, RandomField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_fr_mul(c: &mut Criterion) {
    c.bench_function("fr_mul", |bencher| {
        let mut rng = StdRng::seed_from_u64(7);
        let a = Fr::random(&mut rng);
        let b = Fr::random(&mut rng);
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_fr_pow5(c: &mut Criterion) {
    c.bench_function("fr_pow5", |bencher| {
        let t = Fr::from_canonical_u64(123456789);
        bencher.iter(|| {
            let t = black_box(t);
            let t2 = t * t;
            let t4 = t2 * t2;
            black_box(t4 * t)
        })
    });
}

fn bench_fr_inverse(c: &mut Criterion) {
    c.bench_function("fr_inverse", |bencher| {
        let a = Fr::from_canonical_u64(987654321);
        bencher.iter(|| black_box(black_box(a).inverse()))
    });
}

criterion_group!(benches, bench_fr_mul, bench_fr_pow5, bench_fr_inverse);
criterion_main!(benches);
