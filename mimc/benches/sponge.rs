use criterion::{Criterion, black_box, criterion_group, criterion_main};
use field::Fr;
use mimc::{MimcFeistel, MimcSponge};
use p3_symmetric::Permutation;

fn bench_permutation(c: &mut Criterion) {
    let permutation = MimcFeistel::new(Fr::from_canonical_u64(7));
    let state = [Fr::from_canonical_u64(1), Fr::ZERO];

    c.bench_function("mimc_feistel_220", |bencher| {
        bencher.iter(|| black_box(permutation.permute(black_box(state))))
    });
}

fn bench_sponge(c: &mut Criterion) {
    let sponge = MimcSponge::new(Fr::ZERO);
    let inputs = [Fr::from_canonical_u64(1764)];

    c.bench_function("mimc_sponge_one_input", |bencher| {
        bencher.iter(|| {
            let digest = sponge.hash_one(black_box(&inputs)).expect("hash");
            black_box(digest);
        })
    });
}

criterion_group!(benches, bench_permutation, bench_sponge);
criterion_main!(benches);
