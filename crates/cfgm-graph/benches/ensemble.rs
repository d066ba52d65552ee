use cfgm_core::rng::RngHandle;
use cfgm_core::DegreeSequence;
use cfgm_graph::{EnsembleConfig, EnsembleGenerator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn ensemble_bench(c: &mut Criterion) {
    let degrees: DegreeSequence<u32> = (0..500u32)
        .map(|node| (node, 1 + (node % 7) as usize))
        .collect();
    let generator = EnsembleGenerator::new(EnsembleConfig::with_size(10)).unwrap();
    c.bench_function("ensemble_500_nodes_x10", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(7);
            let ensemble = generator.generate_with(&degrees, &mut rng);
            black_box(ensemble.ok());
        });
    });
}

criterion_group!(benches, ensemble_bench);
criterion_main!(benches);
