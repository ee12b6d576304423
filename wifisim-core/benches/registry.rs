use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use wifisim_core::{
    FrameContext, Mac48Allocator, Mac48Address, Sample, SimTime,
    peer::{PeerRegistry, RegistryConfig},
    predictor::{PredictorKind, predict_registry},
};

fn contexts(peers: usize, per_peer: usize) -> Vec<FrameContext> {
    let mut allocator = Mac48Allocator::new();
    let addresses: Vec<Mac48Address> = (0..peers).map(|_| allocator.allocate()).collect();

    (0..peers * per_peer)
        .map(|i| {
            let snr = 5.0 + (i % 30) as f64;
            let sample = Sample::new(SimTime::from_nanos(i as u64 * 1_000), snr, snr - 94.0, 20.0);
            FrameContext::with_sample(addresses[i % peers], sample)
        })
        .collect()
}

fn add_or_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_or_update");

    for peers in [4, 16, 32] {
        let contexts = contexts(peers, 16);
        group.throughput(Throughput::Elements(contexts.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(peers), &contexts, |b, contexts| {
            let mut registry = PeerRegistry::new(RegistryConfig::default()).unwrap();
            b.iter(|| {
                for context in contexts {
                    black_box(registry.add_or_update(context));
                }
            })
        });
    }

    group.finish();
}

fn predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict_registry");

    for kind in [PredictorKind::SnrThreshold, PredictorKind::Ewma] {
        let mut registry = PeerRegistry::new(RegistryConfig::default()).unwrap();
        for context in contexts(32, 64) {
            registry.add_or_update(&context);
        }
        let mut predictor = kind.build(0);

        group.bench_function(kind.to_string(), |b| {
            b.iter(|| black_box(predict_registry(predictor.as_mut(), &registry)))
        });
    }

    group.finish();
}

criterion_group!(benches, add_or_update, predict);
criterion_main!(benches);
