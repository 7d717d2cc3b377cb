//! Benchmarks for the flood inference pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use floodfis::{FloodEngine, Observation, Preset};

fn engine_construction_benchmark(c: &mut Criterion) {
    c.bench_function("engine_new", |b| b.iter(|| black_box(FloodEngine::new())));
}

fn infer_benchmark(c: &mut Criterion) {
    let engine = FloodEngine::new();
    let mut group = c.benchmark_group("infer");

    for preset in [Preset::Low, Preset::Medium, Preset::High, Preset::Mixed] {
        let obs = preset.observation();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", preset).to_lowercase()),
            &obs,
            |b, obs| b.iter(|| engine.infer(black_box(obs))),
        );
    }

    group.finish();
}

fn pipeline_stages_benchmark(c: &mut Criterion) {
    let engine = FloodEngine::new();
    let obs = Observation::new(73.0, 1.55, 2.0);
    let memberships = engine.fuzzify(obs.rainfall, obs.water_level, obs.duration);
    let fired = engine.evaluate_rules(&memberships);

    let mut group = c.benchmark_group("stages");
    group.bench_function("fuzzify", |b| {
        b.iter(|| engine.fuzzify(black_box(73.0), black_box(1.55), black_box(2.0)))
    });
    group.bench_function("evaluate_rules", |b| {
        b.iter(|| engine.evaluate_rules(black_box(&memberships)))
    });
    group.bench_function("aggregate_and_defuzzify", |b| {
        b.iter(|| engine.aggregate_and_defuzzify(black_box(&fired)))
    });
    group.finish();
}

criterion_group!(
    benches,
    engine_construction_benchmark,
    infer_benchmark,
    pipeline_stages_benchmark
);
criterion_main!(benches);
