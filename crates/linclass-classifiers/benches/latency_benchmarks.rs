//! Latency benchmarks for the inference pipeline
//!
//! Measures the linear classifier on its own, the full reference pipeline,
//! and how the pipeline scales with batch size.
//!
//! Run with: cargo bench -p linclass-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use linclass_classifiers::model::REFERENCE_INPUT;
use linclass_classifiers::{
    reference_model, reference_pipeline, Classifier, ClassifierPipeline, PostTransform,
};

/// Benchmark the linear classifier operator alone
fn benchmark_linear_classifier(c: &mut Criterion) {
    let model = reference_model().expect("Failed to build reference model");

    let mut group = c.benchmark_group("Linear_Classifier");
    group.significance_level(0.05);
    group.sample_size(100);

    group.bench_function("compute_single_row", |b| {
        b.iter(|| model.compute(black_box(&[REFERENCE_INPUT])).unwrap())
    });

    group.bench_function("classify_single_row", |b| {
        b.iter(|| model.classify(black_box(&REFERENCE_INPUT)).unwrap())
    });

    group.finish();
}

/// Benchmark each post transform through the linear classifier
fn benchmark_post_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Post_Transforms");
    group.sample_size(100);

    for transform in [
        PostTransform::None,
        PostTransform::Softmax,
        PostTransform::SoftmaxZero,
        PostTransform::Logistic,
        PostTransform::Probit,
    ] {
        let model = linclass_classifiers::model::model_with_transform(transform)
            .expect("Failed to build model");
        group.bench_with_input(
            BenchmarkId::new("compute", transform.as_str()),
            &model,
            |b, model| b.iter(|| model.compute(black_box(&[REFERENCE_INPUT])).unwrap()),
        );
    }

    group.finish();
}

/// Pipeline benchmark - stage composition overhead and batch scaling
fn benchmark_pipeline_overhead(c: &mut Criterion) {
    let pipeline = reference_pipeline().expect("Failed to build reference pipeline");
    let linear_only = ClassifierPipeline::new().add_linear(
        "linear_classifier",
        reference_model().expect("Failed to build reference model"),
    );

    let mut group = c.benchmark_group("Pipeline_Overhead");
    group.sample_size(100);

    group.bench_function("linear_only", |b| {
        b.iter(|| linear_only.execute(black_box(&[REFERENCE_INPUT])).unwrap())
    });

    group.bench_function("full_reference", |b| {
        b.iter(|| pipeline.execute(black_box(&[REFERENCE_INPUT])).unwrap())
    });

    for batch_size in [1usize, 16, 256] {
        let rows: Vec<Vec<f64>> = (0..batch_size)
            .map(|i| REFERENCE_INPUT.iter().map(|v| v + i as f64 * 0.01).collect())
            .collect();

        group.bench_with_input(
            BenchmarkId::new("batch", batch_size),
            &rows,
            |b, rows| b.iter(|| pipeline.execute(black_box(rows)).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_linear_classifier,
    benchmark_post_transforms,
    benchmark_pipeline_overhead
);
criterion_main!(benches);
