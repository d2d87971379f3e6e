//! Benchmark tests for kino-embed configuration synthesis
//!
//! Run with: cargo bench -p kino-embed

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kino_embed::{
    build_configuration, normalize, resolve_public_id, AccountContext, AssetOptions, DeliveryUrlBuilder,
    InstanceRegistry, OneOrMany, PlayerProps, PosterInput, Transformation, UrlResolver,
};

// ============================================================================
// Helpers
// ============================================================================

fn account() -> AccountContext {
    AccountContext {
        cloud_name: Some("demo".to_string()),
        secure_distribution: None,
        private_cdn: false,
    }
}

fn create_test_props(transforms: usize) -> PlayerProps {
    let list: Vec<Transformation> = (0..transforms)
        .map(|i| {
            let mut t = Transformation::new();
            t.insert("width".to_string(), serde_json::Value::from(100 + i as u64));
            t
        })
        .collect();

    PlayerProps::new("https://res.cloudinary.com/demo/video/upload/c_fill,w_600/v1690000000/samples/sea-turtle.mp4")
        .with_size(1920, 1080)
        .with_transformation(OneOrMany::Many(list))
        .with_poster(PosterInput::Options(AssetOptions::new().with("crop", "fill")))
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_identifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("Identifier");

    group.bench_function("resolve_public_id/bare", |b| {
        b.iter(|| black_box(resolve_public_id(black_box("samples/sea-turtle"))))
    });

    group.bench_function("resolve_public_id/url", |b| {
        b.iter(|| {
            black_box(resolve_public_id(black_box(
                "https://res.cloudinary.com/demo/video/upload/q_auto/v1/samples/sea-turtle.mp4",
            )))
        })
    });

    group.finish();
}

fn bench_configuration(c: &mut Criterion) {
    let mut group = c.benchmark_group("Configuration");
    let account = account();
    let resolver = DeliveryUrlBuilder::new(account.clone());

    for transforms in [0usize, 4, 16] {
        let props = create_test_props(transforms);
        group.bench_with_input(BenchmarkId::new("normalize+build", transforms), &props, |b, props| {
            b.iter(|| {
                let normalized = normalize(props, &resolver);
                black_box(build_configuration(&normalized, &account))
            })
        });
    }

    let config = build_configuration(&normalize(&create_test_props(4), &resolver), &account);
    group.bench_function("to_widget_options", |b| b.iter(|| black_box(config.to_widget_options())));

    group.finish();
}

fn bench_delivery(c: &mut Criterion) {
    let builder = DeliveryUrlBuilder::new(account());
    let options = AssetOptions::new()
        .with_src("samples/sea-turtle")
        .with_format("auto:image")
        .with("crop", "fill")
        .with("width", 600);

    c.bench_function("DeliveryUrlBuilder::video_url", |b| {
        b.iter(|| black_box(builder.video_url(black_box(&options))))
    });
}

fn bench_registry(c: &mut Criterion) {
    c.bench_function("InstanceRegistry register/unregister", |b| {
        let registry = InstanceRegistry::new();
        for i in 0..64 {
            registry.register(&format!("player-{}", i));
        }
        b.iter(|| {
            black_box(registry.register("player-hot"));
            registry.unregister("player-hot");
        })
    });
}

criterion_group!(identifier_benches, bench_identifier);

criterion_group!(config_benches, bench_configuration, bench_delivery);

criterion_group!(registry_benches, bench_registry);

criterion_main!(identifier_benches, config_benches, registry_benches);
