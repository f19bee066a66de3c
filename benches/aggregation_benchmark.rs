/// Benchmark module for the review aggregation pipeline.
/// Measures filtering, grouping and layout over a synthetic dataset.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use wine_narrative::plotting::{layout_plot, Viewport};
use wine_narrative::scenes::{Scene, SCENES};
use wine_narrative::types::Review;

/// Build a dataset shaped like the real one: ~130k reviews, numeric strings
/// for scores, some missing prices and regions
///
/// # Returns
/// * `Vec<Review>` - Reviews generated from a fixed seed
fn setup_reviews(count: usize) -> Vec<Review> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let country = rng.gen_range(0..40);
            let province = country * 10 + rng.gen_range(0..10);
            let price = if rng.gen_bool(0.07) {
                None
            } else {
                Some(json!(rng.gen_range(4.0..400.0f64).round()))
            };
            Review {
                points: Some(json!(rng.gen_range(80..=100).to_string())),
                price,
                country: Some(format!("Country {}", country)),
                province: Some(format!("Province {}", province)),
                region_1: rng
                    .gen_bool(0.8)
                    .then(|| format!("Region {}", province * 5 + rng.gen_range(0..5))),
                winery: Some(format!("Winery {}", i % 16_000)),
            }
        })
        .collect()
}

/// Benchmark planning of every data scene
///
/// # Arguments
/// * `c` - Criterion benchmark configuration
fn bench_scene_plans(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_plans");
    let reviews = setup_reviews(130_000);

    for (index, scene) in SCENES.iter().enumerate() {
        if let Scene::Plot(plot) = scene {
            group.bench_function(format!("plan_scene_{}", index), |b| {
                b.iter(|| plot.plan(black_box(&reviews)))
            });
        }
    }

    group.finish();
}

/// Benchmark marker layout for the largest scene
///
/// # Arguments
/// * `c` - Criterion benchmark configuration
fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let reviews = setup_reviews(130_000);
    let plan = match &SCENES[5] {
        Scene::Plot(plot) => plot.plan(&reviews),
        Scene::Intro(_) => unreachable!("scene 5 is the winery plot"),
    };

    group.bench_function("layout_wineries", |b| {
        b.iter(|| layout_plot(black_box(&plan), Viewport::new(1200, 800)))
    });

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_scene_plans, bench_layout
);
criterion_main!(benches);
