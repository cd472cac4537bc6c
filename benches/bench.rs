// Criterion benchmarks for Eyecare Reco

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eyecare_reco::core::{calculate_match_score, Recommender};
use eyecare_reco::models::{AgeRange, Product, ProductCategory, ScoringWeights, UserProfile};
use eyecare_reco::services::EmbeddingCache;
use serde_json::json;
use std::sync::Arc;

const CONDITIONS: &[&str] = &["dry_eye", "eye_strain", "eye_fatigue", "prolonged_use", "night_vision"];
const SCENARIOS: &[&str] = &["office", "study", "gaming", "outdoor", "travel"];

fn create_product(id: usize) -> Product {
    let category = match id % 4 {
        0 => ProductCategory::ProtectiveEquipment,
        1 => ProductCategory::Supplements,
        2 => ProductCategory::Equipment,
        _ => ProductCategory::Medication,
    };

    Product {
        id: format!("prod_{:05}", id),
        name: format!("Product {}", id),
        category,
        price: 20.0 + (id % 50) as f64 * 10.0,
        description: String::new(),
        features: vec![],
        target_conditions: CONDITIONS.iter().skip(id % 3).take(2 + id % 2).map(|s| s.to_string()).collect(),
        age_range: AgeRange::new((id % 20) as u32, 60 + (id % 30) as u32),
        usage_scenarios: SCENARIOS.iter().skip(id % 4).take(2).map(|s| s.to_string()).collect(),
    }
}

fn create_profile() -> UserProfile {
    UserProfile {
        symptoms: ["eye_strain".to_string(), "dry_eye".to_string()].into_iter().collect(),
        ..UserProfile::default()
    }
}

fn bench_match_score(c: &mut Criterion) {
    let product = create_product(0);
    let profile = create_profile();
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&profile), black_box(&product), black_box(&weights)));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::with_default_weights();
    let context = json!({
        "age": 30,
        "workType": "office",
        "screenTimeHours": 9,
        "symptoms": ["eye_strain", "dry_eye"],
        "budgetRange": [100, 500]
    });

    let mut group = c.benchmark_group("recommend");

    for catalog_size in [10, 100, 1000, 10000].iter() {
        let catalog: Vec<Arc<Product>> = (0..*catalog_size).map(|i| Arc::new(create_product(i))).collect();

        group.bench_with_input(
            BenchmarkId::new("recommend", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| recommender.recommend(black_box(&catalog), black_box(&context), black_box(5)));
            },
        );
    }

    group.finish();
}

fn bench_embedding_cache(c: &mut Criterion) {
    let cache = EmbeddingCache::with_default_models();
    cache.get_or_compute("warm", "text").ok();

    c.bench_function("embedding_cache_hit", |b| {
        b.iter(|| cache.get_or_compute(black_box("warm"), black_box("text")));
    });

    let mut counter = 0u64;
    c.bench_function("embedding_cache_miss", |b| {
        b.iter(|| {
            counter += 1;
            cache.get_or_compute(black_box(&counter.to_string()), black_box("multimodal"))
        });
    });
}

criterion_group!(
    benches,
    bench_match_score,
    bench_recommend,
    bench_embedding_cache
);

criterion_main!(benches);
