use crate::models::{AgeRange, Product, ProductCategory, ScoredProduct};
use std::sync::Arc;

/// Fixed, pre-scored recommendations served when the pipeline fails
///
/// Entries are kept sorted by descending score.
#[derive(Debug, Clone)]
pub struct FallbackProvider {
    entries: Vec<ScoredProduct>,
}

impl FallbackProvider {
    /// Build a provider from an already sorted list
    pub fn new(entries: Vec<ScoredProduct>) -> Self {
        Self { entries }
    }

    /// The first `top_k` curated entries
    pub fn defaults(&self, top_k: usize) -> Vec<ScoredProduct> {
        self.entries.iter().take(top_k).cloned().collect()
    }
}

impl Default for FallbackProvider {
    fn default() -> Self {
        Self::new(vec![
            curated(
                "prod_001",
                "Blue Light Blocking Glasses",
                ProductCategory::ProtectiveEquipment,
                299.0,
                "Lenses that filter blue light emitted by screens",
                0.95,
                "Recommended based on your screen time",
            ),
            curated(
                "prod_002",
                "Lutein Supplement",
                ProductCategory::Supplements,
                199.0,
                "Daily lutein and zeaxanthin capsules for macular health",
                0.88,
                "Suitable for your age and eye usage habits",
            ),
            curated(
                "prod_003",
                "Eye Massager",
                ProductCategory::Equipment,
                399.0,
                "Heated massager that relaxes the muscles around the eyes",
                0.82,
                "Relieves eye fatigue",
            ),
        ])
    }
}

fn curated(
    id: &str,
    name: &str,
    category: ProductCategory,
    price: f64,
    description: &str,
    score: f64,
    reason: &str,
) -> ScoredProduct {
    let product = Product {
        id: id.to_string(),
        name: name.to_string(),
        category,
        price,
        description: description.to_string(),
        features: vec![],
        target_conditions: Default::default(),
        age_range: AgeRange::new(0, 120),
        usage_scenarios: Default::default(),
    };
    ScoredProduct::new(Arc::new(product), score, reason)
}
