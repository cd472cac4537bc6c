use crate::models::{Product, ProductCategory, ScoringWeights, UserProfile};
use thiserror::Error;

/// Errors raised while scoring a single product
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("product {product_id} has invalid price {price}")]
    InvalidPrice { product_id: String, price: f64 },

    #[error("score for product {product_id} is not a finite number")]
    NonFiniteScore { product_id: String },
}

/// Which scoring factors fire for one (profile, product) pair
///
/// Both the score and the recommendation reason are derived from this, so a
/// reason can never cite a factor the score did not count.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorMatch<'a> {
    pub age_fit: bool,
    /// Product target conditions the user reported, sorted
    pub matched_conditions: Vec<&'a str>,
    pub target_condition_count: usize,
    pub scenario_fit: bool,
    pub price_fit: bool,
    pub screen_time_bonus: bool,
}

impl<'a> FactorMatch<'a> {
    pub fn evaluate(profile: &'a UserProfile, product: &'a Product, weights: &ScoringWeights) -> Self {
        let matched_conditions = product
            .target_conditions
            .iter()
            .filter(|condition| profile.symptoms.contains(*condition))
            .map(String::as_str)
            .collect();

        Self {
            age_fit: product.age_range.contains(profile.age),
            matched_conditions,
            target_condition_count: product.target_conditions.len(),
            scenario_fit: product.usage_scenarios.contains(&profile.work_type),
            price_fit: profile.budget_range.contains(product.price),
            screen_time_bonus: product.category == ProductCategory::ProtectiveEquipment
                && profile.screen_time_hours > weights.screen_time_threshold_hours,
        }
    }

    /// Fraction of the product's target conditions the user reported
    ///
    /// Zero when the product targets no conditions at all.
    #[inline]
    pub fn symptom_ratio(&self) -> f64 {
        if self.target_condition_count == 0 {
            return 0.0;
        }
        self.matched_conditions.len() as f64 / self.target_condition_count as f64
    }
}

/// Scores one product for one user
///
/// Implementations must be pure: identical inputs give identical outputs.
pub trait Scorer: Send + Sync {
    fn score(&self, profile: &UserProfile, product: &Product) -> Result<f64, ScoringError>;

    /// Weights used to gate the factors, shared with the reason generator
    fn weights(&self) -> &ScoringWeights;
}

/// Production scorer combining the five additive factors
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer {
    weights: ScoringWeights,
}

impl MatchScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }
}

impl Scorer for MatchScorer {
    fn score(&self, profile: &UserProfile, product: &Product) -> Result<f64, ScoringError> {
        calculate_match_score(profile, product, &self.weights)
    }

    fn weights(&self) -> &ScoringWeights {
        &self.weights
    }
}

/// Calculate a match score in `[0, 1]` for a product given a user profile
///
/// Scoring formula:
/// score = min(1,
///     age_fit (0.3, or 0.1 outside the product's age range) +
///     0.4 * |symptoms ∩ target_conditions| / |target_conditions| +
///     0.2 if work type is a usage scenario +
///     0.1 if price is within budget +
///     0.2 for protective equipment when screen time exceeds 6h
/// )
pub fn calculate_match_score(
    profile: &UserProfile,
    product: &Product,
    weights: &ScoringWeights,
) -> Result<f64, ScoringError> {
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(ScoringError::InvalidPrice {
            product_id: product.id.clone(),
            price: product.price,
        });
    }

    let factors = FactorMatch::evaluate(profile, product, weights);

    let age_score = if factors.age_fit { weights.age_fit } else { weights.age_miss };
    let symptom_score = weights.symptom_overlap * factors.symptom_ratio();
    let scenario_score = if factors.scenario_fit { weights.scenario_fit } else { 0.0 };
    let price_score = if factors.price_fit { weights.price_fit } else { 0.0 };
    let screen_score = if factors.screen_time_bonus { weights.screen_time_bonus } else { 0.0 };

    let total = age_score + symptom_score + scenario_score + price_score + screen_score;

    if !total.is_finite() {
        return Err(ScoringError::NonFiniteScore {
            product_id: product.id.clone(),
        });
    }

    Ok(total.min(1.0).max(0.0))
}
