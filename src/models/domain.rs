use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Normalized user context used for scoring
///
/// Built fresh for every request by the profile extractor and dropped once the
/// response is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub gender: String,
    #[serde(rename = "eyeConditions")]
    pub eye_conditions: BTreeSet<String>,
    #[serde(rename = "screenTimeHours")]
    pub screen_time_hours: f64,
    #[serde(rename = "sleepHours")]
    pub sleep_hours: f64,
    #[serde(rename = "workType")]
    pub work_type: String,
    pub symptoms: BTreeSet<String>,
    pub preferences: BTreeSet<String>,
    #[serde(rename = "budgetRange")]
    pub budget_range: PriceRange,
}

pub const DEFAULT_AGE: u32 = 30;
pub const DEFAULT_GENDER: &str = "unknown";
pub const DEFAULT_SCREEN_TIME_HOURS: f64 = 8.0;
pub const DEFAULT_SLEEP_HOURS: f64 = 7.0;
pub const DEFAULT_WORK_TYPE: &str = "office";
pub const DEFAULT_BUDGET_MIN: f64 = 100.0;
pub const DEFAULT_BUDGET_MAX: f64 = 500.0;

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            gender: DEFAULT_GENDER.to_string(),
            eye_conditions: BTreeSet::new(),
            screen_time_hours: DEFAULT_SCREEN_TIME_HOURS,
            sleep_hours: DEFAULT_SLEEP_HOURS,
            work_type: DEFAULT_WORK_TYPE.to_string(),
            symptoms: BTreeSet::new(),
            preferences: BTreeSet::new(),
            budget_range: PriceRange::new(DEFAULT_BUDGET_MIN, DEFAULT_BUDGET_MAX),
        }
    }
}

/// Inclusive price interval
///
/// User input is not validated, so `min > max` is possible. Containment treats
/// such a range as if its bounds were swapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        price >= lo && price <= hi
    }
}

/// Inclusive age interval a product is intended for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }
}

/// Product category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    ProtectiveEquipment,
    Supplements,
    Equipment,
    Medication,
    #[serde(other)]
    Other,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::ProtectiveEquipment => "protective_equipment",
            ProductCategory::Supplements => "supplements",
            ProductCategory::Equipment => "equipment",
            ProductCategory::Medication => "medication",
            ProductCategory::Other => "other",
        }
    }
}

/// Catalog entry, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: ProductCategory,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(rename = "targetConditions", alias = "target_conditions", default)]
    pub target_conditions: BTreeSet<String>,
    #[serde(rename = "ageRange", alias = "age_range")]
    pub age_range: AgeRange,
    #[serde(rename = "usageScenarios", alias = "usage_scenarios", default)]
    pub usage_scenarios: BTreeSet<String>,
}

/// A product paired with its match score and justification
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProduct {
    pub product: Arc<Product>,
    /// Always within `[0, 1]`
    pub score: f64,
    pub reason: String,
}

impl ScoredProduct {
    pub fn new(product: Arc<Product>, score: f64, reason: impl Into<String>) -> Self {
        Self {
            product,
            score,
            reason: reason.into(),
        }
    }
}

/// Scoring weights
///
/// Each field is the contribution of one additive factor. Defaults are the
/// production values; the `screen_time_threshold_hours` gate decides when the
/// protective equipment bonus applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub age_fit: f64,
    pub age_miss: f64,
    pub symptom_overlap: f64,
    pub scenario_fit: f64,
    pub price_fit: f64,
    pub screen_time_bonus: f64,
    pub screen_time_threshold_hours: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            age_fit: 0.3,
            age_miss: 0.1,
            symptom_overlap: 0.4,
            scenario_fit: 0.2,
            price_fit: 0.1,
            screen_time_bonus: 0.2,
            screen_time_threshold_hours: 6.0,
        }
    }
}
