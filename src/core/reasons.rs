use crate::core::scoring::FactorMatch;
use crate::models::{Product, ScoringWeights, UserProfile};

/// Separator placed between reason clauses
pub const CLAUSE_SEPARATOR: &str = "; ";

/// Reason given when no scoring factor applies
pub const GENERIC_REASON: &str = "General eye care recommendation";

/// Explain why a product was recommended
///
/// Clauses appear in a fixed order (symptoms, scenario, screen time, age) and
/// each one is emitted only when the matching scoring factor fired.
pub fn explain(profile: &UserProfile, product: &Product, weights: &ScoringWeights) -> String {
    let factors = FactorMatch::evaluate(profile, product, weights);
    let mut clauses: Vec<String> = Vec::with_capacity(4);

    if !factors.matched_conditions.is_empty() {
        clauses.push(format!(
            "Targets your reported symptoms: {}",
            factors.matched_conditions.join(", ")
        ));
    }

    if factors.scenario_fit {
        clauses.push(format!("Suited to {} use", profile.work_type));
    }

    if factors.screen_time_bonus {
        clauses.push(format!(
            "Protects your eyes during heavy screen use ({} hours per day)",
            profile.screen_time_hours
        ));
    }

    if factors.age_fit {
        clauses.push(format!(
            "Designed for your age group ({}-{})",
            product.age_range.min, product.age_range.max
        ));
    }

    if clauses.is_empty() {
        return GENERIC_REASON.to_string();
    }

    clauses.join(CLAUSE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, ProductCategory};

    fn product() -> Product {
        Product {
            id: "prod_001".to_string(),
            name: "Blue Light Glasses".to_string(),
            category: ProductCategory::ProtectiveEquipment,
            price: 299.0,
            description: String::new(),
            features: vec![],
            target_conditions: ["dry_eye", "eye_strain", "prolonged_use"].iter().map(|c| c.to_string()).collect(),
            age_range: AgeRange::new(18, 65),
            usage_scenarios: ["office", "study", "gaming"].iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_all_clauses_in_order() {
        let profile = UserProfile {
            symptoms: ["eye_strain".to_string(), "dry_eye".to_string()].into_iter().collect(),
            ..UserProfile::default()
        };
        let reason = explain(&profile, &product(), &ScoringWeights::default());

        assert_eq!(
            reason,
            "Targets your reported symptoms: dry_eye, eye_strain; \
             Suited to office use; \
             Protects your eyes during heavy screen use (8 hours per day); \
             Designed for your age group (18-65)"
        );
    }

    #[test]
    fn test_generic_reason_when_nothing_applies() {
        let mut product = product();
        product.category = ProductCategory::Supplements;
        let profile = UserProfile {
            age: 90,
            work_type: "outdoor".to_string(),
            ..UserProfile::default()
        };

        assert_eq!(explain(&profile, &product, &ScoringWeights::default()), GENERIC_REASON);
    }

    #[test]
    fn test_price_fit_alone_has_no_clause() {
        let mut product = product();
        product.category = ProductCategory::Supplements;
        product.usage_scenarios.clear();
        let profile = UserProfile { age: 5, ..UserProfile::default() };

        assert_eq!(explain(&profile, &product, &ScoringWeights::default()), GENERIC_REASON);
    }
}
