use crate::models::ScoredProduct;

/// Order scored products by descending score and keep the best `top_k`
///
/// The sort is stable: products with equal scores keep their catalog order,
/// so repeated calls with the same input return the same list.
pub fn rank(mut scored: Vec<ScoredProduct>, top_k: usize) -> Vec<ScoredProduct> {
    if top_k == 0 {
        return Vec::new();
    }

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, Product, ProductCategory};
    use std::sync::Arc;

    fn scored(id: &str, score: f64) -> ScoredProduct {
        let product = Product {
            id: id.to_string(),
            name: id.to_string(),
            category: ProductCategory::Equipment,
            price: 10.0,
            description: String::new(),
            features: vec![],
            target_conditions: Default::default(),
            age_range: AgeRange::new(0, 120),
            usage_scenarios: Default::default(),
        };
        ScoredProduct::new(Arc::new(product), score, "")
    }

    fn ids(list: &[ScoredProduct]) -> Vec<&str> {
        list.iter().map(|s| s.product.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending() {
        let ranked = rank(vec![scored("a", 0.2), scored("b", 0.9), scored("c", 0.5)], 10);
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(
            vec![scored("a", 0.5), scored("b", 0.7), scored("c", 0.5), scored("d", 0.5)],
            10,
        );
        assert_eq!(ids(&ranked), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_zero_top_k_is_empty() {
        assert!(rank(vec![scored("a", 0.5)], 0).is_empty());
    }

    #[test]
    fn test_truncates_to_top_k() {
        let ranked = rank(vec![scored("a", 0.1), scored("b", 0.9), scored("c", 0.5)], 2);
        assert_eq!(ids(&ranked), vec!["b", "c"]);
    }
}
