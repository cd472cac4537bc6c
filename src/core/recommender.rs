use crate::core::{
    fallback::FallbackProvider,
    profile::extract_profile,
    ranking::rank,
    reasons::explain,
    scoring::{MatchScorer, Scorer, ScoringError},
};
use crate::models::{Product, ScoredProduct, ScoringWeights};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Reasons the personalized pipeline could not produce a result
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("product catalog is empty")]
    EmptyCatalog,

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

/// Result of a recommendation request
///
/// `degraded` is only for logs and tests, callers see the same response shape
/// either way.
#[derive(Debug, Clone)]
pub struct RecommendationOutcome {
    pub items: Vec<ScoredProduct>,
    pub degraded: bool,
}

/// Recommendation orchestrator - runs the full pipeline for one request
///
/// # Pipeline Stages
/// 1. Profile extraction from raw context
/// 2. Scoring of every catalog entry
/// 3. Ranking and truncation
/// 4. Reason generation for the kept entries
///
/// Any failure replaces the whole result with the fallback list.
#[derive(Debug, Clone)]
pub struct Recommender<S: Scorer = MatchScorer> {
    scorer: S,
    fallback: FallbackProvider,
}

impl Recommender<MatchScorer> {
    pub fn new(weights: ScoringWeights) -> Self {
        Self::with_scorer(MatchScorer::new(weights), FallbackProvider::default())
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl<S: Scorer> Recommender<S> {
    pub fn with_scorer(scorer: S, fallback: FallbackProvider) -> Self {
        Self { scorer, fallback }
    }

    /// Run the personalized pipeline, surfacing the first failure
    ///
    /// # Arguments
    /// * `catalog` - Read-only product snapshot, in catalog order
    /// * `context` - Raw user context
    /// * `top_k` - Maximum number of recommendations to return
    pub fn try_recommend(
        &self,
        catalog: &[Arc<Product>],
        context: &Value,
        top_k: usize,
    ) -> Result<Vec<ScoredProduct>, RecommendationError> {
        if catalog.is_empty() {
            return Err(RecommendationError::EmptyCatalog);
        }

        // Stage 1: Profile extraction
        let profile = extract_profile(context);

        // Stage 2: Score every product
        let scored = catalog
            .iter()
            .map(|product| -> Result<ScoredProduct, ScoringError> {
                let score = self.scorer.score(&profile, product)?;
                Ok(ScoredProduct::new(Arc::clone(product), score, String::new()))
            })
            .collect::<Result<Vec<_>, ScoringError>>()?;

        // Stage 3: Rank
        let mut ranked = rank(scored, top_k);

        // Stage 4: Explain
        let weights = self.scorer.weights();
        for entry in &mut ranked {
            entry.reason = explain(&profile, &entry.product, weights);
        }

        Ok(ranked)
    }

    /// Run the pipeline, substituting the fallback list on any failure
    pub fn recommend(&self, catalog: &[Arc<Product>], context: &Value, top_k: usize) -> RecommendationOutcome {
        match self.try_recommend(catalog, context, top_k) {
            Ok(items) => {
                tracing::info!(
                    "Returning {} personalized recommendations (from {} products)",
                    items.len(),
                    catalog.len()
                );
                RecommendationOutcome { items, degraded: false }
            }
            Err(e) => {
                tracing::error!("Recommendation pipeline failed, serving fallback list: {}", e);
                RecommendationOutcome {
                    items: self.fallback.defaults(top_k),
                    degraded: true,
                }
            }
        }
    }
}

impl Default for Recommender<MatchScorer> {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
