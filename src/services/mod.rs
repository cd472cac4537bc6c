// Service exports
pub mod analysis;
pub mod catalog;
pub mod embedding;

pub use analysis::{Analyzer, AnalysisError, AnalysisResult, StatisticsAnalyzer};
pub use catalog::{ProductCatalog, CatalogError};
pub use embedding::{EmbeddingCache, Embedding, EmbeddingError, EmbeddingStats, cache_key, default_model_dimensions};
