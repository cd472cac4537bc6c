use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for personalized recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// Opaque user context, either an object or a JSON-encoded string
    #[serde(default)]
    pub context: serde_json::Value,
    /// Requested list length; negative means none, absent means the configured default
    #[serde(default)]
    #[serde(alias = "top_k", rename = "topK")]
    pub top_k: Option<i64>,
}

/// Request for a text embedding
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmbeddingRequest {
    #[validate(length(min = 1))]
    pub text: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "text".to_string()
}

/// Query parameters accompanying an uploaded analysis payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default = "default_analysis_type")]
    #[serde(alias = "analysis_type", rename = "analysisType")]
    pub analysis_type: String,
    #[serde(default)]
    #[serde(alias = "file_name", rename = "fileName")]
    pub file_name: Option<String>,
}

fn default_analysis_type() -> String {
    "multimodal".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_request_defaults() {
        let req: RecommendationRequest = serde_json::from_str(r#"{"userId": "u1"}"#).unwrap();
        assert_eq!(req.top_k, None);
        assert!(req.context.is_null());
    }

    #[test]
    fn test_embedding_request_default_model() {
        let req: EmbeddingRequest = serde_json::from_str(r#"{"text": "dry eyes"}"#).unwrap();
        assert_eq!(req.model, "text");
    }
}
