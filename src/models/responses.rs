use serde::{Deserialize, Serialize};

use crate::models::domain::PredictionResult;

/// Response for the predict endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "predictionId")]
    pub prediction_id: String,
    pub prediction: PredictionResult,
    pub strategy: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub strategy: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
