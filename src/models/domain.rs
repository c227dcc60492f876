use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::fields::round_to;

/// Decimal places kept on a prediction
pub const PREDICTION_DECIMALS: u32 = 4;

/// Predicted admission probability, rounded to four decimals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResult(f64);

impl PredictionResult {
    /// Round a raw model output
    pub fn from_raw(value: f64) -> Self {
        Self(round_to(value, PREDICTION_DECIMALS))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Model version as reported by the MLflow model registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelVersion {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub current_stage: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Handle to a model resolved from the registry for one prediction call
#[derive(Debug, Clone)]
pub struct ModelHandle {
    pub uri: String,
    pub stage: String,
    pub version: ModelVersion,
}

impl ModelHandle {
    /// Registry URI in the `models:/<name>/<stage>` form
    pub fn registry_uri(name: &str, stage: &str) -> String {
        format!("models:/{}/{}", name, stage)
    }
}
