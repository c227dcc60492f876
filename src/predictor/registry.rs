use async_trait::async_trait;
use std::sync::Arc;

use super::{PredictError, Predictor};
use crate::core::{ApplicantRecord, TabularRow};
use crate::models::PredictionResult;
use crate::services::{RegistryClient, RegistryError};

/// Predictor backed by a model resolved from the MLflow registry
///
/// The model is looked up by name and stage on every call; nothing is cached
/// between predictions.
pub struct RegistryPredictor {
    client: Arc<RegistryClient>,
    model_name: String,
    stage: String,
}

impl RegistryPredictor {
    pub fn new(client: Arc<RegistryClient>, model_name: String, stage: String) -> Self {
        Self {
            client,
            model_name,
            stage,
        }
    }
}

#[async_trait]
impl Predictor for RegistryPredictor {
    fn strategy(&self) -> &'static str {
        "registry"
    }

    async fn predict(&self, record: &ApplicantRecord) -> Result<PredictionResult, PredictError> {
        let handle = self.client.resolve(&self.model_name, &self.stage).await?;

        let row = TabularRow::from(record);
        let outputs = self.client.predict(&handle, &row).await?;

        let first = outputs.first().copied().ok_or(RegistryError::EmptyPrediction)?;

        tracing::debug!(
            "Model {} v{} (stage {}) returned {} output(s), first = {}",
            handle.uri,
            handle.version.version,
            handle.stage,
            outputs.len(),
            first
        );

        Ok(PredictionResult::from_raw(first))
    }
}
