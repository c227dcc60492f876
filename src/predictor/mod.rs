//! Prediction strategies
//!
//! Both strategies implement [`Predictor`]. The service picks one at startup
//! from configuration and keeps it for its whole lifetime.

pub mod registry;
pub mod stub;

pub use registry::RegistryPredictor;
pub use stub::StubPredictor;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::ApplicantRecord;
use crate::models::PredictionResult;
use crate::services::RegistryError;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Model registry error: {0}")]
    Registry(#[from] RegistryError),
}

#[async_trait]
pub trait Predictor: Send + Sync {
    /// Short name reported in logs and API responses
    fn strategy(&self) -> &'static str;

    async fn predict(&self, record: &ApplicantRecord) -> Result<PredictionResult, PredictError>;
}
