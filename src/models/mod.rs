// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ModelHandle, ModelVersion, PredictionResult, PREDICTION_DECIMALS};
pub use requests::{ApplicantForm, PredictRequest};
pub use responses::{ErrorResponse, HealthResponse, PredictResponse};
