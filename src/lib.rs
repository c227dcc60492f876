//! Admission Predictor - graduate admission prediction form
//!
//! Collects applicant scores on a single page, turns them into a one-row
//! table and asks a predictor for the admission probability. The predictor is
//! either a random stub or a model served from an MLflow registry.

pub mod config;
pub mod core;
pub mod models;
pub mod predictor;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{ApplicantRecord, TabularRow, ViewState, FEATURE_COLUMNS};
pub use models::{PredictRequest, PredictResponse, PredictionResult};
pub use predictor::{Predictor, RegistryPredictor, StubPredictor};
