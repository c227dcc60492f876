use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

use crate::config::{PredictorStrategy, Settings};
use crate::core::{ApplicantRecord, ViewEvent, ViewState, FORM_FIELDS};
use crate::models::{
    ApplicantForm, ErrorResponse, HealthResponse, PredictRequest, PredictResponse, PredictionResult,
};
use crate::predictor::{PredictError, Predictor, RegistryPredictor, StubPredictor};
use crate::routes::page;
use crate::services::RegistryClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
    /// Present when the registry strategy is active, for health checks
    pub registry: Option<Arc<RegistryClient>>,
}

impl AppState {
    /// Build the state with the predictor chosen in the settings
    pub fn from_settings(settings: &Settings) -> Result<Self, PredictError> {
        match settings.predictor.strategy {
            PredictorStrategy::Stub => {
                let stub = match settings.predictor.seed {
                    Some(seed) => StubPredictor::seeded(seed),
                    None => StubPredictor::new(),
                };
                Ok(Self {
                    predictor: Arc::new(stub),
                    registry: None,
                })
            }
            PredictorStrategy::Registry => {
                let registry = &settings.registry;
                let client = Arc::new(RegistryClient::new(
                    registry.tracking_uri.clone(),
                    registry.serving_uri.clone(),
                    registry.token.clone(),
                    Duration::from_secs(registry.timeout_secs),
                )?);
                let predictor = RegistryPredictor::new(
                    client.clone(),
                    registry.model_name.clone(),
                    registry.stage.clone(),
                );
                Ok(Self {
                    predictor: Arc::new(predictor),
                    registry: Some(client),
                })
            }
        }
    }
}

/// Page routes served at the root
pub fn configure_page(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(index))
        .route("/predict", web::post().to(predict_form));
}

/// JSON API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/form", web::get().to(form_schema))
        .route("/predict", web::post().to(predict_json));
}

/// Run one prediction attempt, logging its outcome
async fn run_prediction(
    predictor: &dyn Predictor,
    record: &ApplicantRecord,
) -> (uuid::Uuid, Result<PredictionResult, PredictError>) {
    let prediction_id = uuid::Uuid::new_v4();
    tracing::info!("Prediction {} requested (strategy: {})", prediction_id, predictor.strategy());

    let result = predictor.predict(record).await;
    match &result {
        Ok(value) => tracing::info!("Prediction {} = {}", prediction_id, value),
        Err(e) => tracing::error!("Prediction {} failed: {}", prediction_id, e),
    }

    (prediction_id, result)
}

/// Render the form with default values and an empty result slot
async fn index() -> impl Responder {
    html(StatusCode::OK, page::render(&ViewState::default()))
}

/// Handle the predict button on the HTML page
///
/// POST /predict (application/x-www-form-urlencoded)
async fn predict_form(state: web::Data<AppState>, form: web::Form<ApplicantForm>) -> impl Responder {
    let view = ViewState::default()
        .apply(form.updates().map(ViewEvent::FieldChanged))
        .apply([ViewEvent::PredictRequested]);

    let (_, result) = run_prediction(state.predictor.as_ref(), &view.record).await;

    let (status, event) = match result {
        Ok(value) => (StatusCode::OK, ViewEvent::PredictionReady(value)),
        Err(e) => (StatusCode::BAD_GATEWAY, ViewEvent::PredictionFailed(e.to_string())),
    };
    let view = view.apply([event]);

    html(status, page::render(&view))
}

/// Predict endpoint
///
/// POST /api/v1/predict
///
/// Request body:
/// ```json
/// {
///   "greScore": 300,
///   "toeflScore": 100,
///   "universityRating": 1,
///   "sop": 3.0,
///   "lor": 3.0,
///   "cgpa": 8.5,
///   "research": "Yes",
///   "gender": "M"
/// }
/// ```
async fn predict_json(state: web::Data<AppState>, req: web::Json<PredictRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for predict request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let record = match ApplicantRecord::try_from(&*req) {
        Ok(record) => record,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid input".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let (prediction_id, result) = run_prediction(state.predictor.as_ref(), &record).await;

    match result {
        Ok(prediction) => HttpResponse::Ok().json(PredictResponse {
            prediction_id: prediction_id.to_string(),
            prediction,
            strategy: state.predictor.strategy().to_string(),
        }),
        Err(e) => HttpResponse::BadGateway().json(ErrorResponse {
            error: "Prediction failed".to_string(),
            message: e.to_string(),
            status_code: 502,
        }),
    }
}

/// Describe the eight form fields with their constraints
async fn form_schema() -> impl Responder {
    HttpResponse::Ok().json(json!({ "fields": FORM_FIELDS }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let registry_healthy = match &state.registry {
        Some(registry) => registry.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if registry_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        strategy: state.predictor.strategy().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}
