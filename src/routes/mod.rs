// Route exports
pub mod page;
pub mod predict;

pub use predict::AppState;

use actix_web::{error, http::StatusCode, web, HttpResponse};

/// JSON error response for malformed payloads
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle form payload errors
pub fn handle_form_payload_error(err: error::UrlencodedError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Form payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_form".to_string(),
        message: format!("Invalid form: {}", err),
        status_code: 400,
    }
    .into()
}

/// Register extractor error handlers for a service
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg
        .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::FormConfig::default().error_handler(handle_form_payload_error));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_extractors)
        .service(web::scope("/api/v1").configure(predict::configure))
        .configure(predict::configure_page);
}
