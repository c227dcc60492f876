use crate::core::TabularRow;
use crate::models::{ModelHandle, ModelVersion};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the MLflow registry or scoring server
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Model returned no predictions")]
    EmptyPrediction,
}

/// MLflow REST client
///
/// Resolves registered models on the tracking server and sends rows to the
/// scoring server that serves them.
pub struct RegistryClient {
    tracking_uri: String,
    serving_uri: String,
    token: Option<String>,
    client: Client,
}

impl RegistryClient {
    /// Create a new registry client
    pub fn new(
        tracking_uri: String,
        serving_uri: String,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            tracking_uri,
            serving_uri,
            token,
            client,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Resolve the latest model version registered under `name` in `stage`
    pub async fn resolve(&self, name: &str, stage: &str) -> Result<ModelHandle, RegistryError> {
        let url = format!(
            "{}/api/2.0/mlflow/registered-models/get-latest-versions?name={}&stages={}",
            self.tracking_uri.trim_end_matches('/'),
            urlencoding::encode(name),
            urlencoding::encode(stage)
        );

        tracing::debug!("Resolving model from: {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        let json: Value = checked(response, "resolve model").await?.json().await?;

        let versions = match json.get("model_versions") {
            Some(v) => v
                .as_array()
                .ok_or_else(|| RegistryError::InvalidResponse("model_versions is not an array".into()))?
                .clone(),
            // MLflow omits the key entirely when nothing matches
            None => Vec::new(),
        };

        let version = versions
            .into_iter()
            .next()
            .ok_or_else(|| RegistryError::NotFound(ModelHandle::registry_uri(name, stage)))?;

        let version: ModelVersion = serde_json::from_value(version)
            .map_err(|e| RegistryError::InvalidResponse(format!("Failed to parse model version: {}", e)))?;

        tracing::debug!(
            "Resolved {} version {} (stage: {:?})",
            version.name,
            version.version,
            version.current_stage
        );

        Ok(ModelHandle {
            uri: ModelHandle::registry_uri(name, stage),
            stage: stage.to_string(),
            version,
        })
    }

    /// Run the model on a single row and return its raw outputs
    pub async fn predict(
        &self,
        handle: &ModelHandle,
        row: &TabularRow,
    ) -> Result<Vec<f64>, RegistryError> {
        let url = format!("{}/invocations", self.serving_uri.trim_end_matches('/'));

        tracing::debug!("Invoking {} (version {}) at {}", handle.uri, handle.version.version, url);

        let response = self
            .authorize(self.client.post(&url))
            .json(&row.to_dataframe_split())
            .send()
            .await?;

        let json: Value = checked(response, "invoke model").await?.json().await?;

        parse_predictions(&json)
    }

    /// Check that the tracking server answers on its health endpoint
    pub async fn health_check(&self) -> Result<bool, RegistryError> {
        let url = format!("{}/health", self.tracking_uri.trim_end_matches('/'));
        let response = self.authorize(self.client.get(&url)).send().await?;
        Ok(response.status().is_success())
    }
}

/// Turn a non-success status into an error carrying the server's message
async fn checked(response: Response, action: &str) -> Result<Response, RegistryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);

    tracing::error!("Failed to {}: {} - {}", action, status, message);

    Err(RegistryError::ApiError {
        status: status.as_u16(),
        message,
    })
}

/// Extract predictions from a scoring server response
///
/// Accepts `{"predictions": [...]}` and a bare array, with each entry either
/// a number or a single-element array.
pub fn parse_predictions(json: &Value) -> Result<Vec<f64>, RegistryError> {
    let items = json
        .get("predictions")
        .unwrap_or(json)
        .as_array()
        .ok_or_else(|| RegistryError::InvalidResponse("Missing predictions array".into()))?;

    let values = items
        .iter()
        .map(|item| {
            let scalar = match item {
                Value::Array(inner) => inner.first(),
                other => Some(other),
            };
            scalar
                .and_then(Value::as_f64)
                .ok_or_else(|| RegistryError::InvalidResponse(format!("Non-numeric prediction: {}", item)))
        })
        .collect::<Result<Vec<f64>, RegistryError>>()?;

    if values.is_empty() {
        return Err(RegistryError::EmptyPrediction);
    }

    Ok(values)
}
