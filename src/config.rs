use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub predictor: PredictorSettings,
    #[serde(default)]
    pub registry: RegistrySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8501 }

/// Which prediction strategy the service runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorStrategy {
    #[default]
    Stub,
    Registry,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictorSettings {
    #[serde(default)]
    pub strategy: PredictorStrategy,
    /// Seed for the stub strategy; random when unset
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    #[serde(default = "default_tracking_uri")]
    pub tracking_uri: String,
    #[serde(default = "default_serving_uri")]
    pub serving_uri: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default = "default_stage")]
    pub stage: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub token: Option<String>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            tracking_uri: default_tracking_uri(),
            serving_uri: default_serving_uri(),
            model_name: default_model_name(),
            stage: default_stage(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

fn default_tracking_uri() -> String { "http://localhost:5000".to_string() }
fn default_serving_uri() -> String { "http://localhost:5001".to_string() }
fn default_model_name() -> String { "Graduate Admission Predictor".to_string() }
fn default_stage() -> String { "production".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ADMIT)
    /// 5. MLFLOW_TRACKING_URI for the registry endpoint
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ADMIT__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_mlflow_env(settings, std::env::var("MLFLOW_TRACKING_URI").ok())?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("ADMIT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Let the standard MLflow variable point the registry at a tracking server
fn apply_mlflow_env(settings: Config, tracking_uri: Option<String>) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(uri) = tracking_uri.filter(|u| !u.is_empty()) {
        builder = builder.set_override("registry.tracking_uri", uri)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = from_toml("");
        assert_eq!(settings.server.port, 8501);
        assert_eq!(settings.predictor.strategy, PredictorStrategy::Stub);
        assert_eq!(settings.registry.tracking_uri, "http://localhost:5000");
        assert_eq!(settings.registry.model_name, "Graduate Admission Predictor");
        assert_eq!(settings.registry.stage, "production");
    }

    #[test]
    fn test_registry_strategy_from_file() {
        let settings = from_toml(
            r#"
            [predictor]
            strategy = "registry"

            [registry]
            serving_uri = "http://scoring:8080"
            timeout_secs = 5
            "#,
        );
        assert_eq!(settings.predictor.strategy, PredictorStrategy::Registry);
        assert_eq!(settings.registry.serving_uri, "http://scoring:8080");
        assert_eq!(settings.registry.timeout_secs, 5);
    }

    #[test]
    fn test_mlflow_tracking_override() {
        let base = Config::builder()
            .add_source(File::from_str("", FileFormat::Toml))
            .build()
            .unwrap();
        let settings: Settings = apply_mlflow_env(base, Some("http://mlflow:5000".to_string()))
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.registry.tracking_uri, "http://mlflow:5000");
    }

    #[test]
    fn test_admit_env_overrides_file() {
        let env = config::Map::from([
            ("ADMIT__SERVER__PORT".to_string(), "9000".to_string()),
            ("ADMIT__PREDICTOR__STRATEGY".to_string(), "registry".to_string()),
            ("OTHER__SERVER__PORT".to_string(), "1".to_string()),
        ]);
        let settings: Settings = Config::builder()
            .add_source(File::from_str("[server]\nport = 8600\n", FileFormat::Toml))
            .add_source(env_source().source(Some(env)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.predictor.strategy, PredictorStrategy::Registry);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }
}
