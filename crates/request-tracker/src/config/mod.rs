use crate::workflows::requests::schema::standard::PHONE_FIELD;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub analysis: AnalysisConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let schema_path = non_empty_var("REQUESTS_SCHEMA_PATH").map(PathBuf::from);
        let snapshot_dir = non_empty_var("SNAPSHOT_DIR").map(PathBuf::from);
        let household_field = match env::var("HOUSEHOLD_FIELD") {
            Ok(value) if value.trim().is_empty() => return Err(ConfigError::EmptyHouseholdField),
            Ok(value) => value,
            Err(_) => PHONE_FIELD.to_string(),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            analysis: AnalysisConfig {
                schema_path,
                snapshot_dir,
                household_field,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Where request data and the schema come from.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub schema_path: Option<PathBuf>,
    pub snapshot_dir: Option<PathBuf>,
    pub household_field: String,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyHouseholdField,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyHouseholdField => {
                write!(f, "HOUSEHOLD_FIELD must name a record field when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::EmptyHouseholdField => None,
        }
    }
}
