use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::requests::report::ReportError;
use crate::workflows::requests::{RecordError, SchemaError, SnapshotError, SweepError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    Schema(SchemaError),
    Record(RecordError),
    Snapshot(SnapshotError),
    Sweep(SweepError),
    Report(ReportError),
    MissingInput(&'static str),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
            AppError::Csv(err) => write!(f, "csv error: {}", err),
            AppError::Schema(err) => write!(f, "schema error: {}", err),
            AppError::Record(err) => write!(f, "record error: {}", err),
            AppError::Snapshot(err) => write!(f, "snapshot error: {}", err),
            AppError::Sweep(err) => write!(f, "timeout sweep error: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::MissingInput(what) => write!(f, "missing input: {}", what),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Csv(err) => Some(err),
            AppError::Schema(err) => Some(err),
            AppError::Record(err) => Some(err),
            AppError::Snapshot(err) => Some(err),
            AppError::Sweep(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::MissingInput(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<SchemaError> for AppError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}

impl From<RecordError> for AppError {
    fn from(value: RecordError) -> Self {
        Self::Record(value)
    }
}

impl From<SnapshotError> for AppError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<SweepError> for AppError {
    fn from(value: SweepError) -> Self {
        Self::Sweep(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn wraps_errors_with_context_and_source() {
        let err = AppError::from(SweepError::UnknownItem {
            tag: "Sofa".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "timeout sweep error: 'Sofa' is not a top-level request item"
        );
        assert!(err.source().is_some());
        assert!(AppError::MissingInput("--snapshots").source().is_none());
    }
}
