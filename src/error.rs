//! Error types for ichart-oxide
//!
//! Schema, lookup and baseline failures abort a chart build and carry the
//! parameter and dataset they were raised for. Row-level data quality
//! problems are never errors; they are counted in the chart's quality report.

use thiserror::Error;

/// Main error type for chart builds
#[derive(Error, Debug)]
pub enum ChartError {
    /// A required column is absent from the dataset
    #[error("Column '{column}' not found in dataset {dataset}")]
    Schema { column: String, dataset: String },

    /// The parameter matched zero rows
    #[error("No rows for parameter_name='{parameter}' in {dataset}")]
    NotFound { parameter: String, dataset: String },

    /// Mean or sigma could not be resolved to a finite number
    #[error("Baseline {field} ('{column}') is missing or non-finite for '{parameter}' in {dataset}")]
    MissingBaseline {
        parameter: String,
        dataset: String,
        field: &'static str,
        column: String,
    },

    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// UI-friendly error message formatting
impl ChartError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            ChartError::Schema { column, .. } => {
                format!("Dataset must contain a '{}' column", column)
            }
            ChartError::NotFound { parameter, .. } => {
                format!("No data found for parameter '{}'", parameter)
            }
            ChartError::MissingBaseline { column, parameter, .. } => {
                format!(
                    "'{}' must be present and non-null for parameter '{}'",
                    column, parameter
                )
            }
            ChartError::FileIo(e) => format!("File error: {}", e),
            ChartError::Polars(e) => format!("Data error: {}", e),
            ChartError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            ChartError::Config(msg) => format!("Config error: {}", msg),
            ChartError::Json(e) => format!("JSON error: {}", e),
        }
    }

    /// Get a short title for the error (for toast notifications)
    pub fn title(&self) -> &'static str {
        match self {
            ChartError::Schema { .. } => "Schema Error",
            ChartError::NotFound { .. } => "Parameter Not Found",
            ChartError::MissingBaseline { .. } => "Missing Baseline",
            ChartError::FileIo(_) => "File Error",
            ChartError::Polars(_) => "Data Error",
            ChartError::UnsupportedFormat { .. } => "Unsupported Format",
            ChartError::Config(_) => "Configuration Error",
            ChartError::Json(_) => "JSON Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ChartError::Schema {
            column: "parameter_name".to_string(),
            dataset: "history_export.csv".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Dataset must contain a 'parameter_name' column"
        );
        assert_eq!(err.title(), "Schema Error");

        let err = ChartError::MissingBaseline {
            parameter: "BED HEIGHT".to_string(),
            dataset: "current_export.csv".to_string(),
            field: "sigma",
            column: "Current_Sigma_Value".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "'Current_Sigma_Value' must be present and non-null for parameter 'BED HEIGHT'"
        );
        assert!(err.to_string().contains("current_export.csv"));
    }

    #[test]
    fn test_not_found_carries_context() {
        let err = ChartError::NotFound {
            parameter: "SH3 OUTLET TEMPERATURE".to_string(),
            dataset: "AI_export.csv".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No rows for parameter_name='SH3 OUTLET TEMPERATURE' in AI_export.csv"
        );
        assert_eq!(err.title(), "Parameter Not Found");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let chart_err: ChartError = io_err.into();
        assert!(matches!(chart_err, ChartError::FileIo(_)));
    }
}
