use crate::error::{ChartError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// DataSource wraps one plant export as a materialized polars DataFrame
pub struct DataSource {
    /// Materialized DataFrame for the chart pipeline
    materialized: DataFrame,
    /// Original file path
    file_path: Option<PathBuf>,
}

impl DataSource {
    /// Load data from a file (CSV or Parquet)
    ///
    /// CSV columns are read as text; numeric and timestamp coercion happens per
    /// use so one malformed cell cannot fail the whole read.
    pub fn load(path: &Path) -> Result<Self> {
        std::fs::metadata(path)?;

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ChartError::UnsupportedFormat {
                extension: String::new(),
            })?;

        let lazy = match extension.to_lowercase().as_str() {
            "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
            "csv" => LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(0))
                .finish()?,
            ext => {
                return Err(ChartError::UnsupportedFormat {
                    extension: ext.to_string(),
                });
            }
        };

        let materialized = lazy.collect()?;
        tracing::debug!(
            path = %path.display(),
            rows = materialized.height(),
            columns = materialized.width(),
            "dataset loaded"
        );

        Ok(Self {
            materialized,
            file_path: Some(path.to_path_buf()),
        })
    }

    /// Create DataSource from an already-loaded DataFrame
    pub fn from_dataframe(df: DataFrame, path: Option<PathBuf>) -> Self {
        Self {
            materialized: df,
            file_path: path,
        }
    }

    /// Get a reference to the materialized DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.materialized
    }

    /// Get the file path
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Dataset identity used in error context
    pub fn label(&self) -> String {
        self.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<in-memory dataset>".to_string())
    }

    /// Get all column names
    pub fn column_names(&self) -> Vec<String> {
        self.materialized
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.materialized.height()
    }
}

/// Look up a column by exact name, reporting a schema error when absent
pub fn require_column<'a>(df: &'a DataFrame, name: &str, dataset: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|c| c.as_materialized_series())
        .map_err(|_| ChartError::Schema {
            column: name.to_string(),
            dataset: dataset.to_string(),
        })
}

/// Look up an optional column by exact name
pub fn optional_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a Series> {
    df.column(name).ok().map(|c| c.as_materialized_series())
}

/// Get a column's numeric values
///
/// Text cells are trimmed and parsed; anything unparseable or NaN becomes `None`.
/// Infinite values are kept so callers can decide how to treat them.
pub fn numeric_values(series: &Series) -> Vec<Option<f64>> {
    let parsed: Vec<Option<f64>> = if let Ok(str_series) = series.str() {
        str_series
            .into_iter()
            .map(|opt| opt.and_then(|s| s.trim().parse::<f64>().ok()))
            .collect()
    } else {
        match series.cast(&DataType::Float64) {
            Ok(s) => match s.f64() {
                Ok(ca) => ca.into_iter().collect(),
                Err(_) => vec![None; series.len()],
            },
            Err(_) => vec![None; series.len()],
        }
    };

    parsed
        .into_iter()
        .map(|opt| opt.filter(|v| !v.is_nan()))
        .collect()
}

/// Get a column's values as text, `None` for nulls
pub fn text_values(series: &Series) -> Vec<Option<String>> {
    if let Ok(str_series) = series.str() {
        return str_series
            .into_iter()
            .map(|opt| opt.map(str::to_string))
            .collect();
    }

    match series.cast(&DataType::String) {
        Ok(s) => match s.str() {
            Ok(ca) => ca.into_iter().map(|opt| opt.map(str::to_string)).collect(),
            Err(_) => vec![None; series.len()],
        },
        Err(_) => vec![None; series.len()],
    }
}
