//! Precomputed baseline lookup
//!
//! Baselines are never computed from samples. Mean and sigma come from the
//! export's variant-specific columns and must resolve to finite numbers.

use crate::data::source::{numeric_values, optional_column, text_values};
use crate::error::{ChartError, Result};
use polars::prelude::*;

/// Per-parameter baseline
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    pub mean: f64,
    pub sigma: f64,
    pub design: Option<f64>,
    pub unit: Option<String>,
}

/// Column names the resolver reads from
#[derive(Debug, Clone, Copy)]
pub struct BaselineColumns<'a> {
    pub mean: &'a str,
    pub sigma: &'a str,
    pub design: &'a str,
    pub unit: &'a str,
}

/// Resolve the baseline from the parameter-filtered rows
///
/// Each field takes the first non-missing value found in any row.
pub fn resolve_baseline(
    rows: &DataFrame,
    columns: BaselineColumns<'_>,
    parameter: &str,
    dataset: &str,
) -> Result<Baseline> {
    profiling::scope!("resolve_baseline");

    let required = |field: &'static str, column: &str| -> Result<f64> {
        first_number(rows, column)
            .filter(|v| v.is_finite())
            .ok_or_else(|| ChartError::MissingBaseline {
                parameter: parameter.to_string(),
                dataset: dataset.to_string(),
                field,
                column: column.to_string(),
            })
    };

    let mean = required("mean", columns.mean)?;
    let sigma = required("sigma", columns.sigma)?;
    if sigma < 0.0 {
        tracing::warn!(parameter, sigma, "negative sigma in baseline, using as-is");
    }

    let design = optional_column(rows, columns.design).and_then(|series| {
        numeric_values(series)
            .into_iter()
            .flatten()
            .find(|v| v.is_finite())
    });

    let unit = optional_column(rows, columns.unit).and_then(|series| {
        text_values(series)
            .into_iter()
            .flatten()
            .map(|u| u.trim().to_string())
            .find(|u| !u.is_empty())
    });

    Ok(Baseline {
        mean,
        sigma,
        design,
        unit,
    })
}

/// First parseable number in a column, `None` when the column is absent or blank
fn first_number(rows: &DataFrame, column: &str) -> Option<f64> {
    optional_column(rows, column)
        .and_then(|series| numeric_values(series).into_iter().flatten().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: BaselineColumns<'static> = BaselineColumns {
        mean: "Current_Mean_Value",
        sigma: "Current_Sigma_Value",
        design: "Design_Value",
        unit: "param_unit",
    };

    #[test]
    fn test_first_non_missing_value_wins() {
        let rows = df!(
            "Current_Mean_Value" => &[None, Some("850.0"), Some("900.0")],
            "Current_Sigma_Value" => &[Some("x"), Some("4.5"), None],
            "Design_Value" => &[None, None, Some("860")],
            "param_unit" => &[Some("  "), Some(" degC "), Some("K")]
        )
        .unwrap();

        let baseline = resolve_baseline(&rows, COLUMNS, "BED TEMPERATURE", "t.csv").unwrap();
        assert_eq!(
            baseline,
            Baseline {
                mean: 850.0,
                sigma: 4.5,
                design: Some(860.0),
                unit: Some("degC".to_string()),
            }
        );
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let rows = df!(
            "Current_Mean_Value" => &["10"],
            "Current_Sigma_Value" => &["2"]
        )
        .unwrap();

        let baseline = resolve_baseline(&rows, COLUMNS, "BED HEIGHT", "t.csv").unwrap();
        assert_eq!(baseline.design, None);
        assert_eq!(baseline.unit, None);
    }

    #[test]
    fn test_blank_mean_is_missing_baseline() {
        let rows = df!(
            "Current_Mean_Value" => &[None::<&str>, None, None],
            "Current_Sigma_Value" => &["1", "1", "1"],
            "value" => &["1", "2", "3"]
        )
        .unwrap();

        let err = resolve_baseline(&rows, COLUMNS, "BED HEIGHT", "t.csv").unwrap_err();
        assert!(matches!(err, ChartError::MissingBaseline { field: "mean", .. }));
    }

    #[test]
    fn test_absent_sigma_column_is_missing_baseline() {
        let rows = df!("Current_Mean_Value" => &["10"]).unwrap();
        let err = resolve_baseline(&rows, COLUMNS, "BED HEIGHT", "t.csv").unwrap_err();
        assert!(matches!(
            err,
            ChartError::MissingBaseline { field: "sigma", column, .. } if column == "Current_Sigma_Value"
        ));
    }

    #[test]
    fn test_non_finite_sigma_is_rejected() {
        let rows = df!(
            "Current_Mean_Value" => &["10"],
            "Current_Sigma_Value" => &["inf"]
        )
        .unwrap();
        let err = resolve_baseline(&rows, COLUMNS, "BED HEIGHT", "t.csv").unwrap_err();
        assert!(matches!(err, ChartError::MissingBaseline { field: "sigma", .. }));
    }
}
