use crate::data::source::{require_column, text_values};
use crate::error::{ChartError, Result};
use polars::prelude::*;

/// Keep only the rows whose parameter-name column equals `parameter`,
/// ignoring case. Source row order is preserved.
pub fn select_parameter_rows(
    df: &DataFrame,
    parameter_column: &str,
    parameter: &str,
    dataset: &str,
) -> Result<DataFrame> {
    profiling::scope!("select_parameter_rows");

    let names = require_column(df, parameter_column, dataset)?;
    let target = parameter.to_uppercase();

    let mask: BooleanChunked = text_values(names)
        .into_iter()
        .map(|opt| Some(opt.is_some_and(|name| name.to_uppercase() == target)))
        .collect();

    let rows = df.filter(&mask)?;
    if rows.height() == 0 {
        return Err(ChartError::NotFound {
            parameter: parameter.to_string(),
            dataset: dataset.to_string(),
        });
    }

    tracing::debug!(parameter, rows = rows.height(), "parameter rows selected");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant_frame() -> DataFrame {
        df!(
            "parameter_name" => &["BED TEMPERATURE", "bed height", "Bed Temperature", "BED TEMPERATURE 2"],
            "value" => &["850", "612", "845", "10"]
        )
        .unwrap()
    }

    #[test]
    fn test_case_insensitive_whole_string_match() {
        let rows = select_parameter_rows(&plant_frame(), "parameter_name", "bed temperature", "t.csv")
            .unwrap();

        assert_eq!(rows.height(), 2);
        let values = text_values(rows.column("value").unwrap().as_materialized_series());
        assert_eq!(values, vec![Some("850".to_string()), Some("845".to_string())]);
    }

    #[test]
    fn test_no_match_is_not_found() {
        let err = select_parameter_rows(&plant_frame(), "parameter_name", "SH3 OUTLET TEMPERATURE", "t.csv")
            .unwrap_err();
        assert!(matches!(err, ChartError::NotFound { parameter, .. } if parameter == "SH3 OUTLET TEMPERATURE"));
    }

    #[test]
    fn test_partial_name_does_not_match() {
        let err = select_parameter_rows(&plant_frame(), "parameter_name", "BED", "t.csv").unwrap_err();
        assert!(matches!(err, ChartError::NotFound { .. }));
    }

    #[test]
    fn test_missing_parameter_column_is_schema_error() {
        let df = df!("tag" => &["BED HEIGHT"]).unwrap();
        let err = select_parameter_rows(&df, "parameter_name", "BED HEIGHT", "t.csv").unwrap_err();
        assert!(matches!(err, ChartError::Schema { column, .. } if column == "parameter_name"));
    }

    #[test]
    fn test_null_names_are_skipped() {
        let df = df!(
            "parameter_name" => &[None, Some("BED HEIGHT")],
            "value" => &["1", "2"]
        )
        .unwrap();
        let rows = select_parameter_rows(&df, "parameter_name", "Bed Height", "t.csv").unwrap();
        assert_eq!(rows.height(), 1);
    }
}
