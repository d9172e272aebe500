//! Window selection over latest-first exports
//!
//! Exports list the most recent sample first. A window of N keeps the first
//! N rows (the N most recent samples) and re-derives chronological order for
//! display: by timestamp when the export has one, by reversing the rows
//! otherwise.

use crate::data::source::{numeric_values, optional_column, require_column};
use crate::data::timestamps::{TimestampStrategy, normalize_timestamps};
use crate::error::Result;
use chrono::NaiveDateTime;
use polars::prelude::*;
use serde::Serialize;

/// Requested window size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSize {
    /// Every row of the parameter (history)
    Unbounded,
    /// The N most recent rows
    Latest(usize),
}

/// Kind of x axis the window is displayed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    Time,
    Index,
}

/// Position of an observation on the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum AxisPosition {
    Time(NaiveDateTime),
    Index(usize),
}

/// One retained (position, value) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub x: AxisPosition,
    pub value: f64,
}

/// Rows dropped while building a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataQuality {
    /// Rows that entered the window before any dropping
    pub rows_considered: usize,
    /// Rows dropped because their timestamp could not be parsed
    pub unparsed_timestamps: usize,
    /// Rows dropped because their value was missing, non-numeric or non-finite
    pub non_numeric_values: usize,
}

/// Chronologically ordered observations selected for display
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub axis: AxisKind,
    pub observations: Vec<Observation>,
    pub quality: DataQuality,
    /// How the timestamp column was read, `None` for index axes
    pub timestamp_strategy: Option<TimestampStrategy>,
}

/// Column names the window reads from
#[derive(Debug, Clone, Copy)]
pub struct WindowColumns<'a> {
    pub value: &'a str,
    pub timestamp: &'a str,
}

/// Select and order the display window from latest-first parameter rows
pub fn select_window(
    rows: &DataFrame,
    columns: WindowColumns<'_>,
    size: WindowSize,
    dataset: &str,
) -> Result<Window> {
    profiling::scope!("select_window");

    let head = match size {
        WindowSize::Unbounded => rows.clone(),
        WindowSize::Latest(n) => rows.head(Some(n)),
    };
    let values = numeric_values(require_column(&head, columns.value, dataset)?);

    let mut quality = DataQuality {
        rows_considered: head.height(),
        ..Default::default()
    };

    let (axis, ordered, timestamp_strategy) = match optional_column(&head, columns.timestamp) {
        Some(series) => {
            let normalized = normalize_timestamps(series);
            quality.unparsed_timestamps = normalized.missing_count();

            let mut keyed: Vec<(NaiveDateTime, usize)> = normalized
                .values
                .iter()
                .enumerate()
                .filter_map(|(row, ts)| ts.map(|t| (t, row)))
                .collect();
            // Stable, so equal timestamps keep their export order
            keyed.sort_by_key(|(t, _)| *t);

            let ordered: Vec<(AxisPosition, usize)> = keyed
                .into_iter()
                .map(|(t, row)| (AxisPosition::Time(t), row))
                .collect();
            (AxisKind::Time, ordered, Some(normalized.strategy))
        }
        None => {
            let n = head.height();
            let rows_in_order: Vec<usize> = match size {
                WindowSize::Unbounded => (0..n).collect(),
                WindowSize::Latest(_) => (0..n).rev().collect(),
            };
            let ordered: Vec<(AxisPosition, usize)> = rows_in_order
                .into_iter()
                .enumerate()
                .map(|(position, row)| (AxisPosition::Index(position), row))
                .collect();
            (AxisKind::Index, ordered, None)
        }
    };

    let observations: Vec<Observation> = ordered
        .into_iter()
        .filter_map(|(x, row)| {
            values[row]
                .filter(|v| v.is_finite())
                .map(|value| Observation { x, value })
        })
        .collect();
    quality.non_numeric_values =
        quality.rows_considered - quality.unparsed_timestamps - observations.len();

    if quality.unparsed_timestamps > 0 || quality.non_numeric_values > 0 {
        tracing::debug!(
            unparsed_timestamps = quality.unparsed_timestamps,
            non_numeric_values = quality.non_numeric_values,
            "rows dropped from window"
        );
    }

    Ok(Window {
        axis,
        observations,
        quality,
        timestamp_strategy,
    })
}
