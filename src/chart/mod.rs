//! I-Chart pipeline
//!
//! One parameterized build shared by the history, current and AI charts:
//! select the parameter's rows, resolve its baseline, select and order the
//! window, classify, then describe. Every build is a pure function of the
//! dataset, the parameter and the request.

pub mod classify;
pub mod spec;
pub mod window;

pub use classify::{ClassScheme, ClassifiedPoint, ControlLimits, Severity};
pub use spec::{ChartSpec, ChartSpecBuilder, ReferenceKind};
pub use window::{AxisKind, AxisPosition, DataQuality, Observation, Window, WindowSize};

use crate::config::{DatasetColumns, VariantConfig};
use crate::data::{DataSource, resolve_baseline, select_parameter_rows};
use crate::error::Result;
use std::path::Path;

/// Everything a build needs besides the dataset and parameter
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub variant: VariantConfig,
    pub columns: DatasetColumns,
    pub window: WindowSize,
}

impl ChartRequest {
    pub fn history() -> Self {
        Self {
            variant: VariantConfig::history(),
            columns: DatasetColumns::default(),
            window: WindowSize::Unbounded,
        }
    }

    pub fn windowed(variant: VariantConfig, window_size: usize) -> Self {
        Self {
            variant,
            columns: DatasetColumns::default(),
            window: WindowSize::Latest(window_size),
        }
    }

    pub fn with_columns(mut self, columns: DatasetColumns) -> Self {
        self.columns = columns;
        self
    }
}

/// Build a chart from an already-loaded dataset
pub fn build_chart(source: &DataSource, parameter: &str, request: &ChartRequest) -> Result<ChartSpec> {
    profiling::scope!("build_chart");

    let dataset = source.label();
    let columns = &request.columns;
    let variant = &request.variant;

    let rows = select_parameter_rows(source.dataframe(), &columns.parameter, parameter, &dataset)?;
    let baseline = resolve_baseline(&rows, columns.baseline(variant), parameter, &dataset)?;
    let window = window::select_window(&rows, columns.window(), request.window, &dataset)?;

    let limits = ControlLimits::from_baseline(&baseline);
    let classified = classify::classify_all(&window.observations, &limits, variant.scheme);
    let spec = ChartSpecBuilder::new(variant, parameter, &baseline, request.window)
        .build(&window, &classified);

    tracing::info!(
        variant = variant.kind.as_str(),
        parameter,
        dataset = %dataset,
        timestamps = ?spec.timestamps,
        points = spec.line.points.len(),
        out_of_control = spec.points_for(Severity::OutOfControl).len(),
        "chart built"
    );
    Ok(spec)
}

/// Load a dataset and build a chart from it
pub fn build_chart_from_path(path: &Path, parameter: &str, request: &ChartRequest) -> Result<ChartSpec> {
    let source = DataSource::load(path)?;
    build_chart(&source, parameter, request)
}

/// Full-history chart: every row of the parameter, two-class scheme
pub fn build_history_chart(path: &Path, parameter: &str) -> Result<ChartSpec> {
    build_chart_from_path(path, parameter, &ChartRequest::history())
}

/// Windowed chart over the `window_size` most recent rows
pub fn build_windowed_chart(
    path: &Path,
    parameter: &str,
    window_size: usize,
    variant: &VariantConfig,
) -> Result<ChartSpec> {
    build_chart_from_path(path, parameter, &ChartRequest::windowed(variant.clone(), window_size))
}

/// "Current snapshot" chart
pub fn build_current_chart(path: &Path, parameter: &str, window_size: usize) -> Result<ChartSpec> {
    build_windowed_chart(path, parameter, window_size, &VariantConfig::current())
}

/// "AI snapshot" chart
pub fn build_ai_chart(path: &Path, parameter: &str, window_size: usize) -> Result<ChartSpec> {
    build_windowed_chart(path, parameter, window_size, &VariantConfig::ai())
}
