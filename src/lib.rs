//! ichart-oxide: Statistical Process Control I-Charts for thermal-plant exports
//!
//! Builds renderable chart descriptions from history, current and AI exports
//! using their precomputed mean/sigma baselines.

pub mod chart;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;

pub use chart::{
    ChartRequest, ChartSpec, Severity, WindowSize, build_ai_chart, build_chart, build_chart_from_path,
    build_current_chart, build_history_chart, build_windowed_chart,
};
pub use config::{AppConfig, DatasetColumns, VariantConfig, VariantKind};
pub use error::{ChartError, Result};
