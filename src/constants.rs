//! Application-wide constants and default values
//!
//! This module centralizes the fixed column names, thresholds and styling
//! values used by the chart pipeline.

/// Default column identifiers of the plant exports
pub mod columns {
    pub const PARAMETER_NAME: &str = "parameter_name";
    pub const VALUE: &str = "value";
    pub const TIMESTAMP: &str = "ts";
    pub const UNIT: &str = "param_unit";
    pub const DESIGN_VALUE: &str = "Design_Value";

    pub const HISTORY_MEAN: &str = "History_Mean_Value";
    pub const HISTORY_SIGMA: &str = "History_Sigma_Value";
    pub const CURRENT_MEAN: &str = "Current_Mean_Value";
    pub const CURRENT_SIGMA: &str = "Current_Sigma_Value";
    pub const AI_MEAN: &str = "AI_Mean_Value";
    pub const AI_SIGMA: &str = "AI_Sigma_Value";
}

/// Statistical Process Control (SPC) thresholds
pub mod spc {
    /// Inner band multiplier: |value - mean| <= 1σ is normal
    pub const INNER_SIGMA: f64 = 1.0;

    /// Control limit multiplier (±3σ)
    pub const CONTROL_SIGMA: f64 = 3.0;
}

/// Date/time parsing constants
pub mod datetime {
    /// Known export formats, tried in order against the whole column
    pub const KNOWN_FORMATS: [&str; 6] = [
        "%d-%m-%Y %H:%M:%S",
        "%d-%m-%Y %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    /// Per-value fallback formats with a time component, day-first before month-first
    pub const PERMISSIVE_DATETIME_FORMATS: [&str; 24] = [
        "%d-%m-%Y %H:%M:%S",
        "%d-%m-%Y %H:%M:%S%.f",
        "%d-%m-%Y %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M:%S%.f",
        "%d/%m/%Y %H:%M",
        "%d.%m.%Y %H:%M:%S",
        "%d.%m.%Y %H:%M",
        "%d-%m-%Y %I:%M:%S %p",
        "%d/%m/%Y %I:%M %p",
        "%d-%b-%Y %H:%M:%S",
        "%d %b %Y %H:%M:%S",
        "%d %b %Y %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%m-%d-%Y %H:%M:%S",
    ];

    /// Per-value fallback formats without a time component
    pub const PERMISSIVE_DATE_FORMATS: [&str; 8] = [
        "%d-%m-%Y",
        "%d/%m/%Y",
        "%d.%m.%Y",
        "%d-%b-%Y",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%m-%d-%Y",
    ];

    /// YYYYMMDD format length
    pub const DATE_FORMAT_LENGTH: usize = 8;

    /// HHMMSS format length
    pub const TIME_FORMAT_LENGTH: usize = 6;
}

/// Chart styling handed to the rendering collaborator
pub mod style {
    pub const NORMAL_COLOR: &str = "#2E7D32";
    pub const ELEVATED_COLOR: &str = "#FFBF00";
    pub const OUT_OF_CONTROL_COLOR: &str = "#D32F2F";

    /// Single out-of-control colour of the two-class scheme
    pub const HISTORY_OOC_COLOR: &str = "#FF0000";
    pub const HISTORY_LINE_COLOR: &str = "#1F77B4";
    pub const HISTORY_DESIGN_COLOR: &str = "#FF7F0E";

    pub const WINDOW_LINE_COLOR: &str = "#555555";
    pub const WINDOW_MEAN_COLOR: &str = "#333333";
    pub const WINDOW_LIMIT_COLOR: &str = "#666666";
    pub const WINDOW_DESIGN_COLOR: &str = "#9467BD";

    pub const HISTORY_LINE_WIDTH: f32 = 1.6;
    pub const WINDOW_LINE_WIDTH: f32 = 1.1;
    pub const WINDOW_LINE_ALPHA: f32 = 0.85;
    pub const REFERENCE_LINE_WIDTH: f32 = 1.0;
    pub const DESIGN_LINE_WIDTH: f32 = 2.6;

    pub const MARKER_SIZE: f32 = 18.0;
    pub const OOC_MARKER_SIZE: f32 = 20.0;

    pub const CAPTION_COLOR: &str = "#FF6347";
    pub const CURRENT_CAPTION_COLOR: &str = "#000000";
    pub const CAPTION_FONT_SIZE: f32 = 10.0;
    pub const CURRENT_CAPTION_FONT_SIZE: f32 = 11.0;

    pub const LINE_LABEL: &str = "Value";
    pub const MEAN_LABEL: &str = "Mean";
    pub const UCL_LABEL: &str = "UCL 3σ";
    pub const LCL_LABEL: &str = "LCL −3σ";
    pub const DESIGN_LABEL: &str = "Design";

    pub const TIME_AXIS_LABEL: &str = "Time";
    pub const INDEX_AXIS_LABEL: &str = "Index";
    pub const VALUE_AXIS_LABEL: &str = "Value";
}

/// Window selection defaults
pub mod window {
    /// Window sizes offered by the interactive shell (minutes, one sample per minute)
    pub const WINDOW_OPTIONS: [usize; 3] = [20, 40, 60];

    /// Window used when none is requested
    pub const DEFAULT_WINDOW: usize = 20;
}

/// Configuration file paths
pub mod config {
    /// Configuration file name
    pub const CONFIG_FILE: &str = "ichart.json";

    pub const HISTORY_CSV: &str = "history_export.csv";
    pub const CURRENT_CSV: &str = "current_export.csv";
    pub const AI_CSV: &str = "AI_export.csv";
}
