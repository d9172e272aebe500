pub mod baseline;
pub mod selector;
pub mod source;
pub mod timestamps;

// Re-export key types for convenience
pub use baseline::{Baseline, BaselineColumns, resolve_baseline};
pub use selector::select_parameter_rows;
pub use source::DataSource;
pub use timestamps::{NormalizedTimestamps, TimestampStrategy, normalize_timestamps};
