//! Chart variant and application configuration
//!
//! The three chart variants share one pipeline and differ only in the record
//! below. `AppConfig` is the static configuration handed to the core by the
//! shell: dataset locations, the column schema and the display-name map.

use crate::chart::classify::ClassScheme;
use crate::chart::window::WindowColumns;
use crate::constants;
use crate::data::BaselineColumns;
use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Chart variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    History,
    Current,
    Ai,
}

impl VariantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::History => "history",
            VariantKind::Current => "current",
            VariantKind::Ai => "ai",
        }
    }
}

impl FromStr for VariantKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "history" => Ok(VariantKind::History),
            "current" => Ok(VariantKind::Current),
            "ai" => Ok(VariantKind::Ai),
            other => Err(ChartError::Config(format!("unknown chart variant '{}'", other))),
        }
    }
}

/// Per-variant configuration record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub kind: VariantKind,
    pub mean_column: String,
    pub sigma_column: String,
    pub scheme: ClassScheme,
    /// Caption template; `{parameter}` and `{window}` are substituted
    pub caption: String,
}

impl VariantConfig {
    pub fn history() -> Self {
        Self {
            kind: VariantKind::History,
            mean_column: constants::columns::HISTORY_MEAN.to_string(),
            sigma_column: constants::columns::HISTORY_SIGMA.to_string(),
            scheme: ClassScheme::TwoClass,
            caption: "{parameter} - History Records".to_string(),
        }
    }

    pub fn current() -> Self {
        Self {
            kind: VariantKind::Current,
            mean_column: constants::columns::CURRENT_MEAN.to_string(),
            sigma_column: constants::columns::CURRENT_SIGMA.to_string(),
            scheme: ClassScheme::ThreeClass,
            caption: "{parameter} — {window} min (latest→past window)".to_string(),
        }
    }

    pub fn ai() -> Self {
        Self {
            kind: VariantKind::Ai,
            mean_column: constants::columns::AI_MEAN.to_string(),
            sigma_column: constants::columns::AI_SIGMA.to_string(),
            scheme: ClassScheme::ThreeClass,
            caption: "{parameter} — {window} min (latest→future window, AI)".to_string(),
        }
    }

    /// Render the caption for a parameter and optional window size
    pub fn render_caption(&self, parameter: &str, window: Option<usize>) -> String {
        let window = window.map(|n| n.to_string()).unwrap_or_default();
        self.caption
            .replace("{parameter}", parameter)
            .replace("{window}", &window)
    }
}

/// Exact-name column identifiers shared by every variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetColumns {
    pub parameter: String,
    pub value: String,
    pub timestamp: String,
    pub unit: String,
    pub design: String,
}

impl Default for DatasetColumns {
    fn default() -> Self {
        Self {
            parameter: constants::columns::PARAMETER_NAME.to_string(),
            value: constants::columns::VALUE.to_string(),
            timestamp: constants::columns::TIMESTAMP.to_string(),
            unit: constants::columns::UNIT.to_string(),
            design: constants::columns::DESIGN_VALUE.to_string(),
        }
    }
}

impl DatasetColumns {
    pub fn baseline<'a>(&'a self, variant: &'a VariantConfig) -> BaselineColumns<'a> {
        BaselineColumns {
            mean: &variant.mean_column,
            sigma: &variant.sigma_column,
            design: &self.design,
            unit: &self.unit,
        }
    }

    pub fn window(&self) -> WindowColumns<'_> {
        WindowColumns {
            value: &self.value,
            timestamp: &self.timestamp,
        }
    }

    fn names(&self) -> [(&'static str, &str); 5] {
        [
            ("parameter", self.parameter.as_str()),
            ("value", self.value.as_str()),
            ("timestamp", self.timestamp.as_str()),
            ("unit", self.unit.as_str()),
            ("design", self.design.as_str()),
        ]
    }
}

/// Dataset locations per variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetPaths {
    pub history: PathBuf,
    pub current: PathBuf,
    pub ai: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            history: PathBuf::from(constants::config::HISTORY_CSV),
            current: PathBuf::from(constants::config::CURRENT_CSV),
            ai: PathBuf::from(constants::config::AI_CSV),
        }
    }
}

/// Variant records, one per chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantSet {
    pub history: VariantConfig,
    pub current: VariantConfig,
    pub ai: VariantConfig,
}

impl Default for VariantSet {
    fn default() -> Self {
        Self {
            history: VariantConfig::history(),
            current: VariantConfig::current(),
            ai: VariantConfig::ai(),
        }
    }
}

/// Application configuration, persisted as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub datasets: DatasetPaths,
    pub columns: DatasetColumns,
    pub variants: VariantSet,
    /// Display name → parameter tag
    pub parameters: BTreeMap<String, String>,
    pub window_options: Vec<usize>,
    pub default_window: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let parameters = [
            ("Bed Temperature", "BED TEMPERATURE"),
            ("Bed Height", "BED HEIGHT"),
            ("Screen Inlet Temperature", "SCREEN INLET TEMPERATURE"),
            ("APH Outlet Temperature", "APH OUTLET TEMPERATURE"),
            ("SH3 Outlet Temperature", "SH3 OUTLET TEMPERATURE"),
        ]
        .into_iter()
        .map(|(name, tag)| (name.to_string(), tag.to_string()))
        .collect();

        Self {
            datasets: DatasetPaths::default(),
            columns: DatasetColumns::default(),
            variants: VariantSet::default(),
            parameters,
            window_options: constants::window::WINDOW_OPTIONS.to_vec(),
            default_window: constants::window::DEFAULT_WINDOW,
        }
    }
}

impl AppConfig {
    /// Read and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit `path`, or the default config file when present
    ///
    /// Only the default file may be absent; a missing explicit path is a
    /// `FileIo` error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        Self::load_or_default_from(path, Path::new(constants::config::CONFIG_FILE))
    }

    fn load_or_default_from(path: Option<&Path>, default_path: &Path) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::load(path)
            }
            None if default_path.exists() => {
                tracing::debug!(path = %default_path.display(), "loading default configuration");
                Self::load(default_path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (field, name) in self.columns.names() {
            if name.trim().is_empty() {
                return Err(ChartError::Config(format!("column name for '{}' is empty", field)));
            }
        }
        for variant in [&self.variants.history, &self.variants.current, &self.variants.ai] {
            if variant.mean_column.trim().is_empty() || variant.sigma_column.trim().is_empty() {
                return Err(ChartError::Config(format!(
                    "baseline columns for '{}' are empty",
                    variant.kind.as_str()
                )));
            }
        }
        if self.window_options.is_empty() {
            return Err(ChartError::Config("window_options must not be empty".to_string()));
        }
        if !self.window_options.contains(&self.default_window) {
            return Err(ChartError::Config(format!(
                "default_window {} is not one of {:?}",
                self.default_window, self.window_options
            )));
        }
        Ok(())
    }

    pub fn variant(&self, kind: VariantKind) -> &VariantConfig {
        match kind {
            VariantKind::History => &self.variants.history,
            VariantKind::Current => &self.variants.current,
            VariantKind::Ai => &self.variants.ai,
        }
    }

    pub fn dataset(&self, kind: VariantKind) -> &Path {
        match kind {
            VariantKind::History => &self.datasets.history,
            VariantKind::Current => &self.datasets.current,
            VariantKind::Ai => &self.datasets.ai,
        }
    }

    /// Map a display name to its tag; unknown names pass through unchanged
    pub fn resolve_tag(&self, name: &str) -> String {
        self.parameters
            .iter()
            .find(|(display, _)| display.eq_ignore_ascii_case(name))
            .map(|(_, tag)| tag.clone())
            .unwrap_or_else(|| name.to_string())
    }
}
