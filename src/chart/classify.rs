//! Severity classification against a precomputed baseline

use crate::chart::window::Observation;
use crate::constants::spc::{CONTROL_SIGMA, INNER_SIGMA};
use crate::data::Baseline;
use serde::{Deserialize, Serialize};

/// Which severity scheme a chart variant uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassScheme {
    /// normal / out-of-control, by the ±3σ limits (history)
    TwoClass,
    /// normal / elevated / out-of-control, by |value - mean| (current, AI)
    ThreeClass,
}

/// Severity of one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Elevated,
    OutOfControl,
}

/// Centerline and ±3σ control limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlLimits {
    pub mean: f64,
    pub sigma: f64,
    pub ucl: f64,
    pub lcl: f64,
}

impl ControlLimits {
    pub fn from_baseline(baseline: &Baseline) -> Self {
        Self {
            mean: baseline.mean,
            sigma: baseline.sigma,
            ucl: baseline.mean + CONTROL_SIGMA * baseline.sigma,
            lcl: baseline.mean - CONTROL_SIGMA * baseline.sigma,
        }
    }
}

/// An observation tagged with its severity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifiedPoint {
    pub observation: Observation,
    pub severity: Severity,
}

/// Classify one value
///
/// Three-class cut points are inclusive on the inner side (`<=`); the
/// two-class limits are exclusive (`>` / `<`).
pub fn classify(value: f64, limits: &ControlLimits, scheme: ClassScheme) -> Severity {
    match scheme {
        ClassScheme::TwoClass => {
            if value > limits.ucl || value < limits.lcl {
                Severity::OutOfControl
            } else {
                Severity::Normal
            }
        }
        ClassScheme::ThreeClass => {
            let deviation = (value - limits.mean).abs();
            if deviation <= INNER_SIGMA * limits.sigma {
                Severity::Normal
            } else if deviation <= CONTROL_SIGMA * limits.sigma {
                Severity::Elevated
            } else {
                Severity::OutOfControl
            }
        }
    }
}

/// Classify every observation independently
pub fn classify_all(
    observations: &[Observation],
    limits: &ControlLimits,
    scheme: ClassScheme,
) -> Vec<ClassifiedPoint> {
    profiling::scope!("classify_all");

    observations
        .iter()
        .map(|&observation| ClassifiedPoint {
            observation,
            severity: classify(observation.value, limits, scheme),
        })
        .collect()
}
