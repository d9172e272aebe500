//! Renderable chart description
//!
//! `ChartSpec` is what the rendering collaborator consumes: ordered points,
//! per-severity marker groups, horizontal reference lines, labels and a
//! caption. Nothing here draws.

use crate::chart::classify::{ClassScheme, ClassifiedPoint, ControlLimits, Severity};
use crate::chart::window::{AxisKind, DataQuality, Observation, Window, WindowSize};
use crate::config::{VariantConfig, VariantKind};
use crate::constants::style::*;
use crate::data::{Baseline, TimestampStrategy};
use crate::error::Result;
use serde::Serialize;

/// Line style of a reference line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// What a reference line marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Mean,
    Ucl,
    Lcl,
    Design,
}

/// Continuity line through every retained point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesLine {
    /// Legend label, `None` keeps the line out of the legend
    pub label: Option<String>,
    pub color: String,
    pub width: f32,
    pub alpha: f32,
    pub points: Vec<Observation>,
}

/// Markers for one severity class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointGroup {
    pub severity: Severity,
    pub color: String,
    pub marker_size: f32,
    pub z_order: u8,
    pub points: Vec<Observation>,
}

/// Horizontal reference line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub kind: ReferenceKind,
    pub label: String,
    pub value: f64,
    pub style: LineStyle,
    /// `None` leaves the colour to the renderer
    pub color: Option<String>,
    pub width: f32,
}

/// Single-row legend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub entries: Vec<String>,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Caption {
    pub text: String,
    pub color: String,
    pub font_size: f32,
}

/// Complete description of one I-Chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub variant: VariantKind,
    pub parameter: String,
    pub window: WindowSize,
    pub axis: AxisKind,
    /// How the timestamp column was read, `None` on an index axis
    pub timestamps: Option<TimestampStrategy>,
    pub line: SeriesLine,
    pub point_groups: Vec<PointGroup>,
    pub reference_lines: Vec<ReferenceLine>,
    pub legend: Legend,
    pub x_label: String,
    pub y_label: String,
    pub caption: Caption,
    pub limits: ControlLimits,
    pub design: Option<f64>,
    pub unit: Option<String>,
    pub quality: DataQuality,
}

impl ChartSpec {
    /// Points drawn with the marker of `severity`, empty if the group is absent
    pub fn points_for(&self, severity: Severity) -> &[Observation] {
        self.point_groups
            .iter()
            .find(|g| g.severity == severity)
            .map(|g| g.points.as_slice())
            .unwrap_or(&[])
    }

    pub fn reference_line(&self, kind: ReferenceKind) -> Option<&ReferenceLine> {
        self.reference_lines.iter().find(|l| l.kind == kind)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Assembles a `ChartSpec` from a window and its classification
pub struct ChartSpecBuilder<'a> {
    variant: &'a VariantConfig,
    parameter: &'a str,
    baseline: &'a Baseline,
    window_size: WindowSize,
}

impl<'a> ChartSpecBuilder<'a> {
    pub fn new(
        variant: &'a VariantConfig,
        parameter: &'a str,
        baseline: &'a Baseline,
        window_size: WindowSize,
    ) -> Self {
        Self {
            variant,
            parameter,
            baseline,
            window_size,
        }
    }

    pub fn build(self, window: &Window, classified: &[ClassifiedPoint]) -> ChartSpec {
        profiling::scope!("build_chart_spec");

        let limits = ControlLimits::from_baseline(self.baseline);
        let two_class = self.variant.scheme == ClassScheme::TwoClass;

        let line = if two_class {
            SeriesLine {
                label: Some(LINE_LABEL.to_string()),
                color: HISTORY_LINE_COLOR.to_string(),
                width: HISTORY_LINE_WIDTH,
                alpha: 1.0,
                points: window.observations.clone(),
            }
        } else {
            SeriesLine {
                label: None,
                color: WINDOW_LINE_COLOR.to_string(),
                width: WINDOW_LINE_WIDTH,
                alpha: WINDOW_LINE_ALPHA,
                points: window.observations.clone(),
            }
        };

        let point_groups = self.point_groups(classified);
        let reference_lines = self.reference_lines(&limits);

        let entries: Vec<String> = line
            .label
            .iter()
            .cloned()
            .chain(reference_lines.iter().map(|l| l.label.clone()))
            .collect();
        let legend = Legend {
            columns: entries.len().max(1),
            entries,
        };

        let x_label = match window.axis {
            AxisKind::Time => TIME_AXIS_LABEL,
            AxisKind::Index => INDEX_AXIS_LABEL,
        }
        .to_string();
        let y_label = match &self.baseline.unit {
            Some(unit) => format!("{} [{}]", VALUE_AXIS_LABEL, unit),
            None => VALUE_AXIS_LABEL.to_string(),
        };

        ChartSpec {
            variant: self.variant.kind,
            parameter: self.parameter.to_string(),
            window: self.window_size,
            axis: window.axis,
            timestamps: window.timestamp_strategy,
            line,
            point_groups,
            reference_lines,
            legend,
            x_label,
            y_label,
            caption: self.caption(),
            limits,
            design: self.baseline.design,
            unit: self.baseline.unit.clone(),
            quality: window.quality,
        }
    }

    fn point_groups(&self, classified: &[ClassifiedPoint]) -> Vec<PointGroup> {
        let severities: &[Severity] = match self.variant.scheme {
            // Normal history points are carried by the line alone
            ClassScheme::TwoClass => &[Severity::OutOfControl],
            ClassScheme::ThreeClass => &[Severity::Normal, Severity::Elevated, Severity::OutOfControl],
        };

        severities
            .iter()
            .filter_map(|&severity| {
                let points: Vec<Observation> = classified
                    .iter()
                    .filter(|p| p.severity == severity)
                    .map(|p| p.observation)
                    .collect();
                if points.is_empty() {
                    return None;
                }
                let (color, marker_size, z_order) = marker_style(self.variant.scheme, severity);
                Some(PointGroup {
                    severity,
                    color: color.to_string(),
                    marker_size,
                    z_order,
                    points,
                })
            })
            .collect()
    }

    fn reference_lines(&self, limits: &ControlLimits) -> Vec<ReferenceLine> {
        let two_class = self.variant.scheme == ClassScheme::TwoClass;
        let (mean_color, limit_color, design_color) = if two_class {
            (None, None, HISTORY_DESIGN_COLOR)
        } else {
            (
                Some(WINDOW_MEAN_COLOR.to_string()),
                Some(WINDOW_LIMIT_COLOR.to_string()),
                WINDOW_DESIGN_COLOR,
            )
        };

        let mut lines = vec![
            ReferenceLine {
                kind: ReferenceKind::Mean,
                label: MEAN_LABEL.to_string(),
                value: limits.mean,
                style: LineStyle::Solid,
                color: mean_color,
                width: REFERENCE_LINE_WIDTH,
            },
            ReferenceLine {
                kind: ReferenceKind::Ucl,
                label: UCL_LABEL.to_string(),
                value: limits.ucl,
                style: LineStyle::Dashed,
                color: limit_color.clone(),
                width: REFERENCE_LINE_WIDTH,
            },
            ReferenceLine {
                kind: ReferenceKind::Lcl,
                label: LCL_LABEL.to_string(),
                value: limits.lcl,
                style: LineStyle::Dashed,
                color: limit_color,
                width: REFERENCE_LINE_WIDTH,
            },
        ];

        if let Some(design) = self.baseline.design {
            lines.push(ReferenceLine {
                kind: ReferenceKind::Design,
                label: DESIGN_LABEL.to_string(),
                value: design,
                style: LineStyle::Solid,
                color: Some(design_color.to_string()),
                width: DESIGN_LINE_WIDTH,
            });
        }
        lines
    }

    fn caption(&self) -> Caption {
        let window = match self.window_size {
            WindowSize::Unbounded => None,
            WindowSize::Latest(n) => Some(n),
        };
        let (color, font_size) = match self.variant.kind {
            VariantKind::Current => (CURRENT_CAPTION_COLOR, CURRENT_CAPTION_FONT_SIZE),
            VariantKind::History | VariantKind::Ai => (CAPTION_COLOR, CAPTION_FONT_SIZE),
        };
        Caption {
            text: self.variant.render_caption(self.parameter, window),
            color: color.to_string(),
            font_size,
        }
    }
}

fn marker_style(scheme: ClassScheme, severity: Severity) -> (&'static str, f32, u8) {
    match (scheme, severity) {
        (ClassScheme::TwoClass, _) => (HISTORY_OOC_COLOR, MARKER_SIZE, 3),
        (ClassScheme::ThreeClass, Severity::Normal) => (NORMAL_COLOR, MARKER_SIZE, 3),
        (ClassScheme::ThreeClass, Severity::Elevated) => (ELEVATED_COLOR, MARKER_SIZE, 3),
        (ClassScheme::ThreeClass, Severity::OutOfControl) => (OUT_OF_CONTROL_COLOR, OOC_MARKER_SIZE, 4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::classify::classify_all;
    use crate::chart::window::AxisPosition;

    fn window(values: &[f64]) -> Window {
        Window {
            axis: AxisKind::Index,
            observations: values
                .iter()
                .enumerate()
                .map(|(i, &value)| Observation {
                    x: AxisPosition::Index(i),
                    value,
                })
                .collect(),
            quality: DataQuality {
                rows_considered: values.len(),
                ..Default::default()
            },
            timestamp_strategy: None,
        }
    }

    fn baseline(design: Option<f64>, unit: Option<&str>) -> Baseline {
        Baseline {
            mean: 10.0,
            sigma: 2.0,
            design,
            unit: unit.map(str::to_string),
        }
    }

    fn build(variant: &VariantConfig, baseline: &Baseline, size: WindowSize, values: &[f64]) -> ChartSpec {
        let window = window(values);
        let limits = ControlLimits::from_baseline(baseline);
        let classified = classify_all(&window.observations, &limits, variant.scheme);
        ChartSpecBuilder::new(variant, "BED HEIGHT", baseline, size).build(&window, &classified)
    }

    #[test]
    fn test_three_class_groups_and_styles() {
        let variant = VariantConfig::current();
        let spec = build(&variant, &baseline(Some(11.0), Some("mm")), WindowSize::Latest(20), &[10.0, 13.0, 17.0, 11.5]);

        assert_eq!(spec.line.points.len(), 4);
        assert_eq!(spec.line.label, None);
        assert_eq!(spec.points_for(Severity::Normal).len(), 2);
        assert_eq!(spec.points_for(Severity::Elevated).len(), 1);
        assert_eq!(spec.points_for(Severity::OutOfControl)[0].value, 17.0);

        let ooc = spec.point_groups.iter().find(|g| g.severity == Severity::OutOfControl).unwrap();
        assert_eq!(ooc.color, OUT_OF_CONTROL_COLOR);
        assert_eq!(ooc.z_order, 4);

        assert_eq!(spec.legend.entries, vec!["Mean", "UCL 3σ", "LCL −3σ", "Design"]);
        assert_eq!(spec.legend.columns, 4);
        assert_eq!(spec.y_label, "Value [mm]");
        assert_eq!(spec.x_label, "Index");
        assert_eq!(spec.caption.text, "BED HEIGHT — 20 min (latest→past window)");

        let design = spec.reference_line(ReferenceKind::Design).unwrap();
        assert_eq!(design.value, 11.0);
        assert_eq!(design.color.as_deref(), Some(WINDOW_DESIGN_COLOR));
    }

    #[test]
    fn test_two_class_emits_only_out_of_control_markers() {
        let variant = VariantConfig::history();
        let spec = build(&variant, &baseline(None, None), WindowSize::Unbounded, &[10.0, 16.0, 16.5, 3.0]);

        assert_eq!(spec.point_groups.len(), 1);
        let values: Vec<f64> = spec.points_for(Severity::OutOfControl).iter().map(|o| o.value).collect();
        assert_eq!(values, vec![16.5, 3.0]);
        assert_eq!(spec.point_groups[0].color, HISTORY_OOC_COLOR);

        assert_eq!(spec.legend.entries, vec!["Value", "Mean", "UCL 3σ", "LCL −3σ"]);
        assert!(spec.reference_line(ReferenceKind::Design).is_none());
        assert_eq!(spec.reference_line(ReferenceKind::Ucl).unwrap().value, 16.0);
        assert_eq!(spec.reference_line(ReferenceKind::Mean).unwrap().color, None);
        assert_eq!(spec.y_label, "Value");
        assert_eq!(spec.caption.text, "BED HEIGHT - History Records");
    }

    #[test]
    fn test_empty_window_still_has_reference_lines() {
        let variant = VariantConfig::ai();
        let spec = build(&variant, &baseline(None, None), WindowSize::Latest(40), &[]);

        assert!(spec.point_groups.is_empty());
        assert!(spec.line.points.is_empty());
        assert_eq!(spec.reference_lines.len(), 3);
        assert_eq!(spec.legend.columns, 3);
        assert_eq!(spec.caption.text, "BED HEIGHT — 40 min (latest→future window, AI)");
    }

    #[test]
    fn test_serializes_to_json() {
        let variant = VariantConfig::current();
        let spec = build(&variant, &baseline(None, None), WindowSize::Latest(20), &[10.0]);
        let json: serde_json::Value = serde_json::from_str(&spec.to_json(false).unwrap()).unwrap();

        assert_eq!(json["variant"], "current");
        assert_eq!(json["window"]["latest"], 20);
        assert_eq!(json["point_groups"][0]["severity"], "normal");
        assert_eq!(json["line"]["points"][0]["x"], 0);
        assert!(json["timestamps"].is_null());
    }
}
