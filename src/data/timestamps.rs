//! Timestamp normalization for exports with inconsistent date formats
//!
//! A column is either passed through (already typed) or parsed against the
//! known export formats as a whole, falling back to a permissive day-first
//! parser only when no known format explains every row. Parsing never fails:
//! unparseable cells come back as `None`.

use crate::constants::datetime::*;
use crate::data::source::text_values;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;

/// How a timestamp column was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampStrategy {
    /// Column was already a Datetime/Date type
    Typed,
    /// Whole column parsed with one known format
    KnownFormat(&'static str),
    /// Per-value permissive parsing, day-first
    Permissive,
}

/// Normalized timestamp column
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTimestamps {
    pub values: Vec<Option<NaiveDateTime>>,
    pub strategy: TimestampStrategy,
}

impl NormalizedTimestamps {
    /// Number of rows that yielded a timestamp
    pub fn parsed_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Number of rows left missing
    pub fn missing_count(&self) -> usize {
        self.values.len() - self.parsed_count()
    }
}

/// Normalize a timestamp column of any dtype
pub fn normalize_timestamps(series: &Series) -> NormalizedTimestamps {
    profiling::scope!("normalize_timestamps");

    match series.dtype() {
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let values = match series.datetime() {
                Ok(ca) => ca
                    .into_iter()
                    .map(|opt| opt.and_then(|ts| from_epoch(ts, unit)))
                    .collect(),
                Err(_) => vec![None; series.len()],
            };
            NormalizedTimestamps {
                values,
                strategy: TimestampStrategy::Typed,
            }
        }
        DataType::Date => {
            let values = match series.date() {
                Ok(ca) => ca
                    .into_iter()
                    .map(|opt| {
                        opt.and_then(|days| DateTime::from_timestamp(days as i64 * 86_400, 0))
                            .map(|dt| dt.naive_utc())
                    })
                    .collect(),
                Err(_) => vec![None; series.len()],
            };
            NormalizedTimestamps {
                values,
                strategy: TimestampStrategy::Typed,
            }
        }
        _ => normalize_text(&text_values(series)),
    }
}

/// Normalize a column of textual timestamps
pub fn normalize_text(raw: &[Option<String>]) -> NormalizedTimestamps {
    let total = raw.len();
    let mut best: Option<(&'static str, Vec<Option<NaiveDateTime>>, usize)> = None;

    for format in KNOWN_FORMATS {
        let parsed: Vec<Option<NaiveDateTime>> = raw
            .iter()
            .map(|cell| {
                cell.as_deref()
                    .and_then(|s| NaiveDateTime::parse_from_str(s, format).ok())
            })
            .collect();
        let count = parsed.iter().filter(|v| v.is_some()).count();

        if count == total {
            tracing::debug!(format, rows = total, "timestamp format matched every row");
            return NormalizedTimestamps {
                values: parsed,
                strategy: TimestampStrategy::KnownFormat(format),
            };
        }
        if best.as_ref().is_none_or(|(_, _, best_count)| count > *best_count) {
            best = Some((format, parsed, count));
        }
    }

    let fallback: Vec<Option<NaiveDateTime>> = raw
        .iter()
        .map(|cell| cell.as_deref().and_then(parse_permissive))
        .collect();
    let fallback_count = fallback.iter().filter(|v| v.is_some()).count();

    match best {
        Some((format, values, count)) if fallback_count <= count => {
            tracing::debug!(format, parsed = count, rows = total, "best partial timestamp format");
            NormalizedTimestamps {
                values,
                strategy: TimestampStrategy::KnownFormat(format),
            }
        }
        _ => {
            tracing::debug!(parsed = fallback_count, rows = total, "permissive timestamp fallback");
            NormalizedTimestamps {
                values: fallback,
                strategy: TimestampStrategy::Permissive,
            }
        }
    }
}

/// Parse a single timestamp, preferring day-before-month for ambiguous dates
pub fn parse_permissive(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Some(dt) = parse_compact(trimmed) {
        return Some(dt);
    }

    for format in PERMISSIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    for format in PERMISSIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Compact `YYYYMMDD HHMMSS` exports
fn parse_compact(s: &str) -> Option<NaiveDateTime> {
    if !s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_whitespace()) {
        return None;
    }
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 2
        || parts[0].len() != DATE_FORMAT_LENGTH
        || parts[1].len() != TIME_FORMAT_LENGTH
    {
        return None;
    }
    let joined = format!("{}{}", parts[0], parts[1]);
    NaiveDateTime::parse_from_str(&joined, "%Y%m%d%H%M%S").ok()
}

fn from_epoch(ts: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let dt = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(ts)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(ts),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(ts),
    };
    dt.map(|d| d.naive_utc())
}
