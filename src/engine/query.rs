use std::collections::BTreeMap;
use std::fmt;
use std::num::IntErrorKind;

use thiserror::Error;

use super::highlight::{highlight_map, Extremes, HighlightMap};
use crate::data::model::{mean, DataPoint, Series};

// ---------------------------------------------------------------------------
// Accepted year range
// ---------------------------------------------------------------------------

/// Inclusive range of years a query may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl Default for YearRange {
    /// The span the published dataset declares.
    fn default() -> Self {
        Self {
            first: 1960,
            last: 2025,
        }
    }
}

impl YearRange {
    /// `None` when `first > last`.
    pub fn new(first: i32, last: i32) -> Option<Self> {
        (first <= last).then_some(Self { first, last })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Recoverable, user-facing query failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("'{input}' is not a year")]
    NotANumber { input: String },

    #[error("{year} is outside {range}")]
    OutOfRange { year: i64, range: YearRange },

    #[error("no record for {year}")]
    NotFound { year: i32 },
}

// ---------------------------------------------------------------------------
// Average corrections
// ---------------------------------------------------------------------------

/// Audited overrides of the prefix average for specific years.
///
/// Empty unless configured. Each entry replaces the average shown for that
/// year; the computed value is kept alongside so the discrepancy stays visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AverageCorrections {
    entries: BTreeMap<i32, f64>,
}

impl AverageCorrections {
    pub fn get(&self, year: i32) -> Option<f64> {
        self.entries.get(&year).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.entries.iter().map(|(&y, &a)| (y, a))
    }
}

impl FromIterator<(i32, f64)> for AverageCorrections {
    fn from_iter<T: IntoIterator<Item = (i32, f64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Prefix average as computed, plus the correction that replaced it, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefixAverage {
    pub computed: f64,
    pub corrected: Option<f64>,
}

impl PrefixAverage {
    /// The value to display.
    pub fn value(&self) -> f64 {
        self.corrected.unwrap_or(self.computed)
    }
}

// ---------------------------------------------------------------------------
// Engine operations
// ---------------------------------------------------------------------------

/// Parse and range-check raw user input.
///
/// Integers too large for any year are out of range, not malformed.
pub fn validate_year(input: &str, range: &YearRange) -> Result<i32, QueryError> {
    let year = match input.trim().parse::<i64>() {
        Ok(year) => year,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => {
                return Err(QueryError::NotANumber {
                    input: input.to_string(),
                })
            }
        },
    };
    match i32::try_from(year) {
        Ok(y) if range.contains(y) => Ok(y),
        _ => Err(QueryError::OutOfRange {
            year,
            range: *range,
        }),
    }
}

/// Exact-match lookup by year.
pub fn find_record(series: &Series, year: i32) -> Result<DataPoint, QueryError> {
    series
        .points()
        .binary_search_by_key(&year, |p| p.year)
        .map(|i| series.points()[i])
        .map_err(|_| QueryError::NotFound { year })
}

/// Mean of every value from the start of the series up to `upto` inclusive.
/// `0.0` when no record qualifies.
pub fn prefix_average(series: &Series, upto: i32) -> f64 {
    mean(
        series
            .points()
            .iter()
            .take_while(|p| p.year <= upto)
            .map(|p| p.value),
    )
}

/// Mean of the whole series; the fixed reference line.
pub fn full_average(series: &Series) -> f64 {
    series.full_average()
}

// ---------------------------------------------------------------------------
// Query interface
// ---------------------------------------------------------------------------

/// Everything a query needs besides the series itself.
#[derive(Debug, Clone, Default)]
pub struct QuerySettings {
    pub range: YearRange,
    pub corrections: AverageCorrections,
}

/// A successful lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearReport {
    pub point: DataPoint,
    /// First year included in the average.
    pub average_from: i32,
    pub average: PrefixAverage,
}

/// Terminal state of one query, consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub selected_year: Option<i32>,
    pub result: Result<YearReport, QueryError>,
    pub highlight: HighlightMap,
}

impl QueryOutcome {
    pub fn error(&self) -> Option<&QueryError> {
        self.result.as_ref().err()
    }
}

/// Run one query: validate, look up, average, and recompute the highlight.
///
/// An empty series (e.g. still loading) answers every valid year with
/// [`QueryError::NotFound`].
pub fn submit_year(
    series: &Series,
    extremes: &Extremes,
    settings: &QuerySettings,
    raw: &str,
) -> QueryOutcome {
    let result = validate_year(raw, &settings.range)
        .and_then(|year| find_record(series, year))
        .map(|point| {
            let computed = prefix_average(series, point.year);
            let corrected = settings.corrections.get(point.year);
            if let Some(c) = corrected {
                log::warn!(
                    "average for {} corrected from {computed:.2} to {c:.2}",
                    point.year
                );
            }
            YearReport {
                point,
                average_from: series.start().unwrap_or(point.year),
                average: PrefixAverage {
                    computed,
                    corrected,
                },
            }
        });

    let selected_year = result.as_ref().ok().map(|r| r.point.year);
    match &result {
        Ok(r) => log::debug!("query {raw:?} -> {}", r.point),
        Err(e) => log::debug!("query {raw:?} -> {e}"),
    }

    QueryOutcome {
        selected_year,
        highlight: highlight_map(series, extremes, selected_year),
        result,
    }
}
