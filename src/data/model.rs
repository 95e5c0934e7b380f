use std::fmt;

use super::loader::LoadError;

// ---------------------------------------------------------------------------
// DataPoint – one bar of the chart
// ---------------------------------------------------------------------------

/// Success rate for a single year, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub year: i32,
    pub value: f64,
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}%", self.year, self.value)
    }
}

// ---------------------------------------------------------------------------
// Series – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Ordered, immutable yearly series.
///
/// Years are unique and strictly ascending (gaps allowed); every value lies
/// in `[0, 100]`. The full-period average is computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    points: Vec<DataPoint>,
    full_average: f64,
}

impl Default for Series {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            full_average: 0.0,
        }
    }
}

impl Series {
    /// Validate the ordering and range invariants and build the series.
    pub fn from_points(points: Vec<DataPoint>) -> Result<Self, LoadError> {
        for (i, p) in points.iter().enumerate() {
            if !p.value.is_finite() || !(0.0..=100.0).contains(&p.value) {
                return Err(LoadError::ValueOutOfRange {
                    year: p.year,
                    value: p.value,
                });
            }
            if i > 0 && points[i - 1].year >= p.year {
                return Err(LoadError::Unordered {
                    previous: points[i - 1].year,
                    year: p.year,
                });
            }
        }

        let full_average = mean(points.iter().map(|p| p.value));
        Ok(Series {
            points,
            full_average,
        })
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First year of the series.
    pub fn start(&self) -> Option<i32> {
        self.points.first().map(|p| p.year)
    }

    /// Last year of the series.
    pub fn end(&self) -> Option<i32> {
        self.points.last().map(|p| p.year)
    }

    /// Mean of every value, fixed at load time.
    pub fn full_average(&self) -> f64 {
        self.full_average
    }
}

/// Arithmetic mean, `0.0` for an empty input.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
