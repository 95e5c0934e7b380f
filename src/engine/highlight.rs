use std::collections::BTreeMap;

use crate::data::model::Series;

// ---------------------------------------------------------------------------
// Highlight classes
// ---------------------------------------------------------------------------

/// Visual class of one bar. Precedence: Selected > Max > Min > Default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Highlight {
    Selected,
    Max,
    Min,
    Default,
}

/// Year → highlight class, one entry per record of the series.
pub type HighlightMap = BTreeMap<i32, Highlight>;

// ---------------------------------------------------------------------------
// Extremes policy
// ---------------------------------------------------------------------------

/// How the maximum / minimum bars are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightPolicy {
    /// Scan the series for the global max / min; ties go to the earliest year.
    #[default]
    Scan,
    /// Use a configured year pair, whatever the values are.
    Fixed { max: i32, min: i32 },
}

/// The max / min years resolved once from the loaded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extremes {
    pub max: Option<i32>,
    pub min: Option<i32>,
}

impl HighlightPolicy {
    pub fn resolve(&self, series: &Series) -> Extremes {
        match *self {
            HighlightPolicy::Fixed { max, min } => Extremes {
                max: Some(max),
                min: Some(min),
            },
            HighlightPolicy::Scan => {
                let mut points = series.points().iter();
                let Some(first) = points.next() else {
                    return Extremes::default();
                };
                let (mut max, mut min) = (first, first);
                for p in points {
                    // Strict comparisons keep the first occurrence on ties.
                    if p.value > max.value {
                        max = p;
                    }
                    if p.value < min.value {
                        min = p;
                    }
                }
                Extremes {
                    max: Some(max.year),
                    min: Some(min.year),
                }
            }
        }
    }
}

impl Highlight {
    /// Class of a single year given the extremes and the current selection.
    pub fn for_year(year: i32, extremes: &Extremes, selected: Option<i32>) -> Self {
        if selected == Some(year) {
            Highlight::Selected
        } else if extremes.max == Some(year) {
            Highlight::Max
        } else if extremes.min == Some(year) {
            Highlight::Min
        } else {
            Highlight::Default
        }
    }
}

/// Build the highlight map for every year of the series.
pub fn highlight_map(series: &Series, extremes: &Extremes, selected: Option<i32>) -> HighlightMap {
    series
        .points()
        .iter()
        .map(|p| (p.year, Highlight::for_year(p.year, extremes, selected)))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::DataPoint;

    fn series(points: &[(i32, f64)]) -> Series {
        Series::from_points(
            points
                .iter()
                .map(|&(year, value)| DataPoint { year, value })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn selected_year_sits_between_extremes() {
        let s = series(&[(1960, 10.0), (1961, 20.0), (1962, 30.0)]);
        let extremes = HighlightPolicy::Scan.resolve(&s);
        assert_eq!(
            extremes,
            Extremes {
                max: Some(1962),
                min: Some(1960)
            }
        );

        let map = highlight_map(&s, &extremes, Some(1961));
        let expected = BTreeMap::from([
            (1960, Highlight::Min),
            (1961, Highlight::Selected),
            (1962, Highlight::Max),
        ]);
        assert_eq!(map, expected);
    }

    #[test]
    fn selection_wins_over_max() {
        let s = series(&[(1960, 10.0), (1961, 20.0), (1962, 30.0)]);
        let extremes = HighlightPolicy::Scan.resolve(&s);
        let map = highlight_map(&s, &extremes, Some(1962));
        assert_eq!(map[&1962], Highlight::Selected);
        assert_eq!(map[&1960], Highlight::Min);
        assert_eq!(map[&1961], Highlight::Default);
    }

    #[test]
    fn ties_go_to_first_occurrence() {
        let s = series(&[(1960, 50.0), (1961, 10.0), (1962, 50.0), (1963, 10.0)]);
        let extremes = HighlightPolicy::Scan.resolve(&s);
        assert_eq!(extremes.max, Some(1960));
        assert_eq!(extremes.min, Some(1961));
    }

    #[test]
    fn single_record_is_max() {
        let s = series(&[(1970, 40.0)]);
        let extremes = HighlightPolicy::Scan.resolve(&s);
        let map = highlight_map(&s, &extremes, None);
        assert_eq!(map[&1970], Highlight::Max);
    }

    #[test]
    fn fixed_policy_ignores_values() {
        let s = series(&[(1969, 10.0), (1970, 90.0), (1994, 50.0)]);
        let extremes = HighlightPolicy::Fixed { max: 1969, min: 1994 }.resolve(&s);
        let map = highlight_map(&s, &extremes, None);
        assert_eq!(map[&1969], Highlight::Max);
        assert_eq!(map[&1970], Highlight::Default);
        assert_eq!(map[&1994], Highlight::Min);
    }

    #[test]
    fn empty_series_has_no_extremes() {
        let s = Series::default();
        assert_eq!(HighlightPolicy::Scan.resolve(&s), Extremes::default());
        assert!(highlight_map(&s, &Extremes::default(), Some(1960)).is_empty());
    }
}
