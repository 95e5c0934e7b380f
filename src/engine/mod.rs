/// Query & highlight engine: pure functions over a loaded [`Series`].
///
/// ```text
///   raw input ──► validate_year ──► find_record ──► prefix_average
///                      │                 │                │
///                      ▼                 ▼                ▼
///                 QueryError        QueryError      AverageCorrections
///                                                         │
///   Extremes (resolved once at load) ──► highlight_map ◄──┘
///                                             │
///                                             ▼
///                                        QueryOutcome
/// ```
///
/// [`Series`]: crate::data::model::Series

pub mod highlight;
pub mod query;
