use crate::config::ViewerConfig;
use crate::data::loader::LoadError;
use crate::data::model::Series;
use crate::engine::highlight::{highlight_map, Extremes, HighlightMap};
use crate::engine::query::{submit_year, QueryOutcome};
use crate::i18n::{Language, Translations};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Progress of the one-shot dataset load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    /// Load failed; the message is the error chain.
    Failed(String),
}

/// Which bar the user picked last. `None` after any failed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub selected_year: Option<i32>,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Active interface language.
    pub language: Language,

    /// Loaded series; empty until the load completes.
    pub series: Series,

    /// Max / min years, resolved once when the series arrives.
    pub extremes: Extremes,

    pub load_status: LoadStatus,

    /// Contents of the year text box.
    pub year_input: String,

    pub selection: SelectionState,

    /// Result of the last query, rendered in the active language.
    pub outcome: Option<QueryOutcome>,

    /// Bar classes currently drawn.
    pub highlight: HighlightMap,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            language: config.language,
            config,
            series: Series::default(),
            extremes: Extremes::default(),
            load_status: LoadStatus::Loading,
            year_input: String::new(),
            selection: SelectionState::default(),
            outcome: None,
            highlight: HighlightMap::new(),
        }
    }

    pub fn translations(&self) -> &'static Translations {
        self.language.translations()
    }

    /// Ingest the result of the background load.
    pub fn finish_load(&mut self, result: Result<Series, LoadError>) {
        match result {
            Ok(series) => {
                self.extremes = self.config.policy.resolve(&series);
                log::info!(
                    "Loaded {} records ({:?}-{:?}), full average {:.2}%, extremes {:?}",
                    series.len(),
                    series.start(),
                    series.end(),
                    series.full_average(),
                    self.extremes
                );
                self.series = series;
                // Anything answered while loading saw an empty series.
                self.outcome = None;
                self.selection = SelectionState::default();
                self.highlight = highlight_map(&self.series, &self.extremes, None);
                self.load_status = LoadStatus::Ready;
            }
            Err(e) => {
                log::error!(
                    "Failed to load {}: {e}",
                    self.config.data_path.display()
                );
                self.load_status = LoadStatus::Failed(e.to_string());
            }
        }
    }

    /// Run the engine on the current text box contents.
    pub fn submit_year(&mut self) {
        let outcome = submit_year(
            &self.series,
            &self.extremes,
            &self.config.query,
            &self.year_input,
        );
        self.selection.selected_year = outcome.selected_year;
        self.highlight = outcome.highlight.clone();
        self.outcome = Some(outcome);
    }

    /// Switch language; the last outcome is re-rendered, not re-run.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Result line for the last query in the active language.
    pub fn result_text(&self) -> Option<String> {
        self.outcome
            .as_ref()
            .map(|o| self.translations().display_text(o))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::DataPoint;
    use crate::engine::highlight::{Highlight, HighlightPolicy};
    use crate::engine::query::QueryError;

    fn sample() -> Series {
        Series::from_points(vec![
            DataPoint { year: 1960, value: 10.0 },
            DataPoint { year: 1961, value: 20.0 },
            DataPoint { year: 1962, value: 30.0 },
        ])
        .unwrap()
    }

    fn submit(state: &mut AppState, input: &str) {
        state.year_input = input.to_string();
        state.submit_year();
    }

    #[test]
    fn query_before_load_is_not_found() {
        let mut state = AppState::default();
        submit(&mut state, "1961");
        assert_eq!(state.load_status, LoadStatus::Loading);
        assert_eq!(
            state.outcome.as_ref().and_then(|o| o.error()),
            Some(&QueryError::NotFound { year: 1961 })
        );
        assert_eq!(state.selection.selected_year, None);
    }

    #[test]
    fn load_clears_answer_given_while_loading() {
        let mut state = AppState::default();
        submit(&mut state, "1961");
        assert!(state.result_text().is_some());

        state.finish_load(Ok(sample()));
        assert_eq!(state.outcome, None);
        assert_eq!(state.result_text(), None);
        assert_eq!(state.selection.selected_year, None);

        submit(&mut state, "1961");
        assert_eq!(state.selection.selected_year, Some(1961));
    }

    #[test]
    fn load_resolves_extremes_and_initial_highlight() {
        let mut state = AppState::default();
        state.finish_load(Ok(sample()));
        assert_eq!(state.load_status, LoadStatus::Ready);
        assert_eq!(state.highlight[&1960], Highlight::Min);
        assert_eq!(state.highlight[&1961], Highlight::Default);
        assert_eq!(state.highlight[&1962], Highlight::Max);
    }

    #[test]
    fn fixed_policy_feeds_both_renders() {
        let mut state = AppState::new(ViewerConfig {
            policy: HighlightPolicy::Fixed { max: 1961, min: 1962 },
            ..ViewerConfig::default()
        });
        state.finish_load(Ok(sample()));
        assert_eq!(state.highlight[&1961], Highlight::Max);

        submit(&mut state, "1960");
        assert_eq!(state.highlight[&1960], Highlight::Selected);
        assert_eq!(state.highlight[&1961], Highlight::Max);
        assert_eq!(state.highlight[&1962], Highlight::Min);
    }

    #[test]
    fn failed_query_clears_previous_selection() {
        let mut state = AppState::default();
        state.finish_load(Ok(sample()));

        submit(&mut state, "1961");
        assert_eq!(state.selection.selected_year, Some(1961));
        assert_eq!(state.highlight[&1961], Highlight::Selected);

        submit(&mut state, "abc");
        assert_eq!(state.selection.selected_year, None);
        assert_eq!(state.highlight[&1961], Highlight::Default);
    }

    #[test]
    fn language_switch_rerenders_last_outcome() {
        let mut state = AppState::default();
        state.finish_load(Ok(sample()));
        submit(&mut state, "1962");
        let fr = state.result_text().unwrap();
        assert!(fr.starts_with("Taux de réussite en 1962 : 30.00%"));

        state.set_language(Language::En);
        assert_eq!(
            state.result_text().unwrap(),
            "Success rate in 1962: 30.00% | Overall average (1960-1962): 20.00%"
        );
        assert_eq!(state.selection.selected_year, Some(1962));
    }

    #[test]
    fn load_failure_is_surfaced() {
        let mut state = AppState::default();
        state.finish_load(Err(LoadError::NotAnArray));
        assert_eq!(
            state.load_status,
            LoadStatus::Failed("expected a top-level JSON array".to_string())
        );
        assert!(state.series.is_empty());
    }
}
