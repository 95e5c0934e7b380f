use crate::engine::query::{QueryError, QueryOutcome};

// ---------------------------------------------------------------------------
// Languages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    /// Short code shown on the toggle buttons.
    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "FR",
            Language::En => "EN",
        }
    }

    pub fn translations(self) -> &'static Translations {
        match self {
            Language::Fr => &FR,
            Language::En => &EN,
        }
    }
}

// ---------------------------------------------------------------------------
// Translation tables
// ---------------------------------------------------------------------------

/// Every user-visible string of one language.
///
/// Formatters receive already-rounded numbers so both languages agree on
/// precision.
pub struct Translations {
    pub page_title: &'static str,
    pub main_title: &'static str,
    pub description: &'static str,
    pub footer_text: &'static str,
    pub source_text: &'static str,
    pub share_text: &'static str,
    pub twitter_text: &'static str,
    pub facebook_text: &'static str,
    pub linkedin_text: &'static str,
    pub mail_text: &'static str,
    pub mail_subject: &'static str,
    pub mail_body: &'static str,
    pub chart_label: &'static str,
    pub chart_alt: &'static str,
    pub average_label: &'static str,
    pub year_button: &'static str,
    pub corrected_note: &'static str,
    pub loading: &'static str,
    pub load_failed: &'static str,
    pub legend_selected: &'static str,
    pub legend_max: &'static str,
    pub legend_min: &'static str,
    pub legend_default: &'static str,
    pub year_label: fn(first: i32, last: i32) -> String,
    pub chart_tooltip: fn(year: i32, value: &str) -> String,
    pub year_result: fn(year: i32, value: &str) -> String,
    pub average_result: fn(from: i32, year: i32, average: &str) -> String,
    pub not_a_number: fn(input: &str) -> String,
    pub out_of_range: fn(first: i32, last: i32) -> String,
    pub not_found: fn(year: i32) -> String,
}

pub static FR: Translations = Translations {
    page_title: "Évolution du taux de réussite au Baccalauréat en Côte d'Ivoire",
    main_title: "Évolution du taux de réussite au Baccalauréat en Côte d'Ivoire (1960-2025)",
    description: "Ce graphique illustre l'évolution du taux de réussite au Baccalauréat en Côte d'Ivoire de 1960 à 2025. Les données proviennent de sources officielles et de rapports publiés dans divers médias.",
    footer_text: "Dernière mise à jour : 8/7/2025",
    source_text: "Source des données",
    share_text: "Partager :",
    twitter_text: "Twitter",
    facebook_text: "Facebook",
    linkedin_text: "LinkedIn",
    mail_text: "Envoyer par mail",
    mail_subject: "Évolution du taux de réussite au Baccalauréat en Côte d'Ivoire",
    mail_body: "Consultez ce graphique intéressant : http://bac-225.adminhq.cf/",
    chart_label: "% réussite",
    chart_alt: "Graphique à barres montrant le taux de réussite du Baccalauréat en Côte d'Ivoire de 1960 à 2025",
    average_label: "Moyenne",
    year_button: "Afficher",
    corrected_note: "(moyenne corrigée)",
    loading: "Chargement des données…",
    load_failed: "Impossible de charger les données",
    legend_selected: "Année sélectionnée",
    legend_max: "Taux le plus élevé",
    legend_min: "Taux le plus bas",
    legend_default: "Autres années",
    year_label: |first, last| format!("Entrez une année ({first}-{last}) :"),
    chart_tooltip: |year, value| format!("{year} : {value}%"),
    year_result: |year, value| format!("Taux de réussite en {year} : {value}%"),
    average_result: |from, year, average| format!("Moyenne générale ({from}-{year}) : {average}%"),
    not_a_number: |input| format!("« {input} » n'est pas une année valide."),
    out_of_range: |first, last| format!("Veuillez entrer une année valide entre {first} et {last}."),
    not_found: |year| format!("Aucune donnée disponible pour {year}."),
};

pub static EN: Translations = Translations {
    page_title: "Evolution of Baccalauréat Success Rate in Côte d'Ivoire",
    main_title: "Evolution of Baccalauréat Success Rate in Côte d'Ivoire (1960-2025)",
    description: "This chart illustrates the evolution of the Baccalauréat success rate in Côte d'Ivoire from 1960 to 2025. The data comes from official sources and reports published in various news channels.",
    footer_text: "Last Updated: 7/8/2025",
    source_text: "Data Source",
    share_text: "Share:",
    twitter_text: "Twitter",
    facebook_text: "Facebook",
    linkedin_text: "LinkedIn",
    mail_text: "Send by Email",
    mail_subject: "Evolution of Baccalauréat Success Rate in Côte d'Ivoire",
    mail_body: "Check out this interesting chart: http://bac-225.adminhq.cf/",
    chart_label: "% Success Rate",
    chart_alt: "Bar chart showing the Baccalauréat success rate in Côte d'Ivoire from 1960 to 2025",
    average_label: "Average",
    year_button: "Show",
    corrected_note: "(corrected average)",
    loading: "Loading data…",
    load_failed: "Could not load the data",
    legend_selected: "Selected year",
    legend_max: "Highest rate",
    legend_min: "Lowest rate",
    legend_default: "Other years",
    year_label: |first, last| format!("Enter a year ({first}-{last}):"),
    chart_tooltip: |year, value| format!("{year}: {value}%"),
    year_result: |year, value| format!("Success rate in {year}: {value}%"),
    average_result: |from, year, average| format!("Overall average ({from}-{year}): {average}%"),
    not_a_number: |input| format!("\"{input}\" is not a valid year."),
    out_of_range: |first, last| format!("Please enter a valid year between {first} and {last}."),
    not_found: |year| format!("No data available for {year}."),
};

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

/// Two-decimal rendering used for every percentage.
pub fn percent(value: f64) -> String {
    format!("{value:.2}")
}

impl Translations {
    pub fn query_error(&self, err: &QueryError) -> String {
        match err {
            QueryError::NotANumber { input } => (self.not_a_number)(input.trim()),
            QueryError::OutOfRange { range, .. } => (self.out_of_range)(range.first, range.last),
            QueryError::NotFound { year } => (self.not_found)(*year),
        }
    }

    /// Label of the full-average reference line.
    pub fn average_line(&self, average: f64) -> String {
        format!("{}: {}%", self.average_label, percent(average))
    }

    /// Result line for a query outcome.
    pub fn display_text(&self, outcome: &QueryOutcome) -> String {
        match &outcome.result {
            Ok(report) => {
                let year = report.point.year;
                let mut text = format!(
                    "{} | {}",
                    (self.year_result)(year, &percent(report.point.value)),
                    (self.average_result)(
                        report.average_from,
                        year,
                        &percent(report.average.value())
                    ),
                );
                if report.average.corrected.is_some() {
                    text.push(' ');
                    text.push_str(self.corrected_note);
                }
                text
            }
            Err(err) => self.query_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::{DataPoint, Series};
    use crate::engine::highlight::HighlightPolicy;
    use crate::engine::query::{submit_year, QuerySettings};

    fn outcome(raw: &str, settings: &QuerySettings) -> QueryOutcome {
        let series = Series::from_points(vec![
            DataPoint { year: 1960, value: 10.0 },
            DataPoint { year: 1961, value: 20.0 },
            DataPoint { year: 1962, value: 30.0 },
        ])
        .unwrap();
        let extremes = HighlightPolicy::Scan.resolve(&series);
        submit_year(&series, &extremes, settings, raw)
    }

    #[test]
    fn found_text_in_both_languages() {
        let out = outcome("1961", &QuerySettings::default());
        assert_eq!(
            EN.display_text(&out),
            "Success rate in 1961: 20.00% | Overall average (1960-1961): 15.00%"
        );
        assert_eq!(
            FR.display_text(&out),
            "Taux de réussite en 1961 : 20.00% | Moyenne générale (1960-1961) : 15.00%"
        );
    }

    #[test]
    fn each_error_kind_has_its_own_message() {
        let settings = QuerySettings::default();
        assert_eq!(
            EN.display_text(&outcome("1900", &settings)),
            "Please enter a valid year between 1960 and 2025."
        );
        assert_eq!(
            EN.display_text(&outcome(" abc ", &settings)),
            "\"abc\" is not a valid year."
        );
        assert_eq!(
            EN.display_text(&outcome("1963", &settings)),
            "No data available for 1963."
        );
    }

    #[test]
    fn corrected_average_is_marked() {
        let settings = QuerySettings {
            corrections: [(1961, 47.08)].into_iter().collect(),
            ..QuerySettings::default()
        };
        assert_eq!(
            EN.display_text(&outcome("1961", &settings)),
            "Success rate in 1961: 20.00% | Overall average (1960-1961): 47.08% (corrected average)"
        );
    }

    #[test]
    fn average_line_and_tooltip() {
        assert_eq!(EN.average_line(20.0), "Average: 20.00%");
        assert_eq!(FR.average_line(47.08), "Moyenne: 47.08%");
        assert_eq!((FR.chart_tooltip)(1969, "85.20"), "1969 : 85.20%");
    }

    #[test]
    fn language_lookup() {
        assert_eq!(Language::default(), Language::Fr);
        assert_eq!(Language::En.translations().year_button, "Show");
        assert_eq!(Language::Fr.translations().year_button, "Afficher");
    }
}
