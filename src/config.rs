use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::engine::highlight::HighlightPolicy;
use crate::engine::query::{QuerySettings, YearRange};
use crate::i18n::Language;

/// Baccalauréat success-rate viewer
#[derive(Parser, Debug, Clone)]
#[command(name = "bac-viewer")]
#[command(about = "Bar chart of the yearly Baccalauréat success rate in Côte d'Ivoire")]
pub struct Args {
    /// Dataset file (.json, .csv or .parquet)
    #[arg(short, long, default_value = "data.json")]
    pub data: PathBuf,

    /// Initial interface language
    #[arg(short, long, value_enum, default_value_t = Language::Fr)]
    pub lang: Language,

    /// First year a query may ask for
    #[arg(long, default_value_t = YearRange::default().first)]
    pub first_year: i32,

    /// Last year a query may ask for
    #[arg(long, default_value_t = YearRange::default().last)]
    pub last_year: i32,

    /// Always highlight this year as the maximum (requires --min-year)
    #[arg(long, requires = "min_year")]
    pub max_year: Option<i32>,

    /// Always highlight this year as the minimum (requires --max-year)
    #[arg(long, requires = "max_year")]
    pub min_year: Option<i32>,

    /// Replace the displayed average for a year, e.g. 1981=47.08 (repeatable)
    #[arg(long = "average-correction", value_name = "YEAR=AVG", value_parser = parse_correction)]
    pub average_corrections: Vec<(i32, f64)>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub data_path: PathBuf,
    pub language: Language,
    pub policy: HighlightPolicy,
    pub query: QuerySettings,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.json"),
            language: Language::default(),
            policy: HighlightPolicy::default(),
            query: QuerySettings::default(),
        }
    }
}

impl TryFrom<Args> for ViewerConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self> {
        let Some(range) = YearRange::new(args.first_year, args.last_year) else {
            bail!(
                "--first-year {} is after --last-year {}",
                args.first_year,
                args.last_year
            );
        };

        let policy = match (args.max_year, args.min_year) {
            (Some(max), Some(min)) => HighlightPolicy::Fixed { max, min },
            (None, None) => HighlightPolicy::Scan,
            _ => bail!("--max-year and --min-year must be given together"),
        };

        Ok(ViewerConfig {
            data_path: args.data,
            language: args.lang,
            policy,
            query: QuerySettings {
                range,
                corrections: args.average_corrections.into_iter().collect(),
            },
        })
    }
}

fn parse_correction(s: &str) -> Result<(i32, f64)> {
    let (year, average) = s
        .split_once('=')
        .with_context(|| format!("'{s}' is not YEAR=AVG"))?;
    let year = year
        .trim()
        .parse::<i32>()
        .with_context(|| format!("'{year}' is not a year"))?;
    let average = average
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .with_context(|| format!("'{average}' is not an average"))?;
    if !(0.0..=100.0).contains(&average) {
        bail!("average {average} is outside 0-100");
    }
    Ok((year, average))
}
