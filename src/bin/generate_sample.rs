//! Writes a deterministic synthetic success-rate series (1960-2025) as
//! `sample_data.json`, `sample_data.csv` and `sample_data.parquet`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Generate sample datasets for the viewer
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Skip every n-th year to produce a sparse series (0 = no gaps)
    #[arg(long, default_value_t = 0)]
    gap_every: usize,
}

#[derive(Serialize)]
struct Record {
    date: i32,
    value: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Slow oscillation around 40% plus noise, clamped to 0-100 and rounded to
/// two decimals like the published figures.
fn synthetic_rate(year: i32, rng: &mut SimpleRng) -> f64 {
    let t = (year - 1960) as f64;
    let trend = 40.0 + 25.0 * (t / 9.0).cos() - 0.1 * t;
    let noise = (rng.next_f64() - 0.5) * 12.0;
    ((trend + noise).clamp(0.0, 100.0) * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let records: Vec<Record> = (1960..=2025)
        .enumerate()
        .filter(|(i, _)| args.gap_every == 0 || (i + 1) % args.gap_every != 0)
        .map(|(_, year)| Record {
            date: year,
            value: format!("{:.2}%", synthetic_rate(year, &mut rng)),
        })
        .collect();

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    // ---- JSON (the published format) ----
    let json_path = args.output_dir.join("sample_data.json");
    let json = serde_json::to_string_pretty(&records).context("serialising JSON")?;
    std::fs::write(&json_path, json).with_context(|| format!("writing {}", json_path.display()))?;
    log::info!("wrote {}", json_path.display());

    // ---- CSV ----
    let csv_path = args.output_dir.join("sample_data.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    for rec in &records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    log::info!("wrote {}", csv_path.display());

    // ---- Parquet ----
    let parquet_path = args.output_dir.join("sample_data.parquet");
    let schema = Arc::new(Schema::new(vec![
        Field::new("date", DataType::Int32, false),
        Field::new("value", DataType::Utf8, false),
    ]));
    let years: ArrayRef = Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.date)));
    let values: ArrayRef = Arc::new(StringArray::from_iter_values(
        records.iter().map(|r| r.value.as_str()),
    ));
    let batch = RecordBatch::try_new(schema.clone(), vec![years, values])
        .context("building record batch")?;

    let file = std::fs::File::create(&parquet_path)
        .with_context(|| format!("creating {}", parquet_path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    log::info!("wrote {}", parquet_path.display());

    println!(
        "Generated {} yearly records in {}",
        records.len(),
        args.output_dir.display()
    );
    Ok(())
}
