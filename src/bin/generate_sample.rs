//! Write a synthetic `team_passing_yards_2016_2024` dataset.
//!
//! `generate-sample [OUT]` – the format follows the extension of `OUT`
//! (`.csv` by default, `.parquet` also supported). A few rows with an empty
//! team are included, the way play-by-play aggregates often have them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

const TEAMS: [&str; 32] = [
    "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN", "DET", "GB", "HOU",
    "IND", "JAX", "KC", "LA", "LAC", "LV", "MIA", "MIN", "NE", "NO", "NYG", "NYJ", "PHI", "PIT",
    "SEA", "SF", "TB", "TEN", "WAS",
];

#[derive(Parser, Debug)]
#[command(name = "generate-sample", about = "Write a synthetic passing-yards dataset")]
struct Args {
    /// Output file (.csv or .parquet)
    #[arg(default_value = "team_passing_yards_2016_2024.csv")]
    out: PathBuf,

    #[arg(long, default_value_t = 2016)]
    first_year: i64,

    #[arg(long, default_value_t = 2024)]
    last_year: i64,

    /// Seed for the deterministic generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

struct SampleRow {
    team: Option<&'static str>,
    year: i64,
    total_passing_yards: f64,
}

/// SplitMix64: small, deterministic and good enough for sample data.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn generate(args: &Args) -> Vec<SampleRow> {
    let mut rng = SplitMix(args.seed);

    // Each team drifts around its own baseline so ranks move year to year.
    let mut level: Vec<f64> = TEAMS.iter().map(|_| 3200.0 + rng.next_f64() * 1200.0).collect();

    let mut rows = Vec::new();
    for year in args.first_year..=args.last_year {
        for (team, yards) in TEAMS.iter().zip(level.iter_mut()) {
            *yards = (*yards + (rng.next_f64() - 0.5) * 500.0).clamp(2500.0, 5300.0);
            rows.push(SampleRow {
                team: Some(*team),
                year,
                total_passing_yards: yards.round(),
            });
        }
        // Unattributed plays aggregate into a row without a team.
        rows.push(SampleRow {
            team: None,
            year,
            total_passing_yards: (rng.next_f64() * 300.0).round(),
        });
    }
    rows
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["posteam", "year", "total_passing_yards"])?;
    for row in rows {
        writer.write_record([
            row.team.unwrap_or("").to_string(),
            row.year.to_string(),
            row.total_passing_yards.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("posteam", DataType::Utf8, true),
        Field::new("year", DataType::Int64, false),
        Field::new("total_passing_yards", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.team).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.year).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.total_passing_yards).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let rows = generate(&args);

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "parquet" | "pq" => write_parquet(&args.out, &rows)?,
        _ => write_csv(&args.out, &rows)?,
    }

    log::info!("Wrote {} rows to {}", rows.len(), args.out.display());
    println!(
        "Wrote {} rows ({} teams, {}-{}) to {}",
        rows.len(),
        TEAMS.len(),
        args.first_year,
        args.last_year,
        args.out.display()
    );
    Ok(())
}
