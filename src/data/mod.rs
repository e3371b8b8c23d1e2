/// Data layer: core types, loading, and ranking.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   rank    │  drop missing teams, rank yards within each year
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<YearlyTeamRecord>, sorted team list
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod rank;

use std::path::Path;

pub use model::{Dataset, RawRow, YearlyTeamRecord};

/// Load a file and prepare it in one step.
pub fn load_dataset(path: &Path) -> error::Result<Dataset> {
    let rows = loader::load_file(path)?;
    let dataset = rank::prepare(rows);
    log::info!(
        "Loaded {} records for {} teams from {} ({} rows dropped)",
        dataset.len(),
        dataset.teams().len(),
        path.display(),
        dataset.dropped_rows()
    );
    Ok(dataset)
}
