use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::ChartSpec;

/// Write a chart description as pretty-printed JSON.
pub fn write_chart_json(path: &Path, chart: &ChartSpec) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, chart).context("serialising chart")?;
    writeln!(writer)?;
    writer.flush().context("writing chart JSON")?;
    log::info!(
        "Exported chart '{}' ({} frames) to {}",
        chart.title,
        chart.frame_count(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_chart, ChartConfig};
    use crate::data::rank::prepare;
    use crate::data::RawRow;

    #[test]
    fn exported_file_is_valid_json() {
        let ds = prepare(vec![
            RawRow::new(Some("KC"), 2016, 4000.0),
            RawRow::new(Some("BUF"), 2016, 3000.0),
        ]);
        let chart = build_chart(&ds, "KC", "BUF", &ChartConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        write_chart_json(&path, &chart).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["title"], "Rank Progression for KC and BUF (2016-2024)");
        assert_eq!(json["frames"][0]["data"][1]["y"][0], 2.0);
    }
}
