use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::{DataError, Result};
use super::model::RawRow;

pub const TEAM_COLUMN: &str = "posteam";
pub const YEAR_COLUMN: &str = "year";
pub const YARDS_COLUMN: &str = "total_passing_yards";

/// Cell contents treated as missing, matching the usual pandas NA tokens.
const NA_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load raw team rows from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `posteam`, `year`, `total_passing_yards`
/// * `.json`    – `[{ "posteam": "KC", "year": 2016, "total_passing_yards": 4000 }, ...]`
/// * `.parquet` – columns of the same names
///
/// Row numbers in errors are 1-based and count data rows only.
pub fn load_file(path: &Path) -> Result<Vec<RawRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(std::fs::File::open(path)?),
        "json" => read_json(&std::fs::read_to_string(path)?),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

/// Team identifiers are kept verbatim, so `" KC"` and `"KC"` are distinct teams.
fn team_from_str(s: &str) -> Option<String> {
    if NA_TOKENS.contains(&s) {
        None
    } else {
        Some(s.to_string())
    }
}

fn parse_year(s: &str, row: usize) -> Result<i32> {
    let s = s.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Ok(y);
    }
    // Pandas writes integer columns containing NaN as floats ("2016.0").
    match s.parse::<f64>() {
        Ok(f) => year_from_f64(f, row, s),
        Err(_) => Err(invalid(row, YEAR_COLUMN, s)),
    }
}

fn year_from_f64(f: f64, row: usize, raw: &str) -> Result<i32> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= i32::MAX as f64 {
        Ok(f as i32)
    } else {
        Err(invalid(row, YEAR_COLUMN, raw))
    }
}

/// `Ok(None)` for a missing cell; anything else must be a finite number.
fn parse_yards(s: &str, row: usize) -> Result<Option<f64>> {
    let s = s.trim();
    if NA_TOKENS.contains(&s) {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(invalid(row, YARDS_COLUMN, s)),
    }
}

fn invalid(row: usize, column: &'static str, value: &str) -> DataError {
    DataError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row required; the three columns may appear in any order and any
/// other columns are ignored.
pub fn read_csv<R: Read>(source: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(DataError::MissingColumn(name))
    };
    let team_idx = column(TEAM_COLUMN)?;
    let year_idx = column(YEAR_COLUMN)?;
    let yards_idx = column(YARDS_COLUMN)?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let team = team_from_str(record.get(team_idx).unwrap_or(""));
        let year = parse_year(record.get(year_idx).unwrap_or(""), row)?;
        let total_passing_yards = parse_yards(record.get(yards_idx).unwrap_or(""), row)?;

        rows.push(RawRow {
            team,
            year,
            total_passing_yards,
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
/// Every object must carry all three keys; `posteam` and
/// `total_passing_yards` may be `null`.
pub fn read_json(text: &str) -> Result<Vec<RawRow>> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = match root {
        JsonValue::Array(records) => records,
        _ => return Err(DataError::NotRecords),
    };

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let row = i + 1;
        let obj = rec
            .as_object()
            .ok_or_else(|| invalid(row, TEAM_COLUMN, &rec.to_string()))?;

        let team = match field(obj, TEAM_COLUMN)? {
            JsonValue::String(s) => team_from_str(s),
            JsonValue::Null => None,
            other => Some(other.to_string()),
        };
        let year = match field(obj, YEAR_COLUMN)? {
            JsonValue::Number(n) => match n.as_i64() {
                Some(y) => i32::try_from(y).map_err(|_| invalid(row, YEAR_COLUMN, &n.to_string()))?,
                None => year_from_f64(n.as_f64().unwrap_or(f64::NAN), row, &n.to_string())?,
            },
            JsonValue::String(s) => parse_year(s, row)?,
            other => return Err(invalid(row, YEAR_COLUMN, &other.to_string())),
        };
        let total_passing_yards = match field(obj, YARDS_COLUMN)? {
            JsonValue::Number(n) => Some(
                n.as_f64()
                    .ok_or_else(|| invalid(row, YARDS_COLUMN, &n.to_string()))?,
            ),
            JsonValue::String(s) => parse_yards(s, row)?,
            JsonValue::Null => None,
            other => return Err(invalid(row, YARDS_COLUMN, &other.to_string())),
        };

        rows.push(RawRow {
            team,
            year,
            total_passing_yards,
        });
    }

    Ok(rows)
}

fn field<'a>(obj: &'a Map<String, JsonValue>, key: &'static str) -> Result<&'a JsonValue> {
    obj.get(key).ok_or(DataError::MissingColumn(key))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas or Polars.
///
/// Expected schema:
/// - `posteam`: Utf8 / LargeUtf8, nullable
/// - `year`: any integer column (or an integral float column)
/// - `total_passing_yards`: any numeric column, nulls / NaN are missing
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;

        // Normalise every column to one physical type before walking rows.
        let teams = cast(batch_column(&batch, TEAM_COLUMN)?, &DataType::Utf8)?;
        let years = cast(batch_column(&batch, YEAR_COLUMN)?, &DataType::Float64)?;
        let yards = cast(batch_column(&batch, YARDS_COLUMN)?, &DataType::Float64)?;

        let teams = teams.as_string::<i32>();
        let years = years.as_primitive::<Float64Type>();
        let yards = yards.as_primitive::<Float64Type>();

        let offset = rows.len();
        for i in 0..batch.num_rows() {
            let row = offset + i + 1;

            let team = if teams.is_null(i) {
                None
            } else {
                team_from_str(teams.value(i))
            };

            if years.is_null(i) {
                return Err(invalid(row, YEAR_COLUMN, "null"));
            }
            let raw_year = years.value(i);
            let year = year_from_f64(raw_year, row, &raw_year.to_string())?;

            // Pandas stores missing floats as NaN rather than null.
            let total_passing_yards = if yards.is_null(i) || yards.value(i).is_nan() {
                None
            } else {
                let v = yards.value(i);
                if !v.is_finite() {
                    return Err(invalid(row, YARDS_COLUMN, &v.to_string()));
                }
                Some(v)
            };

            rows.push(RawRow {
                team,
                year,
                total_passing_yards,
            });
        }
    }

    Ok(rows)
}

fn batch_column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a ArrayRef> {
    batch
        .schema()
        .index_of(name)
        .map(|idx| batch.column(idx))
        .map_err(|_| DataError::MissingColumn(name))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    #[test]
    fn csv_reads_required_columns_in_any_order() {
        let text = "year,extra,total_passing_yards,posteam\n2016,x,4000,KC\n2016,y,3000.5,BUF\n";
        let rows = read_csv(text.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                RawRow::new(Some("KC"), 2016, 4000.0),
                RawRow::new(Some("BUF"), 2016, 3000.5),
            ]
        );
    }

    #[test]
    fn csv_na_tokens_become_missing_team() {
        let text = "posteam,year,total_passing_yards\n,2016,1\nNA,2016,2\nnan,2016,3\nKC,2016,4\n";
        let rows = read_csv(text.as_bytes()).unwrap();
        let teams: Vec<Option<&str>> = rows.iter().map(|r| r.team.as_deref()).collect();
        assert_eq!(teams, vec![None, None, None, Some("KC")]);
    }

    #[test]
    fn csv_missing_yardage_is_kept_unranked() {
        let text = "posteam,year,total_passing_yards\nKC,2016,\nBUF,2016,3000\nNE,2016,3500";
        let rows = read_csv(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].total_passing_yards, None);

        let ds = crate::data::rank::prepare(rows);
        let rank = |team: &str| ds.series(team).first().map(|r| r.rank);
        assert_eq!(rank("NE"), Some(1.0));
        assert_eq!(rank("BUF"), Some(2.0));
        assert_eq!(rank("KC"), None);
        assert_eq!(ds.dropped_rows(), 1);
    }

    #[test]
    fn csv_na_tokens_in_yardage_are_missing() {
        let text = "posteam,year,total_passing_yards\nKC,2016,NA\nBUF,2016,nan\nNE,2016, \n";
        let rows = read_csv(text.as_bytes()).unwrap();
        assert!(rows.iter().all(|r| r.total_passing_yards.is_none()));
    }

    #[test]
    fn team_identifiers_are_not_trimmed() {
        let text = "posteam,year,total_passing_yards\n KC,2016,1\nKC,2016,2\n";
        let ds = crate::data::rank::prepare(read_csv(text.as_bytes()).unwrap());
        assert_eq!(ds.teams(), [" KC".to_string(), "KC".to_string()]);
    }

    #[test]
    fn csv_missing_column_is_schema_error() {
        let text = "posteam,year\nKC,2016\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(YARDS_COLUMN)));

        let text = "team,year,total_passing_yards\nKC,2016,1\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(TEAM_COLUMN)));
    }

    #[test]
    fn csv_malformed_number_is_value_error() {
        let text = "posteam,year,total_passing_yards\nKC,2016,4000\nBUF,2016,lots\n";
        match read_csv(text.as_bytes()).unwrap_err() {
            DataError::InvalidValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, YARDS_COLUMN);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn csv_accepts_float_formatted_years() {
        let text = "posteam,year,total_passing_yards\nKC,2016.0,4000\n";
        assert_eq!(read_csv(text.as_bytes()).unwrap()[0].year, 2016);

        let text = "posteam,year,total_passing_yards\nKC,2016.5,4000\n";
        assert!(matches!(
            read_csv(text.as_bytes()).unwrap_err(),
            DataError::InvalidValue { column: YEAR_COLUMN, .. }
        ));
    }

    #[test]
    fn json_records_with_null_team() {
        let text = r#"[
            {"posteam": "KC", "year": 2016, "total_passing_yards": 4000},
            {"posteam": null, "year": 2016, "total_passing_yards": 10.5},
            {"posteam": "BUF", "year": "2017", "total_passing_yards": "4600"}
        ]"#;
        let rows = read_json(text).unwrap();
        assert_eq!(
            rows,
            vec![
                RawRow::new(Some("KC"), 2016, 4000.0),
                RawRow::new(None, 2016, 10.5),
                RawRow::new(Some("BUF"), 2017, 4600.0),
            ]
        );
    }

    #[test]
    fn json_null_yardage_is_missing() {
        let text = r#"[{"posteam": "KC", "year": 2016, "total_passing_yards": null}]"#;
        assert_eq!(read_json(text).unwrap()[0].total_passing_yards, None);
    }

    #[test]
    fn json_root_must_be_an_array() {
        let text = r#"{"posteam": ["KC"], "year": [2016], "total_passing_yards": [4000]}"#;
        assert!(matches!(read_json(text).unwrap_err(), DataError::NotRecords));
    }

    #[test]
    fn json_missing_key_is_schema_error() {
        let text = r#"[{"posteam": "KC", "total_passing_yards": 4000}]"#;
        assert!(matches!(
            read_json(text).unwrap_err(),
            DataError::MissingColumn(YEAR_COLUMN)
        ));
    }

    #[test]
    fn load_file_dispatches_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("stats.CSV");
        let mut f = std::fs::File::create(&csv_path).unwrap();
        writeln!(f, "posteam,year,total_passing_yards").unwrap();
        writeln!(f, "KC,2016,4000").unwrap();
        drop(f);
        assert_eq!(load_file(&csv_path).unwrap().len(), 1);

        let txt_path = dir.path().join("stats.txt");
        std::fs::write(&txt_path, "irrelevant").unwrap();
        assert!(matches!(
            load_file(&txt_path).unwrap_err(),
            DataError::UnsupportedFormat(ext) if ext == "txt"
        ));
    }

    #[test]
    fn parquet_round_trip_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new(TEAM_COLUMN, DataType::Utf8, true),
            Field::new(YEAR_COLUMN, DataType::Int64, false),
            Field::new(YARDS_COLUMN, DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("KC"), None, Some("BUF"), Some("NE")])),
                Arc::new(Int64Array::from(vec![2016, 2016, 2016, 2016])),
                Arc::new(Float64Array::from(vec![
                    Some(4000.0),
                    Some(100.0),
                    None,
                    Some(f64::NAN),
                ])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let rows = load_file(&path).unwrap();
        assert_eq!(
            rows,
            vec![
                RawRow::new(Some("KC"), 2016, 4000.0),
                RawRow::new(None, 2016, 100.0),
                RawRow {
                    team: Some("BUF".into()),
                    year: 2016,
                    total_passing_yards: None,
                },
                RawRow {
                    team: Some("NE".into()),
                    year: 2016,
                    total_passing_yards: None,
                },
            ]
        );
    }
}
