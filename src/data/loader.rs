use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{DataPoint, Series};

/// Name of the year column / field in every supported format.
pub const YEAR_FIELD: &str = "date";
/// Name of the percentage column / field in every supported format.
pub const VALUE_FIELD: &str = "value";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. Fatal to the initial render.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("invalid arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("expected a top-level JSON array")]
    NotAnArray,

    #[error("row {row} is not a JSON object")]
    NotAnObject { row: usize },

    #[error("row {row}: missing '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: '{raw}' is not a year")]
    InvalidYear { row: usize, raw: String },

    #[error("row {row}: '{raw}' is not a percentage")]
    InvalidValue { row: usize, raw: String },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: &'static str, data_type: String },

    #[error("{year}: value {value} is outside 0-100")]
    ValueOutOfRange { year: i32, value: f64 },

    #[error("year {year} follows {previous}; years must be unique and ascending")]
    Unordered { previous: i32, year: i32 },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a yearly series from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "date": 1960, "value": "41.20%" }, ...]` (the published format)
/// * `.csv`     – header row with `date` and `value` columns
/// * `.parquet` – `date` integer column, `value` string or float column
pub fn load_file(path: &Path) -> Result<Series, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Parse a percentage such as `"41.20%"`, `" 41.2 % "` or `"41.2"`.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Series, LoadError> {
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    parse_json(&text)
}

/// Expected JSON schema:
///
/// ```json
/// [
///   { "date": 1960, "value": "41.20%" },
///   { "date": 1961, "value": 38.5 },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<Series, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut points = Vec::with_capacity(records.len());
    for (row, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(LoadError::NotAnObject { row })?;

        let year = json_year(obj.get(YEAR_FIELD), row)?;
        let value = json_percentage(obj.get(VALUE_FIELD), row)?;
        points.push(DataPoint { year, value });
    }

    Series::from_points(points)
}

fn json_year(val: Option<&JsonValue>, row: usize) -> Result<i32, LoadError> {
    let val = val.ok_or(LoadError::MissingField {
        row,
        field: YEAR_FIELD,
    })?;
    let year = match val {
        JsonValue::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        JsonValue::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    year.ok_or_else(|| LoadError::InvalidYear {
        row,
        raw: val.to_string(),
    })
}

fn json_percentage(val: Option<&JsonValue>, row: usize) -> Result<f64, LoadError> {
    let val = val.ok_or(LoadError::MissingField {
        row,
        field: VALUE_FIELD,
    })?;
    let value = match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_percentage(s),
        _ => None,
    };
    value.ok_or_else(|| LoadError::InvalidValue {
        row,
        raw: val.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row, `date` and `value` columns in any position.
/// Other columns are ignored.
fn load_csv(path: &Path) -> Result<Series, LoadError> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    let year_idx = headers
        .iter()
        .position(|h| h.trim() == YEAR_FIELD)
        .ok_or(LoadError::MissingField {
            row: 0,
            field: YEAR_FIELD,
        })?;
    let value_idx = headers
        .iter()
        .position(|h| h.trim() == VALUE_FIELD)
        .ok_or(LoadError::MissingField {
            row: 0,
            field: VALUE_FIELD,
        })?;

    let mut points = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let raw_year = record.get(year_idx).ok_or(LoadError::MissingField {
            row,
            field: YEAR_FIELD,
        })?;
        let year = raw_year
            .trim()
            .parse::<i32>()
            .map_err(|_| LoadError::InvalidYear {
                row,
                raw: raw_year.to_string(),
            })?;

        let raw_value = record.get(value_idx).ok_or(LoadError::MissingField {
            row,
            field: VALUE_FIELD,
        })?;
        let value = parse_percentage(raw_value).ok_or_else(|| LoadError::InvalidValue {
            row,
            raw: raw_value.to_string(),
        })?;

        points.push(DataPoint { year, value });
    }

    Series::from_points(points)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the series.
///
/// Expected schema:
/// - `date`: Int32 or Int64
/// - `value`: Utf8 / LargeUtf8 percentage strings, or Float32 / Float64
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Series, LoadError> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut points = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let year_idx = schema
            .index_of(YEAR_FIELD)
            .map_err(|_| LoadError::MissingField {
                row: row_offset,
                field: YEAR_FIELD,
            })?;
        let value_idx = schema
            .index_of(VALUE_FIELD)
            .map_err(|_| LoadError::MissingField {
                row: row_offset,
                field: VALUE_FIELD,
            })?;

        let years = batch.column(year_idx);
        let values = batch.column(value_idx);

        for i in 0..batch.num_rows() {
            let row = row_offset + i;
            let year = extract_year(years, i, row)?;
            let value = extract_percentage(values, i, row)?;
            points.push(DataPoint { year, value });
        }
        row_offset += batch.num_rows();
    }

    Series::from_points(points)
}

// -- Parquet / Arrow helpers --

fn extract_year(col: &Arc<dyn Array>, i: usize, row: usize) -> Result<i32, LoadError> {
    if col.is_null(i) {
        return Err(LoadError::MissingField {
            row,
            field: YEAR_FIELD,
        });
    }
    match col.data_type() {
        DataType::Int32 => match col.as_any().downcast_ref::<Int32Array>() {
            Some(arr) => Ok(arr.value(i)),
            None => Err(unsupported(YEAR_FIELD, col)),
        },
        DataType::Int64 => {
            let raw = match col.as_any().downcast_ref::<Int64Array>() {
                Some(arr) => arr.value(i),
                None => return Err(unsupported(YEAR_FIELD, col)),
            };
            i32::try_from(raw).map_err(|_| LoadError::InvalidYear {
                row,
                raw: raw.to_string(),
            })
        }
        _ => Err(unsupported(YEAR_FIELD, col)),
    }
}

fn extract_percentage(col: &Arc<dyn Array>, i: usize, row: usize) -> Result<f64, LoadError> {
    if col.is_null(i) {
        return Err(LoadError::MissingField {
            row,
            field: VALUE_FIELD,
        });
    }
    let parse = |raw: &str| {
        parse_percentage(raw).ok_or_else(|| LoadError::InvalidValue {
            row,
            raw: raw.to_string(),
        })
    };
    match col.data_type() {
        DataType::Utf8 => match col.as_any().downcast_ref::<StringArray>() {
            Some(arr) => parse(arr.value(i)),
            None => Err(unsupported(VALUE_FIELD, col)),
        },
        DataType::LargeUtf8 => parse(col.as_string::<i64>().value(i)),
        DataType::Float64 => match col.as_any().downcast_ref::<Float64Array>() {
            Some(arr) => Ok(arr.value(i)),
            None => Err(unsupported(VALUE_FIELD, col)),
        },
        DataType::Float32 => match col.as_any().downcast_ref::<Float32Array>() {
            Some(arr) => Ok(arr.value(i) as f64),
            None => Err(unsupported(VALUE_FIELD, col)),
        },
        _ => Err(unsupported(VALUE_FIELD, col)),
    }
}

fn unsupported(column: &'static str, col: &Arc<dyn Array>) -> LoadError {
    LoadError::UnsupportedColumnType {
        column,
        data_type: format!("{:?}", col.data_type()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{ArrayRef, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn percentage_suffix_is_stripped() {
        assert_eq!(parse_percentage("41.20%"), Some(41.2));
        assert_eq!(parse_percentage(" 41.2 % "), Some(41.2));
        assert_eq!(parse_percentage("7"), Some(7.0));
        assert_eq!(parse_percentage("%"), None);
        assert_eq!(parse_percentage("abc%"), None);
        assert_eq!(parse_percentage("NaN"), None);
    }

    #[test]
    fn json_accepts_strings_and_numbers() {
        let series = parse_json(
            r#"[
                {"date": 1960, "value": "10.00%"},
                {"date": "1961", "value": 20},
                {"date": 1962, "value": "30.5"}
            ]"#,
        )
        .unwrap();

        let expected = vec![
            DataPoint { year: 1960, value: 10.0 },
            DataPoint { year: 1961, value: 20.0 },
            DataPoint { year: 1962, value: 30.5 },
        ];
        assert_eq!(series.points(), expected.as_slice());
    }

    #[test]
    fn json_missing_value_is_reported() {
        let err = parse_json(r#"[{"date": 1960}]"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField {
                row: 0,
                field: VALUE_FIELD
            }
        ));
    }

    #[test]
    fn json_missing_year_is_reported() {
        let err = parse_json(r#"[{"date": 1960, "value": "1%"}, {"value": "2%"}]"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField {
                row: 1,
                field: YEAR_FIELD
            }
        ));
    }

    #[test]
    fn json_bad_percentage_is_reported() {
        let err = parse_json(r#"[{"date": 1960, "value": "n/a"}]"#).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { row: 0, .. }));
    }

    #[test]
    fn non_json_is_rejected() {
        assert!(matches!(parse_json("not json"), Err(LoadError::Json(_))));
        assert!(matches!(parse_json(r#"{"date": 1}"#), Err(LoadError::NotAnArray)));
        assert!(matches!(parse_json("[1]"), Err(LoadError::NotAnObject { row: 0 })));
    }

    #[test]
    fn loads_json_file() {
        let file = write_temp(".json", r#"[{"date": 1960, "value": "41.20%"}]"#);
        let series = load_file(file.path()).unwrap();
        assert_eq!(series.points(), &[DataPoint { year: 1960, value: 41.2 }]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/definitely/not/here/data.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn loads_csv_file_with_extra_columns() {
        let file = write_temp(".csv", "note,value,date\na,10.00%,1960\nb,20.5,1961\n");
        let series = load_file(file.path()).unwrap();
        assert_eq!(
            series.points(),
            &[
                DataPoint { year: 1960, value: 10.0 },
                DataPoint { year: 1961, value: 20.5 },
            ]
        );
    }

    #[test]
    fn csv_without_value_column_is_rejected() {
        let file = write_temp(".csv", "date\n1960\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingField { field: VALUE_FIELD, .. }));
    }

    #[test]
    fn loads_parquet_file() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(YEAR_FIELD, DataType::Int64, false),
            Field::new(VALUE_FIELD, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![1960, 1961])) as ArrayRef,
                Arc::new(StringArray::from(vec!["10.00%", "20.00%"])) as ArrayRef,
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let series = load_file(file.path()).unwrap();
        assert_eq!(
            series.points(),
            &[
                DataPoint { year: 1960, value: 10.0 },
                DataPoint { year: 1961, value: 20.0 },
            ]
        );
    }
}
