use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, TimeUnit, TimestampMillisecondType};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{
    AirQualityDataset, AqCategory, ColumnNames, Observation, POLLUTANT_COUNT, WEATHER_COUNT,
};

pub const STATION_COLUMN: &str = "station";
pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const CATEGORY_COLUMN: &str = "Category";

/// Positional layout of the weather columns: 6..10 and 11 (10 is wind direction).
const WEATHER_POSITIONS: [usize; WEATHER_COUNT] = [6, 7, 8, 9, 11];
const WIND_DIRECTION_POSITION: usize = 10;
const MIN_COLUMNS: usize = 12;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// A violation of the fixed dataset schema. Rows count data rows from 0.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("expected at least {expected} columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },

    #[error("missing '{0}' column")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: cannot parse timestamp '{value}'")]
    InvalidTimestamp { row: usize, value: String },

    #[error("row {row}: unknown air quality category '{value}'")]
    UnknownCategory { row: usize, value: String },

    #[error("row {row}: missing value in column '{column}'")]
    MissingValue { row: usize, column: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an air-quality dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; pollutants in columns 0..6, weather in 6..10 and 11,
///   wind direction in 10, plus named `station`, `timestamp`, `Category` columns
/// * `.parquet` – same column layout, numeric columns of any int/float width
pub fn load_file(path: &Path) -> Result<AirQualityDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Column indices resolved from a header.
#[derive(Debug, Clone, PartialEq)]
struct ColumnLayout {
    pollutants: [usize; POLLUTANT_COUNT],
    weather: [usize; WEATHER_COUNT],
    wind_direction: usize,
    station: usize,
    timestamp: usize,
    category: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &[String]) -> Result<(Self, ColumnNames), SchemaError> {
        if headers.len() < MIN_COLUMNS {
            return Err(SchemaError::TooFewColumns {
                expected: MIN_COLUMNS,
                found: headers.len(),
            });
        }
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(SchemaError::MissingColumn(name))
        };

        let layout = ColumnLayout {
            pollutants: std::array::from_fn(|i| i),
            weather: WEATHER_POSITIONS,
            wind_direction: WIND_DIRECTION_POSITION,
            station: find(STATION_COLUMN)?,
            timestamp: find(TIMESTAMP_COLUMN)?,
            category: find(CATEGORY_COLUMN)?,
        };
        let names = ColumnNames {
            pollutants: layout.pollutants.map(|i| headers[i].trim().to_string()),
            weather: layout.weather.map(|i| headers[i].trim().to_string()),
            wind_direction: headers[layout.wind_direction].trim().to_string(),
        };
        Ok((layout, names))
    }
}

// ---------------------------------------------------------------------------
// Cell parsers shared by both formats
// ---------------------------------------------------------------------------

fn is_missing(s: &str) -> bool {
    matches!(s, "" | "NA" | "NaN" | "nan" | "null" | "None")
}

fn parse_number(s: &str, row: usize, column: &str) -> Result<Option<f64>, SchemaError> {
    let s = s.trim();
    if is_missing(s) {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(_) => Ok(None),
        Err(_) => Err(SchemaError::InvalidNumber {
            row,
            column: column.to_string(),
            value: s.to_string(),
        }),
    }
}

/// Parse a timestamp cell; a bare date means midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_timestamp_cell(s: &str, row: usize) -> Result<NaiveDateTime, SchemaError> {
    parse_timestamp(s).ok_or_else(|| SchemaError::InvalidTimestamp {
        row,
        value: s.to_string(),
    })
}

fn parse_category(s: &str, row: usize) -> Result<AqCategory, SchemaError> {
    AqCategory::from_label(s).ok_or_else(|| SchemaError::UnknownCategory {
        row,
        value: s.to_string(),
    })
}

/// A text cell that may be absent; missing tokens become `None`.
fn optional_text(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|v| !is_missing(v))
        .map(str::to_string)
}

fn required_text(s: Option<&str>, row: usize, column: &str) -> Result<String, SchemaError> {
    match s.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SchemaError::MissingValue {
            row,
            column: column.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<AirQualityDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let (layout, names) = ColumnLayout::from_headers(&headers).context("checking CSV header")?;

    let mut observations = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let obs = parse_record(&record, row_no, &layout, &headers)
            .with_context(|| format!("CSV row {row_no}"))?;
        observations.push(obs);
    }

    Ok(AirQualityDataset::new(names, observations))
}

fn parse_record(
    record: &csv::StringRecord,
    row: usize,
    layout: &ColumnLayout,
    headers: &[String],
) -> Result<Observation, SchemaError> {
    let cell = |idx: usize| record.get(idx).unwrap_or("");
    let number = |idx: usize| parse_number(cell(idx), row, &headers[idx]);

    let mut pollutants = [None; POLLUTANT_COUNT];
    for (slot, &idx) in pollutants.iter_mut().zip(&layout.pollutants) {
        *slot = number(idx)?;
    }
    let mut weather = [None; WEATHER_COUNT];
    for (slot, &idx) in weather.iter_mut().zip(&layout.weather) {
        *slot = number(idx)?;
    }

    Ok(Observation {
        pollutants,
        weather,
        wind_direction: optional_text(record.get(layout.wind_direction)),
        station: required_text(record.get(layout.station), row, STATION_COLUMN)?,
        timestamp: parse_timestamp_cell(cell(layout.timestamp), row)?,
        category: parse_category(cell(layout.category), row)?,
    })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same column layout as the CSV.
///
/// Numeric columns may be any integer or float width; they are cast to Float64.
/// Text numeric columns are parsed cell by cell like CSV cells.
/// `timestamp` may be a string column or an Arrow timestamp of any unit.
fn load_parquet(path: &Path) -> Result<AirQualityDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let (layout, names) =
        ColumnLayout::from_headers(&headers).context("checking parquet schema")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut observations = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let base = observations.len();
        parse_batch(&batch, base, &layout, &headers, &mut observations)?;
    }

    Ok(AirQualityDataset::new(names, observations))
}

// -- Parquet / Arrow helpers --

fn float_column(
    batch: &RecordBatch,
    idx: usize,
    base: usize,
    column: &str,
) -> Result<Vec<Option<f64>>> {
    match batch.column(idx).data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            let strings = string_column(batch, idx)?;
            let values = (0..strings.len())
                .map(|row| match text_at(&strings, row) {
                    Some(s) => parse_number(s, base + row, column),
                    None => Ok(None),
                })
                .collect::<Result<Vec<_>, SchemaError>>()?;
            Ok(values)
        }
        _ => {
            let arr = cast(batch.column(idx), &DataType::Float64)
                .with_context(|| format!("column '{column}' is not numeric"))?;
            let floats = arr.as_primitive::<Float64Type>();
            Ok((0..floats.len()).map(|row| float_value(floats, row)).collect())
        }
    }
}

fn string_column(batch: &RecordBatch, idx: usize) -> Result<StringArray> {
    let arr = cast(batch.column(idx), &DataType::Utf8)
        .with_context(|| format!("column {idx} is not text"))?;
    Ok(arr.as_string::<i32>().clone())
}

fn text_at(arr: &StringArray, row: usize) -> Option<&str> {
    (!arr.is_null(row)).then(|| arr.value(row))
}

fn float_value(arr: &Float64Array, row: usize) -> Option<f64> {
    if arr.is_null(row) {
        return None;
    }
    Some(arr.value(row)).filter(|v| v.is_finite())
}

/// Timestamps for every row of the batch, as naive UTC.
fn timestamp_column(batch: &RecordBatch, idx: usize, base: usize) -> Result<Vec<Option<NaiveDateTime>>> {
    let col = batch.column(idx);
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            let strings = string_column(batch, idx)?;
            (0..strings.len())
                .map(|row| -> Result<Option<NaiveDateTime>> {
                    if strings.is_null(row) {
                        return Ok(None);
                    }
                    Ok(Some(parse_timestamp_cell(strings.value(row), base + row)?))
                })
                .collect()
        }
        _ => {
            let arr = cast(col, &DataType::Timestamp(TimeUnit::Millisecond, None))
                .context("timestamp column is neither text nor a timestamp")?;
            let millis = arr.as_primitive::<TimestampMillisecondType>();
            Ok((0..millis.len())
                .map(|row| {
                    if millis.is_null(row) {
                        return None;
                    }
                    DateTime::from_timestamp_millis(millis.value(row)).map(|d| d.naive_utc())
                })
                .collect())
        }
    }
}

fn parse_batch(
    batch: &RecordBatch,
    base: usize,
    layout: &ColumnLayout,
    headers: &[String],
    out: &mut Vec<Observation>,
) -> Result<()> {
    let pollutant_cols = layout
        .pollutants
        .iter()
        .map(|&i| float_column(batch, i, base, &headers[i]))
        .collect::<Result<Vec<_>>>()?;
    let weather_cols = layout
        .weather
        .iter()
        .map(|&i| float_column(batch, i, base, &headers[i]))
        .collect::<Result<Vec<_>>>()?;
    let wind = string_column(batch, layout.wind_direction)?;
    let stations = string_column(batch, layout.station)?;
    let categories = string_column(batch, layout.category)?;
    let timestamps = timestamp_column(batch, layout.timestamp, base)?;

    for row in 0..batch.num_rows() {
        let row_no = base + row;
        let timestamp = timestamps[row].ok_or_else(|| SchemaError::MissingValue {
            row: row_no,
            column: headers[layout.timestamp].clone(),
        })?;
        let category = parse_category(text_at(&categories, row).unwrap_or(""), row_no)?;

        out.push(Observation {
            pollutants: std::array::from_fn(|i| pollutant_cols[i][row]),
            weather: std::array::from_fn(|i| weather_cols[i][row]),
            wind_direction: optional_text(text_at(&wind, row)),
            station: required_text(text_at(&stations, row), row_no, STATION_COLUMN)?,
            timestamp,
            category,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Int64Array, TimestampMillisecondArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    const HEADER: &str =
        "PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station,timestamp,Category";

    fn write_csv(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("data.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "{HEADER}").unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    fn schema_error(err: &anyhow::Error) -> Option<&SchemaError> {
        err.chain().find_map(|e| e.downcast_ref::<SchemaError>())
    }

    #[test]
    fn loads_csv_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,Aotizhongxin,2013-03-01 00:00:00,Good\n\
             NA,12,,20,500,60,-1.1,1023.2,-18.2,0,N,4.7,Dongsi,2013-03-01 01:00:00,Moderate\n",
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns.pollutants[0], "PM2.5");
        assert_eq!(ds.columns.weather[4], "WSPM");
        assert_eq!(ds.columns.wind_direction, "wd");
        assert_eq!(ds.stations, vec!["Aotizhongxin", "Dongsi"]);

        let first = &ds.observations[0];
        assert_eq!(first.pollutants, [Some(4.0), Some(4.0), Some(4.0), Some(7.0), Some(300.0), Some(77.0)]);
        assert_eq!(first.weather, [Some(-0.7), Some(1023.0), Some(-18.8), Some(0.0), Some(4.4)]);
        assert_eq!(first.wind_direction.as_deref(), Some("NNW"));
        assert_eq!(first.category, AqCategory::Good);

        let second = &ds.observations[1];
        assert_eq!(second.pollutants[0], None);
        assert_eq!(second.pollutants[2], None);
        assert_eq!(second.timestamp.to_string(), "2013-03-01 01:00:00");
    }

    #[test]
    fn missing_wind_direction_cells_are_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "4,4,4,7,300,77,-0.7,1023,-18.8,0,N,4.4,A,2013-03-01 00:00:00,Good\n\
             4,4,4,7,300,77,-0.7,1023,-18.8,0,E,4.4,A,2013-03-01 01:00:00,Good\n\
             4,4,4,7,300,77,-0.7,1023,-18.8,0,,4.4,A,2013-03-01 02:00:00,Good\n\
             4,4,4,7,300,77,-0.7,1023,-18.8,0,NA,4.4,A,2013-03-01 03:00:00,Good\n",
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.observations[2].wind_direction, None);
        assert_eq!(ds.observations[3].wind_direction, None);
        assert_eq!(ds.wind_directions, vec!["N", "E"]);
    }

    #[test]
    fn rejects_unknown_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,Aotizhongxin,2013-03-01 00:00:00,Severe\n",
        );
        let err = load_file(&path).unwrap_err();
        assert_eq!(
            schema_error(&err),
            Some(&SchemaError::UnknownCategory {
                row: 0,
                value: "Severe".to_string()
            })
        );
    }

    #[test]
    fn rejects_bad_number_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,A,2013-03-01 00:00:00,Good\n\
             4,abc,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,A,2013-03-01 00:00:00,Good\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            schema_error(&err),
            Some(SchemaError::InvalidNumber { row: 1, column, .. }) if column == "PM10"
        ));

        let path = write_csv(&dir, "4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,A,yesterday,Good\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            schema_error(&err),
            Some(SchemaError::InvalidTimestamp { row: 0, .. })
        ));
    }

    #[test]
    fn rejects_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.csv");
        std::fs::write(&path, "PM2.5,PM10\n1,2\n").unwrap();
        let err = load_file(&path).unwrap_err();
        assert_eq!(
            schema_error(&err),
            Some(&SchemaError::TooFewColumns { expected: 12, found: 2 })
        );

        let path = dir.path().join("nocat.csv");
        std::fs::write(
            &path,
            "PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station,timestamp,label\n",
        )
        .unwrap();
        let err = load_file(&path).unwrap_err();
        assert_eq!(schema_error(&err), Some(&SchemaError::MissingColumn("Category")));
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_file(Path::new("data.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn timestamp_formats() {
        assert_eq!(parse_timestamp("2014-06-01T13:00:00").unwrap().to_string(), "2014-06-01 13:00:00");
        assert_eq!(parse_timestamp("2014-06-01 13:00").unwrap().to_string(), "2014-06-01 13:00:00");
        assert_eq!(parse_timestamp("2014-06-01").unwrap().to_string(), "2014-06-01 00:00:00");
        assert!(parse_timestamp("06/01/2014").is_none());
    }

    /// Write a two-row Parquet file whose `PM10` and `wd` columns are supplied by the caller.
    fn write_parquet(
        dir: &tempfile::TempDir,
        pm10: (DataType, ArrayRef),
        wd: Vec<Option<&str>>,
    ) -> std::path::PathBuf {
        let names = [
            "PM2.5", "PM10", "SO2", "NO2", "CO", "O3", "TEMP", "PRES", "DEWP", "RAIN",
        ];
        let mut fields: Vec<Field> = names
            .iter()
            .map(|n| Field::new(*n, DataType::Float64, true))
            .collect();
        fields[1] = Field::new("PM10", pm10.0, true);
        fields.push(Field::new("wd", DataType::Utf8, true));
        fields.push(Field::new("WSPM", DataType::Float64, true));
        fields.push(Field::new("station", DataType::Utf8, false));
        fields.push(Field::new(
            "timestamp",
            DataType::Timestamp(TimeUnit::Millisecond, None),
            false,
        ));
        fields.push(Field::new("Category", DataType::Utf8, false));
        let schema = Arc::new(Schema::new(fields));

        let mut columns: Vec<ArrayRef> = Vec::new();
        for i in 0..10 {
            if i == 1 {
                columns.push(pm10.1.clone());
            } else {
                columns.push(Arc::new(Float64Array::from(vec![Some(i as f64), Some(f64::NAN)])));
            }
        }
        columns.push(Arc::new(StringArray::from(wd)));
        columns.push(Arc::new(Float64Array::from(vec![1.5, 2.5])));
        columns.push(Arc::new(StringArray::from(vec!["Dongsi", "Wanliu"])));
        // 2013-03-01 00:00 and 05:00 UTC
        columns.push(Arc::new(TimestampMillisecondArray::from(vec![
            1_362_096_000_000,
            1_362_114_000_000,
        ])));
        columns.push(Arc::new(StringArray::from(vec!["Good", "Hazardous"])));

        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let path = dir.path().join("data.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn loads_parquet_with_mixed_types() {
        let dir = tempfile::tempdir().unwrap();
        let pm10: ArrayRef = Arc::new(Int64Array::from(vec![Some(12), None]));
        let path = write_parquet(&dir, (DataType::Int64, pm10), vec![Some("N"), Some("SE")]);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.observations[0].pollutants[1], Some(12.0));
        assert_eq!(ds.observations[1].pollutants[1], None);
        assert_eq!(ds.observations[1].pollutants[0], None);
        assert_eq!(ds.observations[0].weather[4], Some(1.5));
        assert_eq!(ds.observations[1].timestamp.to_string(), "2013-03-01 05:00:00");
        assert_eq!(ds.observations[1].category, AqCategory::Hazardous);
        assert_eq!(ds.wind_directions, vec!["N".to_string(), "SE".to_string()]);
    }

    #[test]
    fn parquet_text_numbers_are_parsed_strictly() {
        let dir = tempfile::tempdir().unwrap();
        let pm10: ArrayRef = Arc::new(StringArray::from(vec!["12.5", "NA"]));
        let path = write_parquet(&dir, (DataType::Utf8, pm10), vec![Some("N"), Some("SE")]);
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.observations[0].pollutants[1], Some(12.5));
        assert_eq!(ds.observations[1].pollutants[1], None);

        let pm10: ArrayRef = Arc::new(StringArray::from(vec!["12.5", "abc"]));
        let path = write_parquet(&dir, (DataType::Utf8, pm10), vec![Some("N"), Some("SE")]);
        let err = load_file(&path).unwrap_err();
        assert_eq!(
            schema_error(&err),
            Some(&SchemaError::InvalidNumber {
                row: 1,
                column: "PM10".to_string(),
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn parquet_missing_wind_direction_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let pm10: ArrayRef = Arc::new(Int64Array::from(vec![Some(12), Some(14)]));
        let path = write_parquet(&dir, (DataType::Int64, pm10), vec![None, Some("NA")]);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.observations[0].wind_direction, None);
        assert_eq!(ds.observations[1].wind_direction, None);
        assert!(ds.wind_directions.is_empty());
    }
}
