use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use parquet::arrow::ArrowWriter;

const POLLUTANTS: [&str; 6] = ["PM2.5", "PM10", "SO2", "NO2", "CO", "O3"];
const WIND: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];
const STATIONS: [(&str, f64); 4] = [
    ("Aotizhongxin", 1.0),
    ("Dongsi", 1.15),
    ("Huairou", 0.7),
    ("Wanshouxigong", 1.05),
];
const MISSING_RATE: f64 = 0.01;

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Category label from the PM2.5 breakpoints of the US AQI.
fn category_for_pm25(pm25: f64) -> &'static str {
    match pm25 {
        v if v <= 12.0 => "Good",
        v if v <= 35.4 => "Moderate",
        v if v <= 55.4 => "Unhealthy for Sensitive Groups",
        v if v <= 150.4 => "Unhealthy",
        v if v <= 250.4 => "Very Unhealthy",
        _ => "Hazardous",
    }
}

/// Column-oriented rows, in the layout the dashboard reads.
#[derive(Default)]
struct Table {
    pollutants: [Vec<Option<f64>>; 6],
    temp: Vec<Option<f64>>,
    pres: Vec<Option<f64>>,
    dewp: Vec<Option<f64>>,
    rain: Vec<Option<f64>>,
    wd: Vec<String>,
    wspm: Vec<Option<f64>>,
    station: Vec<String>,
    timestamp: Vec<NaiveDateTime>,
    category: Vec<String>,
}

impl Table {
    fn len(&self) -> usize {
        self.station.len()
    }
}

/// Round to one decimal, dropping a small share of readings as missing.
fn maybe(rng: &mut SimpleRng, v: f64) -> Option<f64> {
    (rng.next_f64() >= MISSING_RATE).then_some((v * 10.0).round() / 10.0)
}

fn generate(rng: &mut SimpleRng, start: NaiveDateTime, hours: i64) -> Table {
    let mut table = Table::default();
    for &(station, factor) in &STATIONS {
        // Pollution builds up slowly, so carry a per-station level across hours.
        let mut level: f64 = 60.0;
        for h in 0..hours {
            let ts = start + Duration::hours(h);
            let winter = matches!(ts.month(), 11 | 12 | 1 | 2);
            let target = (if winter { 110.0 } else { 55.0 }) * factor;
            level = (level + 0.08 * (target - level) + rng.gauss(0.0, 9.0)).max(2.0);

            let pm25 = level;
            let hour = ts.hour() as f64;
            let temp = (if winter { -2.0 } else { 18.0 })
                + 6.0 * ((hour - 14.0) / 24.0 * std::f64::consts::TAU).cos()
                + rng.gauss(0.0, 1.5);
            let values = [
                pm25,
                pm25 * 1.3 + rng.gauss(10.0, 5.0).abs(),
                (pm25 * 0.15 + rng.gauss(3.0, 2.0)).max(1.0),
                (pm25 * 0.4 + rng.gauss(15.0, 6.0)).max(2.0),
                (pm25 * 12.0 + rng.gauss(300.0, 80.0)).max(100.0),
                (80.0 - pm25 * 0.3 + rng.gauss(0.0, 12.0)).max(1.0),
            ];
            let pres = 1012.0 + rng.gauss(0.0, 6.0);
            let dewp = temp - 8.0 + rng.gauss(0.0, 2.0);
            let rain = if rng.next_f64() < 0.04 { rng.next_f64() * 3.0 } else { 0.0 };
            let wspm = rng.gauss(2.0, 1.0).abs();

            for (col, v) in table.pollutants.iter_mut().zip(values) {
                col.push(maybe(rng, v));
            }
            table.temp.push(maybe(rng, temp));
            table.pres.push(maybe(rng, pres));
            table.dewp.push(maybe(rng, dewp));
            table.rain.push(maybe(rng, rain));
            table.wspm.push(maybe(rng, wspm));
            table.wd.push(WIND[(rng.next_u64() % WIND.len() as u64) as usize].to_string());
            table.station.push(station.to_string());
            table.timestamp.push(ts);
            table.category.push(category_for_pm25(pm25).to_string());
        }
    }
    table
}

fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    let mut header: Vec<&str> = POLLUTANTS.to_vec();
    header.extend(["TEMP", "PRES", "DEWP", "RAIN", "wd", "WSPM", "station", "timestamp", "Category"]);
    writer.write_record(&header)?;

    let cell = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "NA".to_string());
    for i in 0..table.len() {
        let mut row: Vec<String> = table.pollutants.iter().map(|c| cell(c[i])).collect();
        row.extend([
            cell(table.temp[i]),
            cell(table.pres[i]),
            cell(table.dewp[i]),
            cell(table.rain[i]),
            table.wd[i].clone(),
            cell(table.wspm[i]),
            table.station[i].clone(),
            table.timestamp[i].format("%Y-%m-%d %H:%M:%S").to_string(),
            table.category[i].clone(),
        ]);
        writer.write_record(&row)?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(table: &Table, path: &Path) -> Result<()> {
    let float = |name: &str| Field::new(name, DataType::Float64, true);
    let mut fields: Vec<Field> = POLLUTANTS.iter().map(|n| float(n)).collect();
    fields.extend([
        float("TEMP"),
        float("PRES"),
        float("DEWP"),
        float("RAIN"),
        Field::new("wd", DataType::Utf8, false),
        float("WSPM"),
        Field::new("station", DataType::Utf8, false),
        Field::new("timestamp", DataType::Utf8, false),
        Field::new("Category", DataType::Utf8, false),
    ]);
    let schema = Arc::new(Schema::new(fields));

    let floats = |v: &Vec<Option<f64>>| -> ArrayRef { Arc::new(Float64Array::from(v.clone())) };
    let strings = |v: &Vec<String>| -> ArrayRef {
        Arc::new(StringArray::from(v.iter().map(String::as_str).collect::<Vec<_>>()))
    };
    let timestamps: Vec<String> = table
        .timestamp
        .iter()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .collect();

    let mut columns: Vec<ArrayRef> = table.pollutants.iter().map(floats).collect();
    columns.extend([
        floats(&table.temp),
        floats(&table.pres),
        floats(&table.dewp),
        floats(&table.rain),
        strings(&table.wd),
        floats(&table.wspm),
        strings(&table.station),
        strings(&timestamps),
        strings(&table.category),
    ]);

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let start = NaiveDate::from_ymd_opt(2013, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")?;
    // One year of hourly readings per station.
    let hours = 365 * 24;

    let mut rng = SimpleRng::new(42);
    let table = generate(&mut rng, start, hours);

    let csv_path = out_dir.join("combined_air_quality_data.csv");
    write_csv(&table, &csv_path)?;
    let parquet_path = out_dir.join("combined_air_quality_data.parquet");
    write_parquet(&table, &parquet_path)?;

    log::info!("Wrote {} observations", table.len());
    println!(
        "Wrote {} observations from {} stations to {} and {}",
        table.len(),
        STATIONS.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
