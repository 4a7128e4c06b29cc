#![forbid(unsafe_code)]

//! CSV input reading and artifact persistence.
//!
//! Input rows arrive as string fields; coercion is the loader's job, so this
//! crate only validates the input shape (required columns present) and fails
//! fast with a descriptive error when it is not.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use ra_report::{Artifacts, RentalsNum, StatisticalData};
use ra_types::RawRow;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("csv input has no headers")]
    MissingHeaders,
    #[error("csv input is missing required column `{name}`")]
    MissingColumn { name: &'static str },
    #[error(
        "statistical_data column `{column}` has {len} rows but `area` has {expected}"
    )]
    MisalignedColumns {
        column: &'static str,
        len: usize,
        expected: usize,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

const REQUIRED_COLUMNS: [&str; 4] = ["address", "area", "price", "buildarea"];

/// Read raw listing rows from CSV text with a header row.
///
/// The header must name `address`, `area`, `price` and `buildarea`; extra
/// columns are ignored. Field values pass through as strings.
pub fn read_rows_str(input: &str) -> Result<Vec<RawRow>, IoError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(IoError::MissingHeaders);
    }

    let mut positions = [0_usize; 4];
    for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|header| header.trim() == name)
            .ok_or(IoError::MissingColumn { name })?;
    }
    let [address_at, area_at, price_at, buildarea_at] = positions;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |at: usize| record.get(at).unwrap_or_default().to_owned();
        rows.push(RawRow {
            address: field(address_at),
            area: field(area_at),
            price: field(price_at),
            buildarea: field(buildarea_at),
        });
    }
    Ok(rows)
}

/// Read raw listing rows from a CSV file.
pub fn read_rows_path(path: impl AsRef<Path>) -> Result<Vec<RawRow>, IoError> {
    let text = fs::read_to_string(path)?;
    read_rows_str(&text)
}

fn opt_cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(String::new, T::to_string)
}

/// Render the `rentals_num` table as CSV (header `area,counts`).
pub fn rentals_num_csv(table: &RentalsNum) -> Result<String, IoError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(["area", "counts"])?;
    for (area, count) in table.area.iter().zip(&table.counts) {
        let count = count.to_string();
        writer.write_record([area.as_str(), count.as_str()])?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Render the `statistical_data` table as CSV (header
/// `area,min,max,mean,median`). Absent statistics render as empty cells.
///
/// The engine always emits equal-length columns; a hand-built table with
/// unequal columns is rejected rather than silently truncated.
pub fn statistical_data_csv(table: &StatisticalData) -> Result<String, IoError> {
    let expected = table.area.len();
    for (column, len) in [
        ("min", table.min.len()),
        ("max", table.max.len()),
        ("mean", table.mean.len()),
        ("median", table.median.len()),
    ] {
        if len != expected {
            return Err(IoError::MisalignedColumns {
                column,
                len,
                expected,
            });
        }
    }

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(["area", "min", "max", "mean", "median"])?;
    let rows = table
        .area
        .iter()
        .zip(&table.min)
        .zip(&table.max)
        .zip(&table.mean)
        .zip(&table.median);
    for ((((area, min), max), mean), median) in rows {
        writer.write_record([
            area.clone(),
            opt_cell(min),
            opt_cell(max),
            opt_cell(mean),
            opt_cell(median),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Serialize a record-oriented artifact as compact JSON.
pub fn to_json_string<T: serde::Serialize>(value: &T) -> Result<String, IoError> {
    Ok(serde_json::to_string(value)?)
}

/// Write the five artifact files into `dir` (created if absent):
/// `overall_rent.json`, `rentals_num.csv`, `statistical_data.csv`,
/// `rent_counts.json`, `buildarea_counts.json`.
pub fn write_artifacts(dir: impl AsRef<Path>, artifacts: &Artifacts) -> Result<(), IoError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    fs::write(
        dir.join("overall_rent.json"),
        to_json_string(&artifacts.overall_rent)?,
    )?;
    fs::write(
        dir.join("rentals_num.csv"),
        rentals_num_csv(&artifacts.rentals_num)?,
    )?;
    fs::write(
        dir.join("statistical_data.csv"),
        statistical_data_csv(&artifacts.statistical_data)?,
    )?;
    fs::write(
        dir.join("rent_counts.json"),
        to_json_string(&artifacts.rent_counts)?,
    )?;
    fs::write(
        dir.join("buildarea_counts.json"),
        to_json_string(&artifacts.buildarea_counts)?,
    )?;
    Ok(())
}
