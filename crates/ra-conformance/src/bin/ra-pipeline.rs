#![forbid(unsafe_code)]

//! CLI runner: read a listings CSV, run the aggregation pipeline, write the
//! artifact files.
//!
//! Usage: `ra-pipeline --input data/rent.csv [--out-dir data]`

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("ra-pipeline error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut input: Option<PathBuf> = None;
    let mut out_dir = PathBuf::from("data");

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => {
                let value = args.next().ok_or("--input requires a csv path")?;
                input = Some(PathBuf::from(value));
            }
            "--out-dir" => {
                let value = args.next().ok_or("--out-dir requires a directory")?;
                out_dir = PathBuf::from(value);
            }
            "--help" | "-h" => {
                println!("usage: ra-pipeline --input <csv> [--out-dir <dir>]");
                return Ok(());
            }
            other => return Err(format!("unrecognized argument: {other}").into()),
        }
    }

    let input = input.ok_or("--input is required")?;
    let rows = ra_io::read_rows_path(&input)?;
    let run = ra_conformance::run_rows(rows);

    println!(
        "loaded {} rows across {} districts from {}",
        run.row_count,
        run.dataset.areas().len(),
        input.display()
    );

    ra_io::write_artifacts(&out_dir, &run.artifacts)?;
    for name in [
        "overall_rent.json",
        "rentals_num.csv",
        "statistical_data.csv",
        "rent_counts.json",
        "buildarea_counts.json",
    ] {
        println!("wrote {}", out_dir.join(name).display());
    }

    Ok(())
}
