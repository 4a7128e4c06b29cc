#![forbid(unsafe_code)]

//! End-to-end pipeline: load dataset → run the four aggregate operations →
//! shape results into the external artifact schemas.

use ra_dataset::Dataset;
use ra_io::IoError;
use ra_report::Artifacts;
use ra_types::RawRow;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Outcome of one pipeline run: the dataset it was computed from plus the
/// shaped artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub row_count: usize,
    pub dataset: Dataset,
    pub artifacts: Artifacts,
}

/// Run the aggregation pipeline over already-parsed raw rows.
///
/// Deterministic: identical input rows yield identical artifacts.
#[must_use]
pub fn run_rows(rows: Vec<RawRow>) -> PipelineRun {
    let (dataset, row_count) = Dataset::load(rows);

    let summary = ra_agg::district_summary(&dataset);
    let artifacts = Artifacts {
        overall_rent: ra_report::overall_entries(&ra_agg::overall_rent(&dataset)),
        rentals_num: ra_report::rentals_num(&summary),
        statistical_data: ra_report::statistical_data(&summary),
        rent_counts: ra_agg::price_histogram(&dataset),
        buildarea_counts: ra_agg::buildarea_histogram(&dataset),
    };

    PipelineRun {
        row_count,
        dataset,
        artifacts,
    }
}

/// Run the full pipeline over CSV text (header row required).
pub fn run_csv(input: &str) -> Result<PipelineRun, PipelineError> {
    Ok(run_rows(ra_io::read_rows_str(input)?))
}
