#![forbid(unsafe_code)]

//! Aggregation engine for the rent-analyse pipeline.
//!
//! Every operation takes an immutable [`Dataset`] and is independently
//! re-runnable. Grouped statistics come out of a single pass that returns one
//! `BTreeMap<district, DistrictStats>`: count, min, max, mean and median live
//! in the same entry, so per-district result columns can never misalign no
//! matter how the caller zips them.

use std::collections::BTreeMap;

use ra_dataset::Dataset;
use ra_types::round2;
use serde::{Deserialize, Serialize};

mod median;

pub use median::MedianAccumulator;

// ── Overall statistics ─────────────────────────────────────────────────

/// Whole-dataset price statistics. All fields are `None` when no row has a
/// non-null price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallRent {
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Mean of non-null prices, rounded to 2 decimals (half-up).
    pub mean: Option<f64>,
}

/// Min/max/mean of `price` over all rows with a non-null price.
#[must_use]
pub fn overall_rent(dataset: &Dataset) -> OverallRent {
    let mut min: Option<i64> = None;
    let mut max: Option<i64> = None;
    // i128: a sum of i64 prices must not wrap, however large the listings.
    let mut sum: i128 = 0;
    let mut n: u64 = 0;

    for price in dataset.prices() {
        min = Some(min.map_or(price, |m| m.min(price)));
        max = Some(max.map_or(price, |m| m.max(price)));
        sum += i128::from(price);
        n += 1;
    }

    OverallRent {
        min,
        max,
        mean: if n == 0 {
            None
        } else {
            Some(round2(sum as f64 / n as f64))
        },
    }
}

// ── Grouped district summary ───────────────────────────────────────────

/// Per-district aggregate results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictStats {
    /// Row count for the district, null-price rows included.
    pub count: u64,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Mean of non-null prices, rounded to 2 decimals (half-up).
    pub mean: Option<f64>,
    /// Lower median of non-null prices (see [`MedianAccumulator`] for the
    /// selection semantics).
    pub median: Option<i64>,
}

#[derive(Debug, Default)]
struct DistrictAccumulator {
    count: u64,
    min: Option<i64>,
    max: Option<i64>,
    sum: i128,
    valid: u64,
    median: MedianAccumulator,
}

impl DistrictAccumulator {
    fn observe(&mut self, price: Option<i64>) {
        self.count += 1;
        let Some(price) = price else { return };
        self.min = Some(self.min.map_or(price, |m| m.min(price)));
        self.max = Some(self.max.map_or(price, |m| m.max(price)));
        self.sum += i128::from(price);
        self.valid += 1;
        self.median.push(price);
    }

    fn finish(self) -> DistrictStats {
        DistrictStats {
            count: self.count,
            min: self.min,
            max: self.max,
            mean: if self.valid == 0 {
                None
            } else {
                Some(round2(self.sum as f64 / self.valid as f64))
            },
            median: self.median.into_median(),
        }
    }
}

/// Group all rows by district and compute count/min/max/mean/median of
/// `price` in one pass.
///
/// The returned map iterates in lexicographic district order — the same order
/// as [`Dataset::areas`] — so every column derived from it is aligned by
/// construction.
#[must_use]
pub fn district_summary(dataset: &Dataset) -> BTreeMap<String, DistrictStats> {
    let mut groups: BTreeMap<String, DistrictAccumulator> = BTreeMap::new();

    for record in dataset.records() {
        groups
            .entry(record.area.clone())
            .or_default()
            .observe(record.price);
    }

    groups
        .into_iter()
        .map(|(area, acc)| (area, acc.finish()))
        .collect()
}

// ── Fixed-bucket histograms ────────────────────────────────────────────

/// A fixed half-open numeric range for histogram classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub label: &'static str,
    /// Inclusive lower bound; `None` means unbounded below.
    pub lo: Option<i64>,
    /// Exclusive upper bound; `None` means unbounded above.
    pub hi: Option<i64>,
}

impl Bucket {
    fn contains(&self, value: i64) -> bool {
        self.lo.map_or(true, |lo| value >= lo) && self.hi.map_or(true, |hi| value < hi)
    }
}

/// Price buckets in fixed output order (currency units).
pub const PRICE_BUCKETS: [Bucket; 6] = [
    Bucket { label: "<500", lo: None, hi: Some(500) },
    Bucket { label: "[500,800)", lo: Some(500), hi: Some(800) },
    Bucket { label: "[800,1200)", lo: Some(800), hi: Some(1200) },
    Bucket { label: "[1200,1500)", lo: Some(1200), hi: Some(1500) },
    Bucket { label: "[1500,2000)", lo: Some(1500), hi: Some(2000) },
    Bucket { label: ">=2000", lo: Some(2000), hi: None },
];

/// Floor-area buckets in fixed output order (square meters).
pub const AREA_BUCKETS: [Bucket; 6] = [
    Bucket { label: "<50", lo: None, hi: Some(50) },
    Bucket { label: "[50,70)", lo: Some(50), hi: Some(70) },
    Bucket { label: "[70,90)", lo: Some(70), hi: Some(90) },
    Bucket { label: "[90,120)", lo: Some(90), hi: Some(120) },
    Bucket { label: "[120,150)", lo: Some(120), hi: Some(150) },
    Bucket { label: ">=150", lo: Some(150), hi: None },
];

/// One histogram cell: `{label, value}` in fixed bucket order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub label: String,
    pub value: u64,
}

fn histogram<I>(buckets: &[Bucket], values: I) -> Vec<BucketCount>
where
    I: Iterator<Item = i64>,
{
    let mut counts = vec![0_u64; buckets.len()];
    for value in values {
        // Buckets are contiguous and half-open, so at most one matches.
        if let Some(slot) = buckets.iter().position(|bucket| bucket.contains(value)) {
            counts[slot] += 1;
        }
    }

    buckets
        .iter()
        .zip(counts)
        .map(|(bucket, value)| BucketCount {
            label: bucket.label.to_owned(),
            value,
        })
        .collect()
}

/// Classify non-null prices into [`PRICE_BUCKETS`]. Null prices fall into no
/// bucket.
#[must_use]
pub fn price_histogram(dataset: &Dataset) -> Vec<BucketCount> {
    histogram(&PRICE_BUCKETS, dataset.prices())
}

/// Classify non-null floor areas into [`AREA_BUCKETS`].
#[must_use]
pub fn buildarea_histogram(dataset: &Dataset) -> Vec<BucketCount> {
    histogram(&AREA_BUCKETS, dataset.buildareas())
}
