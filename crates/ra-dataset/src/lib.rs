#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use ra_types::{RawRow, Record};
use serde::{Deserialize, Serialize};

/// Explicitly scoped accumulator for building a [`Dataset`].
///
/// Rows are coerced as they arrive; malformed numeric fields degrade to
/// `None` and the row is kept. The builder is the only mutable stage of the
/// pipeline — once [`finish`](Self::finish) runs, the dataset is immutable.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    records: Vec<Record>,
}

impl DatasetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, raw: &RawRow) {
        self.records.push(Record::from_raw(raw));
    }

    pub fn push_record(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Seal the builder. The district set is derived here, once, and cached
    /// on the dataset for its lifetime.
    #[must_use]
    pub fn finish(self) -> Dataset {
        let areas: BTreeSet<String> = self
            .records
            .iter()
            .map(|record| record.area.clone())
            .collect();

        Dataset {
            records: self.records,
            areas: areas.into_iter().collect(),
        }
    }
}

/// The canonical in-memory table: an ordered sequence of coerced records plus
/// the cached, deduplicated, lexicographically sorted set of district names.
///
/// Immutable after construction; safe to share across concurrent aggregate
/// computations without locking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Record>,
    areas: Vec<String>,
}

impl Dataset {
    /// Load raw rows into a dataset. Returns the dataset and the row count —
    /// the total number of retained rows, not the count of fully-valid ones.
    pub fn load<I>(rows: I) -> (Self, usize)
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut builder = DatasetBuilder::new();
        for row in rows {
            builder.push(&row);
        }
        let dataset = builder.finish();
        let count = dataset.len();
        (dataset, count)
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All district names, deduplicated and sorted. Every grouped result in
    /// the engine aligns to this ordering.
    #[must_use]
    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    /// Non-null prices in row order.
    pub fn prices(&self) -> impl Iterator<Item = i64> + '_ {
        self.records.iter().filter_map(|record| record.price)
    }

    /// Non-null floor areas in row order.
    pub fn buildareas(&self) -> impl Iterator<Item = i64> + '_ {
        self.records.iter().filter_map(|record| record.buildarea)
    }
}
