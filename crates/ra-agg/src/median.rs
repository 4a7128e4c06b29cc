//! Streaming median accumulator for integer prices.

/// Collects the non-null prices of one group and answers their lower median.
///
/// The median is exact: prices are buffered and the answer is found by
/// quickselect, O(n) time without a full sort. District groups top out at a
/// few thousand listings, so buffering every price costs less than a sketch
/// and avoids carrying an error bound through the result schema. The lower
/// median (rank `ceil(n/2)`) is reported for even-sized groups, matching the
/// rank semantics of SQL-style `percentile_approx(price, 0.5)`.
#[derive(Debug, Clone, Default)]
pub struct MedianAccumulator {
    prices: Vec<i64>,
}

impl MedianAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, price: i64) {
        self.prices.push(price);
    }

    /// Lower median of everything pushed so far. `None` when empty.
    #[must_use]
    pub fn median(&self) -> Option<i64> {
        if self.prices.is_empty() {
            return None;
        }
        let mut scratch = self.prices.clone();
        let rank = (scratch.len() - 1) / 2;
        let (_, value, _) = scratch.select_nth_unstable(rank);
        Some(*value)
    }

    /// Consume the accumulator and select the median in place.
    #[must_use]
    pub fn into_median(mut self) -> Option<i64> {
        if self.prices.is_empty() {
            return None;
        }
        let rank = (self.prices.len() - 1) / 2;
        let (_, value, _) = self.prices.select_nth_unstable(rank);
        Some(*value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
