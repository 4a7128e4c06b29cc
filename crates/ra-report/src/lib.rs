#![forbid(unsafe_code)]

//! Result formatter: shapes engine outputs into the external result schemas.
//!
//! Pure data-shaping — no computation. Numeric precision and array alignment
//! come straight from the engine; record-oriented shapes go to JSON sinks,
//! column-oriented shapes go to CSV sinks.

use std::collections::BTreeMap;

use ra_agg::{BucketCount, DistrictStats, OverallRent};
use serde::{Deserialize, Serialize};

/// Label for one overall-statistics entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Max,
    Avg,
    Min,
}

/// A statistic value that keeps integer-valued entries as JSON integers and
/// the mean as a float. Absent statistics serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
}

/// One row of the `overall_rent` artifact: `{data_type, value}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallEntry {
    pub data_type: StatKind,
    pub value: Option<StatValue>,
}

/// Shape [`OverallRent`] into the record-oriented `overall_rent` schema, in
/// fixed order `max, avg, min`.
#[must_use]
pub fn overall_entries(overall: &OverallRent) -> Vec<OverallEntry> {
    vec![
        OverallEntry {
            data_type: StatKind::Max,
            value: overall.max.map(StatValue::Int),
        },
        OverallEntry {
            data_type: StatKind::Avg,
            value: overall.mean.map(StatValue::Float),
        },
        OverallEntry {
            data_type: StatKind::Min,
            value: overall.min.map(StatValue::Int),
        },
    ]
}

/// Column-oriented `rentals_num` table: district names and parallel row
/// counts, aligned by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalsNum {
    pub area: Vec<String>,
    pub counts: Vec<u64>,
}

/// Shape the grouped summary into the `rentals_num` schema. The map already
/// iterates in canonical district order, so the columns align by
/// construction.
#[must_use]
pub fn rentals_num(summary: &BTreeMap<String, DistrictStats>) -> RentalsNum {
    RentalsNum {
        area: summary.keys().cloned().collect(),
        counts: summary.values().map(|stats| stats.count).collect(),
    }
}

/// Column-oriented `statistical_data` table: five parallel columns aligned by
/// index to `area`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalData {
    pub area: Vec<String>,
    pub min: Vec<Option<i64>>,
    pub max: Vec<Option<i64>>,
    pub mean: Vec<Option<f64>>,
    pub median: Vec<Option<i64>>,
}

/// Shape the grouped summary into the `statistical_data` schema.
#[must_use]
pub fn statistical_data(summary: &BTreeMap<String, DistrictStats>) -> StatisticalData {
    StatisticalData {
        area: summary.keys().cloned().collect(),
        min: summary.values().map(|stats| stats.min).collect(),
        max: summary.values().map(|stats| stats.max).collect(),
        mean: summary.values().map(|stats| stats.mean).collect(),
        median: summary.values().map(|stats| stats.median).collect(),
    }
}

/// The four named outputs of one pipeline run, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifacts {
    pub overall_rent: Vec<OverallEntry>,
    pub rentals_num: RentalsNum,
    pub statistical_data: StatisticalData,
    pub rent_counts: Vec<BucketCount>,
    pub buildarea_counts: Vec<BucketCount>,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use ra_agg::{DistrictStats, OverallRent};

    use super::{overall_entries, rentals_num, statistical_data, StatKind, StatValue};

    fn summary() -> BTreeMap<String, DistrictStats> {
        let mut map = BTreeMap::new();
        map.insert(
            "A".to_owned(),
            DistrictStats {
                count: 3,
                min: Some(500),
                max: Some(1500),
                mean: Some(1000.0),
                median: Some(1500),
            },
        );
        map.insert(
            "B".to_owned(),
            DistrictStats {
                count: 1,
                min: Some(2000),
                max: Some(2000),
                mean: Some(2000.0),
                median: Some(2000),
            },
        );
        map
    }

    #[test]
    fn overall_entries_fixed_order_and_json_shape() {
        let entries = overall_entries(&OverallRent {
            min: Some(500),
            max: Some(2000),
            mean: Some(1333.33),
        });
        assert_eq!(entries[0].data_type, StatKind::Max);
        assert_eq!(entries[1].data_type, StatKind::Avg);
        assert_eq!(entries[2].data_type, StatKind::Min);

        let json = serde_json::to_string(&entries).expect("serialize");
        assert_eq!(
            json,
            r#"[{"data_type":"max","value":2000},{"data_type":"avg","value":1333.33},{"data_type":"min","value":500}]"#
        );
    }

    #[test]
    fn overall_entries_absent_values_serialize_as_null() {
        let entries = overall_entries(&OverallRent {
            min: None,
            max: None,
            mean: None,
        });
        let json = serde_json::to_string(&entries).expect("serialize");
        assert!(json.contains(r#"{"data_type":"max","value":null}"#));
    }

    #[test]
    fn rentals_num_columns_align() {
        let table = rentals_num(&summary());
        assert_eq!(table.area, ["A", "B"]);
        assert_eq!(table.counts, [3, 1]);
    }

    #[test]
    fn statistical_data_columns_align() {
        let table = statistical_data(&summary());
        assert_eq!(table.area.len(), table.min.len());
        assert_eq!(table.area.len(), table.max.len());
        assert_eq!(table.area.len(), table.mean.len());
        assert_eq!(table.area.len(), table.median.len());
        assert_eq!(table.area, ["A", "B"]);
        assert_eq!(table.min, [Some(500), Some(2000)]);
        assert_eq!(table.median, [Some(1500), Some(2000)]);
    }

    #[test]
    fn statistical_data_empty_summary_yields_empty_columns() {
        let table = statistical_data(&BTreeMap::new());
        assert!(table.area.is_empty());
        assert!(table.median.is_empty());
    }

    #[test]
    fn stat_value_roundtrips_through_json() {
        let int: StatValue = serde_json::from_str("2000").expect("int");
        assert_eq!(int, StatValue::Int(2000));
        let float: StatValue = serde_json::from_str("1333.33").expect("float");
        assert_eq!(float, StatValue::Float(1333.33));
    }
}
