#![forbid(unsafe_code)]

//! End-to-end scenarios over the full pipeline: CSV input → four aggregate
//! operations → shaped artifacts → rendered files.

use ra_conformance::{run_csv, run_rows};
use ra_report::{StatKind, StatValue};
use ra_types::RawRow;

const TWO_DISTRICT_FIXTURE: &str = "\
address,area,price,buildarea
a1,A,500,
a2,A,1500,
a3,A,,
b1,B,2000,
";

#[test]
fn worked_example_three_rows_district_a_one_row_district_b() {
    let run = run_csv(TWO_DISTRICT_FIXTURE).expect("pipeline");
    assert_eq!(run.row_count, 4);

    let rentals = &run.artifacts.rentals_num;
    assert_eq!(rentals.area, ["A", "B"]);
    assert_eq!(rentals.counts, [3, 1]);

    let overall = &run.artifacts.overall_rent;
    assert_eq!(overall[0].data_type, StatKind::Max);
    assert_eq!(overall[0].value, Some(StatValue::Int(2000)));
    assert_eq!(overall[1].value, Some(StatValue::Float(1333.33)));
    assert_eq!(overall[2].value, Some(StatValue::Int(500)));

    let by_label = |label: &str| {
        run.artifacts
            .rent_counts
            .iter()
            .find(|b| b.label == label)
            .expect("bucket present")
            .value
    };
    assert_eq!(by_label("<500"), 0);
    assert_eq!(by_label("[500,800)"), 1);
    assert_eq!(by_label("[800,1200)"), 0);
    assert_eq!(by_label("[1200,1500)"), 0);
    assert_eq!(by_label("[1500,2000)"), 1);
    assert_eq!(by_label(">=2000"), 1);

    let stats = &run.artifacts.statistical_data;
    assert_eq!(stats.area, ["A", "B"]);
    assert_eq!(stats.mean, [Some(1000.0), Some(2000.0)]);
    assert_eq!(stats.min, [Some(500), Some(2000)]);
    assert_eq!(stats.max, [Some(1500), Some(2000)]);
}

#[test]
fn overall_rent_json_golden() {
    let run = run_csv(TWO_DISTRICT_FIXTURE).expect("pipeline");
    let json = ra_io::to_json_string(&run.artifacts.overall_rent).expect("json");
    assert_eq!(
        json,
        r#"[{"data_type":"max","value":2000},{"data_type":"avg","value":1333.33},{"data_type":"min","value":500}]"#
    );
}

#[test]
fn rentals_num_csv_golden() {
    let run = run_csv(TWO_DISTRICT_FIXTURE).expect("pipeline");
    let csv = ra_io::rentals_num_csv(&run.artifacts.rentals_num).expect("csv");
    assert_eq!(csv, "area,counts\nA,3\nB,1\n");
}

#[test]
fn statistical_data_columns_stay_aligned_for_every_index() {
    let rows = vec![
        RawRow::new("x", "Yufeng", "900", "70"),
        RawRow::new("x", "Chengzhong", "800", "60"),
        RawRow::new("x", "Yufeng", "", "75"),
        RawRow::new("x", "Liubei", "700", "50"),
        RawRow::new("x", "Chengzhong", "1200", ""),
    ];
    let run = run_rows(rows);
    let stats = &run.artifacts.statistical_data;

    assert_eq!(stats.area.len(), stats.min.len());
    assert_eq!(stats.area.len(), stats.max.len());
    assert_eq!(stats.area.len(), stats.mean.len());
    assert_eq!(stats.area.len(), stats.median.len());

    // Chengzhong is index 0 after the lexicographic sort; its stats must all
    // describe Chengzhong, not whichever district was seen first.
    assert_eq!(stats.area[0], "Chengzhong");
    assert_eq!(stats.min[0], Some(800));
    assert_eq!(stats.max[0], Some(1200));
    assert_eq!(stats.mean[0], Some(1000.0));
}

#[test]
fn counts_sum_to_row_count_with_malformed_fields() {
    let input = "\
address,area,price,buildarea
a,Chengzhong,900,70
b,Yufeng,面议,55
c,Chengzhong,,\u{20}
d,Liubei,1500.0,90
";
    let run = run_csv(input).expect("pipeline");
    let total: u64 = run.artifacts.rentals_num.counts.iter().sum();
    assert_eq!(total as usize, run.row_count);
    assert_eq!(run.row_count, 4);
}

#[test]
fn empty_input_produces_well_defined_empty_artifacts() {
    let run = run_csv("address,area,price,buildarea\n").expect("pipeline");
    assert_eq!(run.row_count, 0);
    assert!(run.artifacts.rentals_num.area.is_empty());
    assert!(run.artifacts.statistical_data.area.is_empty());
    for entry in &run.artifacts.overall_rent {
        assert_eq!(entry.value, None);
    }
    // Histograms keep their fixed six buckets, all zero.
    assert_eq!(run.artifacts.rent_counts.len(), 6);
    assert!(run.artifacts.rent_counts.iter().all(|b| b.value == 0));
}

#[test]
fn pipeline_is_idempotent_to_the_byte() {
    let first = run_csv(TWO_DISTRICT_FIXTURE).expect("first run");
    let second = run_csv(TWO_DISTRICT_FIXTURE).expect("second run");
    assert_eq!(first.artifacts, second.artifacts);

    let render = |run: &ra_conformance::PipelineRun| -> (String, String, String, String, String) {
        (
            ra_io::to_json_string(&run.artifacts.overall_rent).expect("json"),
            ra_io::rentals_num_csv(&run.artifacts.rentals_num).expect("csv"),
            ra_io::statistical_data_csv(&run.artifacts.statistical_data).expect("csv"),
            ra_io::to_json_string(&run.artifacts.rent_counts).expect("json"),
            ra_io::to_json_string(&run.artifacts.buildarea_counts).expect("json"),
        )
    };
    assert_eq!(render(&first), render(&second));
}

#[test]
fn artifact_files_round_trip_through_disk() {
    let run = run_csv(TWO_DISTRICT_FIXTURE).expect("pipeline");
    let dir = std::env::temp_dir().join(format!("ra-e2e-{}", std::process::id()));
    ra_io::write_artifacts(&dir, &run.artifacts).expect("write");

    let overall = std::fs::read_to_string(dir.join("overall_rent.json")).expect("read");
    let parsed: Vec<ra_report::OverallEntry> =
        serde_json::from_str(&overall).expect("parse back");
    assert_eq!(parsed, run.artifacts.overall_rent);

    let rentals = std::fs::read_to_string(dir.join("rentals_num.csv")).expect("read");
    assert!(rentals.starts_with("area,counts\n"));

    std::fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn single_district_dataset_is_not_an_edge_case() {
    let run = run_csv("address,area,price,buildarea\na,Solo,800,66\nb,Solo,1000,72\n")
        .expect("pipeline");
    assert_eq!(run.artifacts.rentals_num.area, ["Solo"]);
    assert_eq!(run.artifacts.statistical_data.mean, [Some(900.0)]);
    assert_eq!(run.artifacts.statistical_data.median, [Some(800)]);
}
