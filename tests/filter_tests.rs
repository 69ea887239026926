mod common;
use common::table;
use leadlens::core::filter::{apply_filters, apply_filters_with_report};
use leadlens::errors::AppError;
use leadlens::models::{CombineMode, CompareOp, FilterSet, FilterSpec, Operator, Table};

fn leads() -> Table {
    table(
        &["id", "Call Duration", "Score", "Source", "Orange", "Budget", "Home Page Time"],
        &[
            &["1", "120", "0.8", "Ads", "true", "1Cr", "30"],
            &["2", "30", "0.9", "Organic", "false", "", "0"],
            &["3", "700", "0.2", "Ads", "true", "", "45"],
            &["4", "", "0.6", "Referral", "true", "2Cr", ""],
        ],
    )
}

fn ids(t: &Table) -> Vec<String> {
    (0..t.len()).map(|i| t.cell(i, "id").to_string()).collect()
}

#[test]
fn test_two_ranges_and_select_single_row() {
    let rows = table(
        &["id", "call_duration", "score"],
        &[&["1", "120", "0.7"], &["2", "30", "0.9"], &["3", "500", "0.1"]],
    );
    let set = FilterSet::new(CombineMode::And)
        .with(FilterSpec::range("call_duration", 60.0, 1000.0))
        .with(FilterSpec::range("score", 0.5, 1.0));

    let out = apply_filters(&rows, &set);
    assert_eq!(out.len(), 1);
    assert_eq!(ids(&out), vec!["1"]);
}

#[test]
fn test_range_is_inclusive_on_both_ends() {
    let set = FilterSet::new(CombineMode::And).with(FilterSpec::range("Call Duration", 30.0, 120.0));
    assert_eq!(ids(&apply_filters(&leads(), &set)), vec!["1", "2"]);
}

#[test]
fn test_and_filters_are_idempotent() {
    let set = FilterSet::new(CombineMode::And)
        .with(FilterSpec::membership("Source", vec!["Ads", "Referral"]))
        .with(FilterSpec::at_least("Score", 0.5));

    let once = apply_filters(&leads(), &set);
    let twice = apply_filters(&once, &set);
    assert_eq!(ids(&once), ids(&twice));
    assert_eq!(ids(&once), vec!["1", "4"]);
}

#[test]
fn test_or_result_contains_each_single_spec_result() {
    let specs = vec![
        FilterSpec::membership("Source", vec!["Organic"]),
        FilterSpec::compare("Home Page Time", CompareOp::Gt, 40.0),
        FilterSpec::membership("Budget", vec!["2Cr"]).gated_by("Orange"),
    ];
    let mut or_set = FilterSet::new(CombineMode::Or);
    for s in &specs {
        or_set.push(s.clone());
    }
    let union = ids(&apply_filters(&leads(), &or_set));

    for s in specs {
        let single = FilterSet::new(CombineMode::And).with(s);
        for id in ids(&apply_filters(&leads(), &single)) {
            assert!(union.contains(&id), "row {id} missing from OR result");
        }
    }
}

#[test]
fn test_or_dedups_identical_rows() {
    let rows = table(
        &["id", "Source"],
        &[&["1", "Ads"], &["1", "Ads"], &["2", "Organic"], &["3", "Referral"]],
    );
    let set = FilterSet::new(CombineMode::Or)
        .with(FilterSpec::membership("Source", vec!["Ads"]))
        .with(FilterSpec::membership("id", vec!["1", "2"]));

    let out = apply_filters(&rows, &set);
    assert_eq!(ids(&out), vec!["1", "2"]);
}

#[test]
fn test_gated_spec_only_applies_to_flagged_rows() {
    let set = FilterSet::new(CombineMode::And)
        .with(FilterSpec::membership("Budget", vec!["1Cr"]).gated_by("Orange"));

    // 1 flagged & matching, 2 not flagged (passes), 3 flagged with empty budget (excluded),
    // 4 flagged with other budget (excluded)
    assert_eq!(ids(&apply_filters(&leads(), &set)), vec!["1", "2"]);
}

#[test]
fn test_or_gated_spec_does_not_admit_unflagged_rows() {
    let rows = table(
        &["id", "Source", "Orange", "Budget"],
        &[
            &["1", "Ads", "false", ""],
            &["2", "Organic", "false", ""],
            &["3", "Ads", "true", "2Cr"],
            &["4", "Ads", "true", "1Cr"],
        ],
    );
    let set = FilterSet::new(CombineMode::Or)
        .with(FilterSpec::membership("Source", vec!["Organic"]))
        .with(FilterSpec::membership("Budget", vec!["2Cr"]).gated_by("Orange"));

    assert_eq!(ids(&apply_filters(&rows, &set)), vec!["2", "3"]);
}

#[test]
fn test_or_with_only_gated_specs_keeps_unflagged_rows() {
    let set = FilterSet::new(CombineMode::Or)
        .with(FilterSpec::membership("Budget", vec!["2Cr"]).gated_by("Orange"));

    // 2 has no applicable spec; among flagged rows only 4 matches
    assert_eq!(ids(&apply_filters(&leads(), &set)), vec!["2", "4"]);
}

#[test]
fn test_membership_matches_numeric_cells_by_value() {
    let rows = table(
        &["id", "Tier"],
        &[&["1", "1.5"], &["2", "1"], &["3", "2"], &["4", "Gold"]],
    );
    let set = FilterSet::new(CombineMode::And)
        .with(FilterSpec::membership("Tier", vec!["1.50", "01", "Gold"]));

    assert_eq!(ids(&apply_filters(&rows, &set)), vec!["1", "2", "4"]);
}

#[test]
fn test_flagged_only_equality() {
    let set = FilterSet::new(CombineMode::And).with(FilterSpec::equals("Orange", true));
    assert_eq!(ids(&apply_filters(&leads(), &set)), vec!["1", "3", "4"]);
}

#[test]
fn test_compare_operators_on_page_time() {
    let cases = [
        (CompareOp::Gt, 30.0, vec!["3"]),
        (CompareOp::Ge, 30.0, vec!["1", "3"]),
        (CompareOp::Eq, 0.0, vec!["2"]),
        (CompareOp::Lt, 30.0, vec!["2"]),
        (CompareOp::Le, 30.0, vec!["1", "2"]),
    ];
    for (op, threshold, expected) in cases {
        let set = FilterSet::new(CombineMode::And)
            .with(FilterSpec::compare("Home Page Time", op, threshold));
        assert_eq!(ids(&apply_filters(&leads(), &set)), expected, "op {}", op.symbol());
    }
}

#[test]
fn test_inert_and_inactive_specs_do_nothing() {
    let set = FilterSet::new(CombineMode::And)
        .with(FilterSpec::membership("Source", Vec::<String>::new()))
        .with(FilterSpec::new("Score", Operator::Range { min: None, max: None }))
        .with(FilterSpec::range("Score", 0.0, 0.1).inactive());

    let out = apply_filters_with_report(&leads(), &set);
    assert_eq!(out.table.len(), 4);
    assert!(out.applied.is_empty());
    assert!(out.skipped.is_empty());
}

#[test]
fn test_unknown_column_is_skipped_and_reported() {
    let set = FilterSet::new(CombineMode::And)
        .with(FilterSpec::membership("Micro Market", vec!["North"]))
        .with(FilterSpec::membership("Source", vec!["Ads"]));

    let out = apply_filters_with_report(&leads(), &set);
    assert_eq!(ids(&out.table), vec!["1", "3"]);
    assert_eq!(out.skipped.len(), 1);
    assert!(matches!(&out.skipped[0], AppError::FilterColumnMissing(c) if c == "Micro Market"));
}

#[test]
fn test_missing_values_fail_active_numeric_specs() {
    let set = FilterSet::new(CombineMode::And).with(FilterSpec::at_least("Call Duration", 0.0));
    assert_eq!(ids(&apply_filters(&leads(), &set)), vec!["1", "2", "3"]);
}

#[test]
fn test_filter_set_from_yaml() {
    let yaml = r#"
mode: or
specs:
  - column: Source
    op: membership
    values: [Referral]
  - column: Call Duration
    op: range
    min: 600
  - column: Home Page Time
    op: compare
    cmp: ">="
    threshold: 45
"#;
    let set: FilterSet = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(set.mode, CombineMode::Or);
    assert_eq!(set.specs.len(), 3);
    assert!(set.specs.iter().all(|s| s.active));
    assert_eq!(ids(&apply_filters(&leads(), &set)), vec!["3", "4"]);
}
