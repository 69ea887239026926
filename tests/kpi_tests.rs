mod common;
use chrono::{TimeZone, Utc};
use common::{num, table};
use leadlens::core::kpi::{self, KpiDeriver, lead_score};
use leadlens::core::summary::summarize;
use leadlens::models::{IntentTag, Table, Value};

fn pages() -> Vec<String> {
    vec!["Home Page Time".into(), "Plans Page Time".into(), "Price Page Time".into()]
}

fn deriver() -> KpiDeriver {
    KpiDeriver::new(pages(), "Last_Visit_Timestamp")
        .at(Utc.with_ymd_and_hms(2025, 10, 11, 12, 0, 0).unwrap())
}

fn sample() -> Table {
    table(
        &[
            "id",
            "Home Page Time",
            "Plans Page Time",
            "Price Page Time",
            "Total Click Events",
            "Call Duration",
            "Last_Visit_Timestamp",
        ],
        &[
            &["1", "10", "4", "7", "2", "120", "2025-10-01 10:00:00"],
            &["2", "0", "", "0", "", "", ""],
            &["3", "300", "200", "100", "250", "900", "2025-10-12 09:00:00"],
        ],
    )
}

#[test]
fn test_weighted_score_and_warm_tag() {
    let s = lead_score(3, 2.0, 120.0);
    assert!((s - 26.0).abs() < 1e-9);
    assert_eq!(IntentTag::from_score(s), Some(IntentTag::Warm));
}

#[test]
fn test_intent_bucket_boundaries() {
    assert_eq!(IntentTag::from_score(-1.0), None);
    assert_eq!(IntentTag::from_score(f64::NAN), None);
    assert_eq!(IntentTag::from_score(-0.5), Some(IntentTag::Cold));
    assert_eq!(IntentTag::from_score(0.0), Some(IntentTag::Cold));
    assert_eq!(IntentTag::from_score(10.0), Some(IntentTag::Cold));
    assert_eq!(IntentTag::from_score(10.0001), Some(IntentTag::Warm));
    assert_eq!(IntentTag::from_score(50.0), Some(IntentTag::Warm));
    assert_eq!(IntentTag::from_score(100.0), Some(IntentTag::Hot));
    assert_eq!(IntentTag::from_score(100.5), Some(IntentTag::VeryHot));
}

#[test]
fn test_intent_is_monotone_in_score() {
    let mut last = IntentTag::Cold;
    let mut s = -0.9;
    while s < 250.0 {
        let tag = IntentTag::from_score(s).unwrap();
        assert!(tag.ordinal() >= last.ordinal(), "score {s} dropped to {tag}");
        last = tag;
        s += 0.7;
    }
    assert_eq!(last, IntentTag::VeryHot);
}

#[test]
fn test_derived_columns_appended_after_inputs() {
    let input = sample();
    let out = deriver().derive(&input);

    assert_eq!(&out.columns[..input.columns.len()], &input.columns[..]);
    assert_eq!(
        &out.columns[input.columns.len()..],
        &[kpi::PAGE_DEPTH, kpi::TOTAL_TIME, kpi::RECENCY_DAYS, kpi::LEAD_SCORE, kpi::INTENT]
    );
    assert_eq!(out.len(), input.len());
}

#[test]
fn test_page_depth_and_total_time() {
    let out = deriver().derive(&sample());

    assert_eq!(num(out.cell(0, kpi::PAGE_DEPTH)), 3.0);
    assert_eq!(num(out.cell(0, kpi::TOTAL_TIME)), 21.0);

    // zeros and blanks count neither towards depth nor time
    assert_eq!(num(out.cell(1, kpi::PAGE_DEPTH)), 0.0);
    assert_eq!(num(out.cell(1, kpi::TOTAL_TIME)), 0.0);

    for i in 0..out.len() {
        let depth = num(out.cell(i, kpi::PAGE_DEPTH));
        assert!((0.0..=pages().len() as f64).contains(&depth));
        assert!(num(out.cell(i, kpi::TOTAL_TIME)) >= 0.0);
    }
}

#[test]
fn test_score_and_intent_per_row() {
    let out = deriver().derive(&sample());

    // 0.4*3 + 0.4*2 + 0.2*120
    assert!((num(out.cell(0, kpi::LEAD_SCORE)) - 26.0).abs() < 1e-9);
    assert_eq!(out.cell(0, kpi::INTENT), &Value::from("Warm"));

    // missing clicks / call duration count as zero
    assert_eq!(num(out.cell(1, kpi::LEAD_SCORE)), 0.0);
    assert_eq!(out.cell(1, kpi::INTENT), &Value::from("Cold"));

    assert_eq!(out.cell(2, kpi::INTENT), &Value::from("Very Hot"));
}

#[test]
fn test_recency_days_relative_to_now() {
    let out = deriver().derive(&sample());

    // 10 days and 2 hours ago → 10
    assert_eq!(num(out.cell(0, kpi::RECENCY_DAYS)), 10.0);
    assert!(out.cell(1, kpi::RECENCY_DAYS).is_missing());
    // visit after `now` clamps to zero
    assert_eq!(num(out.cell(2, kpi::RECENCY_DAYS)), 0.0);
}

#[test]
fn test_unparsable_timestamp_leaves_recency_missing() {
    let t = table(
        &["id", "Last_Visit_Timestamp"],
        &[&["1", "not a date"], &["2", "2025-13-45 10:00:00"], &["3", "45931.5"]],
    );
    let out = deriver().derive(&t);

    assert!(out.cell(0, kpi::RECENCY_DAYS).is_missing());
    assert!(out.cell(1, kpi::RECENCY_DAYS).is_missing());
    // Excel serial for 2025-10-01 12:00
    assert_eq!(num(out.cell(2, kpi::RECENCY_DAYS)), 10.0);
}

#[test]
fn test_without_page_columns_depth_is_zero() {
    let t = table(&["id", "Call Duration"], &[&["1", "60"]]);
    let out = kpi::derive(&t, &[], "Last_Visit_Timestamp");

    assert_eq!(num(out.cell(0, kpi::PAGE_DEPTH)), 0.0);
    assert_eq!(num(out.cell(0, kpi::LEAD_SCORE)), 12.0);
    assert!(out.cell(0, kpi::RECENCY_DAYS).is_missing());
}

#[test]
fn test_rederive_overwrites_kpi_columns() {
    let d = deriver();
    let once = d.derive(&sample());
    let twice = d.derive(&once);

    assert_eq!(once.columns, twice.columns);
    assert_eq!(once.to_string_rows(), twice.to_string_rows());
}

#[test]
fn test_summary_over_derived_rows() {
    let mut t = sample();
    t.fill_column("Project", Value::from("Alpha"));
    t.fill_column("Source", Value::from("Ads"));
    let out = deriver().derive(&t);

    let s = summarize(&out, "Last_Visit_Timestamp", "Project", "Source");
    assert_eq!(s.leads, 3);
    assert_eq!(s.avg_page_depth, Some(2.0));
    assert_eq!(s.leads_by_project.get("Alpha"), Some(&3));
    assert_eq!(s.most_recent_visit_label(), "2025-10-12");

    let counts: Vec<usize> = s.intent_distribution.iter().map(|(_, n)| *n).collect();
    assert_eq!(counts, vec![1, 1, 0, 1]);
}

#[test]
fn test_summary_of_empty_table() {
    let out = deriver().derive(&table(&["id", "Home Page Time"], &[]));
    let s = summarize(&out, "Last_Visit_Timestamp", "Project", "Source");

    assert_eq!(s.leads, 0);
    assert_eq!(s.avg_lead_score, None);
    assert_eq!(s.most_recent_visit_label(), "NA");
    assert!(s.leads_by_project.is_empty());
    assert_eq!(s.intent_distribution.len(), 4);
}
