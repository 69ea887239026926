mod common;
use common::{fixture, temp_path};
use leadlens::cli::filters::{FilterArgs, SourceArgs, load_filter_file, parse_compare, parse_range};
use leadlens::config::{Config, check};
use leadlens::core::join::JoinMode;
use leadlens::errors::AppError;
use leadlens::models::{CombineMode, CompareOp, Operator, Value};
use std::path::Path;

#[test]
fn test_missing_config_file_gives_defaults() {
    let path = temp_path("cfg_missing", "conf");
    let cfg = Config::load_from(Path::new(&path)).unwrap();

    assert!(cfg.sources.is_empty());
    assert_eq!(cfg.id_column, "masterLeadId");
    assert_eq!(cfg.upload_sheet, "Main");
    assert_eq!(cfg.join_mode, JoinMode::Left);
    assert_eq!(cfg.combine_mode, CombineMode::And);
    assert_eq!(cfg.table_limit, 50);
}

#[test]
fn test_partial_config_fills_defaults() {
    let path = fixture(
        "cfg_partial",
        "conf",
        "sources:\n  - project: Alpha\n    location: https://x.example/a.csv\n    token_env: ALPHA_TOKEN\njoin_mode: inner\n",
    );
    let cfg = Config::load_from(Path::new(&path)).unwrap();

    assert_eq!(cfg.sources.len(), 1);
    assert_eq!(cfg.sources[0].project, "Alpha");
    assert_eq!(cfg.sources[0].token_env.as_deref(), Some("ALPHA_TOKEN"));
    assert_eq!(cfg.join_mode, JoinMode::Inner);
    assert_eq!(cfg.flag_column, "Orange");
    assert_eq!(cfg.flag_fields.len(), 6);
}

#[test]
fn test_invalid_config_is_reported() {
    let path = fixture("cfg_bad", "conf", "join_mode: sideways\n");
    let err = Config::load_from(Path::new(&path)).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn test_save_then_load() {
    let path = temp_path("cfg_save", "conf");
    let mut cfg = Config::default();
    cfg.table_limit = 7;
    cfg.page_columns = vec!["Home Page Time".into()];
    cfg.save_to(Path::new(&path)).unwrap();

    let back = Config::load_from(Path::new(&path)).unwrap();
    assert_eq!(back.table_limit, 7);
    assert_eq!(back.page_columns, vec!["Home Page Time"]);
    assert!(check::missing_keys(Path::new(&path)).unwrap().is_empty());
}

#[test]
fn test_missing_keys_and_fill() {
    let path = fixture("cfg_fill", "conf", "table_limit: 5\nid_column: LeadId\n");

    let missing = check::missing_keys(Path::new(&path)).unwrap();
    assert!(missing.contains(&"sources".to_string()));
    assert!(missing.contains(&"page_suffix".to_string()));
    assert!(!missing.contains(&"table_limit".to_string()));

    let added = check::fill_missing(Path::new(&path)).unwrap();
    assert_eq!(added, missing);
    assert!(check::missing_keys(Path::new(&path)).unwrap().is_empty());

    // user values survive
    let cfg = Config::load_from(Path::new(&path)).unwrap();
    assert_eq!(cfg.table_limit, 5);
    assert_eq!(cfg.id_column, "LeadId");

    assert!(check::fill_missing(Path::new(&path)).unwrap().is_empty());
}

#[test]
fn test_page_columns_by_suffix_or_explicit() {
    let columns: Vec<String> = ["id", "Home Page Time", "Plans Page Time", "Total Click Events"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut cfg = Config::default();
    assert_eq!(cfg.resolve_page_columns(&columns), vec!["Home Page Time", "Plans Page Time"]);

    cfg.page_columns = vec!["Plans Page Time".into(), "Price Page Time".into()];
    assert_eq!(cfg.resolve_page_columns(&columns), vec!["Plans Page Time"]);
}

#[test]
fn test_parse_range() {
    assert_eq!(parse_range("0.5:1.0").unwrap(), (Some(0.5), Some(1.0)));
    assert_eq!(parse_range("60:").unwrap(), (Some(60.0), None));
    assert_eq!(parse_range(":10").unwrap(), (None, Some(10.0)));
    assert!(matches!(parse_range("5"), Err(AppError::InvalidFilter(_))));
    assert!(matches!(parse_range("9:1"), Err(AppError::InvalidFilter(_))));
    assert!(matches!(parse_range("a:1"), Err(AppError::InvalidFilter(_))));
}

#[test]
fn test_parse_compare() {
    let spec = parse_compare("Price Page Time >= 30").unwrap();
    assert_eq!(spec.column, "Price Page Time");
    assert_eq!(
        spec.operator,
        Operator::Compare {
            cmp: CompareOp::Ge,
            threshold: Some(30.0)
        }
    );

    let eq = parse_compare("Score==1").unwrap();
    assert!(matches!(eq.operator, Operator::Compare { cmp: CompareOp::Eq, .. }));

    assert!(parse_compare("Score").is_err());
    assert!(parse_compare("Score>abc").is_err());
}

#[test]
fn test_sidebar_flags_to_filter_set() {
    let cfg = Config::default();
    let args = FilterArgs {
        mode: Some(CombineMode::Or),
        min_call_duration: Some(60.0),
        score_range: Some("0.5:1".into()),
        source: vec!["Ads".into()],
        flagged_only: true,
        flag_field: vec!["Budget=1Cr, 2Cr".into()],
        page: Some("Price".into()),
        page_op: ">=".into(),
        page_seconds: 30.0,
        equals: vec!["Stage=New".into()],
        ..FilterArgs::default()
    };

    let set = args.to_filter_set(&cfg).unwrap();
    assert_eq!(set.mode, CombineMode::Or);
    let columns: Vec<&str> = set.specs.iter().map(|s| s.column.as_str()).collect();
    assert_eq!(
        columns,
        vec!["Call Duration", "Score", "Source", "Orange", "Budget", "Price Page Time", "Stage"]
    );

    let budget = &set.specs[4];
    assert_eq!(budget.gate.as_deref(), Some("Orange"));
    assert_eq!(
        budget.operator,
        Operator::Membership {
            values: vec!["1Cr".into(), "2Cr".into()]
        }
    );
    assert_eq!(
        set.specs[6].operator,
        Operator::Equals {
            value: Some(Value::from("New"))
        }
    );
}

#[test]
fn test_no_flags_means_no_specs() {
    let cfg = Config::default();
    let set = FilterArgs::default().to_filter_set(&cfg).unwrap();
    assert!(set.specs.is_empty());
    assert_eq!(set.mode, cfg.combine_mode);
}

#[test]
fn test_bad_flag_values_are_rejected() {
    let cfg = Config::default();
    let args = FilterArgs {
        range: vec!["no-equals-sign".into()],
        ..FilterArgs::default()
    };
    assert!(matches!(args.to_filter_set(&cfg), Err(AppError::InvalidFilter(_))));

    let args = FilterArgs {
        page: Some("Home".into()),
        page_op: "~".into(),
        ..FilterArgs::default()
    };
    assert!(args.to_filter_set(&cfg).is_err());
}

#[test]
fn test_filter_file_is_appended_after_flags() {
    let path = fixture(
        "filters_file",
        "yaml",
        "mode: or\nspecs:\n  - column: Micro Market\n    op: membership\n    values: [North]\n",
    );
    let loaded = load_filter_file(&path).unwrap();
    assert_eq!(loaded.mode, CombineMode::Or);

    let args = FilterArgs {
        source: vec!["Ads".into()],
        filters_file: Some(path),
        ..FilterArgs::default()
    };
    let set = args.to_filter_set(&Config::default()).unwrap();
    assert_eq!(set.mode, CombineMode::Or);
    assert_eq!(set.specs.len(), 2);
    assert_eq!(set.specs[1].column, "Micro Market");
}

#[test]
fn test_json_filter_file() {
    let path = fixture(
        "filters_json",
        "json",
        r#"{"specs": [{"column": "Score", "op": "range", "min": 0.5, "max": 1.0, "active": false}]}"#,
    );
    let set = load_filter_file(&path).unwrap();
    assert_eq!(set.mode, CombineMode::And);
    assert!(!set.specs[0].active);
}

#[test]
fn test_sheet_overrides_replace_configured_sources() {
    let cfg = Config::default();
    let none = SourceArgs::default();
    assert!(none.resolve(&cfg).unwrap().is_empty());

    let args = SourceArgs {
        sheets: vec!["Alpha=leads/a.csv".into(), "Beta = https://x.example/b.csv".into()],
    };
    let entries = args.resolve(&cfg).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].project, "Beta");
    assert_eq!(entries[1].location, "https://x.example/b.csv");

    let bad = SourceArgs {
        sheets: vec!["=nowhere".into()],
    };
    assert!(bad.resolve(&cfg).is_err());
}
