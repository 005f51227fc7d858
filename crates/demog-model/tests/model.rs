//! Model-level tests: config file loading and value-list behavior.

use demog_model::{CleaningConfig, ValueCode, ValueList};

#[test]
fn config_loads_overrides_from_json_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cleaning.json");
    std::fs::write(
        &path,
        r#"{
            "high_null_columns": ["A", "B"],
            "one_hot_columns": []
        }"#,
    )
    .expect("write config");

    let config = CleaningConfig::from_json_file(&path).expect("load config");
    assert_eq!(config.high_null_columns, vec!["A", "B"]);
    assert!(config.one_hot_columns.is_empty());
    assert_eq!(config.id_column, "LNR");
}

#[test]
fn config_load_reports_malformed_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").expect("write config");
    let error = CleaningConfig::from_json_file(&path).expect_err("must fail");
    assert!(error.to_string().contains("config parse error"));
}

#[test]
fn bracketed_round_trip_preserves_mixed_lists() {
    let list = ValueList(vec![
        ValueCode::Code(-1),
        ValueCode::Code(0),
        ValueCode::Text("X".to_string()),
    ]);
    let rendered = list.to_bracketed();
    assert_eq!(rendered, "[-1, 0, X]");
    assert_eq!(ValueList::from_bracketed(&rendered), Some(list));
}
