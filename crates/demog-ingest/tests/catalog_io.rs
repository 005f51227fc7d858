//! Catalog CSV round-trip tests.

use demog_ingest::{read_catalog, write_catalog};
use demog_model::{CatalogRow, ValueCode, ValueList};

fn sample_rows() -> Vec<CatalogRow> {
    vec![
        CatalogRow {
            info_level: Some("Person".to_string()),
            attribute: "AGER_TYP".to_string(),
            values: Some(ValueList(vec![ValueCode::Code(-1), ValueCode::Code(0)])),
            meaning: Some("unknown".to_string()),
            description: Some("best-ager typology".to_string()),
            additional_notes: None,
        },
        CatalogRow {
            info_level: Some("Person".to_string()),
            attribute: "AGER_TYP".to_string(),
            values: Some(ValueList(vec![ValueCode::Code(1)])),
            meaning: Some("passive elderly".to_string()),
            description: Some("best-ager typology".to_string()),
            additional_notes: None,
        },
        CatalogRow {
            info_level: Some("Household".to_string()),
            attribute: "ANZ_PERSONEN".to_string(),
            values: None,
            meaning: None,
            description: Some("number of persons in household".to_string()),
            additional_notes: Some("numeric".to_string()),
        },
    ]
}

#[test]
fn catalog_round_trips_through_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("catalog.csv");
    let rows = sample_rows();

    write_catalog(&path, &rows).expect("write catalog");
    let reloaded = read_catalog(&path).expect("read catalog");
    assert_eq!(reloaded, rows);
}

#[test]
fn reader_skips_rows_without_an_attribute() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("catalog.csv");
    std::fs::write(
        &path,
        "Information level,Attribute,Value,Meaning,Description,Additional notes\n\
         Person,AGER_TYP,\"[-1, 0]\",unknown,desc,\n\
         ,,,,,\n",
    )
    .expect("write csv");

    let rows = read_catalog(&path).expect("read catalog");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].attribute, "AGER_TYP");
    let values = rows[0].values.as_ref().expect("values");
    assert_eq!(values.codes().collect::<Vec<_>>(), vec![-1, 0]);
}

#[test]
fn reader_rejects_a_csv_missing_catalog_columns() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("not_catalog.csv");
    std::fs::write(&path, "a,b\n1,2\n").expect("write csv");

    let error = read_catalog(&path).expect_err("must fail");
    assert!(error.to_string().contains("missing column"));
}
