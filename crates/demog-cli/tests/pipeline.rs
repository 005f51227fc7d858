//! End-to-end pipeline test: sheet exports -> catalog -> cleaned dataset.

use std::path::PathBuf;

use demog_cli::cli::{CleanArgs, MetadataArgs};
use demog_cli::commands::{run_clean, run_metadata};
use demog_ingest::{read_catalog, read_dataset};
use demog_transform::unknown_code_map;

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write file");
    path
}

const ATT_VALS_SHEET: &str = "\
Attributes and meanings,,,,
,Attribute,Description,Value,Meaning
,AGER_TYP,best-ager typology,\"-1, 0\",unknown
,,,1,passive elderly
,,,2,cultural elderly
,,,3,experience-driven elderly
,CAMEO_DEUG_2015,social status,-1,unknown
";

const INFO_LEVELS_SHEET: &str = "\
Information levels export,,,
Information level,Attribute,Description,Additional notes
Person,AGER_TYP,best-ager typology,
,CAMEO_DEUG_ 2015 OST_WEST_ KZ,status and region,
Household,ANZ_PERSONEN,number of persons,
";

const DATASET: &str = "\
LNR,AGER_TYP,CAMEO_DEUG_2015,OST_WEST_KZ,EINGEFUEGT_AM,D19_LETZTER_KAUF_BRANCHE
1,-1,X,W,1992-02-10 00:00:00,MAIL
2,2,4,O,1997-05-14 00:00:00,BANK
3,2,8,W,1995-01-01 00:00:00,MAIL
4,3,4,O,1992-02-10 00:00:00,MAIL
";

const CLEAN_CONFIG: &str = r#"{
    "high_null_columns": [],
    "sentinel_codes": [{"column": "CAMEO_DEUG_2015", "sentinel": "X"}],
    "one_hot_columns": ["D19_LETZTER_KAUF_BRANCHE"],
    "correlated_columns": [],
    "max_row_null_fraction": 0.5
}"#;

#[test]
fn metadata_then_clean_produces_a_complete_frame() {
    let dir = tempfile::tempdir().expect("tempdir");
    let att_vals = write_file(&dir, "att_vals.csv", ATT_VALS_SHEET);
    let info_levels = write_file(&dir, "info_levels.csv", INFO_LEVELS_SHEET);
    let catalog_path = dir.path().join("catalog.csv");

    let metadata = run_metadata(&MetadataArgs {
        att_vals,
        info_levels,
        output: catalog_path.clone(),
    })
    .expect("metadata command");
    assert_eq!(metadata.value_rows, 5);
    // The malformed cell yields two attribute records.
    assert_eq!(metadata.level_rows, 4);
    assert_eq!(metadata.repaired_names, 1);

    let catalog = read_catalog(&catalog_path).expect("read catalog");
    // 5 value rows plus the levels-only ANZ_PERSONEN and OST_WEST_KZ rows.
    assert_eq!(catalog.len(), 7);
    let unknowns = unknown_code_map(&catalog, "unknown");
    assert_eq!(unknowns["AGER_TYP"], vec![-1, 0]);
    assert_eq!(unknowns["CAMEO_DEUG_2015"], vec![-1]);

    // The split attribute carries its information level into the catalog.
    let ost = catalog
        .iter()
        .find(|row| row.attribute == "OST_WEST_KZ")
        .expect("split attribute in catalog");
    assert_eq!(ost.info_level.as_deref(), Some("Person"));

    let data = write_file(&dir, "demographics.csv", DATASET);
    let config = write_file(&dir, "cleaning.json", CLEAN_CONFIG);
    let output = dir.path().join("cleaned.csv");
    let result = run_clean(&CleanArgs {
        data,
        catalog: catalog_path,
        output: output.clone(),
        config: Some(config),
        keep_sparse_rows: false,
        customers: false,
    })
    .expect("clean command");

    assert_eq!(result.report.rows_in, 4);
    assert_eq!(result.report.rows_out, 4);
    assert_eq!(result.report.unknown_cells_nulled, 1);
    assert_eq!(result.report.sentinel_cells_nulled, 1);

    let cleaned = read_dataset(&output).expect("read cleaned");
    let names: Vec<String> = cleaned
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "AGER_TYP",
            "CAMEO_DEUG_2015",
            "OST_WEST_KZ",
            "year",
            "D19_LETZTER_KAUF_BRANCHE_BANK",
            "D19_LETZTER_KAUF_BRANCHE_MAIL",
        ]
    );
    let total_nulls: usize = cleaned
        .get_columns()
        .iter()
        .map(|column| column.null_count())
        .sum();
    assert_eq!(total_nulls, 0);

    // The unknown AGER_TYP code and the sentinel were imputed with modes.
    let ager: Vec<Option<f64>> = cleaned
        .column("AGER_TYP")
        .expect("column")
        .f64()
        .expect("f64")
        .into_iter()
        .collect();
    assert_eq!(ager, vec![Some(2.0), Some(2.0), Some(2.0), Some(3.0)]);
    let years: Vec<Option<i64>> = cleaned
        .column("year")
        .expect("year")
        .i64()
        .expect("i64")
        .into_iter()
        .collect();
    assert_eq!(
        years,
        vec![Some(1992), Some(1997), Some(1995), Some(1992)]
    );
}

#[test]
fn clean_fails_cleanly_when_the_catalog_is_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = write_file(&dir, "demographics.csv", DATASET);
    let result = run_clean(&CleanArgs {
        data,
        catalog: dir.path().join("absent.csv"),
        output: dir.path().join("out.csv"),
        config: None,
        keep_sparse_rows: false,
        customers: false,
    });
    assert!(result.is_err());
}
