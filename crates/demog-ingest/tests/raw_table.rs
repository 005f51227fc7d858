//! Raw sheet reading against real files.

use demog_ingest::read_table_with_header;

fn write_sheet(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write sheet");
    path
}

#[test]
fn locates_offset_header_and_drops_index_column() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_sheet(
        &dir,
        "att_vals.csv",
        "Attribute values export,,,,\n\
         ,Attribute,Description,Value,Meaning\n\
         ,AGER_TYP,best-ager typology,\"-1, 0\",unknown\n\
         ,,,1,passive elderly\n",
    );

    let table =
        read_table_with_header(&path, &["Attribute", "Description", "Value", "Meaning"])
            .expect("read table");
    assert_eq!(
        table.headers,
        vec!["Attribute", "Description", "Value", "Meaning"]
    );
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.cell(0, 0), "AGER_TYP");
    assert_eq!(table.cell(0, 2), "-1, 0");
    assert_eq!(table.cell(1, 0), "");
    assert_eq!(table.cell(1, 3), "passive elderly");
}

#[test]
fn pads_short_rows_to_header_width() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_sheet(
        &dir,
        "short.csv",
        "Attribute,Description,Value,Meaning\nAGER_TYP,desc\n",
    );

    let table = read_table_with_header(&path, &["Attribute", "Value"]).expect("read table");
    assert_eq!(table.rows[0].len(), 4);
    assert_eq!(table.cell(0, 2), "");
}

#[test]
fn missing_header_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_sheet(&dir, "bad.csv", "a,b\n1,2\n");

    let error = read_table_with_header(&path, &["Attribute"]).expect_err("must fail");
    assert!(error.to_string().contains("no header row"));
}

#[test]
fn empty_file_yields_empty_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_sheet(&dir, "empty.csv", "");

    let table = read_table_with_header(&path, &["Attribute"]).expect("read table");
    assert!(table.is_empty());
    assert!(table.headers.is_empty());
}

#[test]
fn column_lookup_is_case_insensitive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_sheet(
        &dir,
        "lookup.csv",
        "Information level,Attribute,Description,Additional notes\nPerson,AGER_TYP,desc,\n",
    );

    let table =
        read_table_with_header(&path, &["Information level", "Attribute"]).expect("read table");
    assert_eq!(table.column_index("information LEVEL"), Some(0));
    assert_eq!(table.column_index("additional notes"), Some(3));
    assert_eq!(table.column_index("Value"), None);
}
