use std::fs;
use std::path::PathBuf;

use ctab_ingest::{DataSource, SourceData, read_delimited, read_source};
use ctab_model::{Cell, LoadOptions, TableError};

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_named_csv_with_labels() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(&dir, "survey.csv", "sex,smoker\nF, yes\nM,no\n\nF,no\n");
    let table = read_delimited(&path, true, None).expect("read csv");

    assert_eq!(
        table.headers,
        Some(vec!["sex".to_string(), "smoker".to_string()])
    );
    assert_eq!(table.grid.shape(), [3, 2]);
    assert_eq!(table.grid.get(0, 1), Some(&Cell::label("yes")));
}

#[test]
fn reads_whitespace_separated_numbers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        &dir,
        "cases.txt",
        "# observations\n1 2\n2   1 # trailing note\n\n2 2\n",
    );
    let table = read_delimited(&path, false, None).expect("read text");

    assert!(table.headers.is_none());
    assert_eq!(table.grid.shape(), [3, 2]);
    assert!(table.grid.is_numeric());
    assert_eq!(table.grid.get(1, 0), Some(&Cell::Number(2.0)));
}

#[test]
fn honours_explicit_delimiter() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(&dir, "freq.txt", "a;b;n\n1;1;4\n2;1;3\n");
    let table = read_delimited(&path, true, Some(';')).expect("read text");

    assert_eq!(table.grid.shape(), [2, 3]);
    assert_eq!(table.grid.get(0, 2), Some(&Cell::Number(4.0)));
}

#[test]
fn ragged_rows_are_a_shape_mismatch() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(&dir, "ragged.csv", "1,2\n1\n");
    let err = read_delimited(&path, false, Some(',')).expect_err("ragged");
    assert!(matches!(err, TableError::ShapeMismatch { .. }));
}

#[test]
fn missing_file_is_reported_before_reading() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let err = read_delimited(&path, true, None).expect_err("missing file");
    match err {
        TableError::SourceNotFound { path: reported } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn array_sources_pass_through() {
    let values = ndarray::ArrayD::<f64>::zeros(ndarray::IxDyn(&[2, 2, 2]));
    let data = read_source(DataSource::from(values.clone()), &LoadOptions::default())
        .expect("array source");
    match data {
        SourceData::Array(array) => assert_eq!(array, values),
        SourceData::Table(_) => panic!("array source should not be read as a grid"),
    }
}
