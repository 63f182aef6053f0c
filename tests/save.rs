mod common;

use common::xlsxwriter_fixture;
use xlsxdoc::{SaveOptions, XlsxDocument, XlsxError};

#[test]
fn test_save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.xlsx");
    let mut document = XlsxDocument::from_bytes(xlsxwriter_fixture()).unwrap();
    document.save(&path).unwrap();
    let reopened = XlsxDocument::open(&path).unwrap();
    assert_eq!(reopened.worksheet_names(), vec!["Data", "Notes"]);
}

#[test]
fn test_save_refuses_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("twice.xlsx");
    let mut document = XlsxDocument::new().unwrap();
    document.save(&path).unwrap();
    let before = std::fs::read(&path).unwrap();
    match document.save(&path) {
        Err(XlsxError::FileAlreadyExists(existing)) => assert_eq!(existing, path),
        other => panic!("expected FileAlreadyExists, got {other:?}"),
    }
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_save_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overwrite.xlsx");
    std::fs::write(&path, b"stale").unwrap();
    let mut document = XlsxDocument::new().unwrap().with_options(SaveOptions {
        overwrite: true,
        ..Default::default()
    });
    document
        .modify_worksheet(0, |sheet, strings| sheet.add_row(["fresh"], None, &[], strings))
        .unwrap()
        .unwrap();
    document.save(&path).unwrap();
    let reopened = XlsxDocument::open(&path).unwrap();
    assert_eq!(reopened.shared_strings().get(0).unwrap(), "fresh");
}

#[test]
fn test_save_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("book.xlsx");
    let mut document = XlsxDocument::new().unwrap();
    let actual = document.save(&path).err().unwrap();
    assert!(matches!(actual, XlsxError::CouldNotCreateArchive { .. }));
    assert!(!path.exists());
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(XlsxDocument::open(dir.path().join("absent.xlsx")).is_err());
}
