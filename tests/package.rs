mod common;

use common::{
    entry_names, handmade_package, read_entry, read_text, relationships, xlsxwriter_fixture,
    zip_package,
};
use pretty_assertions::assert_eq;
use xlsxdoc::{ContentTypes, PackagePath, SchemaType, XlsxDocument, XlsxFile};

fn manifest(bytes: &[u8]) -> ContentTypes {
    XlsxFile::from_bytes(bytes.to_vec())
        .unwrap()
        .parse_content_types()
        .unwrap()
        .unwrap()
}

fn assert_every_part_has_a_content_type(bytes: &[u8]) {
    let manifest = manifest(bytes);
    for name in entry_names(bytes) {
        if name == "[Content_Types].xml" {
            continue;
        }
        assert!(
            manifest.resolve(&PackagePath::new(&name)).is_some(),
            "{name} has no content type"
        );
    }
}

#[test]
fn test_every_written_part_has_a_content_type() {
    for source in [xlsxwriter_fixture(), handmade_package()] {
        let bytes = XlsxDocument::from_bytes(source).unwrap().to_bytes().unwrap();
        assert_every_part_has_a_content_type(&bytes);
    }
    let bytes = XlsxDocument::new().unwrap().to_bytes().unwrap();
    assert_every_part_has_a_content_type(&bytes);
}

#[test]
fn test_overrides_win_over_defaults() {
    let bytes = XlsxDocument::from_bytes(handmade_package()).unwrap().to_bytes().unwrap();
    let manifest = manifest(&bytes);
    assert_eq!(manifest.default_for("xml"), Some("application/xml"));
    assert_eq!(
        manifest.resolve(&PackagePath::new("xl/workbook.xml")),
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml")
    );
    assert_eq!(
        manifest.resolve(&PackagePath::new("customXml/itemProps1.xml")),
        Some("application/vnd.openxmlformats-officedocument.customXmlProperties+xml")
    );
    assert_eq!(
        manifest.resolve(&PackagePath::new("docProps/core.xml")),
        Some("application/vnd.openxmlformats-package.core-properties+xml")
    );
    // carried over from the source manifest
    assert_eq!(manifest.resolve(&PackagePath::new("xl/media/image2.emf")), Some("image/x-emf"));
}

#[test]
fn test_unsupported_parts_copied_verbatim() {
    let source = handmade_package();
    let bytes = XlsxDocument::from_bytes(source.clone()).unwrap().to_bytes().unwrap();
    for name in [
        "docProps/core.xml",
        "xl/theme/theme1.xml",
        "xl/comments1.xml",
        "xl/drawings/drawing1.xml",
        "xl/drawings/_rels/drawing1.xml.rels",
        "xl/media/image1.png",
        "xl/media/image2.emf",
        "customXml/item1.xml",
        "customXml/itemProps1.xml",
    ] {
        assert_eq!(read_entry(&bytes, name), read_entry(&source, name), "{name}");
    }
    let mut names = entry_names(&bytes);
    let mut expected = entry_names(&source);
    names.sort();
    expected.sort();
    assert_eq!(names, expected);
}

#[test]
fn test_relationships_survive() {
    let bytes = XlsxDocument::from_bytes(handmade_package()).unwrap().to_bytes().unwrap();
    let document = XlsxDocument::from_bytes(bytes.clone()).unwrap();
    let paths: Vec<String> = document
        .document_relationships()
        .iter()
        .map(|(path, _)| path.to_string())
        .collect();
    assert_eq!(
        paths,
        vec!["/xl/workbook.xml", "/xl/worksheets/sheet1.xml", "/customXml/item1.xml"]
    );
    let (_, sheet) = &document.document_relationships()[1];
    let hyperlink = sheet.find("rId2").unwrap();
    assert!(hyperlink.is_external());
    assert_eq!(hyperlink.target, "https://example.com/report");
    let rels = read_text(&bytes, "xl/worksheets/_rels/sheet1.xml.rels").unwrap();
    assert!(rels.contains(r#"TargetMode="External""#));
    assert!(rels.contains(common::RELATIONSHIPS_NS));
}

#[test]
fn test_comments_read_through_document() {
    let mut document = XlsxDocument::from_bytes(handmade_package()).unwrap();
    let comments = document.comments(0).unwrap().unwrap();
    let comment = &comments.comment_list.items[0];
    assert_eq!(comment.reference, "B2");
    assert_eq!(comments.author(comment), Some("Reviewer"));
    assert_eq!(comment.text.value(), "check this");
    let mut fresh = XlsxDocument::new().unwrap();
    assert!(fresh.comments(0).unwrap().is_none());
}

#[test]
fn test_missing_shared_strings_relationship_is_added() {
    let workbook = r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Only" sheetId="1" r:id="rId1"/></sheets></workbook>"#;
    let worksheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData></worksheet>"#;
    let source = zip_package(&[
        (
            "_rels/.rels",
            relationships(&[("rId1", "officeDocument", "xl/workbook.xml", false)]).into(),
        ),
        ("xl/workbook.xml", workbook.into()),
        (
            "xl/_rels/workbook.xml.rels",
            relationships(&[("rId1", "worksheet", "worksheets/sheet1.xml", false)]).into(),
        ),
        ("xl/worksheets/sheet1.xml", worksheet.into()),
    ]);
    let mut document = XlsxDocument::from_bytes(source).unwrap();
    assert!(document.shared_strings().is_empty());
    assert!(document.content_types().is_none());
    let bytes = document.to_bytes().unwrap();
    let reopened = XlsxDocument::from_bytes(bytes.clone()).unwrap();
    let (_, relationships) = &reopened.document_relationships()[0];
    assert_eq!(relationships.paths(&SchemaType::SharedStrings), vec!["sharedStrings.xml"]);
    assert!(read_text(&bytes, "xl/sharedStrings.xml").unwrap().contains(r#"uniqueCount="0""#));
    assert_every_part_has_a_content_type(&bytes);
}

#[test]
fn test_unrecognized_part_is_copied_without_content_type() {
    let workbook = r#"<workbook><sheets/></workbook>"#;
    let source = zip_package(&[
        (
            "_rels/.rels",
            relationships(&[
                ("rId1", "officeDocument", "xl/workbook.xml", false),
                ("rId2", "http://example.com/relationships/blob", "extra/blob.bin", false),
                ("rId3", "http://example.com/relationships/blob", "extra/missing.bin", false),
            ])
            .into(),
        ),
        ("xl/workbook.xml", workbook.into()),
        ("xl/_rels/workbook.xml.rels", relationships(&[]).into()),
        ("extra/blob.bin", vec![0, 1, 2]),
    ]);
    let bytes = XlsxDocument::from_bytes(source).unwrap().to_bytes().unwrap();
    assert_eq!(read_entry(&bytes, "extra/blob.bin"), Some(vec![0, 1, 2]));
    assert_eq!(read_entry(&bytes, "extra/missing.bin"), None);
    assert_eq!(manifest(&bytes).resolve(&PackagePath::new("extra/blob.bin")), None);
}

#[test]
fn test_missing_workbook_part() {
    let source = zip_package(&[(
        "_rels/.rels",
        relationships(&[("rId1", "officeDocument", "xl/workbook.xml", false)]).into(),
    )]);
    let actual = XlsxDocument::from_bytes(source).err().unwrap().to_string();
    assert_eq!(actual, "open xml package requires 'xl/workbook.xml' but part is not found")
}

#[test]
fn test_stored_compression() {
    let mut document = XlsxDocument::new().unwrap().with_options(xlsxdoc::SaveOptions {
        compression: xlsxdoc::CompressionMethod::Stored,
        overwrite: false,
    });
    let bytes = document.to_bytes().unwrap();
    let mut zip = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    for index in 0..zip.len() {
        assert_eq!(zip.by_index(index).unwrap().compression(), zip::CompressionMethod::Stored);
    }
}
