#![allow(dead_code)]
use std::io::{Cursor, Read, Write};
use zip::{write::SimpleFileOptions, ZipArchive, ZipWriter};

pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const OFFICE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// A `.rels` part from `(id, type suffix, target, external)` tuples.
/// A type with a scheme is taken verbatim, anything else is an office-document type.
pub fn relationships(items: &[(&str, &str, &str, bool)]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{RELATIONSHIPS_NS}">"#
    );
    for (id, kind, target, external) in items {
        let kind = if kind.starts_with("http") {
            kind.to_string()
        } else if *kind == "core-properties" {
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties"
                .to_string()
        } else {
            format!("{OFFICE_RELATIONSHIPS}/{kind}")
        };
        let mode = if *external { r#" TargetMode="External""# } else { "" };
        xml.push_str(&format!(
            r#"<Relationship Id="{id}" Type="{kind}" Target="{target}"{mode}/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Zips `entries` in memory
pub fn zip_package(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let zip = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    zip.file_names().map(str::to_owned).collect()
}

pub fn read_entry(bytes: &[u8], name: &str) -> Option<Vec<u8>> {
    let mut zip = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut file = zip.by_name(name).ok()?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer).unwrap();
    Some(buffer)
}

pub fn read_text(bytes: &[u8], name: &str) -> Option<String> {
    read_entry(bytes, name).map(|b| String::from_utf8(b).unwrap())
}

/// A workbook as written by a real spreadsheet writer: two sheets, shared strings,
/// numbers and a bold format
pub fn xlsxwriter_fixture() -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let bold = rust_xlsxwriter::Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Data").unwrap();
    sheet.write_string_with_format(0, 0, "Name", &bold).unwrap();
    sheet.write_string_with_format(0, 1, "Amount", &bold).unwrap();
    let rows = [("apple", 1.5), ("pear", 2.0), ("apple", 4.25)];
    for (row, (name, amount)) in rows.iter().enumerate() {
        sheet.write_string(row as u32 + 1, 0, *name).unwrap();
        sheet.write_number(row as u32 + 1, 1, *amount).unwrap();
    }
    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(2, 3, "note").unwrap();
    workbook.save_to_buffer().unwrap()
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="emf" ContentType="image/x-emf"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/><Override PartName="/xl/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/xl/comments1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.comments+xml"/><Override PartName="/xl/drawings/drawing1.xml" ContentType="application/vnd.openxmlformats-officedocument.drawing+xml"/><Override PartName="/customXml/itemProps1.xml" ContentType="application/vnd.openxmlformats-officedocument.customXmlProperties+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><workbookPr date1904="1"/><sheets><sheet name="Report" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="2"><si><t>header</t></si><si><r><rPr><b/></rPr><t>rich</t></r><r><t xml:space="preserve">text</t></r></si></sst>"#;

const WORKSHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><dimension ref="A1:C3"/><sheetViews><sheetView showGridLines="0" workbookViewId="0"/></sheetViews><sheetFormatPr defaultRowHeight="15"/><cols><col min="1" max="3" width="20" customWidth="1"/></cols><sheetData><row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>0</v></c></row><row r="2" ht="30" customHeight="1"><c r="A2" t="s"><v>1</v></c><c r="B2"><v>42</v></c><c r="C2"><f>B2*2</f><v>84</v></c></row><row r="3"><c r="A3" t="inlineStr"><is><t>inline</t></is></c><c r="B3" t="b"><v>1</v></c></row></sheetData><pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/><drawing r:id="rId3"/></worksheet>"#;

const COMMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<comments xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><authors><author>Reviewer</author></authors><commentList><comment ref="B2" authorId="0"><text><t>check this</t></text></comment></commentList></comments>"#;

/// A hand-built package exercising every kind of part the writer copies through:
/// document properties, a theme, worksheet comments, an external hyperlink, a drawing
/// with its own image relationship and a custom XML item with properties
pub fn handmade_package() -> Vec<u8> {
    zip_package(&[
        ("[Content_Types].xml", CONTENT_TYPES.into()),
        (
            "_rels/.rels",
            relationships(&[
                ("rId1", "officeDocument", "xl/workbook.xml", false),
                ("rId2", "core-properties", "docProps/core.xml", false),
            ])
            .into(),
        ),
        ("docProps/core.xml", b"<cp:coreProperties xmlns:cp=\"urn:core\"/>".to_vec()),
        ("xl/workbook.xml", WORKBOOK.into()),
        (
            "xl/_rels/workbook.xml.rels",
            relationships(&[
                ("rId1", "worksheet", "worksheets/sheet1.xml", false),
                ("rId2", "sharedStrings", "sharedStrings.xml", false),
                ("rId3", "theme", "theme/theme1.xml", false),
                ("rId4", "customXml", "../customXml/item1.xml", false),
            ])
            .into(),
        ),
        ("xl/theme/theme1.xml", b"<a:theme xmlns:a=\"urn:theme\" name=\"Office\"/>".to_vec()),
        ("xl/sharedStrings.xml", SHARED_STRINGS.into()),
        ("xl/worksheets/sheet1.xml", WORKSHEET.into()),
        (
            "xl/worksheets/_rels/sheet1.xml.rels",
            relationships(&[
                ("rId1", "comments", "../comments1.xml", false),
                ("rId2", "hyperlink", "https://example.com/report", true),
                ("rId3", "drawing", "../drawings/drawing1.xml", false),
            ])
            .into(),
        ),
        ("xl/comments1.xml", COMMENTS.into()),
        ("xl/drawings/drawing1.xml", b"<xdr:wsDr xmlns:xdr=\"urn:drawing\"/>".to_vec()),
        (
            "xl/drawings/_rels/drawing1.xml.rels",
            relationships(&[
                ("rId1", "image", "../media/image1.png", false),
                ("rId2", "image", "../media/image2.emf", false),
            ])
            .into(),
        ),
        ("xl/media/image1.png", vec![0x89, b'P', b'N', b'G']),
        ("xl/media/image2.emf", vec![1, 0, 0, 0]),
        ("customXml/item1.xml", b"<b:Sources xmlns:b=\"urn:sources\"/>".to_vec()),
        (
            "customXml/_rels/item1.xml.rels",
            relationships(&[("rId1", "customXmlProps", "itemProps1.xml", false)]).into(),
        ),
        ("customXml/itemProps1.xml", b"<ds:datastoreItem xmlns:ds=\"urn:ds\"/>".to_vec()),
    ])
}
