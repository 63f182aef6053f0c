//! Structural edits of an `XlsxDocument`: new parts, new relationships and scoped
//! access to a worksheet together with the shared string table
use crate::{
    path::PackagePath,
    stream::xlsx::{
        relationships::{Relationship, Relationships, SchemaType},
        resolve_target,
        shared_string_table::SharedStringTable,
        sheet::Worksheet,
    },
    workbook::{ensure_shared_strings, XlsxDocument},
};
use log::warn;
use xlsxdoc_serde::Workbook;

impl XlsxDocument {
    /// Adds an empty workbook part `xl/<name>.xml` and its package relationship
    pub fn create_workbook(&mut self, name: &str) -> PackagePath {
        let path = PackagePath::rooted(&format!("xl/{name}.xml"));
        self.relationships
            .add_relationship(SchemaType::OfficeDocument, &path.relative_path());
        self.workbooks.push((path.clone(), Workbook::default()));
        self.document_relationships
            .push((path.clone(), Relationships::new()));
        path
    }

    /// Adds an empty worksheet `xl/worksheets/sheetN.xml`, N being the first free
    /// number, to the workbook at `workbook`. Returns the index of the new worksheet.
    pub fn create_worksheet(&mut self, name: &str, workbook: usize) -> Option<usize> {
        let Some((workbook_path, _)) = self.workbooks.get(workbook) else {
            warn!("workbook {workbook} does not exist, worksheet '{name}' not created");
            return None;
        };
        let workbook_path = workbook_path.clone();
        let path = (1..)
            .map(|n| PackagePath::rooted(&format!("xl/worksheets/sheet{n}.xml")))
            .find(|path| !self.is_taken(path))?;
        let target = if workbook_path.directory() == PackagePath::rooted("xl") {
            path.relative_path()
                .trim_start_matches("xl/")
                .to_owned()
        } else {
            path.to_string()
        };
        let relationship =
            self.add_document_relationship(&workbook_path, SchemaType::Worksheet, &target);
        if let Some((_, relationships)) = self
            .document_relationships
            .iter_mut()
            .find(|(p, _)| *p == workbook_path)
        {
            ensure_shared_strings(&workbook_path, relationships);
        }
        self.workbooks[workbook].1.add_sheet(name, &relationship.id);
        self.worksheets.push((path, Worksheet::new()));
        Some(self.worksheets.len() - 1)
    }

    fn is_taken(&self, path: &PackagePath) -> bool {
        self.worksheets.iter().any(|(p, _)| p == path)
            || self
                .document_relationships
                .iter()
                .any(|(source, r)| r.iter().any(|r| resolve_target(source, &r.target) == *path))
    }

    /// Appends a relationship to the part at `path`, creating its relationship list if needed
    pub fn add_document_relationship(
        &mut self,
        path: &PackagePath,
        relationship_type: SchemaType,
        target: &str,
    ) -> Relationship {
        let index = match self.document_relationships.iter().position(|(p, _)| p == path) {
            Some(index) => index,
            None => {
                self.document_relationships
                    .push((path.clone(), Relationships::new()));
                self.document_relationships.len() - 1
            }
        };
        self.document_relationships[index]
            .1
            .add_relationship(relationship_type, target)
    }

    /// Runs `edit` with exclusive access to the worksheet at `index` and the shared
    /// string table, so cell values and their strings change together.
    /// `None` when there is no such worksheet.
    pub fn modify_worksheet<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut Worksheet, &mut SharedStringTable) -> R,
    ) -> Option<R> {
        let (_, worksheet) = self.worksheets.get_mut(index)?;
        Some(edit(worksheet, &mut self.shared_strings))
    }

    /// Position of the worksheet named `name`
    pub fn worksheet_index(&self, name: &str) -> Option<usize> {
        self.worksheet_names().iter().position(|n| n == name)
    }

    /// Display names of the worksheets, in worksheet order
    pub fn worksheet_names(&self) -> Vec<String> {
        self.worksheets
            .iter()
            .map(|(path, _)| self.sheet_name(path).unwrap_or_default())
            .collect()
    }

    fn sheet_name(&self, worksheet: &PackagePath) -> Option<String> {
        self.workbooks.iter().find_map(|(path, workbook)| {
            let (_, relationships) = self.document_relationships.iter().find(|(p, _)| p == path)?;
            workbook
                .sheets
                .items
                .iter()
                .find(|sheet| {
                    relationships
                        .find(&sheet.relationship_id)
                        .is_some_and(|r| resolve_target(path, &r.target) == *worksheet)
                })
                .map(|sheet| sheet.name.clone())
        })
    }
}
