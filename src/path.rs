//! Package-internal path algebra
use crate::errors::XlsxError;
use std::fmt;

const SEPARATOR: char = '/';

/// A path to a part inside the package, e.g. `/xl/worksheets/sheet1.xml`
///
/// Segments are normalized on construction: empty and `.` segments vanish and `..` removes
/// the segment before it (or nothing, at the top). This is not a filesystem resolver.
/// Two paths are equal when their joined forms are equal, so `/xl/a.xml` and `xl/a.xml`
/// differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackagePath {
    rooted: bool,
    segments: Vec<String>,
}

impl PackagePath {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            rooted: raw.starts_with(SEPARATOR),
            segments: normalize(raw.split(SEPARATOR)),
        }
    }

    /// The same path anchored at the package root
    pub fn rooted(raw: &str) -> Self {
        Self {
            rooted: true,
            ..Self::new(raw)
        }
    }

    pub fn is_rooted(&self) -> bool {
        self.rooted
    }

    /// Whether this is the package root itself, `/`
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// File extension of the last segment, without the dot
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        name.rfind('.').map(|dot| &name[dot + 1..])
    }

    /// Every segment but the last
    pub fn directory(&self) -> Self {
        let keep = self.segments.len().saturating_sub(1);
        Self {
            rooted: self.rooted,
            segments: self.segments[..keep].to_vec(),
        }
    }

    /// Directory with a trailing separator, or `/` when the path has no directory
    pub fn directory_path(&self) -> String {
        let directory = self.directory();
        if directory.segments.is_empty() {
            return SEPARATOR.to_string();
        }
        format!("{directory}{SEPARATOR}")
    }

    /// Joined form without a leading separator, as used for archive entry names
    pub fn relative_path(&self) -> String {
        self.segments.join("/")
    }

    /// Joined form with a leading separator, as used for content-type part names
    pub fn absolute_path(&self) -> String {
        format!("{SEPARATOR}{}", self.relative_path())
    }

    /// Appends a component that may itself hold several segments or `..`.
    /// Separators on either side are never doubled.
    pub fn append(&self, component: &str) -> Self {
        let component = component.trim();
        if component.is_empty() {
            return self.clone();
        }
        Self {
            rooted: self.rooted,
            segments: normalize(
                self.segments
                    .iter()
                    .map(String::as_str)
                    .chain(component.split(SEPARATOR)),
            ),
        }
    }

    /// The sibling `_rels/<name>.rels` part holding this part's relationships
    pub fn relationships_path(&self) -> Result<Self, XlsxError> {
        let name = self
            .file_name()
            .ok_or_else(|| XlsxError::InvalidDocumentPath(self.to_string()))?;
        Ok(self.directory().append("_rels").append(&format!("{name}.rels")))
    }

    /// Resolves a relationship target. Targets starting with `/` are package-absolute,
    /// everything else is relative to `base`, the directory of the source part.
    pub fn resolve(base: Option<&PackagePath>, target: &str) -> Self {
        match base {
            Some(base) if !target.trim_start().starts_with(SEPARATOR) => base.append(target),
            _ => Self::new(target),
        }
    }
}

impl fmt::Display for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rooted {
            f.write_str("/")?;
        }
        f.write_str(&self.relative_path())
    }
}

impl From<&str> for PackagePath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

fn normalize<'a>(segments: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for segment in segments {
        match segment.trim() {
            "" | "." => {}
            ".." => {
                normalized.pop();
            }
            segment => normalized.push(segment.to_owned()),
        }
    }
    normalized
}
