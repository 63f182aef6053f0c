//! The module holds the deduplicating string pool cells point into by index
use std::collections::HashMap;
use xlsxdoc_serde::{shared::StringItem, SharedStrings};

/// The `SharedStringTable` provides an efficient way to map strings
/// to their corresponding integer references used in the spreadsheet.
///
/// Items are append-only: a cell stores the position of its string, so an item
/// is never removed or moved once it is in the table.
/// **Note**: only plain items take part in deduplication, rich text never matches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedStringTable {
    items: Vec<StringItem>,
    lookup: HashMap<String, usize>,
}

impl SharedStringTable {
    /// The canonical empty table of a new document
    pub fn standard() -> Self {
        Self::default()
    }

    /// Index of `text`, appending it first when the table does not hold it yet
    pub fn add_string(&mut self, text: &str) -> usize {
        if let Some(index) = self.lookup.get(text) {
            return *index;
        }
        let index = self.items.len();
        self.items.push(StringItem::plain(text));
        self.lookup.insert(text.to_owned(), index);
        index
    }

    /// Resolved text of the item at `index`
    pub fn get(&self, index: usize) -> Option<String> {
        self.items.get(index).map(StringItem::value)
    }

    pub fn item(&self, index: usize) -> Option<&StringItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unique_count(&self) -> u32 {
        self.items.len() as u32
    }

    /// Wire form with `count`, the number of cells referencing the table
    pub fn to_part(&self, count: u32) -> SharedStrings {
        SharedStrings {
            count: Some(count),
            unique_count: Some(self.unique_count()),
            items: self.items.clone(),
        }
    }
}

impl From<SharedStrings> for SharedStringTable {
    fn from(part: SharedStrings) -> Self {
        let mut lookup = HashMap::with_capacity(part.items.len());
        for (index, item) in part.items.iter().enumerate() {
            if let Some(text) = &item.text {
                // first occurrence wins if the source file has duplicates
                lookup.entry(text.value.clone()).or_insert(index);
            }
        }
        Self {
            items: part.items,
            lookup,
        }
    }
}

#[cfg(test)]
mod shared_string_table_unittests {
    use super::SharedStringTable;
    use xlsxdoc_serde::{shared::StringItem, SharedStrings, XmlPart};

    mod shared_string_table_api {
        use super::*;

        #[test]
        fn test_add_string_dedup() {
            let mut table = SharedStringTable::standard();
            assert_eq!(table.add_string("apple"), 0);
            assert_eq!(table.add_string("pear"), 1);
            assert_eq!(table.add_string("apple"), 0);
            assert_eq!(table.unique_count(), 2);
        }

        #[test]
        fn test_add_distinct_strings_in_order() {
            let mut table = SharedStringTable::standard();
            let indices: Vec<usize> = (0..50).map(|n| table.add_string(&format!("s{n}"))).collect();
            assert_eq!(indices, (0..50).collect::<Vec<_>>());
            assert_eq!(table.unique_count(), 50);
            assert_eq!(table.get(49).unwrap(), "s49");
        }

        #[test]
        fn test_rich_items_never_match() {
            let xml = r#"<sst><si><r><t>bold</t></r></si><si><t>plain</t></si></sst>"#;
            let mut table: SharedStringTable = SharedStrings::from_xml(xml).unwrap().into();
            assert_eq!(table.get(0).unwrap(), "bold");
            assert_eq!(table.add_string("plain"), 1);
            assert_eq!(table.add_string("bold"), 2);
        }

        #[test]
        fn test_to_part_counts() {
            let mut table = SharedStringTable::standard();
            table.add_string(" padded ");
            let actual = table.to_part(3);
            assert_eq!(actual.count, Some(3));
            assert_eq!(actual.unique_count, Some(1));
            assert_eq!(actual.items, vec![StringItem::plain(" padded ")]);
        }

        #[test]
        fn test_get_out_of_range() {
            assert_eq!(SharedStringTable::standard().get(0), None);
        }
    }
}
