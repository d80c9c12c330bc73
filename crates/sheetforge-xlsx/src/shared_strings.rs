//! Shared string table assembly.

use std::collections::HashMap;

use crate::xml::{escape_text, needs_space_preserve};

/// Interned text cell contents, in first-encounter order. `count` on the
/// emitted part is the total number of references, `uniqueCount` the table
/// length.
#[derive(Debug, Default)]
pub(crate) struct SharedStrings {
    table: Vec<String>,
    lookup: HashMap<String, u32>,
    total_refs: u64,
}

impl SharedStrings {
    pub(crate) fn new() -> Self {
        SharedStrings::default()
    }

    /// Records one reference to `text` and returns its table index.
    pub(crate) fn intern(&mut self, text: &str) -> u32 {
        self.total_refs += 1;
        if let Some(&idx) = self.lookup.get(text) {
            return idx;
        }
        let idx = self.table.len() as u32;
        self.table.push(text.to_string());
        self.lookup.insert(text.to_string(), idx);
        idx
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub(crate) fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main""#);
        xml.push_str(&format!(
            r#" count="{}" uniqueCount="{}">"#,
            self.total_refs,
            self.table.len()
        ));
        for s in &self.table {
            xml.push_str("<si><t");
            if needs_space_preserve(s) {
                xml.push_str(r#" xml:space="preserve""#);
            }
            xml.push('>');
            xml.push_str(&escape_text(s));
            xml.push_str("</t></si>");
        }
        xml.push_str("</sst>");
        xml
    }
}
