//! Read-only reference catalogs (monsters, items) and importing their names into
//! a campaign's list fields.

use crate::disk;
use crate::error::Result;
use crate::field::Field;
use crate::statics;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Monsters,
    Items,
}

impl CatalogKind {
    /// The list field that imports from this catalog land in.
    pub fn target_field(self) -> Field {
        match self {
            CatalogKind::Monsters => Field::Monsters,
            CatalogKind::Items => Field::Rewards,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            CatalogKind::Monsters => statics::FILE_MONSTERS,
            CatalogKind::Items => statics::FILE_ITEMS,
        }
    }
}

/// Entities keyed by name. Their other attributes are opaque and only shown as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: IndexMap<String, Map<String, Value>>,
}

impl Catalog {
    /// Load a catalog file. A missing file is an empty catalog; so is anything but an array.
    pub fn load(path: &Path) -> Result<Self> {
        let Some(value) = disk::read_json_if_exists(path)? else {
            return Ok(Self::default());
        };
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        let mut catalog = Self::default();
        let Value::Array(items) = value else {
            return catalog;
        };
        for item in items {
            let Value::Object(object) = item else {
                continue;
            };
            let Some(name) = entity_name(&object).map(str::to_string) else {
                continue;
            };
            catalog.entries.insert(name, object);
        }
        catalog
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Map<String, Value>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entity pretty-printed for a detail view.
    pub fn detail(&self, name: &str) -> Option<String> {
        let entity = self.entries.get(name)?;
        let bytes = disk::to_pretty_json(entity).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// Append one name to a list field's text.
    pub fn import_one(&self, name: &str, target: &str) -> String {
        append_line(target.trim().to_string(), name)
    }

    /// Append every catalog name, in catalog order, one per line.
    pub fn import_all(&self, target: &str) -> String {
        self.names()
            .fold(target.trim().to_string(), |text, name| append_line(text, name))
    }
}

fn entity_name(object: &Map<String, Value>) -> Option<&str> {
    [statics::KEY_CATALOG_NAME, statics::KEY_CATALOG_NAME_ALT]
        .into_iter()
        .find_map(|key| object.get(key).and_then(Value::as_str))
}

fn append_line(mut text: String, line: &str) -> String {
    if !text.is_empty() {
        text.push('\n');
    }
    text.push_str(line);
    text
}
