//! Namespace catalogs: the nested `component -> slug -> text` JSON written per
//! component directory.

mod mock;
mod writer;

use serde_json::{Map, Value};

pub use mock::{MockTranslator, ShuffleTranslator, mock_translate};
pub use writer::{CatalogStore, ExistingCatalogs, WrittenCatalog, read_catalog, write_catalog};

/// One extracted text, keyed `<component>.<slug>` in the namespace catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub component: String,
    pub slug: String,
    pub text: String,
}

impl CatalogEntry {
    /// Dotted catalog path, also the argument of the generated lookup call.
    pub fn key(&self) -> String {
        format!("{}.{}", self.component, self.slug)
    }
}

/// Catalog of one namespace, built up from the files of its directory.
///
/// Keys keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceCatalog {
    data: Map<String, Value>,
}

impl NamespaceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `text` at the dotted `key`, replacing any previous value.
    pub fn insert(&mut self, key: &str, text: &str) {
        let parts: Vec<&str> = key.split('.').collect();
        insert_nested(&mut self.data, &parts, Value::String(text.to_string()));
    }

    pub fn extend<'a>(&mut self, entries: impl IntoIterator<Item = &'a CatalogEntry>) {
        for entry in entries {
            self.insert(&entry.key(), &entry.text);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of leaf values.
    pub fn key_count(&self) -> usize {
        count_leaves(&self.data)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.data
    }
}

impl From<Map<String, Value>> for NamespaceCatalog {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

/// Insert a value at a nested path, creating intermediate objects as needed.
fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        root.insert(first.to_string(), value);
        return;
    }

    let next_level = root
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    // A string sitting where an object is needed is replaced
    if !next_level.is_object() {
        *next_level = Value::Object(Map::new());
    }

    if let Value::Object(inner) = next_level {
        insert_nested(inner, rest, value);
    }
}

fn count_leaves(map: &Map<String, Value>) -> usize {
    map.values()
        .map(|value| match value {
            Value::Object(inner) => count_leaves(inner),
            _ => 1,
        })
        .sum()
}

/// Merge a freshly extracted catalog into the one found on disk.
///
/// Values already on disk win, so translator edits are never overwritten.
/// Keys only present in `fresh` are appended after the existing ones. Objects
/// on both sides are merged recursively.
pub fn merge_existing(
    existing: Map<String, Value>,
    fresh: Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = existing;
    for (key, fresh_value) in fresh {
        match merged.get_mut(&key) {
            None => {
                merged.insert(key, fresh_value);
            }
            Some(Value::Object(existing_inner)) => {
                if let Value::Object(fresh_inner) = fresh_value {
                    let inner = std::mem::take(existing_inner);
                    *existing_inner = merge_existing(inner, fresh_inner);
                }
            }
            Some(_) => {}
        }
    }
    merged
}
