use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::{MockTranslator, NamespaceCatalog, merge_existing, mock_translate};
use crate::core::persist::write_atomic;

/// Read a catalog file, `None` when it does not exist.
pub fn read_catalog(path: &Path) -> Result<Option<Map<String, Value>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => bail!("Root of JSON file must be an object: {}", path.display()),
    }
}

/// Write a catalog with 4-space indentation and a trailing newline.
pub fn write_catalog(path: &Path, catalog: &Map<String, Value>) -> Result<()> {
    let mut content = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut content, PrettyFormatter::with_indent(b"    "));
    catalog
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    content.push(b'\n');

    write_atomic(path, &content)
}

/// A catalog file written for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenCatalog {
    pub locale: String,
    pub path: PathBuf,
    pub key_count: usize,
}

/// Locale directory layout: `<root>/<locale>/<namespace>.json`.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pub locales_root: PathBuf,
    pub base_locale: String,
    pub mock_locales: Vec<String>,
}

impl CatalogStore {
    pub fn path_for(&self, locale: &str, namespace: &str) -> PathBuf {
        self.locales_root
            .join(locale)
            .join(format!("{}.json", namespace))
    }

    /// Every file [`save_namespace`](Self::save_namespace) writes, base locale first.
    pub fn paths_for(&self, namespace: &str) -> Vec<PathBuf> {
        std::iter::once(&self.base_locale)
            .chain(&self.mock_locales)
            .map(|locale| self.path_for(locale, namespace))
            .collect()
    }

    /// Read the existing base and mock catalogs of a namespace.
    ///
    /// Fails when any of them is unreadable, not JSON or not an object; the
    /// caller must not rewrite sources of the namespace in that case.
    pub fn load_existing(&self, namespace: &str) -> Result<ExistingCatalogs> {
        let base_path = self.path_for(&self.base_locale, namespace);
        let base = read_catalog(&base_path)?.unwrap_or_default();
        let mocks = self
            .mock_locales
            .iter()
            .map(|locale| {
                let existing = read_catalog(&self.path_for(locale, namespace))?;
                Ok((locale.clone(), existing.unwrap_or_default()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ExistingCatalogs { base, mocks })
    }

    /// Merge `fresh` into the base locale catalog and regenerate every mock
    /// locale.
    ///
    /// Each mock locale is derived from the merged base catalog and then
    /// merged with its own existing catalog, whose values win.
    pub fn save_namespace(
        &self,
        namespace: &str,
        existing: ExistingCatalogs,
        fresh: &NamespaceCatalog,
        translator: &dyn MockTranslator,
    ) -> Result<Vec<WrittenCatalog>> {
        let base_path = self.path_for(&self.base_locale, namespace);
        let base = merge_existing(existing.base, fresh.as_map().clone());
        write_catalog(&base_path, &base)?;

        let mut written = vec![WrittenCatalog {
            locale: self.base_locale.clone(),
            path: base_path,
            key_count: NamespaceCatalog::from(base.clone()).key_count(),
        }];

        for (locale, existing) in existing.mocks {
            let path = self.path_for(&locale, namespace);
            let mocked = merge_existing(existing, mock_translate(&base, &locale, translator));
            write_catalog(&path, &mocked)?;

            written.push(WrittenCatalog {
                locale,
                key_count: NamespaceCatalog::from(mocked).key_count(),
                path,
            });
        }

        Ok(written)
    }
}

/// Catalogs already on disk for one namespace, empty where no file exists.
#[derive(Debug, Clone, Default)]
pub struct ExistingCatalogs {
    pub base: Map<String, Value>,
    /// One entry per mock locale, in configuration order.
    pub mocks: Vec<(String, Map<String, Value>)>,
}
