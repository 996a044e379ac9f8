//! Run orchestration: namespaces, files, catalogs.
//!
//! Files of a namespace are transformed in parallel (the transform is pure).
//! The existing catalogs of the namespace are then read and validated; when
//! that fails no source of the namespace is written. Otherwise files are
//! written and merged into the namespace catalog one by one in path order. A
//! file is only merged into the catalog after it was written, so a failed file
//! never leaves entries behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;

use crate::core::catalog::{CatalogStore, MockTranslator, NamespaceCatalog, WrittenCatalog};
use crate::core::options::TransformOptions;
use crate::core::persist::write_atomic;
use crate::core::scanner::{IgnoreRules, Namespace, find_namespaces, scan_namespace};
use crate::core::transform::{Diagnostic, FileOutcome, SkipReason, transform_source};

/// Everything one migration run needs.
#[derive(Debug, Clone)]
pub struct MigrationSettings {
    pub components_root: PathBuf,
    pub only: Vec<String>,
    pub extensions: Vec<String>,
    pub ignores: Vec<String>,
    pub store: CatalogStore,
    pub options: TransformOptions,
    /// Write files and catalogs. Without it the run only reports.
    pub apply: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Translated { key_count: usize },
    Skipped(SkipReason),
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// Path relative to the components root, e.g. `Common/Greeting.jsx`.
    pub display_path: String,
    pub status: FileStatus,
    pub diagnostics: Vec<Diagnostic>,
    pub quirk: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NamespaceReport {
    pub name: String,
    pub files: Vec<FileReport>,
    /// Catalog files written (with `apply`).
    pub written: Vec<WrittenCatalog>,
    /// Catalog files that would be written (without `apply`).
    pub planned: Vec<PathBuf>,
    /// Keys extracted from this namespace's files in this run.
    pub key_count: usize,
    pub catalog_error: Option<String>,
    /// Entries the directory walk could not read.
    pub unreadable_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    pub namespaces: Vec<NamespaceReport>,
    pub applied: bool,
}

impl MigrationReport {
    pub fn files(&self) -> impl Iterator<Item = &FileReport> {
        self.namespaces.iter().flat_map(|ns| ns.files.iter())
    }

    pub fn translated_count(&self) -> usize {
        self.files()
            .filter(|f| matches!(f.status, FileStatus::Translated { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.files()
            .filter(|f| matches!(f.status, FileStatus::Skipped(_)))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.files()
            .filter(|f| matches!(f.status, FileStatus::Failed { .. }))
            .count()
    }

    pub fn catalog_error_count(&self) -> usize {
        self.namespaces
            .iter()
            .filter(|ns| ns.catalog_error.is_some())
            .count()
    }

    pub fn key_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.key_count).sum()
    }

    /// Files flagged by the observer quirk heuristic.
    pub fn quirk_files(&self) -> Vec<&str> {
        self.files()
            .filter(|f| f.quirk)
            .map(|f| f.display_path.as_str())
            .collect()
    }

    /// Number of failures that make the run unsuccessful.
    pub fn failure_count(&self) -> usize {
        self.failed_count() + self.catalog_error_count()
    }
}

/// Migrate every namespace below the components root.
///
/// Errors are only returned when the run cannot start (components root
/// unreadable). Per-file and per-catalog failures are recorded in the report.
pub fn migrate(
    settings: &MigrationSettings,
    translator: &dyn MockTranslator,
) -> Result<MigrationReport> {
    let namespaces = find_namespaces(&settings.components_root, &settings.only)?;
    let ignores = IgnoreRules::new(&settings.components_root, &settings.ignores, settings.verbose);

    let namespaces = namespaces
        .iter()
        .map(|namespace| migrate_namespace(settings, namespace, &ignores, translator))
        .collect();

    Ok(MigrationReport {
        namespaces,
        applied: settings.apply,
    })
}

fn migrate_namespace(
    settings: &MigrationSettings,
    namespace: &Namespace,
    ignores: &IgnoreRules,
    translator: &dyn MockTranslator,
) -> NamespaceReport {
    let scan = scan_namespace(
        &namespace.dir,
        &settings.extensions,
        ignores,
        settings.verbose,
    );

    let outcomes: Vec<(PathBuf, Result<FileOutcome>)> = scan
        .files
        .into_par_iter()
        .map(|path| {
            let outcome = transform_file(&path, &namespace.name, &settings.options);
            (path, outcome)
        })
        .collect();

    let needs_catalog = outcomes
        .iter()
        .any(|(_, outcome)| matches!(outcome, Ok(FileOutcome::Transformed(_))));
    let (existing, blocked) = if needs_catalog {
        match settings.store.load_existing(&namespace.name) {
            Ok(existing) => (Some(existing), None),
            Err(e) => (None, Some(format!("{:#}", e))),
        }
    } else {
        (None, None)
    };

    let mut catalog = NamespaceCatalog::new();
    let mut report = NamespaceReport {
        name: namespace.name.clone(),
        unreadable_count: scan.skipped_count,
        ..Default::default()
    };

    for (path, outcome) in outcomes {
        let display_path = relative_display(&settings.components_root, &path);
        let file_report = match outcome {
            Ok(FileOutcome::Skipped {
                reason,
                diagnostics,
            }) => FileReport {
                path,
                display_path,
                status: FileStatus::Skipped(reason),
                diagnostics,
                quirk: false,
            },
            Ok(FileOutcome::Transformed(file)) => {
                let written = if let Some(reason) = &blocked {
                    Err(anyhow!(
                        "Existing catalog of {} cannot be updated: {}",
                        namespace.name,
                        reason
                    ))
                } else if settings.apply {
                    write_atomic(&path, file.code.as_bytes())
                } else {
                    Ok(())
                };
                let status = match written {
                    Ok(()) => {
                        catalog.extend(&file.entries);
                        report.key_count += file.entries.len();
                        FileStatus::Translated {
                            key_count: file.entries.len(),
                        }
                    }
                    Err(e) => FileStatus::Failed {
                        reason: format!("{:#}", e),
                    },
                };
                FileReport {
                    path,
                    display_path,
                    quirk: file.quirk && matches!(status, FileStatus::Translated { .. }),
                    status,
                    diagnostics: file.diagnostics,
                }
            }
            Err(e) => FileReport {
                path,
                display_path,
                status: FileStatus::Failed {
                    reason: format!("{:#}", e),
                },
                diagnostics: Vec::new(),
                quirk: false,
            },
        };
        report.files.push(file_report);
    }

    let Some(existing) = existing else {
        return report;
    };
    if catalog.is_empty() {
        return report;
    }

    if settings.apply {
        match settings
            .store
            .save_namespace(&namespace.name, existing, &catalog, translator)
        {
            Ok(written) => report.written = written,
            Err(e) => report.catalog_error = Some(format!("{:#}", e)),
        }
    } else {
        report.planned = settings.store.paths_for(&namespace.name);
    }

    report
}

fn transform_file(path: &Path, namespace: &str, options: &TransformOptions) -> Result<FileOutcome> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    transform_source(source, &path.to_string_lossy(), namespace, options)
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
