use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// A component directory; its name is the catalog namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub dir: PathBuf,
}

/// Immediate subdirectories of `components_root`, sorted by name.
///
/// A non-empty `only` keeps the directories named in it; entries may carry a
/// leading `/` (`"/Customer"`).
pub fn find_namespaces(components_root: &Path, only: &[String]) -> Result<Vec<Namespace>> {
    let entries = fs::read_dir(components_root).with_context(|| {
        format!(
            "Failed to read components directory: {}",
            components_root.display()
        )
    })?;

    let mut namespaces = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| {
            format!("Failed to read entry in {}", components_root.display())
        })?;
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !only.is_empty() && !only.iter().any(|o| o.trim_start_matches('/') == name) {
            continue;
        }
        namespaces.push(Namespace { name, dir });
    }

    namespaces.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(namespaces)
}

/// Result of scanning one namespace directory.
pub struct ScanResult {
    /// Candidate source files, sorted by path.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Ignore rules: glob patterns match the full path, literal entries are path
/// prefixes relative to `base_dir`.
pub struct IgnoreRules {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    pub fn new(base_dir: &Path, ignore_patterns: &[String], verbose: bool) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for p in ignore_patterns {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => patterns.push(pattern),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid ignore pattern '{}': {}",
                                "warning:".bold().yellow(),
                                p,
                                e
                            );
                        }
                    }
                }
            } else {
                literal_paths.push(base_dir.join(p));
            }
        }

        Self {
            literal_paths,
            patterns,
        }
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.literal_paths.iter().any(|p| path.starts_with(p)) {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

/// Recursively collect source files below `dir`.
pub fn scan_namespace(
    dir: &Path,
    extensions: &[String],
    ignores: &IgnoreRules,
    verbose: bool,
) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();

        if ignores.is_ignored(path) {
            continue;
        }

        if entry.file_type().is_file() && has_extension(path, extensions) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
