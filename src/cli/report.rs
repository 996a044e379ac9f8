//! Report formatting and printing utilities.
//!
//! Separate from the engine so i18nize can be used as a library. Every
//! printer takes its sinks as parameters; `print` binds them to stdout and
//! stderr.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{FileReport, FileStatus, MigrationReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print a command result, regular output to `out` and warnings to `err`.
pub fn print_to<W: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Migrate(report) => print_migration(report, verbose, out, err),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

fn print_migration<W: Write, E: Write>(
    report: &MigrationReport,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) {
    for file in report.files() {
        print_file(file, report.applied, verbose, out);
        for diagnostic in &file.diagnostics {
            let _ = writeln!(
                err,
                "{} {}: {}",
                "warning:".bold().yellow(),
                file.display_path,
                diagnostic
            );
        }
    }

    for namespace in &report.namespaces {
        if let Some(reason) = &namespace.catalog_error {
            let _ = writeln!(
                out,
                "{} {} catalog of {}: {}",
                FAILURE_MARK.red(),
                "Failed:".red().bold(),
                namespace.name,
                reason
            );
        }
        if verbose {
            for written in &namespace.written {
                let _ = writeln!(
                    out,
                    "{} Wrote {} ({})",
                    SUCCESS_MARK.green(),
                    written.path.display(),
                    keys(written.key_count)
                );
            }
        }
    }

    let unreadable: usize = report.namespaces.iter().map(|ns| ns.unreadable_count).sum();
    if unreadable > 0 {
        let _ = writeln!(
            err,
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            unreadable,
            if verbose { "" } else { " (use -v for details)" }
        );
    }

    print_summary(report, out);
    print_quirks(report, out);
}

fn print_file<W: Write>(file: &FileReport, applied: bool, verbose: bool, out: &mut W) {
    match &file.status {
        FileStatus::Translated { key_count } => {
            let label = if applied {
                format!("{} {}", SUCCESS_MARK.green(), "Translated:".green())
            } else {
                format!("{}", "Would translate:".yellow())
            };
            let _ = writeln!(
                out,
                "{} {} ({})",
                label,
                file.display_path,
                keys(*key_count)
            );
        }
        FileStatus::Failed { reason } => {
            let _ = writeln!(
                out,
                "{} {} {}: {}",
                FAILURE_MARK.red(),
                "Failed:".red().bold(),
                file.display_path,
                reason
            );
        }
        FileStatus::Skipped(reason) if verbose => {
            let _ = writeln!(
                out,
                "{}",
                format!("  skipped {} ({})", file.display_path, reason.as_str()).dimmed()
            );
        }
        FileStatus::Skipped(_) => {}
    }
}

fn print_summary<W: Write>(report: &MigrationReport, out: &mut W) {
    let translated = report.translated_count();
    let failed = report.failed_count();
    let key_count = report.key_count();

    if translated == 0 && failed == 0 {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} file(s) - nothing to translate",
                report.files().count()
            )
            .green()
        );
        return;
    }

    if report.applied {
        let catalogs: usize = report.namespaces.iter().map(|ns| ns.written.len()).sum();
        let _ = writeln!(
            out,
            "{} {} file(s), {} into {} catalog file(s).",
            "Translated".green().bold(),
            translated,
            keys(key_count),
            catalogs
        );
    } else if translated > 0 {
        let catalogs: usize = report.namespaces.iter().map(|ns| ns.planned.len()).sum();
        let _ = writeln!(
            out,
            "{} {} file(s), {} into {} catalog file(s).",
            "Would translate".yellow().bold(),
            translated,
            keys(key_count),
            catalogs
        );
        let _ = writeln!(
            out,
            "Run with {} to rewrite these files and write the catalogs.",
            "--apply".cyan()
        );
    }

    if failed > 0 {
        let _ = writeln!(
            out,
            "{} {} file(s) could not be migrated and were left untouched.",
            FAILURE_MARK.red(),
            failed
        );
    }
}

fn print_quirks<W: Write>(report: &MigrationReport, out: &mut W) {
    let quirks = report.quirk_files();
    if quirks.is_empty() {
        return;
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} The following files may contain observer errors:",
        "note:".bold()
    );
    for path in quirks {
        let _ = writeln!(out, "  {}", path);
    }
}

fn print_init<W: Write, E: Write>(summary: &InitSummary, out: &mut W, err: &mut E) {
    if let Some(error) = &summary.error {
        let _ = writeln!(err, "Error: {}", error);
    } else if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn keys(count: usize) -> String {
    format!("{} {}", count, if count == 1 { "key" } else { "keys" })
}
