use crate::core::MigrationReport;

#[derive(Debug)]
pub enum CommandSummary {
    Migrate(MigrationReport),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    /// Set when the config file could not be created.
    pub error: Option<String>,
}

/// Result of running i18nize commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Failed files, failed catalogs and init errors. Any error makes the run
    /// exit with status 1.
    pub error_count: usize,
}

impl CommandResult {
    pub fn migrate(report: MigrationReport) -> Self {
        Self {
            error_count: report.failure_count(),
            summary: CommandSummary::Migrate(report),
        }
    }

    pub fn init(summary: InitSummary) -> Self {
        Self {
            error_count: usize::from(summary.error.is_some()),
            summary: CommandSummary::Init(summary),
        }
    }
}
