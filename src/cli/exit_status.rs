use std::process::ExitCode;

use super::commands::CommandResult;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, every file was handled
/// - `Failure` (1): Command completed but some files or catalogs failed
/// - `Error` (2): Command could not run (config error, unreadable components directory, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, every file was handled.
    Success,
    /// Command completed but some files or catalogs failed.
    Failure,
    /// Command could not run.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

impl From<&CommandResult> for ExitStatus {
    fn from(result: &CommandResult) -> Self {
        if result.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::InitSummary;

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }

    #[test]
    fn exit_status_from_result() {
        let ok = CommandResult::init(InitSummary {
            created: true,
            error: None,
        });
        let failed = CommandResult::init(InitSummary {
            created: false,
            error: Some("exists".to_string()),
        });

        assert_eq!(ExitStatus::from(&ok), ExitStatus::Success);
        assert_eq!(ExitStatus::from(&failed), ExitStatus::Failure);
    }
}
