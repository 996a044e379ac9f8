//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `migrate`: Rewrite components and write translation catalogs
//! - `init`: Initialize the i18nize configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Migrate(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Components directory whose subdirectories are the namespaces (overrides config file)
    #[arg(long)]
    pub components_root: Option<PathBuf>,

    /// Directory holding one catalog directory per locale (overrides config file)
    #[arg(long)]
    pub locales_root: Option<PathBuf>,

    /// Locale receiving the extracted texts (overrides config file)
    #[arg(long)]
    pub base_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually rewrite files and write catalogs (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Only migrate these component directories (default: all)
    /// Can be specified multiple times: --only Customer --only /Common
    #[arg(long)]
    pub only: Vec<String>,

    /// Locales receiving placeholder catalogs (overrides config file)
    /// Can be specified multiple times: --mock-locale de --mock-locale fr
    #[arg(long)]
    pub mock_locale: Vec<String>,
}

#[derive(Debug, Args)]
pub struct MigrateCommand {
    #[command(flatten)]
    pub args: MigrateArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract component text into JSON catalogs and rewrite components to react-i18next
    Migrate(MigrateCommand),
    /// Initialize a new .i18nizerc.json configuration file
    Init,
}
