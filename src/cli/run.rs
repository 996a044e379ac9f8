use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, migrate::migrate},
};

/// Dispatch to the command handler.
///
/// `Err` means the command could not run at all; per-file failures are part
/// of the returned [`CommandResult`].
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Migrate(cmd)) => migrate(cmd),
        Some(Command::Init) => init(),
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
