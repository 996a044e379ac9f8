use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::{CommandResult, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default configuration into the current directory.
pub fn init() -> Result<CommandResult> {
    init_in(Path::new("."))
}

pub fn init_in(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(CommandResult::init(InitSummary {
            created: false,
            error: Some(format!("{} already exists", CONFIG_FILE_NAME)),
        }));
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write file: {}", config_path.display()))?;

    Ok(CommandResult::init(InitSummary {
        created: true,
        error: None,
    }))
}
