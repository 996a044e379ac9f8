use std::path::{Path, PathBuf};

use anyhow::Result;

use super::super::args::{MigrateArgs, MigrateCommand};
use super::CommandResult;
use crate::config::{CONFIG_FILE_NAME, Config, load_config};
use crate::core::catalog::{CatalogStore, ShuffleTranslator};
use crate::core::{MigrationSettings, TransformOptions, migrate as run_migration};

pub fn migrate(cmd: MigrateCommand) -> Result<CommandResult> {
    let settings = settings_from_args(&cmd.args, Path::new("."))?;
    let report = run_migration(&settings, &ShuffleTranslator)?;
    Ok(CommandResult::migrate(report))
}

/// Resolve the run settings for `start_dir`.
///
/// Priority: CLI arguments > config file > defaults.
pub fn settings_from_args(args: &MigrateArgs, start_dir: &Path) -> Result<MigrationSettings> {
    let common = &args.common;
    let config_result = load_config(start_dir)?;

    if common.verbose && !config_result.from_file {
        eprintln!(
            "Note: No {} found, using default configuration",
            CONFIG_FILE_NAME
        );
    }

    let mut config = config_result.config;
    apply_overrides(&mut config, args);
    config.validate()?;

    let components_root = resolve(start_dir, &config.components_root);
    let locales_root = resolve(start_dir, &config.locales_root);

    Ok(MigrationSettings {
        components_root,
        only: config.only.clone(),
        extensions: config.extensions.clone(),
        ignores: config.ignores.clone(),
        store: CatalogStore {
            locales_root,
            base_locale: config.base_locale.clone(),
            mock_locales: config.mock_locales.clone(),
        },
        options: TransformOptions::from(&config),
        apply: args.apply,
        verbose: common.verbose,
    })
}

fn apply_overrides(config: &mut Config, args: &MigrateArgs) {
    let common = &args.common;

    if let Some(ref components_root) = common.components_root {
        config.components_root = components_root.to_string_lossy().to_string();
    }
    if let Some(ref locales_root) = common.locales_root {
        config.locales_root = locales_root.to_string_lossy().to_string();
    }
    if let Some(ref base_locale) = common.base_locale {
        config.base_locale = base_locale.clone();
    }
    if !args.only.is_empty() {
        config.only = args.only.clone();
    }
    if !args.mock_locale.is_empty() {
        config.mock_locales = args.mock_locale.clone();
    }
}

/// Relative config paths are taken from `start_dir`.
fn resolve(start_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() || start_dir == Path::new(".") {
        path.to_path_buf()
    } else {
        start_dir.join(path.strip_prefix(".").unwrap_or(path))
    }
}
