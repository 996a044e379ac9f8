use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".i18nizerc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory whose immediate subdirectories are the namespaces.
    #[serde(default = "default_components_root")]
    pub components_root: String,
    /// Directory holding one subdirectory of catalogs per locale.
    #[serde(default = "default_locales_root")]
    pub locales_root: String,
    #[serde(default = "default_base_locale")]
    pub base_locale: String,
    /// Locales that receive placeholder catalogs derived from the base locale.
    #[serde(default = "default_mock_locales")]
    pub mock_locales: Vec<String>,
    /// Namespace allow-list. Empty means every namespace.
    #[serde(default)]
    pub only: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_framework_module")]
    pub framework_module: String,
    #[serde(default = "default_i18n_module")]
    pub i18n_module: String,
    #[serde(default = "default_translatable_attributes")]
    pub translatable_attributes: Vec<String>,
    #[serde(default = "default_component_base_classes")]
    pub component_base_classes: Vec<String>,
}

fn default_components_root() -> String {
    "./src/components".to_string()
}

fn default_locales_root() -> String {
    "./public/static/locales".to_string()
}

fn default_base_locale() -> String {
    "en".to_string()
}

fn default_mock_locales() -> Vec<String> {
    vec!["de".to_string()]
}

fn default_extensions() -> Vec<String> {
    ["js", "jsx", "ts", "tsx"].map(String::from).to_vec()
}

fn default_framework_module() -> String {
    "react".to_string()
}

fn default_i18n_module() -> String {
    "react-i18next".to_string()
}

fn default_translatable_attributes() -> Vec<String> {
    ["text", "placeholder", "label"].map(String::from).to_vec()
}

fn default_component_base_classes() -> Vec<String> {
    ["PureComponent", "React", "Component"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            components_root: default_components_root(),
            locales_root: default_locales_root(),
            base_locale: default_base_locale(),
            mock_locales: default_mock_locales(),
            only: Vec::new(),
            extensions: default_extensions(),
            ignores: Vec::new(),
            framework_module: default_framework_module(),
            i18n_module: default_i18n_module(),
            translatable_attributes: default_translatable_attributes(),
            component_base_classes: default_component_base_classes(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid, a locale
    /// name is empty, or no file extension is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.base_locale.trim().is_empty() {
            bail!("'baseLocale' must not be empty");
        }
        if self.mock_locales.iter().any(|l| l.trim().is_empty()) {
            bail!("'mockLocales' must not contain empty locale names");
        }
        if self.mock_locales.contains(&self.base_locale) {
            bail!(
                "'mockLocales' must not contain the base locale \"{}\"",
                self.base_locale
            );
        }
        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
