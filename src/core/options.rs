use crate::config::Config;

/// Name of the lookup function injected into components.
pub const LOOKUP_FN: &str = "t";

/// Hook factory imported for function components.
pub const HOOK_FACTORY: &str = "useTranslation";

/// Higher-order wrapper imported for class components.
pub const HOC_WRAPPER: &str = "withTranslation";

/// Marker of the higher-order component that breaks hooks in function
/// components when it wraps them.
pub const QUIRK_MARKER: &str = "observer";

/// Per-run settings consumed by the per-file pipeline.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Module whose import marks a file as a UI component.
    pub framework_module: String,
    /// Module whose import marks a file as already migrated.
    pub i18n_module: String,
    /// Attributes translated even when their value is a single word.
    pub translatable_attributes: Vec<String>,
    /// Superclass names that make a class a component.
    pub component_base_classes: Vec<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for TransformOptions {
    fn from(config: &Config) -> Self {
        Self {
            framework_module: config.framework_module.clone(),
            i18n_module: config.i18n_module.clone(),
            translatable_attributes: config.translatable_attributes.clone(),
            component_base_classes: config.component_base_classes.clone(),
        }
    }
}

impl TransformOptions {
    pub fn is_translatable_attribute(&self, name: &str) -> bool {
        self.translatable_attributes.iter().any(|a| a == name)
    }

    pub fn is_component_base_class(&self, name: &str) -> bool {
        self.component_base_classes.iter().any(|c| c == name)
    }
}
