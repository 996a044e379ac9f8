//! Per-file pipeline: parse, pre-scan, classify, rewrite, scaffold, regenerate.
//!
//! [`transform_source`] does no I/O. The caller decides what to do with the
//! outcome; an `Err` means the file must be left untouched.

use std::fmt;

use anyhow::{Context, Result};

use crate::core::catalog::CatalogEntry;
use crate::core::classify::{ComponentContext, Prescan, classify, prescan};
use crate::core::edit::SourceEdits;
use crate::core::options::{QUIRK_MARKER, TransformOptions};
use crate::core::parsers::jsx::parse_component_source;
use crate::core::rewrite::rewrite_literals;
use crate::core::scaffold::{ScaffoldOutcome, ScaffoldTarget, inject_scaffold};

/// Why a file was left as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file does not import the UI framework.
    NotComponent,
    /// The file already imports the i18n integration.
    AlreadyMigrated,
    /// A component, but without any text to extract.
    NoTranslatableText,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotComponent => "not a component",
            SkipReason::AlreadyMigrated => "already migrated",
            SkipReason::NoTranslatableText => "no translatable text",
        }
    }
}

/// Non-fatal conditions that need a human to look at the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// No naming rule matched; catalog keys start with a bare `.`.
    UnresolvedName,
    /// Lookups were rewritten but no accessor could be injected.
    ScaffoldMissing,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedName => write!(f, "failed to find component name"),
            Diagnostic::ScaffoldMissing => write!(
                f,
                "no component function or default export to attach the translation hook to"
            ),
        }
    }
}

/// A successfully rewritten file.
#[derive(Debug, Clone)]
pub struct TransformedFile {
    pub code: String,
    /// Extracted texts in source order.
    pub entries: Vec<CatalogEntry>,
    pub component: ComponentContext,
    /// The file may break at runtime because a hook ends up inside an
    /// `observer` wrapped function component.
    pub quirk: bool,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone)]
pub enum FileOutcome {
    Skipped {
        reason: SkipReason,
        diagnostics: Vec<Diagnostic>,
    },
    Transformed(TransformedFile),
}

impl FileOutcome {
    fn skipped(reason: SkipReason) -> Self {
        FileOutcome::Skipped {
            reason,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            FileOutcome::Skipped { diagnostics, .. } => diagnostics,
            FileOutcome::Transformed(file) => &file.diagnostics,
        }
    }
}

/// Transform one component file.
///
/// `namespace` is the name of the component directory the file belongs to.
pub fn transform_source(
    source: String,
    path: &str,
    namespace: &str,
    options: &TransformOptions,
) -> Result<FileOutcome> {
    let parsed = parse_component_source(source, path)?;

    let quote = match prescan(&parsed.module, options) {
        Prescan::NotComponent => return Ok(FileOutcome::skipped(SkipReason::NotComponent)),
        Prescan::AlreadyMigrated => return Ok(FileOutcome::skipped(SkipReason::AlreadyMigrated)),
        Prescan::Proceed { quote } => quote,
    };

    let mut ctx = classify(&parsed.module, options);
    let mut diagnostics = Vec::new();
    if !ctx.has_name() {
        diagnostics.push(Diagnostic::UnresolvedName);
    }

    let mut edits = SourceEdits::new();
    let entries = rewrite_literals(&parsed, options, &mut ctx, &mut edits);
    if !ctx.has_translations {
        return Ok(FileOutcome::Skipped {
            reason: SkipReason::NoTranslatableText,
            diagnostics,
        });
    }

    let target = ScaffoldTarget { namespace, quote };
    if inject_scaffold(&parsed, options, &mut ctx, &target, &mut edits) == ScaffoldOutcome::Missing
    {
        diagnostics.push(Diagnostic::ScaffoldMissing);
    }

    let code = edits
        .apply(&parsed.source)
        .with_context(|| format!("Failed to rewrite {}", path))?;

    // A rewrite that no longer parses must never reach the disk.
    parse_component_source(code.clone(), path)
        .with_context(|| format!("Rewritten source of {} is not valid", path))?;

    Ok(FileOutcome::Transformed(TransformedFile {
        quirk: has_observer_quirk(&parsed.source),
        code,
        entries,
        component: ctx,
        diagnostics,
    }))
}

/// `observer` in a file without classes: the wrapped function component now
/// calls a hook, which older `observer` implementations do not support.
pub fn has_observer_quirk(source: &str) -> bool {
    source.contains(QUIRK_MARKER) && !source.contains("class ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(code: &str) -> FileOutcome {
        transform_source(
            code.to_string(),
            "Greeting.jsx",
            "Common",
            &TransformOptions::default(),
        )
        .unwrap()
    }

    fn transformed(code: &str) -> TransformedFile {
        match run(code) {
            FileOutcome::Transformed(file) => file,
            other => panic!("expected a transformed file, got {:?}", other),
        }
    }

    #[test]
    fn test_greeting_scenario() {
        let file = transformed(
            r#"import React from "react";

const Greeting = () => <p>Hello there</p>;

export default Greeting;
"#,
        );

        assert!(file.code.contains("const { t } = useTranslation(\"Common\");"));
        assert!(file.code.contains("t('Greeting.hello_there')"));
        assert!(file.code.starts_with("import { useTranslation } from \"react-i18next\";\n"));
        assert_eq!(
            file.entries,
            vec![CatalogEntry {
                component: "Greeting".to_string(),
                slug: "hello_there".to_string(),
                text: "Hello there".to_string(),
            }]
        );
        assert_eq!(file.component.name, "Greeting");
        assert!(file.component.scaffold_injected);
        assert!(file.diagnostics.is_empty());
        assert!(!file.quirk);
    }

    #[test]
    fn test_byte_order_mark_is_kept() {
        let file = transformed(
            "\u{feff}import React from 'react';\nconst Greeting = () => <p>Hello there</p>;\nexport default Greeting;\n",
        );

        assert!(file.code.starts_with("\u{feff}import { useTranslation } from 'react-i18next';\n"));
        assert!(file.code.contains("return <p>{t('Greeting.hello_there')}</p>;"));
        assert_eq!(file.entries.len(), 1);
    }

    #[test]
    fn test_rewrite_is_not_picked_up_again() {
        let file = transformed("import React from 'react';\nfunction Hi() { return <b>Hi you</b>; }\n");

        let second = run(&file.code);
        assert!(matches!(
            second,
            FileOutcome::Skipped {
                reason: SkipReason::AlreadyMigrated,
                ..
            }
        ));
    }

    #[test]
    fn test_skip_reasons() {
        let not_component = run("import _ from 'lodash';\nexport const Label = () => 'Hello there';\n");
        assert!(matches!(
            not_component,
            FileOutcome::Skipped {
                reason: SkipReason::NotComponent,
                ..
            }
        ));

        let nothing = run("import React from 'react';\nconst Icon = () => <svg viewBox=\"0 0 24 24\" />;\n");
        assert!(matches!(
            nothing,
            FileOutcome::Skipped {
                reason: SkipReason::NoTranslatableText,
                ..
            }
        ));
    }

    #[test]
    fn test_unresolved_name_is_reported_without_text() {
        let outcome = run("import React from 'react';\nexport const icon = <svg />;\n");
        assert_eq!(outcome.diagnostics(), &[Diagnostic::UnresolvedName]);
    }

    #[test]
    fn test_unresolved_name_still_transforms() {
        let file = transformed("import React from 'react';\nexport const Card = () => <p>Hello there</p>;\n");

        assert_eq!(
            file.diagnostics,
            vec![Diagnostic::UnresolvedName, Diagnostic::ScaffoldMissing]
        );
        assert_eq!(file.entries[0].key(), ".hello_there");
    }

    #[test]
    fn test_observer_quirk() {
        let file = transformed(
            r#"import React from "react";
import { observer } from "mobx-react";
const Profile = () => <p>Your profile</p>;
export default observer(Profile);
"#,
        );
        assert!(file.quirk);
    }

    #[test]
    fn test_observer_with_class_is_no_quirk() {
        assert!(has_observer_quirk("observer(() => null)"));
        assert!(!has_observer_quirk("@observer\nclass Store {}"));
        assert!(!has_observer_quirk("const Plain = () => null;"));
    }

    #[test]
    fn test_parse_failure_is_an_error() {
        let result = transform_source(
            "import React from 'react';\nconst = <div>".to_string(),
            "Broken.jsx",
            "Common",
            &TransformOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_typescript_component() {
        let outcome = transform_source(
            "import React from 'react';\nexport default function Title({ text }: { text: string }) {\n    return <h1 title={text}>Welcome home</h1>;\n}\n".to_string(),
            "Title.tsx",
            "Common",
            &TransformOptions::default(),
        )
        .unwrap();

        let FileOutcome::Transformed(file) = outcome else {
            panic!("expected a transformed file");
        };
        assert!(file.code.contains("const { t } = useTranslation('Common');\n    return"));
        assert!(file.code.contains("{t('Title.welcome_home')}"));
    }
}
