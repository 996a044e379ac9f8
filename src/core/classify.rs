//! Component classification.
//!
//! Two read-only passes over a parsed module:
//!
//! 1. [`prescan`] decides whether the file is eligible at all (imports the UI
//!    framework) or was migrated before (imports the i18n integration).
//! 2. [`classify`] resolves the component name and flavor by evaluating an
//!    ordered list of [`NameRule`]s and keeping the first match.

use swc_ecma_ast::{
    ClassDecl, Decl, DefaultDecl, ExportDefaultDecl, Expr, MemberProp, Module, ModuleDecl,
    ModuleItem, Pat, Stmt, Str,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::options::TransformOptions;
use crate::utils::starts_with_uppercase;

/// Outcome of the eligibility pre-scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prescan {
    /// No import of the UI framework: not a component file.
    NotComponent,
    /// The file already imports the i18n integration module.
    AlreadyMigrated,
    /// Eligible. `quote` is the quote character the framework import uses.
    Proceed { quote: char },
}

/// Working context for one component file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentContext {
    /// Component name used as the first catalog key segment. Empty when no
    /// naming rule matched.
    pub name: String,
    pub is_class_component: bool,
    pub scaffold_injected: bool,
    pub has_translations: bool,
}

impl ComponentContext {
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Module-level sources of `import` and `export .. from` declarations.
fn module_sources(module: &Module) -> impl Iterator<Item = &Str> {
    module.body.iter().filter_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(&*import.src),
        ModuleItem::ModuleDecl(ModuleDecl::ExportAll(export)) => Some(&*export.src),
        ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(export)) => export.src.as_deref(),
        _ => None,
    })
}

/// Decide eligibility before anything is rewritten.
///
/// `AlreadyMigrated` takes precedence over eligibility so a migrated file is
/// never touched again.
pub fn prescan(module: &Module, options: &TransformOptions) -> Prescan {
    let imports_i18n = module.body.iter().any(|item| {
        matches!(
            item,
            ModuleItem::ModuleDecl(ModuleDecl::Import(import))
                if import.src.value.as_str() == Some(options.i18n_module.as_str())
        )
    });
    if imports_i18n {
        return Prescan::AlreadyMigrated;
    }

    module_sources(module)
        .find(|src| src.value.as_str() == Some(options.framework_module.as_str()))
        .map_or(Prescan::NotComponent, |src| Prescan::Proceed {
            quote: quote_of(src),
        })
}

fn quote_of(src: &Str) -> char {
    src.raw
        .as_ref()
        .and_then(|raw| raw.chars().next())
        .filter(|c| *c == '\'' || *c == '"')
        .unwrap_or('"')
}

/// A naming rule: inspects the module and returns the component name and
/// whether it is a class component.
pub struct NameRule {
    pub label: &'static str,
    pub resolve: fn(&Module, &TransformOptions) -> Option<(String, bool)>,
}

/// Naming rules in priority order.
pub const NAME_RULES: &[NameRule] = &[
    NameRule {
        label: "class component",
        resolve: class_component_name,
    },
    NameRule {
        label: "default export",
        resolve: default_export_name,
    },
    NameRule {
        label: "top-level arrow function",
        resolve: top_level_arrow_name,
    },
    NameRule {
        label: "top-level function",
        resolve: top_level_function_name,
    },
];

/// Resolve the component name and flavor.
///
/// Returns a context with an empty name when no rule matches; the caller
/// reports that as a diagnostic and continues.
pub fn classify(module: &Module, options: &TransformOptions) -> ComponentContext {
    NAME_RULES
        .iter()
        .find_map(|rule| (rule.resolve)(module, options))
        .map(|(name, is_class_component)| ComponentContext {
            name,
            is_class_component,
            ..Default::default()
        })
        .unwrap_or_default()
}

/// Rule 1: a class extending a known component base class, anywhere in the module.
fn class_component_name(module: &Module, options: &TransformOptions) -> Option<(String, bool)> {
    let mut finder = ComponentClassFinder {
        options,
        found: None,
    };
    module.visit_with(&mut finder);
    finder.found.map(|name| (name, true))
}

struct ComponentClassFinder<'a> {
    options: &'a TransformOptions,
    found: Option<String>,
}

impl ComponentClassFinder<'_> {
    fn extends_component(&self, super_class: Option<&Expr>) -> bool {
        match super_class {
            Some(Expr::Ident(ident)) => self.options.is_component_base_class(&ident.sym),
            Some(Expr::Member(member)) => {
                let prop_matches = matches!(
                    &member.prop,
                    MemberProp::Ident(prop) if self.options.is_component_base_class(&prop.sym)
                );
                let obj_matches = matches!(
                    &*member.obj,
                    Expr::Ident(obj) if self.options.is_component_base_class(&obj.sym)
                );
                prop_matches || obj_matches
            }
            _ => false,
        }
    }
}

impl Visit for ComponentClassFinder<'_> {
    fn visit_class_decl(&mut self, node: &ClassDecl) {
        if self.found.is_none() && self.extends_component(node.class.super_class.as_deref()) {
            self.found = Some(node.ident.sym.to_string());
        }
        node.visit_children_with(self);
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        if let DefaultDecl::Class(class) = &node.decl
            && let Some(ident) = &class.ident
            && self.found.is_none()
            && self.extends_component(class.class.super_class.as_deref())
        {
            self.found = Some(ident.sym.to_string());
        }
        node.visit_children_with(self);
    }
}

/// Rule 2: `export default <Identifier>` or `export default function <Identifier>`.
fn default_export_name(module: &Module, _: &TransformOptions) -> Option<(String, bool)> {
    module.body.iter().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
            match unwrap_parens(&export.expr) {
                Expr::Ident(ident) => Some((ident.sym.to_string(), false)),
                _ => None,
            }
        }
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(ExportDefaultDecl {
            decl: DefaultDecl::Fn(function),
            ..
        })) => function
            .ident
            .as_ref()
            .map(|ident| (ident.sym.to_string(), false)),
        _ => None,
    })
}

/// Rule 3: `const Name = () => ...` as a bare module-level statement.
fn top_level_arrow_name(module: &Module, _: &TransformOptions) -> Option<(String, bool)> {
    module.body.iter().find_map(|item| {
        let ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) = item else {
            return None;
        };
        var.decls.iter().find_map(|decl| match (&decl.name, decl.init.as_deref()) {
            (Pat::Ident(binding), Some(Expr::Arrow(_)))
                if starts_with_uppercase(&binding.id.sym) =>
            {
                Some((binding.id.sym.to_string(), false))
            }
            _ => None,
        })
    })
}

/// Rule 4: `function Name() {}` as a bare module-level statement.
fn top_level_function_name(module: &Module, _: &TransformOptions) -> Option<(String, bool)> {
    module.body.iter().find_map(|item| match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::Fn(function)))
            if starts_with_uppercase(&function.ident.sym) =>
        {
            Some((function.ident.sym.to_string(), false))
        }
        _ => None,
    })
}

pub(crate) fn unwrap_parens(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_parens(&paren.expr),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::parsers::jsx::parse_component_source;

    fn parse(code: &str) -> Module {
        parse_component_source(code.to_string(), "Test.js")
            .unwrap()
            .module
    }

    fn classify_code(code: &str) -> ComponentContext {
        classify(&parse(code), &TransformOptions::default())
    }

    #[test]
    fn test_prescan_not_component() {
        let module = parse("import lodash from 'lodash';\nexport const x = 1;");
        assert_eq!(
            prescan(&module, &TransformOptions::default()),
            Prescan::NotComponent
        );
    }

    #[test]
    fn test_prescan_already_migrated() {
        let module = parse(
            "import React from 'react';\nimport { useTranslation } from 'react-i18next';",
        );
        assert_eq!(
            prescan(&module, &TransformOptions::default()),
            Prescan::AlreadyMigrated
        );
    }

    #[test]
    fn test_prescan_already_migrated_without_framework() {
        let module = parse("import { withTranslation } from \"react-i18next\";");
        assert_eq!(
            prescan(&module, &TransformOptions::default()),
            Prescan::AlreadyMigrated
        );
    }

    #[test]
    fn test_prescan_proceed_keeps_quote_style() {
        let single = parse("import React from 'react';");
        let double = parse("import React, { useState } from \"react\";");
        let options = TransformOptions::default();

        assert_eq!(prescan(&single, &options), Prescan::Proceed { quote: '\'' });
        assert_eq!(prescan(&double, &options), Prescan::Proceed { quote: '"' });
    }

    #[test]
    fn test_prescan_reexport_counts_as_framework_import() {
        let module = parse("export { Fragment } from 'react';");
        assert!(matches!(
            prescan(&module, &TransformOptions::default()),
            Prescan::Proceed { .. }
        ));
    }

    #[test]
    fn test_class_component_with_member_superclass() {
        let ctx = classify_code(
            r#"
import React from "react";
class Header extends React.Component {
    render() { return <h1>Title here</h1>; }
}
export default Header;
"#,
        );
        assert_eq!(ctx.name, "Header");
        assert!(ctx.is_class_component);
    }

    #[test]
    fn test_class_component_with_bare_superclass() {
        let ctx = classify_code(
            r#"
import React, { PureComponent } from "react";
export class List extends PureComponent {}
"#,
        );
        assert_eq!(ctx.name, "List");
        assert!(ctx.is_class_component);
    }

    #[test]
    fn test_named_default_export_class() {
        let ctx = classify_code(
            "import React from 'react';\nexport default class Modal extends React.PureComponent {}",
        );
        assert_eq!(ctx.name, "Modal");
        assert!(ctx.is_class_component);
    }

    #[test]
    fn test_class_rule_beats_default_export() {
        let ctx = classify_code(
            r#"
import React from "react";
export default Wrapped;
class Inner extends React.Component {}
"#,
        );
        assert_eq!(ctx.name, "Inner");
        assert!(ctx.is_class_component);
    }

    #[test]
    fn test_unrelated_class_is_not_component() {
        let ctx = classify_code(
            r#"
import React from "react";
class Store extends BaseStore {}
export default Store;
"#,
        );
        assert_eq!(ctx.name, "Store");
        assert!(!ctx.is_class_component);
    }

    #[test]
    fn test_default_export_beats_arrow() {
        let ctx = classify_code(
            r#"
import React from "react";
const Helper = () => null;
const Greeting = () => <p>Hi</p>;
export default Greeting;
"#,
        );
        assert_eq!(ctx.name, "Greeting");
        assert!(!ctx.is_class_component);
    }

    #[test]
    fn test_named_default_export_function() {
        let ctx = classify_code(
            "import React from 'react';\nfunction Helper() {}\nexport default function Panel() {}",
        );
        assert_eq!(ctx.name, "Panel");
        assert!(!ctx.is_class_component);
    }

    #[test]
    fn test_top_level_arrow() {
        let ctx = classify_code(
            r#"
import React from "react";
const helper = () => null;
const Card = ({ title }) => <div>{title}</div>;
"#,
        );
        assert_eq!(ctx.name, "Card");
    }

    #[test]
    fn test_exported_arrow_is_not_top_level() {
        let ctx = classify_code(
            "import React from 'react';\nexport const Card = () => <div />;",
        );
        assert!(!ctx.has_name());
    }

    #[test]
    fn test_top_level_function() {
        let ctx = classify_code(
            r#"
import React from "react";
function format() {}
function Footer() { return <footer />; }
"#,
        );
        assert_eq!(ctx.name, "Footer");
    }

    #[test]
    fn test_no_rule_matches() {
        let ctx = classify_code(
            "import React from 'react';\nexport default connect(mapState)(function () {});",
        );
        assert_eq!(ctx, ComponentContext::default());
        assert!(!ctx.has_name());
    }
}
