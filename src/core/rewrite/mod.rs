//! Literal locator and rewriter.
//!
//! One traversal over the module finds user-visible text in three positions and
//! records a lookup call in its place:
//!
//! - **Text content** between markup tags: `<p>Hello there</p>`
//!   becomes `<p>{t('Greeting.hello_there')}</p>`.
//! - **Conditional strings**: a string branch of a conditional sitting directly
//!   in an expression container: `{ok ? "All done" : "Not yet"}`.
//! - **Attribute strings**: `caption="Submit now"` becomes
//!   `caption={t('Form.submit_now')}`.
//!
//! Every match yields a [`CatalogEntry`] whose key is exactly the one used at
//! the call site.

mod attributes;
mod slug;

use std::ops::Range;

use swc_ecma_ast::{
    Expr, JSXAttr, JSXAttrName, JSXAttrValue, JSXExpr, JSXExprContainer, JSXText, Lit, Str,
};
use swc_ecma_visit::{Visit, VisitWith};

pub use attributes::is_known_attribute;
pub use slug::slugify;

use crate::core::catalog::CatalogEntry;
use crate::core::classify::{ComponentContext, unwrap_parens};
use crate::core::edit::SourceEdits;
use crate::core::options::{LOOKUP_FN, TransformOptions};
use crate::core::parsers::jsx::ParsedSource;
use crate::utils::{contains_alphabetic, is_multi_word};

/// Record a rewrite for every translatable literal of the module.
///
/// Sets `ctx.has_translations` when at least one literal was found. Entries
/// are returned in source order.
pub fn rewrite_literals(
    parsed: &ParsedSource,
    options: &TransformOptions,
    ctx: &mut ComponentContext,
    edits: &mut SourceEdits,
) -> Vec<CatalogEntry> {
    let mut rewriter = LiteralRewriter {
        parsed,
        options,
        ctx,
        edits,
        entries: Vec::new(),
    };
    parsed.module.visit_with(&mut rewriter);
    rewriter.entries
}

struct LiteralRewriter<'a> {
    parsed: &'a ParsedSource,
    options: &'a TransformOptions,
    ctx: &'a mut ComponentContext,
    edits: &'a mut SourceEdits,
    entries: Vec<CatalogEntry>,
}

impl LiteralRewriter<'_> {
    /// Register `text` and return the lookup call that replaces it, or `None`
    /// when the text has no word to derive a key from.
    fn extract(&mut self, text: &str) -> Option<String> {
        let slug = slugify(text);
        if slug.is_empty() {
            return None;
        }

        let entry = CatalogEntry {
            component: self.ctx.name.clone(),
            slug,
            text: text.to_string(),
        };
        let call = if self.ctx.is_class_component {
            format!("this.props.{}('{}')", LOOKUP_FN, entry.key())
        } else {
            format!("{}('{}')", LOOKUP_FN, entry.key())
        };

        self.entries.push(entry);
        self.ctx.has_translations = true;
        Some(call)
    }

    fn rewrite_conditional_branch(&mut self, branch: &Expr) {
        let Expr::Lit(Lit::Str(s)) = unwrap_parens(branch) else {
            return;
        };
        let Some(value) = s.value.as_str() else {
            return;
        };
        if !is_multi_word(value) {
            return;
        }
        if let Some(call) = self.extract(value.trim()) {
            self.edits.replace(self.parsed.range(s.span), call);
        }
    }

    fn rewrite_attribute_value(&mut self, name: &str, s: &Str) {
        let Some(value) = s.value.as_str() else {
            return;
        };
        let translatable = if self.options.is_translatable_attribute(name) {
            !value.trim().is_empty()
        } else {
            !is_known_attribute(name) && is_multi_word(value)
        };
        if !translatable {
            return;
        }
        if let Some(call) = self.extract(value.trim()) {
            self.edits
                .replace(self.parsed.range(s.span), format!("{{{}}}", call));
        }
    }
}

/// Byte range of `text` without its surrounding whitespace, relative to `range`.
fn trimmed_range(text: &str, range: Range<usize>) -> Range<usize> {
    let leading = text.len() - text.trim_start().len();
    range.start + leading..range.start + text.trim_end().len()
}

impl Visit for LiteralRewriter<'_> {
    fn visit_jsx_text(&mut self, node: &JSXText) {
        let raw = self.parsed.text(node.span);
        let trimmed = raw.trim();
        if trimmed.is_empty() || !contains_alphabetic(trimmed) {
            return;
        }

        let range = trimmed_range(raw, self.parsed.range(node.span));
        if let Some(call) = self.extract(node.value.trim()) {
            self.edits.replace(range, format!("{{{}}}", call));
        }
    }

    fn visit_jsx_expr_container(&mut self, node: &JSXExprContainer) {
        if let JSXExpr::Expr(expr) = &node.expr
            && let Expr::Cond(cond) = unwrap_parens(expr)
        {
            self.rewrite_conditional_branch(&cond.cons);
            self.rewrite_conditional_branch(&cond.alt);
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        if let Some(JSXAttrValue::Str(s)) = &node.value {
            let name = match &node.name {
                JSXAttrName::Ident(ident) => ident.sym.to_string(),
                JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
            };
            self.rewrite_attribute_value(&name, s);
            return;
        }
        node.visit_children_with(self);
    }
}
