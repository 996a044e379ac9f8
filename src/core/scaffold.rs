//! Scaffold injection: gives the component access to the lookup function.
//!
//! Function components get `const { t } = useTranslation('<ns>');` as the first
//! statement of the component function. Class components have their default
//! export wrapped in `withTranslation('<ns>')(...)`, which injects `t` into
//! props. Either way the matching import of the integration module is added at
//! the top of the file. Nothing is injected into a file without translations.

use swc_common::Spanned;
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BlockStmtOrExpr, DefaultDecl, ExportDefaultDecl, Expr, FnDecl, Lit,
    ModuleDecl, ModuleItem, Pat, Stmt, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::classify::{ComponentContext, unwrap_parens};
use crate::core::edit::SourceEdits;
use crate::core::options::{HOC_WRAPPER, HOOK_FACTORY, LOOKUP_FN, TransformOptions};
use crate::core::parsers::jsx::ParsedSource;

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    /// The file has no translations; nothing was injected.
    NotNeeded,
    Injected,
    /// Translations were recorded but no component function or default export
    /// could host the accessor. The import is still added.
    Missing,
}

/// Where the scaffold goes and how generated strings are quoted.
pub struct ScaffoldTarget<'a> {
    pub namespace: &'a str,
    /// Quote character of the framework import.
    pub quote: char,
}

impl ScaffoldTarget<'_> {
    fn quoted(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push(self.quote);
        for c in value.chars() {
            if c == self.quote || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push(self.quote);
        out
    }

    fn hook_declaration(&self) -> String {
        format!(
            "const {{ {} }} = {}({});",
            LOOKUP_FN,
            HOOK_FACTORY,
            self.quoted(self.namespace)
        )
    }
}

/// Record the scaffold edits for a classified, rewritten file.
///
/// Flips `ctx.scaffold_injected` at most once.
pub fn inject_scaffold(
    parsed: &ParsedSource,
    options: &TransformOptions,
    ctx: &mut ComponentContext,
    target: &ScaffoldTarget,
    edits: &mut SourceEdits,
) -> ScaffoldOutcome {
    if !ctx.has_translations {
        return ScaffoldOutcome::NotNeeded;
    }

    if ctx.is_class_component {
        wrap_default_export(parsed, ctx, target, edits);
    } else if ctx.has_name() {
        let mut injector = HookInjector {
            parsed,
            ctx: &mut *ctx,
            target,
            edits: &mut *edits,
        };
        parsed.module.visit_with(&mut injector);
    }

    insert_import(parsed, options, ctx, target, edits);

    if ctx.scaffold_injected {
        ScaffoldOutcome::Injected
    } else {
        ScaffoldOutcome::Missing
    }
}

fn wrap_default_export(
    parsed: &ParsedSource,
    ctx: &mut ComponentContext,
    target: &ScaffoldTarget,
    edits: &mut SourceEdits,
) {
    let wrapped = parsed.module.body.iter().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => Some(export.expr.span()),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(ExportDefaultDecl {
            decl: decl @ (DefaultDecl::Class(_) | DefaultDecl::Fn(_)),
            ..
        })) => Some(decl.span()),
        _ => None,
    });

    if let Some(span) = wrapped {
        let prefix = format!("{}({})(", HOC_WRAPPER, target.quoted(target.namespace));
        edits.wrap(parsed.range(span), prefix, ")");
        ctx.scaffold_injected = true;
    }
}

/// Offset of the first module item that is not a directive prologue entry.
fn first_item_offset(parsed: &ParsedSource) -> Option<usize> {
    parsed
        .module
        .body
        .iter()
        .find(|item| !is_directive(item))
        .map(|item| parsed.offset(item.span().lo))
}

fn is_directive(item: &ModuleItem) -> bool {
    matches!(
        item,
        ModuleItem::Stmt(Stmt::Expr(stmt)) if matches!(&*stmt.expr, Expr::Lit(Lit::Str(_)))
    )
}

fn insert_import(
    parsed: &ParsedSource,
    options: &TransformOptions,
    ctx: &ComponentContext,
    target: &ScaffoldTarget,
    edits: &mut SourceEdits,
) {
    let binding = if ctx.is_class_component {
        HOC_WRAPPER
    } else {
        HOOK_FACTORY
    };
    let import = format!(
        "import {{ {} }} from {};\n",
        binding,
        target.quoted(&options.i18n_module)
    );

    match first_item_offset(parsed) {
        Some(offset) => edits.insert(offset, import),
        None => {
            // Only directives: the import goes after them on its own line.
            let end = parsed.offset(parsed.module.span.hi);
            edits.insert(end, format!("\n{}", import.trim_end()));
        }
    }
}

/// Finds the component function and injects the hook declaration into it.
struct HookInjector<'a> {
    parsed: &'a ParsedSource,
    ctx: &'a mut ComponentContext,
    target: &'a ScaffoldTarget<'a>,
    edits: &'a mut SourceEdits,
}

impl HookInjector<'_> {
    fn inject_into_block(&mut self, body: &BlockStmt) {
        let declaration = self.target.hook_declaration();
        let first = body.stmts.iter().find(|stmt| {
            !matches!(stmt, Stmt::Expr(expr) if matches!(&*expr.expr, Expr::Lit(Lit::Str(_))))
        });

        match first {
            Some(stmt) => {
                let offset = self.parsed.offset(stmt.span().lo);
                let indent = self.parsed.line_indent(offset).to_string();
                self.edits
                    .insert(offset, format!("{}\n{}", declaration, indent));
            }
            None => {
                let body_range = self.parsed.range(body.span);
                let indent = self.parsed.line_indent(body_range.start).to_string();
                self.edits.insert(
                    body_range.end - 1,
                    format!("\n{}{}{}\n{}", indent, INDENT, declaration, indent),
                );
            }
        }
        self.ctx.scaffold_injected = true;
    }

    fn inject_into_arrow(&mut self, arrow: &ArrowExpr) {
        match &*arrow.body {
            BlockStmtOrExpr::BlockStmt(block) => self.inject_into_block(block),
            BlockStmtOrExpr::Expr(expr) => {
                let range = self.parsed.range(expr.span());
                let indent = self
                    .parsed
                    .line_indent(self.parsed.offset(arrow.span.lo))
                    .to_string();
                let prefix = format!(
                    "{{\n{indent}{INDENT}{}\n{indent}{INDENT}return ",
                    self.target.hook_declaration()
                );
                let suffix = format!(";\n{indent}}}");
                self.edits.wrap(range, prefix, suffix);
                self.ctx.scaffold_injected = true;
            }
        }
    }

    fn is_component_name(&self, name: &str) -> bool {
        !self.ctx.scaffold_injected && name == self.ctx.name
    }
}

impl Visit for HookInjector<'_> {
    fn visit_fn_decl(&mut self, node: &FnDecl) {
        if self.is_component_name(&node.ident.sym)
            && let Some(body) = &node.function.body
        {
            self.inject_into_block(body);
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        if let DefaultDecl::Fn(function) = &node.decl
            && let Some(ident) = &function.ident
            && self.is_component_name(&ident.sym)
            && let Some(body) = &function.function.body
        {
            self.inject_into_block(body);
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Pat::Ident(binding) = &node.name
            && self.is_component_name(&binding.id.sym)
            && let Some(Expr::Arrow(arrow)) = node.init.as_deref().map(unwrap_parens)
        {
            self.inject_into_arrow(arrow);
            return;
        }
        node.visit_children_with(self);
    }
}
