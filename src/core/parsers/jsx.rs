use std::ops::Range;
use std::path::Path;

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, Globals, SourceMap, Span};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// A parsed component file.
///
/// The module is never mutated: rewrites are recorded against the original
/// text (see [`crate::core::edit::SourceEdits`]), so `source` stays the
/// reference every span refers to.
#[derive(Debug)]
pub struct ParsedSource {
    pub module: Module,
    pub source: String,
    start_pos: BytePos,
    /// Bytes of `source` the source map does not see (a leading BOM).
    skipped: usize,
}

impl ParsedSource {
    /// Byte offset of a position in `source`.
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.start_pos.0) as usize + self.skipped
    }

    /// Byte range of a span in `source`.
    pub fn range(&self, span: Span) -> Range<usize> {
        self.offset(span.lo)..self.offset(span.hi)
    }

    /// Original text covered by a span.
    pub fn text(&self, span: Span) -> &str {
        &self.source[self.range(span)]
    }

    /// Leading whitespace of the line containing `offset`.
    pub fn line_indent(&self, offset: usize) -> &str {
        let line_start = self.source[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line = &self.source[line_start..];
        let indent_len = line.len() - line.trim_start_matches([' ', '\t']).len();
        &line[..indent_len]
    }
}

/// Pick the parser dialect from the file extension.
///
/// `.ts`/`.tsx` go through the TypeScript parser; everything else is parsed as
/// JavaScript with JSX and decorators enabled.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    match Path::new(file_path).extension().and_then(|e| e.to_str()) {
        Some("ts") => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            decorators_before_export: false,
            ..Default::default()
        }),
    }
}

/// Parse a component source string into an AST.
///
/// Recoverable syntax errors are reported as failures too: a file the parser
/// had to patch up cannot be rewritten faithfully.
pub fn parse_component_source(code: String, file_path: &str) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_map = SourceMap::default();
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code.clone());

        let mut parser = Parser::new(
            syntax_for_path(file_path),
            StringInput::from(&*source_file),
            None,
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        if let Some(error) = parser.take_errors().into_iter().next() {
            return Err(anyhow!("Failed to parse {}: {:?}", file_path, error));
        }

        // The source map drops a leading BOM, so its positions start after it.
        let skipped = code.len().saturating_sub(source_file.src.len());

        Ok(ParsedSource {
            module,
            source: code,
            start_pos: source_file.start_pos,
            skipped,
        })
    })
}
