//! Source edits recorded against the original text of a file.
//!
//! The passes never mutate the swc tree. Each rewrite is recorded as a
//! replacement of a byte range or an insertion at an offset, and the new source
//! is produced by splicing those edits into the original text. Everything
//! outside an edited range is emitted byte-for-byte, which keeps comments and
//! formatting intact.

use std::ops::Range;

use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    fn is_insertion(&self) -> bool {
        self.range.is_empty()
    }
}

/// Ordered collection of edits for one file.
#[derive(Debug, Default)]
pub struct SourceEdits {
    edits: Vec<Edit>,
}

impl SourceEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `range` of the original text with `text`.
    pub fn replace(&mut self, range: Range<usize>, text: impl Into<String>) {
        self.edits.push(Edit {
            range,
            text: text.into(),
        });
    }

    /// Insert `text` at `offset` of the original text.
    ///
    /// Insertions at the same offset keep the order in which they were recorded.
    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.replace(offset..offset, text);
    }

    /// Surround `range` with `prefix` and `suffix` without touching its content,
    /// so edits inside the range stay valid.
    pub fn wrap(
        &mut self,
        range: Range<usize>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) {
        self.insert(range.start, prefix);
        self.insert(range.end, suffix);
    }

    /// Produce the rewritten source.
    ///
    /// Fails when two replacements overlap or an edit falls outside `source`;
    /// the caller treats that as a failed file and leaves it untouched.
    pub fn apply(mut self, source: &str) -> Result<String> {
        // Stable sort: insertions at an offset come before a replacement that
        // starts there, and keep their recording order among themselves.
        self.edits.sort_by_key(|edit| (edit.range.start, !edit.is_insertion()));

        let mut output = String::with_capacity(source.len() + self.edits.len() * 32);
        let mut cursor = 0;

        for edit in &self.edits {
            let Range { start, end } = edit.range;
            if start < cursor {
                bail!(
                    "Overlapping source edits at byte {} (already rewritten up to {})",
                    start,
                    cursor
                );
            }
            let Some(unchanged) = source.get(cursor..start) else {
                bail!("Source edit at byte {} is outside the file", start);
            };
            if source.get(start..end).is_none() {
                bail!("Source edit {}..{} is outside the file", start, end);
            }
            output.push_str(unchanged);
            output.push_str(&edit.text);
            cursor = end;
        }

        output.push_str(&source[cursor..]);
        Ok(output)
    }
}
