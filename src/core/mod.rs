//! Migration engine.
//!
//! Per file: parse, classify, rewrite literals, inject the translation
//! scaffold, regenerate. Per namespace: collect the extracted texts into a
//! catalog and persist it for the base and mock locales.
//!
//! - `parsers`: swc based source parsing
//! - `edit`: span based source edits
//! - `classify`: component detection and naming
//! - `rewrite`: literal location and lookup rewriting
//! - `scaffold`: hook / wrapper / import injection
//! - `transform`: the per-file pipeline
//! - `catalog`: namespace catalogs, merging, mock locales
//! - `scanner`, `driver`: directory walking and run orchestration

pub mod catalog;
pub mod classify;
pub mod driver;
pub mod edit;
pub mod options;
pub mod parsers;
pub mod persist;
pub mod rewrite;
pub mod scaffold;
pub mod scanner;
pub mod transform;

pub use driver::{
    FileReport, FileStatus, MigrationReport, MigrationSettings, NamespaceReport, migrate,
};
pub use options::TransformOptions;
pub use transform::{Diagnostic, FileOutcome, SkipReason, TransformedFile, transform_source};
