//! Source file parsing.
//!
//! - `jsx`: component source parser (uses swc for AST generation)

pub mod jsx;
