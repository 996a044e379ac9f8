//! i18nize - migrate React components to react-i18next
//!
//! i18nize walks a components directory, rewrites the user-visible text of
//! every component into `t('Component.slug')` lookups, injects the
//! `useTranslation` hook (or the `withTranslation` wrapper for class
//! components) and writes one JSON catalog per component directory.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Migration engine (per-file transform and per-namespace catalogs)
//! - `utils`: Shared text predicates

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
