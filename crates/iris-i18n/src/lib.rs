#![forbid(unsafe_code)]

//! Translation tables and message lookup for Iris.
//!
//! This crate provides:
//! - [`Catalog`] for per-language message tables with default-language fallback
//! - [`builtin`] tables for the languages Iris ships with
//! - [`language`] helpers for normalizing and detecting language codes

pub mod builtin;
pub mod catalog;
pub mod language;

pub use catalog::{Catalog, I18nError, LanguageCode, LanguageInfo, LanguageTable};
pub use language::{DEFAULT_LANGUAGE, detect_system_language, normalize_language_code};
