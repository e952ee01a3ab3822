//! bare-strings - find untranslated text in templates
//!
//! A lint rule for Glimmer-style templates that reports literal,
//! human-readable text not routed through the translation helper. In fix
//! mode it rewrites such text to `{{t "<key>"}}` and records the original
//! string in the project's locale catalog.
//!
//! Templates are consumed as pre-parsed AST documents (`*.ast.json`), so any
//! template parser can feed the rule.
//!
//! ## Module Structure
//!
//! - `ast`: template AST types and the depth-first walker
//! - `allowlist`: allowlist sanitizing and matching
//! - `catalog`: locale catalog writer and translation key derivation
//! - `cli`: command-line interface (`check`, `fix`, `init`)
//! - `config`: rule config normalization and the project config file
//! - `document`: scanning, reading and writing AST documents
//! - `issues`: issue types and reporting
//! - `rule`: the bare strings checker and fixer

pub mod allowlist;
pub mod ast;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod document;
pub mod issues;
pub mod rule;
