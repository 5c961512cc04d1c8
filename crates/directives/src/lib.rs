//! # Wireup Directives
//!
//! Extraction of wiring directives from Rust source comments.
//!
//! ## Directive grammar
//!
//! ```text
//! @factory: <FunctionName> -> <Alias>
//! @wire:    <Alias>(<dep>, ^<standaloneDep>, ...)
//! @final:   <Alias>
//! @disable: <Alias>
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Project root
//!     │
//!     ├──> ProjectScanner (gitignore-aware walk, .rs files only)
//!     │
//!     ├──> CommentExtractor (tree-sitter parse → comment segments)
//!     │
//!     └──> Directive parser (comment line → Annotation)
//!            └─ Annotation[] — flat, order-insensitive
//! ```
//!
//! Per-file extraction failures are logged and skipped; malformed directive
//! values are fatal. Everything downstream of this crate treats the
//! annotation list as already valid.

mod error;
mod extract;
mod parse;
mod scanner;
mod types;

pub use error::{DirectiveError, Result};
pub use extract::{CommentExtractor, CommentSegment};
pub use parse::{clean_comment_line, parse_directive};
pub use scanner::ProjectScanner;
pub use types::{Annotation, DepRef, Span};
