//! # Wireup Codegen
//!
//! Back end of the wiring compiler: turns a validated dependency graph into
//! Rust source.
//!
//! ## Architecture
//!
//! ```text
//! Project root
//!     │
//!     ├──> ProjectManifest (Cargo.toml → module identity)
//!     ├──> ProjectScanner  (directives crate → Annotation[])
//!     ├──> DiConfig        (graph crate → validated node set)
//!     │
//!     └──> Emitter
//!            ├─ module path normalization (file path → import path)
//!            ├─ scheduler order walk, one declaration per factory
//!            ├─ shared deps borrow locals, standalone deps inline
//!            ├─ import dedup + generated aliases
//!            └─ quote! → syn::File → prettyplease
//! ```
//!
//! The emission context (identifier counter, import map, local map) is a
//! single mutable value threaded through the traversal; nothing here is
//! global. Generated output is deterministic for an unchanged project.

mod emit;
mod error;
mod manifest;
mod module_path;

pub use emit::generate;
pub use error::{CodegenError, Result};
pub use manifest::ProjectManifest;
pub use module_path::module_path;

use std::path::Path;
use wireup_directives::ProjectScanner;
use wireup_graph::DiConfig;

/// Scan a project and generate its wiring source.
///
/// The single entry point consumed by the CLI wrapper: reads the manifest,
/// scans for directives, builds and validates the graph, and emits the
/// generated source text. Any fatal error aborts with no partial output.
pub fn generate_project(root: impl AsRef<Path>) -> Result<String> {
    let root = root.as_ref();

    let manifest = ProjectManifest::load(root)?;
    log::info!("Generating wiring for package {}", manifest.package_name);

    let annotations = ProjectScanner::new(root).scan()?;
    let config = DiConfig::from_annotations(&annotations)?;
    log::info!("Dependency graph has {} factories", config.len());

    generate(root, &manifest.module_identity(), config)
}
