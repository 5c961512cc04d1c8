use crate::error::{CodegenError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Subset of Cargo.toml the generator needs
#[derive(Debug, Deserialize)]
struct CargoManifest {
    package: Option<PackageSection>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    name: String,
}

/// Project identity read from the root Cargo.toml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectManifest {
    /// `[package].name` verbatim
    pub package_name: String,
}

impl ProjectManifest {
    /// Read the manifest at `<root>/Cargo.toml`.
    ///
    /// Fatal if the file is absent, unparseable, or a virtual workspace
    /// manifest without a `[package]` section.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join("Cargo.toml");
        let raw = fs::read_to_string(&path).map_err(|e| {
            CodegenError::ManifestError(format!("cannot read {}: {e}", path.display()))
        })?;

        let manifest: CargoManifest = toml::from_str(&raw).map_err(|e| {
            CodegenError::ManifestError(format!("cannot parse {}: {e}", path.display()))
        })?;

        let package = manifest.package.ok_or_else(|| {
            CodegenError::ManifestError(format!("{} has no [package] section", path.display()))
        })?;

        Ok(Self {
            package_name: package.name,
        })
    }

    /// Module identity: the path root under which generated imports address
    /// the project's modules
    pub fn module_identity(&self) -> String {
        self.package_name.replace('-', "_")
    }
}
