use std::path::Path;

/// Map a declaring file path to a canonical module path rooted at the
/// project's module identity.
///
/// The path is taken relative to the project root; a leading `src`
/// component is dropped, `lib.rs` / `main.rs` / `mod.rs` name the module of
/// their containing directory, and any other file contributes its stem as
/// the final segment. Hyphens map to underscores. A file outside the root
/// falls back to the bare identity.
pub fn module_path(file: &Path, root: &Path, identity: &str) -> String {
    let rel = match file.strip_prefix(root) {
        Ok(rel) => rel,
        Err(_) => return identity.to_string(),
    };

    let components: Vec<&str> = rel.iter().filter_map(|c| c.to_str()).collect();
    let mut segments: Vec<String> = Vec::new();

    for (i, component) in components.iter().enumerate() {
        if i == 0 && *component == "src" {
            continue;
        }

        if i + 1 == components.len() {
            let stem = component.strip_suffix(".rs").unwrap_or(component);
            if matches!(stem, "mod" | "lib" | "main") {
                continue;
            }
            segments.push(stem.replace('-', "_"));
        } else {
            segments.push(component.replace('-', "_"));
        }
    }

    if segments.is_empty() {
        identity.to_string()
    } else {
        format!("{identity}::{}", segments.join("::"))
    }
}
