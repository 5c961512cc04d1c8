use crate::error::Result;
use crate::extract::CommentExtractor;
use crate::parse::{clean_comment_line, parse_directive};
use crate::types::{Annotation, Span};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Scanner that collects directive annotations across a project tree
pub struct ProjectScanner {
    root: PathBuf,
}

impl ProjectScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Walk the project and collect every directive annotation.
    ///
    /// Files that cannot be read or parsed are logged and skipped; the scan
    /// continues. Malformed directive values abort the whole scan.
    pub fn scan(&self) -> Result<Vec<Annotation>> {
        let mut extractor = CommentExtractor::new()?;
        let mut annotations = Vec::new();

        for path in self.source_files() {
            log::debug!("Scanning {}", path.display());

            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(e) => {
                    log::warn!("Skipping unreadable file {}: {e}", path.display());
                    continue;
                }
            };

            let segments = match extractor.extract(&source) {
                Ok(segments) => segments,
                Err(e) => {
                    log::warn!("Skipping unparseable file {}: {e}", path.display());
                    continue;
                }
            };

            for segment in segments {
                for (offset, line) in segment.text.lines().enumerate() {
                    let span = Span::new(path.clone(), segment.line + offset);
                    if let Some(ann) = parse_directive(clean_comment_line(line), span)? {
                        log::debug!("Found {:?} at {}", ann, ann.span());
                        annotations.push(ann);
                    }
                }
            }
        }

        log::info!(
            "Found {} directives under {}",
            annotations.len(),
            self.root.display()
        );
        Ok(annotations)
    }

    /// Scan directory for Rust source files (.gitignore aware)
    fn source_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let root = self.root.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true);
        builder.filter_entry(move |entry| !Self::is_ignored_scope(entry.path(), &root));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if let Ok(meta) = entry.metadata() {
                        if meta.len() > MAX_FILE_SIZE_BYTES {
                            log::debug!(
                                "Skipping large file {} ({} bytes > {})",
                                path.display(),
                                meta.len(),
                                MAX_FILE_SIZE_BYTES
                            );
                            continue;
                        }
                    }

                    if !Self::is_source_file(path) {
                        continue;
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        log::info!("Found {} source files", files.len());
        files
    }

    /// Check if file is a Rust source file
    fn is_source_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("rs"))
    }

    fn is_ignored_scope(path: &Path, root: &Path) -> bool {
        if let Ok(relative) = path.strip_prefix(root) {
            for component in relative.components() {
                if let std::path::Component::Normal(name) = component {
                    let lowered = name.to_string_lossy().to_lowercase();
                    if IGNORED_SCOPES.iter().any(|ignored| ignored == &lowered) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

const IGNORED_SCOPES: &[&str] = &[
    ".git",
    ".idea",
    ".vscode",
    "target",
    "node_modules",
    "vendor",
    "third_party",
];

const MAX_FILE_SIZE_BYTES: u64 = 1_048_576; // 1 MB
