use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Source position of a directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// File the directive appeared in
    pub file: PathBuf,

    /// Line number (1-indexed)
    pub line: usize,
}

impl Span {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// One dependency reference inside a `@wire` directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepRef {
    /// Alias of the referenced factory (`^` prefix already stripped)
    pub name: String,

    /// `^`-prefixed at the use site: expand a fresh instance inline
    /// instead of reusing the shared declaration
    pub standalone: bool,
}

/// A parsed directive, one per matching comment line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Annotation {
    /// `@factory: <Function> -> <Alias>`
    Factory {
        function: String,
        alias: String,
        span: Span,
    },

    /// `@wire: <Alias>(<dep>, ^<dep>, ...)`
    Wire {
        target: String,
        deps: Vec<DepRef>,
        span: Span,
    },

    /// `@final: <Alias>` — emitted last, never consumed as a dependency
    Final { target: String, span: Span },

    /// `@disable: <Alias>` — never consumed as a dependency
    Disable { target: String, span: Span },
}

impl Annotation {
    /// Position of the directive that produced this annotation
    pub fn span(&self) -> &Span {
        match self {
            Annotation::Factory { span, .. }
            | Annotation::Wire { span, .. }
            | Annotation::Final { span, .. }
            | Annotation::Disable { span, .. } => span,
        }
    }
}
