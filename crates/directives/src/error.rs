use crate::types::Span;
use thiserror::Error;

/// Result type for directive extraction
pub type Result<T> = std::result::Result<T, DirectiveError>;

/// Errors that can occur while scanning a project for directives
#[derive(Error, Debug)]
pub enum DirectiveError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse the source code
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    /// A comment line matched a directive key but not its value grammar
    #[error("Malformed @{key} directive at {span}: {reason}")]
    MalformedDirective {
        key: String,
        reason: String,
        span: Span,
    },

    /// Invalid project path
    #[error("Invalid project path: {0}")]
    InvalidPath(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl DirectiveError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }

    /// Create a malformed directive error
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>, span: Span) -> Self {
        Self::MalformedDirective {
            key: key.into(),
            reason: reason.into(),
            span,
        }
    }
}
