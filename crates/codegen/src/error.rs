use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur while generating the wiring source
#[derive(Error, Debug)]
pub enum CodegenError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Project manifest missing or unusable
    #[error("Manifest error: {0}")]
    ManifestError(String),

    /// Directive extraction failed
    #[error(transparent)]
    DirectiveError(#[from] wireup_directives::DirectiveError),

    /// Graph construction or ordering failed
    #[error(transparent)]
    GraphError(#[from] wireup_graph::GraphError),

    /// A directive token is not a legal identifier in generated code
    #[error("Invalid identifier `{0}` in directive")]
    InvalidIdentifier(String),

    /// The generated token stream did not parse back as a source file
    #[error("Render error: {0}")]
    RenderError(#[from] syn::Error),
}
