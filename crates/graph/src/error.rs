use thiserror::Error;
use wireup_directives::Span;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Fatal configuration errors detected while building or ordering the graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// Two factory directives in the same file claim one alias
    #[error("Duplicate alias `{alias}`: declared at {first} and again at {second}")]
    DuplicateAlias {
        alias: String,
        first: Span,
        second: Span,
    },

    /// Two factory directives in different files claim one alias
    #[error("Alias `{alias}` declared at {second} is already used at {first}")]
    AliasCollision {
        alias: String,
        first: Span,
        second: Span,
    },

    /// A `@final` / `@disable` directive names an alias with no factory
    #[error("Unknown alias `{target}` referenced by @{directive} at {span}")]
    UnknownTarget {
        directive: &'static str,
        target: String,
        span: Span,
    },

    /// A wire dependency names an alias with no factory
    #[error("Cannot resolve dependency `{dep}` of `{target}` declared at {span}")]
    UnresolvedDependency {
        dep: String,
        target: String,
        span: Span,
    },

    /// A final node is consumed as a dependency
    #[error("Final item `{dep}` cannot be a dependency of `{dependent}`")]
    FinalAsDependency { dep: String, dependent: String },

    /// A disabled node is consumed as a dependency
    #[error("Disabled item `{dep}` cannot be a dependency of `{dependent}`")]
    DisabledAsDependency { dep: String, dependent: String },

    /// The graph contains at least one cycle
    #[error("Circular dependency detected")]
    CircularDependency,

    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(String),
}
