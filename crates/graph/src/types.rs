use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wireup_directives::Span;

/// A resolved dependency reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Alias of the factory supplying this input
    pub name: String,

    /// Expand a fresh inline construction at each use site instead of
    /// reusing the shared declaration
    pub standalone: bool,
}

/// Graph node: one constructor function and its resolved inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factory {
    /// Unique name other nodes use to reference this one
    pub alias: String,

    /// Constructor function name
    pub function: String,

    /// Declaring module. Holds the declaring file path until the emitter
    /// normalizes it into a canonical import path.
    pub module: String,

    /// Resolved dependencies, in declared order (determines argument order)
    pub deps: Vec<Dependency>,

    /// Emitted last, never consumed as a dependency
    pub is_final: bool,

    /// Never consumed as a dependency
    pub disabled: bool,

    /// Position of the `@factory` directive, carried into the output
    pub span: Span,
}

/// The whole dependency graph: alias → factory.
///
/// A `BTreeMap` keeps enumeration deterministic, so repeated runs over an
/// unchanged project emit identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiConfig {
    pub container: BTreeMap<String, Factory>,
}

impl DiConfig {
    pub fn new() -> Self {
        Self {
            container: BTreeMap::new(),
        }
    }

    /// Look up a factory by alias
    pub fn get(&self, alias: &str) -> Option<&Factory> {
        self.container.get(alias)
    }

    /// Number of factories in the graph
    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Aliases in deterministic (sorted) order
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.container.keys().map(String::as_str)
    }
}
