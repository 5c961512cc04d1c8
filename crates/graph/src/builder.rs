use crate::error::{GraphError, Result};
use crate::types::{Dependency, DiConfig, Factory};
use std::collections::BTreeMap;
use wireup_directives::Annotation;

impl DiConfig {
    /// Fold a flat annotation list into a dependency graph.
    ///
    /// Directives may appear in any file in any order, so this is a
    /// two-phase build: all factory nodes are collected before any wire is
    /// resolved. Either the whole fold succeeds or the whole operation
    /// fails; no partial graph escapes.
    pub fn from_annotations(annotations: &[Annotation]) -> Result<Self> {
        let mut container: BTreeMap<String, Factory> = BTreeMap::new();

        // Pass 1: one node per factory annotation
        for ann in annotations {
            let Annotation::Factory {
                function,
                alias,
                span,
            } = ann
            else {
                continue;
            };

            if let Some(existing) = container.get(alias) {
                return Err(if existing.span.file == span.file {
                    GraphError::DuplicateAlias {
                        alias: alias.clone(),
                        first: existing.span.clone(),
                        second: span.clone(),
                    }
                } else {
                    GraphError::AliasCollision {
                        alias: alias.clone(),
                        first: existing.span.clone(),
                        second: span.clone(),
                    }
                });
            }

            log::debug!("Factory {function} -> {alias} at {span}");
            container.insert(
                alias.clone(),
                Factory {
                    alias: alias.clone(),
                    function: function.clone(),
                    module: span.file.to_string_lossy().into_owned(),
                    deps: Vec::new(),
                    is_final: false,
                    disabled: false,
                    span: span.clone(),
                },
            );
        }

        // Pass 1b: final/disable flags
        for ann in annotations {
            match ann {
                Annotation::Final { target, span } => {
                    let factory =
                        container
                            .get_mut(target)
                            .ok_or_else(|| GraphError::UnknownTarget {
                                directive: "final",
                                target: target.clone(),
                                span: span.clone(),
                            })?;
                    factory.is_final = true;
                }
                Annotation::Disable { target, span } => {
                    let factory =
                        container
                            .get_mut(target)
                            .ok_or_else(|| GraphError::UnknownTarget {
                                directive: "disable",
                                target: target.clone(),
                                span: span.clone(),
                            })?;
                    factory.disabled = true;
                }
                _ => {}
            }
        }

        // Pass 2: resolve wire dependencies against the full node set
        for ann in annotations {
            let Annotation::Wire { target, deps, span } = ann else {
                continue;
            };

            // A wire whose target has no factory is dropped on purpose,
            // unlike @final/@disable which error out.
            if !container.contains_key(target) {
                log::debug!("Ignoring wire for unknown target `{target}` at {span}");
                continue;
            }

            let mut resolved = Vec::with_capacity(deps.len());
            for dep in deps {
                if !container.contains_key(&dep.name) {
                    return Err(GraphError::UnresolvedDependency {
                        dep: dep.name.clone(),
                        target: target.clone(),
                        span: span.clone(),
                    });
                }
                resolved.push(Dependency {
                    name: dep.name.clone(),
                    standalone: dep.standalone,
                });
            }

            log::debug!("Wire {target} <- {} deps at {span}", resolved.len());
            if let Some(factory) = container.get_mut(target) {
                factory.deps = resolved;
            }
        }

        Ok(Self { container })
    }
}
