use crate::error::{GraphError, Result};
use crate::types::DiConfig;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Topologically order the graph with Kahn's algorithm.
///
/// Every dependency precedes its dependent in the returned order. Ties are
/// broken by container enumeration order, so the result is deterministic
/// for a given graph. Final-flagged nodes are moved to a contiguous suffix
/// afterwards, preserving relative order within each group.
pub fn build_order(config: &DiConfig) -> Result<Vec<String>> {
    let mut indegree: BTreeMap<&str, usize> =
        config.container.keys().map(|alias| (alias.as_str(), 0)).collect();
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();

    // Build indegree + adjacency. Edges into final/disabled nodes are
    // rejected here, before any ordering happens.
    for (alias, factory) in &config.container {
        for dep in &factory.deps {
            let supplier = config
                .container
                .get(&dep.name)
                .ok_or_else(|| GraphError::NodeNotFound(dep.name.clone()))?;

            if supplier.is_final {
                return Err(GraphError::FinalAsDependency {
                    dep: dep.name.clone(),
                    dependent: alias.clone(),
                });
            }
            if supplier.disabled {
                return Err(GraphError::DisabledAsDependency {
                    dep: dep.name.clone(),
                    dependent: alias.clone(),
                });
            }

            adjacency.entry(dep.name.as_str()).or_default().push(alias);
            *indegree.entry(alias).or_insert(0) += 1;
        }
    }

    // Queue nodes with indegree 0, drain FIFO
    let mut queue: VecDeque<&str> = indegree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(alias, _)| *alias)
        .collect();

    let mut order: Vec<&str> = Vec::with_capacity(config.len());
    while let Some(alias) = queue.pop_front() {
        order.push(alias);

        if let Some(dependents) = adjacency.get(alias) {
            for &next in dependents {
                if let Some(degree) = indegree.get_mut(next) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(next);
                    }
                }
            }
        }
    }

    if order.len() != config.len() {
        return Err(GraphError::CircularDependency);
    }

    // Stable partition: final nodes form the suffix
    let mut normal = Vec::with_capacity(order.len());
    let mut finals = Vec::new();
    for alias in order {
        let is_final = config.get(alias).is_some_and(|f| f.is_final);
        if is_final {
            finals.push(alias.to_string());
        } else {
            normal.push(alias.to_string());
        }
    }

    normal.extend(finals);
    Ok(normal)
}
