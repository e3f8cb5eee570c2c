use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::error::{DistSimError, Result};

/// A directed graph of generator dependencies.
/// Edges point from the producing table to the consuming table
/// (dependency → dependent), so a topological walk yields build order.
pub struct DependencyGraph {
    pub graph: DiGraph<String, ()>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build a graph from `(table, depends_on)` pairs in registration order.
    ///
    /// Node indices follow registration order, which the topological sort
    /// uses to break ties. A dependency on a table no generator produces is
    /// a `MissingDependency` error.
    pub fn from_declarations<'a, I>(declarations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let declarations: Vec<(&str, &[&str])> = declarations.into_iter().collect();
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for (table, _) in &declarations {
            if node_indices.contains_key(*table) {
                return Err(DistSimError::DuplicateTable {
                    table: table.to_string(),
                });
            }
            let idx = graph.add_node(table.to_string());
            node_indices.insert(table.to_string(), idx);
        }

        for (table, depends_on) in &declarations {
            let to = node_indices[*table];
            for dependency in depends_on.iter() {
                let from = node_indices.get(*dependency).copied().ok_or_else(|| {
                    DistSimError::MissingDependency {
                        table: table.to_string(),
                        dependency: dependency.to_string(),
                    }
                })?;
                graph.update_edge(from, to, ());
            }
        }

        Ok(Self {
            graph,
            node_indices,
        })
    }

    /// Get the table name for a node index.
    pub fn table_name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Get node index for a table name.
    pub fn node_index(&self, table_name: &str) -> Option<NodeIndex> {
        self.node_indices.get(table_name).copied()
    }

    /// All table names in registration order.
    pub fn table_names(&self) -> Vec<&str> {
        self.graph.node_weights().map(|s| s.as_str()).collect()
    }

    pub fn table_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
