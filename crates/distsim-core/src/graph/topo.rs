use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::algo::toposort;
use petgraph::Direction;

use crate::error::{DistSimError, Result};
use crate::graph::dag::DependencyGraph;

/// Compute the build order of the dependency graph.
///
/// Kahn's algorithm with a min-heap on node index: among the tables whose
/// dependencies are all built, the one registered first goes next. The
/// result is therefore stable for a given registration order.
pub fn build_order(graph: &DependencyGraph) -> Result<Vec<String>> {
    // petgraph reports a node on the cycle; use it for the error message
    if let Err(cycle) = toposort(&graph.graph, None) {
        return Err(DistSimError::CircularDependency {
            table: graph.table_name(cycle.node_id()).to_string(),
        });
    }

    let g = &graph.graph;
    let mut in_degree: Vec<usize> = g
        .node_indices()
        .map(|n| g.neighbors_directed(n, Direction::Incoming).count())
        .collect();

    let mut ready: BinaryHeap<Reverse<usize>> = g
        .node_indices()
        .filter(|n| in_degree[n.index()] == 0)
        .map(|n| Reverse(n.index()))
        .collect();

    let mut order = Vec::with_capacity(g.node_count());
    while let Some(Reverse(idx)) = ready.pop() {
        let node = petgraph::graph::NodeIndex::new(idx);
        order.push(graph.table_name(node).to_string());
        for next in g.neighbors_directed(node, Direction::Outgoing) {
            in_degree[next.index()] -= 1;
            if in_degree[next.index()] == 0 {
                ready.push(Reverse(next.index()));
            }
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependencies_come_first() {
        let graph = DependencyGraph::from_declarations([
            ("DimRuta", &["DimCEDIS", "DimVehiculo"][..]),
            ("DimVehiculo", &["DimCEDIS"][..]),
            ("DimCEDIS", &[][..]),
        ])
        .unwrap();
        let order = build_order(&graph).unwrap();
        assert_eq!(order, vec!["DimCEDIS", "DimVehiculo", "DimRuta"]);
    }

    #[test]
    fn test_ties_follow_registration_order() {
        let graph = DependencyGraph::from_declarations([
            ("DimTiempo", &[][..]),
            ("DimGeografia", &[][..]),
            ("DimCliente", &["DimGeografia"][..]),
            ("DimPlanta", &["DimGeografia"][..]),
            ("DimCluster", &[][..]),
        ])
        .unwrap();
        let order = build_order(&graph).unwrap();
        assert_eq!(
            order,
            vec!["DimTiempo", "DimGeografia", "DimCliente", "DimPlanta", "DimCluster"]
        );
    }

    #[test]
    fn test_cycle_is_fatal() {
        let graph = DependencyGraph::from_declarations([
            ("A", &["C"][..]),
            ("B", &["A"][..]),
            ("C", &["B"][..]),
        ])
        .unwrap();
        let err = build_order(&graph).unwrap_err();
        assert!(matches!(err, DistSimError::CircularDependency { .. }));
    }
}
