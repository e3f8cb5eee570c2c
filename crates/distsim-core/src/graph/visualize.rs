use crate::graph::dag::DependencyGraph;
use petgraph::visit::EdgeRef;

/// Output format for graph visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Mermaid,
    Dot,
}

/// Render the generator dependency graph.
pub fn visualize(graph: &DependencyGraph, format: GraphFormat) -> String {
    match format {
        GraphFormat::Mermaid => generate_mermaid(graph),
        GraphFormat::Dot => generate_dot(graph),
    }
}

fn generate_mermaid(graph: &DependencyGraph) -> String {
    let mut output = String::from("graph TD\n");

    for node in graph.graph.node_indices() {
        let name = graph.table_name(node);
        output.push_str(&format!("    {}[{}]\n", name, name));
    }

    output.push('\n');

    for edge in graph.graph.edge_references() {
        let from = graph.table_name(edge.source());
        let to = graph.table_name(edge.target());
        output.push_str(&format!("    {} --> {}\n", from, to));
    }

    output
}

fn generate_dot(graph: &DependencyGraph) -> String {
    let mut output = String::from("digraph generators {\n");
    output.push_str("    rankdir=LR;\n");
    output.push_str("    node [shape=box, style=rounded];\n\n");

    // Isolated tables still need to show up
    for node in graph.graph.node_indices() {
        output.push_str(&format!("    \"{}\";\n", graph.table_name(node)));
    }
    output.push('\n');

    for edge in graph.graph.edge_references() {
        let from = graph.table_name(edge.source());
        let to = graph.table_name(edge.target());
        output.push_str(&format!("    \"{}\" -> \"{}\";\n", from, to));
    }

    output.push_str("}\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DependencyGraph {
        DependencyGraph::from_declarations([
            ("DimGeografia", &[][..]),
            ("DimCliente", &["DimGeografia"][..]),
        ])
        .unwrap()
    }

    #[test]
    fn test_mermaid_output() {
        let output = visualize(&sample(), GraphFormat::Mermaid);
        assert!(output.starts_with("graph TD"));
        assert!(output.contains("DimGeografia --> DimCliente"));
    }

    #[test]
    fn test_dot_output() {
        let output = visualize(&sample(), GraphFormat::Dot);
        assert!(output.starts_with("digraph generators {"));
        assert!(output.contains("\"DimGeografia\" -> \"DimCliente\";"));
        assert!(output.trim_end().ends_with('}'));
    }
}
