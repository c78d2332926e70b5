use std::{collections::HashSet, hash::Hash};

use super::graph::{dfs, nodes, transpose, Digraph};

/// Strongly connected components by Kosaraju's two-pass algorithm.
///
/// Components are returned in topological order of the condensation: no
/// component has an edge into one listed before it.
pub fn kosaraju<N: Ord + Copy + Hash>(graph: &Digraph<N>) -> Vec<Vec<N>> {
    let mut visited = HashSet::new();
    let mut order = vec![];
    for node in nodes(graph) {
        if !visited.contains(&node) {
            order.extend(dfs(graph, node, &mut visited).postorder);
        }
    }

    let transposed = transpose(graph);
    let mut visited = HashSet::new();
    let mut components = vec![];
    for &node in order.iter().rev() {
        if !visited.contains(&node) {
            components.push(dfs(&transposed, node, &mut visited).preorder);
        }
    }

    components
}
