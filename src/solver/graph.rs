use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    hash::Hash,
};

/// Directed graph as an ordered successor map.
///
/// Ordered containers keep every traversal reproducible.
pub type Digraph<N> = BTreeMap<N, BTreeSet<N>>;

/// Result of one depth-first traversal.
#[derive(Debug, PartialEq, Eq)]
pub struct Traversal<N> {
    /// Nodes in the order they were first reached.
    pub preorder: Vec<N>,
    /// Nodes in the order their successors were exhausted.
    pub postorder: Vec<N>,
}

/// Reverses every edge. Every node of `graph` is a key of the result.
pub fn transpose<N: Ord + Copy>(graph: &Digraph<N>) -> Digraph<N> {
    let mut transposed: Digraph<N> = graph.keys().map(|&node| (node, BTreeSet::new())).collect();

    for (&from, successors) in graph {
        for &to in successors {
            transposed.entry(to).or_default().insert(from);
        }
    }

    transposed
}

/// All nodes of `graph`, including those that only appear as successors.
pub fn nodes<N: Ord + Copy>(graph: &Digraph<N>) -> BTreeSet<N> {
    graph
        .iter()
        .flat_map(|(&from, successors)| std::iter::once(from).chain(successors.iter().copied()))
        .collect()
}

fn successors<N: Ord>(graph: &Digraph<N>, node: N) -> impl Iterator<Item = &N> {
    graph.get(&node).into_iter().flatten()
}

/// Iterative depth-first traversal from `start`, skipping everything already
/// in `visited`. Successors are explored in ascending order.
///
/// `visited` is shared between calls so that consecutive traversals from
/// different starts cover every node at most once.
pub fn dfs<N: Ord + Copy + Hash>(
    graph: &Digraph<N>,
    start: N,
    visited: &mut HashSet<N>,
) -> Traversal<N> {
    let mut traversal = Traversal {
        preorder: vec![],
        postorder: vec![],
    };
    if !visited.insert(start) {
        return traversal;
    }

    traversal.preorder.push(start);
    let mut stack = vec![(start, successors(graph, start))];

    while let Some((node, next)) = stack.last_mut() {
        match next.find(|succ| !visited.contains(*succ)) {
            Some(&succ) => {
                visited.insert(succ);
                traversal.preorder.push(succ);
                stack.push((succ, successors(graph, succ)));
            }
            None => {
                traversal.postorder.push(*node);
                stack.pop();
            }
        }
    }

    traversal
}
