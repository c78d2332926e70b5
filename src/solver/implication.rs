use crate::types::{Clause, Lit};

use super::graph::Digraph;

/// Turns every clause `a ∨ b` into the implications `¬a → b` and `¬b → a`.
///
/// Every literal mentioned by a clause, in either polarity, becomes a node.
pub fn build(clauses: &[Clause]) -> Digraph<Lit> {
    let mut graph = Digraph::new();

    for &[a, b] in clauses {
        for lit in [a, -a, b, -b] {
            graph.entry(lit).or_default();
        }
        graph.entry(-a).or_default().insert(b);
        graph.entry(-b).or_default().insert(a);
    }

    graph
}
