use std::collections::HashSet;

use crate::types::{Clause, Lit, Problem};

/// Derives the 2-SAT clauses of the recoloring problem.
///
/// Every vertex must take exactly one of the two colors other than its
/// original one, and no edge may end up with both endpoints sharing a color.
pub fn compile(problem: &Problem) -> Vec<Clause> {
    let mut clauses = vec![];
    // edge clauses are symmetric, keep one orientation
    let mut seen: HashSet<Clause> = HashSet::new();

    for vertex in problem.vertices() {
        let candidates = problem.color(vertex).others();
        let [lit0, lit1] = candidates.map(|color| Lit::new(vertex, color));

        // at least one candidate
        clauses.push([lit0, lit1]);
        // at most one candidate
        clauses.push([-lit0, -lit1]);

        for &neighbor in problem.neighbors(vertex) {
            for color in candidates {
                // the neighbor can never take its own original color
                if problem.color(neighbor) == color {
                    continue;
                }

                let clause = [-Lit::new(vertex, color), -Lit::new(neighbor, color)];
                if seen.insert(normalized(clause)) {
                    clauses.push(clause);
                }
            }
        }
    }

    clauses
}

fn normalized([a, b]: Clause) -> Clause {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}
