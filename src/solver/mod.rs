pub mod assignment;
pub mod compile;
pub mod graph;
pub mod implication;
pub mod scc;

use std::collections::BTreeMap;

use log::{debug, info, warn};
use thiserror::Error;

use crate::types::{Color, Lit, Problem, Solution, Vertex};

use self::graph::Digraph;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("implication graph has {literals} literals, limit is {limit}")]
    LiteralBudget { literals: usize, limit: usize },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Limits {
    /// Upper bound on the nodes of the implication graph.
    pub max_literals: Option<usize>,
}

pub struct Solver {
    problem: Problem,
    limits: Limits,
}

impl Solver {
    pub fn new(problem: Problem) -> Self {
        Self::with_limits(problem, Limits::default())
    }

    pub fn with_limits(problem: Problem, limits: Limits) -> Self {
        Self { problem, limits }
    }

    pub fn solve(&self) -> Result<Solution, SolveError> {
        let implications = implications(&self.problem);

        if let Some(limit) = self.limits.max_literals {
            let literals = implications.len();
            if literals > limit {
                warn!("giving up on {literals} literals (limit {limit})");
                return Err(SolveError::LiteralBudget { literals, limit });
            }
        }

        Ok(decide(&self.problem, &implications))
    }
}

/// Recolors `problem` so that every vertex changes color and every edge stays
/// properly colored, or reports that this is impossible.
pub fn recolor(problem: &Problem) -> Solution {
    decide(problem, &implications(problem))
}

fn implications(problem: &Problem) -> Digraph<Lit> {
    let clauses = compile::compile(problem);
    debug!(
        "compiled {} clauses for {} vertices",
        clauses.len(),
        problem.len()
    );

    let graph = implication::build(&clauses);
    debug!(
        "implication graph: {} literals, {} edges",
        graph.len(),
        graph.values().map(|succ| succ.len()).sum::<usize>()
    );
    graph
}

fn decide(problem: &Problem, implications: &Digraph<Lit>) -> Solution {
    let components = scc::kosaraju(implications);
    debug!("{} strongly connected components", components.len());

    let solution = assignment::extract(problem, &components);
    match &solution {
        Solution::Recolored { coloring } => {
            debug_assert!(is_valid_recoloring(problem, coloring));
            info!("recolored {} vertices", coloring.len());
        }
        Solution::Unsat => info!("no recoloring exists"),
    }
    solution
}

/// Checks that `coloring` lists every vertex once in ascending order, changes
/// every original color and keeps every edge properly colored.
pub fn is_valid_recoloring(problem: &Problem, coloring: &[(Vertex, Color)]) -> bool {
    if !coloring.windows(2).all(|pair| pair[0].0 < pair[1].0) {
        return false;
    }

    let colors: BTreeMap<Vertex, Color> = coloring.iter().copied().collect();
    if !colors.keys().copied().eq(problem.vertices()) {
        return false;
    }

    problem.vertices().all(|vertex| {
        let color = colors[&vertex];
        color != problem.color(vertex)
            && problem
                .neighbors(vertex)
                .iter()
                .all(|neighbor| colors[neighbor] != color)
    })
}

pub fn verify(problem: &Problem, recolorable: bool, solution: &Solution) -> bool {
    match solution {
        Solution::Recolored { coloring } => recolorable && is_valid_recoloring(problem, coloring),
        Solution::Unsat => !recolorable,
    }
}
