use std::{
    cmp::Reverse,
    collections::BinaryHeap,
    sync::mpsc::channel,
    thread,
};

use log::debug;

use crate::{
    solver::{Limits, SolveError, Solver},
    types::{Problem, Solution, Vertex},
};

/// Packs the connected components of `problem` into at most `n` buckets of
/// similar size, largest components first.
fn buckets(problem: &Problem, n: usize) -> Vec<Vec<Vertex>> {
    let mut components = problem.components();
    components.sort_by_key(|component| Reverse(component.len()));

    let n = n.clamp(1, components.len().max(1));
    let mut buckets = vec![vec![]; n];
    let mut load: BinaryHeap<Reverse<(usize, usize)>> = (0..n).map(|i| Reverse((0, i))).collect();

    for component in components {
        if let Some(Reverse((size, i))) = load.pop() {
            load.push(Reverse((size + component.len(), i)));
            buckets[i].extend(component);
        }
    }

    buckets.retain(|bucket| !bucket.is_empty());
    buckets
}

/// Splits `problem` into independent subproblems such that the original
/// problem is recolorable iff all of the subproblems are.
fn split(problem: &Problem, n: usize) -> Vec<Problem> {
    buckets(problem, n)
        .iter()
        .map(|vertices| problem.restrict(vertices))
        .collect()
}

/// Solves the connected components of `problem` on up to `n` threads.
///
/// `limits` applies to every subproblem separately.
pub fn solve(problem: Problem, n: Option<usize>, limits: Limits) -> Result<Solution, SolveError> {
    let n = n.unwrap_or(
        thread::available_parallelism()
            .map(|val| val.get())
            .unwrap_or(2),
    );

    let subproblems = split(&problem, n);
    debug!(
        "solving {} vertices as {} subproblems",
        problem.len(),
        subproblems.len()
    );

    let (tx, rx) = channel::<Result<Solution, SolveError>>();

    for subproblem in subproblems {
        let thread_tx = tx.clone();
        thread::spawn(move || {
            let solution = Solver::with_limits(subproblem, limits).solve();
            let _ = thread_tx.send(solution);
        });
    }

    // receiver blocks as long as some transmitter is alive
    drop(tx);

    let mut merged = vec![];
    for subsolution in rx {
        match subsolution? {
            Solution::Recolored { coloring } => merged.extend(coloring),
            Solution::Unsat => return Ok(Solution::Unsat),
        }
    }
    merged.sort_unstable_by_key(|&(vertex, _)| vertex);

    Ok(Solution::Recolored { coloring: merged })
}
