//! Random recoloring instances.

use std::collections::{BTreeMap, HashSet};

use rand::{seq::SliceRandom, Rng};

use crate::types::{Color, Problem, Vertex};

#[derive(Clone, Copy, Debug)]
pub struct Params {
    pub vertices: Vertex,
    /// Requested number of distinct edges; fewer are produced when the graph
    /// has no more room.
    pub edges: usize,
    /// Only connect differently colored vertices, so the original coloring is
    /// itself proper.
    pub proper: bool,
}

const CLASS_PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

/// Vertex pairs an edge may join, drawn uniformly.
struct Candidates {
    vertices: Vertex,
    /// Vertices by original color, when only differently colored pairs count.
    classes: Option<[Vec<Vertex>; 3]>,
}

impl Candidates {
    fn new(colors: &BTreeMap<Vertex, Color>, proper: bool) -> Self {
        let classes = proper.then(|| {
            let mut classes: [Vec<Vertex>; 3] = Default::default();
            for (&v, c) in colors {
                classes[usize::from(c.code())].push(v);
            }
            classes
        });
        Self {
            vertices: colors.len() as Vertex,
            classes,
        }
    }

    fn count(&self) -> u64 {
        match &self.classes {
            None => {
                let n = u64::from(self.vertices);
                n * n.saturating_sub(1) / 2
            }
            Some(classes) => CLASS_PAIRS
                .iter()
                .map(|&(a, b)| classes[a].len() as u64 * classes[b].len() as u64)
                .sum(),
        }
    }

    fn all(&self) -> Vec<(Vertex, Vertex)> {
        match &self.classes {
            None => {
                let n = self.vertices;
                (0..n)
                    .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
                    .collect()
            }
            Some(classes) => CLASS_PAIRS
                .iter()
                .flat_map(move |&(a, b)| {
                    classes[a]
                        .iter()
                        .flat_map(move |&u| classes[b].iter().map(move |&v| (u.min(v), u.max(v))))
                })
                .collect(),
        }
    }

    /// One pair with its smaller vertex first. Needs `count() > 0`.
    fn sample(&self, rng: &mut impl Rng) -> (Vertex, Vertex) {
        let (u, v) = match &self.classes {
            None => {
                let u = rng.random_range(0..self.vertices);
                let v = rng.random_range(0..self.vertices - 1);
                (u, if v >= u { v + 1 } else { v })
            }
            Some(classes) => {
                let mut index = rng.random_range(0..self.count());
                let mut chosen = (0, 1);
                for (a, b) in CLASS_PAIRS {
                    let size = classes[a].len() as u64 * classes[b].len() as u64;
                    if index < size {
                        chosen = (a, b);
                        break;
                    }
                    index -= size;
                }
                let (a, b) = chosen;
                (
                    classes[a][rng.random_range(0..classes[a].len())],
                    classes[b][rng.random_range(0..classes[b].len())],
                )
            }
        };
        (u.min(v), u.max(v))
    }
}

/// Draws original colors uniformly, then `params.edges` distinct edges
/// without self-loops.
///
/// Sparse requests sample pairs directly; only when the request covers at
/// least half of the possible pairs are all of them listed and shuffled.
pub fn random_problem(rng: &mut impl Rng, params: Params) -> Problem {
    let colors: BTreeMap<Vertex, Color> = (0..params.vertices)
        .map(|v| (v, Color::PALETTE[rng.random_range(0..Color::PALETTE.len())]))
        .collect();

    let candidates = Candidates::new(&colors, params.proper);
    let available = candidates.count();
    let target = (params.edges as u64).min(available);

    let pairs = if target * 2 >= available {
        let mut pairs = candidates.all();
        pairs.shuffle(rng);
        pairs.truncate(params.edges);
        pairs
    } else {
        let mut seen = HashSet::new();
        let mut pairs = Vec::with_capacity(target as usize);
        while (pairs.len() as u64) < target {
            let pair = candidates.sample(rng);
            if seen.insert(pair) {
                pairs.push(pair);
            }
        }
        pairs
    };

    match Problem::from_edges(&pairs, colors) {
        Ok(problem) => problem,
        Err(err) => unreachable!("generated an inconsistent problem: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        solver::{is_valid_recoloring, recolor},
        types::{Problem, Solution},
    };

    use super::{random_problem, Params};

    fn edge_count(problem: &Problem) -> usize {
        problem
            .vertices()
            .map(|v| problem.neighbors(v).len())
            .sum::<usize>()
            / 2
    }

    #[test]
    fn reproducible() {
        let params = Params {
            vertices: 20,
            edges: 40,
            proper: false,
        };
        let a = random_problem(&mut StdRng::seed_from_u64(7), params);
        let b = random_problem(&mut StdRng::seed_from_u64(7), params);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
        assert_eq!(edge_count(&a), 40);
    }

    #[test]
    fn capped_at_complete_graph() {
        let params = Params {
            vertices: 5,
            edges: 100,
            proper: false,
        };
        let problem = random_problem(&mut StdRng::seed_from_u64(1), params);
        assert_eq!(edge_count(&problem), 10);
        assert!(problem.vertices().all(|v| !problem.neighbors(v).contains(&v)));
    }

    #[test]
    fn sparse_large_graph() {
        for proper in [false, true] {
            let params = Params {
                vertices: 100_000,
                edges: 10,
                proper,
            };
            let problem = random_problem(&mut StdRng::seed_from_u64(5), params);
            assert_eq!(problem.len(), 100_000);
            assert_eq!(edge_count(&problem), 10);
            for v in problem.vertices() {
                assert!(!problem.neighbors(v).contains(&v));
                let mut neighbors = problem.neighbors(v).to_vec();
                neighbors.sort_unstable();
                neighbors.dedup();
                assert_eq!(neighbors.len(), problem.neighbors(v).len());
                if proper {
                    for &n in problem.neighbors(v) {
                        assert_ne!(problem.color(n), problem.color(v));
                    }
                }
            }
        }
    }

    #[test]
    fn proper_near_complete() {
        let params = Params {
            vertices: 12,
            edges: 1000,
            proper: true,
        };
        let problem = random_problem(&mut StdRng::seed_from_u64(9), params);
        let mut sizes = [0; 3];
        for v in problem.vertices() {
            sizes[usize::from(problem.color(v).code())] += 1;
        }
        let available = sizes[0] * sizes[1] + sizes[0] * sizes[2] + sizes[1] * sizes[2];
        assert_eq!(edge_count(&problem), available);
    }

    #[test]
    fn proper_original_coloring() {
        let params = Params {
            vertices: 30,
            edges: 60,
            proper: true,
        };
        let problem = random_problem(&mut StdRng::seed_from_u64(3), params);
        for v in problem.vertices() {
            for &n in problem.neighbors(v) {
                assert_ne!(problem.color(v), problem.color(n));
            }
        }

        if let Solution::Recolored { coloring } = recolor(&problem) {
            assert!(is_valid_recoloring(&problem, &coloring));
        }
    }
}
