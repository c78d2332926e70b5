use std::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    fmt,
    ops::Neg,
};

use thiserror::Error;

pub type Vertex = u32;

/// One of the three palette colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color(u8);

impl Color {
    pub const PALETTE: [Color; 3] = [Color(0), Color(1), Color(2)];

    pub fn new(code: u8) -> Option<Self> {
        (code < 3).then_some(Self(code))
    }

    pub fn code(self) -> u8 {
        self.0
    }

    /// The two palette colors different from `self`, ascending.
    pub fn others(self) -> [Color; 2] {
        match self.0 {
            0 => [Color(1), Color(2)],
            1 => [Color(0), Color(2)],
            _ => [Color(0), Color(1)],
        }
    }

    /// The palette color that is neither `a` nor `b`.
    pub fn remaining(a: Color, b: Color) -> Color {
        debug_assert_ne!(a, b);
        Color(3 - a.0 - b.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A literal of the recoloring formula.
///
/// Every vertex owns a block of three consecutive codes starting at
/// `(vertex + 1) * 3`, one per palette color. A positive literal asserts
/// "vertex takes color", its negation asserts "vertex does not take color".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit(i64);

impl Lit {
    const BLOCK: i64 = Color::PALETTE.len() as i64;

    pub fn new(vertex: Vertex, color: Color) -> Self {
        Self((vertex as i64 + 1) * Self::BLOCK + color.0 as i64)
    }

    /// Signed code, as used in DIMACS output.
    pub fn code(self) -> i64 {
        self.0
    }

    /// The boolean variable (vertex and color) regardless of polarity.
    pub fn var(self) -> u64 {
        self.0.unsigned_abs()
    }

    pub fn vertex(self) -> Vertex {
        (self.var() / Self::BLOCK as u64 - 1) as Vertex
    }

    pub fn color(self) -> Color {
        Color((self.var() % Self::BLOCK as u64) as u8)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Neg for Lit {
    type Output = Lit;

    fn neg(self) -> Self::Output {
        Lit(-self.0)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Disjunction of two literals.
pub type Clause = [Lit; 2];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProblemError {
    #[error("vertex {vertex} has no color")]
    MissingColor { vertex: Vertex },
    #[error("color given for unknown vertex {vertex}")]
    UnknownVertex { vertex: Vertex },
    #[error("vertex {vertex} lists unknown neighbor {neighbor}")]
    UnknownNeighbor { vertex: Vertex, neighbor: Vertex },
    #[error("edge {vertex} -> {neighbor} has no reverse")]
    AsymmetricEdge { vertex: Vertex, neighbor: Vertex },
}

/// A graph together with its current coloring.
///
/// Both maps cover exactly the same vertices and every neighbor is a vertex.
/// The graph is undirected: `v` occurs in the list of `u` exactly as often as
/// `u` occurs in the list of `v`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Problem {
    adjacency: BTreeMap<Vertex, Vec<Vertex>>,
    colors: BTreeMap<Vertex, Color>,
}

impl Problem {
    pub fn new(
        adjacency: BTreeMap<Vertex, Vec<Vertex>>,
        colors: BTreeMap<Vertex, Color>,
    ) -> Result<Self, ProblemError> {
        for (&vertex, neighbors) in &adjacency {
            if !colors.contains_key(&vertex) {
                return Err(ProblemError::MissingColor { vertex });
            }
            if let Some(&neighbor) = neighbors.iter().find(|n| !adjacency.contains_key(*n)) {
                return Err(ProblemError::UnknownNeighbor { vertex, neighbor });
            }
        }
        if let Some(&vertex) = colors.keys().find(|v| !adjacency.contains_key(*v)) {
            return Err(ProblemError::UnknownVertex { vertex });
        }
        if let Some((vertex, neighbor)) = asymmetric_edge(&adjacency) {
            return Err(ProblemError::AsymmetricEdge { vertex, neighbor });
        }

        Ok(Self { adjacency, colors })
    }

    /// Builds an undirected problem. Colored vertices without edges are isolated.
    pub fn from_edges(
        edges: &[(Vertex, Vertex)],
        colors: BTreeMap<Vertex, Color>,
    ) -> Result<Self, ProblemError> {
        let mut adjacency: BTreeMap<Vertex, Vec<Vertex>> =
            colors.keys().map(|&v| (v, vec![])).collect();
        for &(u, v) in edges {
            adjacency.entry(u).or_default().push(v);
            adjacency.entry(v).or_default().push(u);
        }
        Self::new(adjacency, colors)
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn neighbors(&self, vertex: Vertex) -> &[Vertex] {
        self.adjacency
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Original color of `vertex`.
    ///
    /// Panics if `vertex` does not belong to the problem.
    pub fn color(&self, vertex: Vertex) -> Color {
        self.colors[&vertex]
    }

    pub fn colors(&self) -> &BTreeMap<Vertex, Color> {
        &self.colors
    }

    /// Connected components, each sorted, ordered by their smallest vertex.
    pub fn components(&self) -> Vec<Vec<Vertex>> {
        let mut seen = BTreeSet::new();
        let mut components = vec![];

        for start in self.vertices() {
            if !seen.insert(start) {
                continue;
            }

            let mut component = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(vertex) = queue.pop_front() {
                for &neighbor in self.neighbors(vertex) {
                    if seen.insert(neighbor) {
                        component.push(neighbor);
                        queue.push_back(neighbor);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// The sub-problem induced by `vertices`.
    pub fn restrict(&self, vertices: &[Vertex]) -> Problem {
        let keep: BTreeSet<Vertex> = vertices
            .iter()
            .copied()
            .filter(|v| self.adjacency.contains_key(v))
            .collect();

        let adjacency = keep
            .iter()
            .map(|&v| {
                let neighbors = self
                    .neighbors(v)
                    .iter()
                    .copied()
                    .filter(|n| keep.contains(n))
                    .collect();
                (v, neighbors)
            })
            .collect();
        let colors = keep.iter().map(|&v| (v, self.colors[&v])).collect();

        Problem { adjacency, colors }
    }
}

/// Some edge listed more often in one direction than in the other.
fn asymmetric_edge(adjacency: &BTreeMap<Vertex, Vec<Vertex>>) -> Option<(Vertex, Vertex)> {
    // +1 for every listing from the smaller endpoint, -1 from the larger one
    let mut balance: BTreeMap<(Vertex, Vertex), i64> = BTreeMap::new();
    for (&vertex, neighbors) in adjacency {
        for &neighbor in neighbors.iter().filter(|&&n| n != vertex) {
            let key = (vertex.min(neighbor), vertex.max(neighbor));
            *balance.entry(key).or_default() += if vertex < neighbor { 1 } else { -1 };
        }
    }

    balance
        .into_iter()
        .find(|&(_, count)| count != 0)
        .map(|((u, v), count)| if count > 0 { (u, v) } else { (v, u) })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Solution {
    /// New color per vertex, ascending by vertex.
    Recolored { coloring: Vec<(Vertex, Color)> },
    Unsat,
}
