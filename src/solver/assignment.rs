use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::types::{Color, Lit, Problem, Solution, Vertex};

/// New colors decided so far.
pub struct Assignment<'a> {
    problem: &'a Problem,
    colors: BTreeMap<Vertex, Color>,
}

impl<'a> Assignment<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            colors: BTreeMap::new(),
        }
    }

    /// Makes `lit` true unless its vertex is already decided.
    ///
    /// A negative literal leaves a single palette color: neither the one it
    /// rules out nor the original one.
    pub fn set(&mut self, lit: Lit) {
        let vertex = lit.vertex();
        let color = if lit.is_positive() {
            lit.color()
        } else {
            Color::remaining(lit.color(), self.problem.color(vertex))
        };
        self.colors.entry(vertex).or_insert(color);
    }

    pub fn is_complete(&self) -> bool {
        self.colors.len() == self.problem.len()
    }

    pub fn into_coloring(self) -> Vec<(Vertex, Color)> {
        self.colors.into_iter().collect()
    }
}

/// A literal and its negation in one component: the formula is unsatisfiable.
fn contradiction(component: &[Lit]) -> Option<Lit> {
    let mut vars = HashSet::new();
    component.iter().copied().find(|lit| !vars.insert(lit.var()))
}

/// Reads a coloring off the components of the implication graph.
///
/// `components` must be in topological order. They are walked from the
/// sinks backwards and the first literal seen for a vertex is made true.
pub fn extract(problem: &Problem, components: &[Vec<Lit>]) -> Solution {
    let mut assignment = Assignment::new(problem);

    for component in components.iter().rev() {
        if let Some(lit) = contradiction(component) {
            debug!("literal {lit} is equivalent to its negation");
            return Solution::Unsat;
        }

        if assignment.is_complete() {
            continue;
        }
        for &lit in component {
            assignment.set(lit);
        }
    }

    Solution::Recolored {
        coloring: assignment.into_coloring(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::types::{Color, Lit, Problem, Solution};

    use super::{contradiction, extract, Assignment};

    fn color(code: u8) -> Color {
        Color::new(code).unwrap()
    }

    fn lit(vertex: u32, code: u8) -> Lit {
        Lit::new(vertex, color(code))
    }

    fn problem() -> Problem {
        let colors = BTreeMap::from([(0, color(0)), (1, color(1))]);
        Problem::from_edges(&[(0, 1)], colors).unwrap()
    }

    #[test]
    fn basic() {
        let problem = problem();
        let mut ass = Assignment::new(&problem);

        ass.set(lit(0, 2));
        assert!(!ass.is_complete());

        // not 2 and not the original 1
        ass.set(-lit(1, 2));
        assert!(ass.is_complete());

        // first decision sticks
        ass.set(lit(0, 1));
        assert_eq!(ass.into_coloring(), vec![(0, color(2)), (1, color(0))]);
    }

    #[test]
    fn mixed_polarity() {
        assert_eq!(contradiction(&[lit(0, 1), lit(0, 2), -lit(1, 0)]), None);
        assert_eq!(
            contradiction(&[lit(0, 1), lit(1, 0), -lit(0, 1)]),
            Some(-lit(0, 1))
        );
    }

    #[test]
    fn sinks_first() {
        let problem = problem();
        let components = vec![
            vec![lit(0, 1), -lit(0, 2)],
            vec![lit(1, 2), -lit(1, 0)],
            vec![-lit(1, 2), lit(1, 0)],
            vec![-lit(0, 1), lit(0, 2)],
        ];
        assert_eq!(
            extract(&problem, &components),
            Solution::Recolored {
                coloring: vec![(0, color(2)), (1, color(0))]
            }
        );
    }

    #[test]
    fn contradiction_after_completion() {
        let problem = problem();
        let components = vec![
            vec![lit(1, 2), -lit(1, 2)],
            vec![-lit(0, 1), lit(0, 2), lit(1, 0)],
        ];
        assert_eq!(extract(&problem, &components), Solution::Unsat);
    }

    #[test]
    fn empty() {
        let problem = Problem::default();
        assert_eq!(
            extract(&problem, &[]),
            Solution::Recolored { coloring: vec![] }
        );
    }
}
