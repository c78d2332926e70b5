pub mod cnf;

use std::{
    collections::{btree_map::Entry, BTreeMap},
    io::{self, BufWriter, Read, Write},
    num::ParseIntError,
};

use thiserror::Error;

use crate::types::{Color, Problem, ProblemError, Solution, Vertex};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected at least 4 fields, found {found}")]
    FieldCount { line: u64, found: usize },
    #[error("line {line}: field {field} is not a non-negative integer")]
    Integer {
        line: u64,
        field: usize,
        #[source]
        source: ParseIntError,
    },
    #[error("line {line}: color {code} is outside the palette")]
    Color { line: u64, code: u32 },
    #[error("line {line}: vertex {vertex} has both color {first} and {second}")]
    ConflictingColor {
        line: u64,
        vertex: Vertex,
        first: Color,
        second: Color,
    },
    #[error(transparent)]
    Problem(#[from] ProblemError),
}

/// Reads edge records `node1,node2,color1,color2`.
///
/// Fields after the fourth are ignored. A vertex may appear in any number of
/// records but always with the same color.
pub fn read_problem(reader: impl Read) -> Result<Problem, LoadError> {
    let mut records = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut adjacency: BTreeMap<Vertex, Vec<Vertex>> = BTreeMap::new();
    let mut colors: BTreeMap<Vertex, Color> = BTreeMap::new();

    for record in records.records() {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());

        if record.len() < 4 {
            return Err(LoadError::FieldCount {
                line,
                found: record.len(),
            });
        }

        let field = |i: usize| -> Result<u32, LoadError> {
            record[i]
                .parse::<u32>()
                .map_err(|source| LoadError::Integer {
                    line,
                    field: i + 1,
                    source,
                })
        };
        let (u, v) = (field(0)?, field(1)?);
        let (code_u, code_v) = (field(2)?, field(3)?);

        for (vertex, code) in [(u, code_u), (v, code_v)] {
            let color = u8::try_from(code)
                .ok()
                .and_then(Color::new)
                .ok_or(LoadError::Color { line, code })?;

            match colors.entry(vertex) {
                Entry::Vacant(entry) => {
                    entry.insert(color);
                }
                Entry::Occupied(entry) if *entry.get() != color => {
                    return Err(LoadError::ConflictingColor {
                        line,
                        vertex,
                        first: *entry.get(),
                        second: color,
                    });
                }
                Entry::Occupied(_) => (),
            }
        }

        adjacency.entry(u).or_default().push(v);
        adjacency.entry(v).or_default().push(u);
    }

    Ok(Problem::new(adjacency, colors)?)
}

/// Writes every edge of `problem` as a record of [`read_problem`]'s format.
///
/// Isolated vertices have no record and are lost.
pub fn write_problem(writer: impl Write, problem: &Problem) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for u in problem.vertices() {
        let neighbors = problem.neighbors(u);
        // a loop is listed twice in its own adjacency
        let loops = neighbors.iter().filter(|&&v| v == u).count() / 2;
        let edges = neighbors
            .iter()
            .copied()
            .filter(|&v| v > u)
            .chain(std::iter::repeat_n(u, loops));

        for v in edges {
            writer.write_record([
                u.to_string(),
                v.to_string(),
                problem.color(u).to_string(),
                problem.color(v).to_string(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

pub fn write_solution(writer: &mut impl Write, solution: &Solution) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "c Recolored by tricolor.")?;

    let solution_str = match solution {
        Solution::Recolored { .. } => "RECOLORED",
        Solution::Unsat => "UNSATISFIABLE",
    };
    writeln!(writer, "s {solution_str}")?;

    if let Solution::Recolored { coloring } = solution {
        for (vertex, color) in coloring {
            writeln!(writer, "v {vertex} {color}")?;
        }
    }

    writer.flush()
}
