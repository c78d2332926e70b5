use std::io::{self, BufWriter, Write};

use crate::types::Clause;

/// Writes `clauses` in DIMACS CNF.
///
/// Variables keep their literal codes, so the codes of the first vertex block
/// are declared but never used.
pub fn write_cnf(writer: &mut impl Write, clauses: &[Clause]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);

    let var_count = clauses.iter().flatten().map(|lit| lit.var()).max().unwrap_or(0);
    writeln!(writer, "c recoloring constraints")?;
    writeln!(writer, "p cnf {var_count} {}", clauses.len())?;

    for clause in clauses {
        write_clause(&mut writer, clause)?;
    }

    writer.flush()
}

fn write_clause(writer: &mut impl Write, clause: &Clause) -> io::Result<()> {
    let clause_str = clause
        .iter()
        .fold(String::new(), |str, lit| str + &lit.to_string() + " ");
    writeln!(writer, "{clause_str}0")
}
