use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use tricolor::{
    generate::{self, Params},
    io as tio, parallel,
    solver::{self, Limits, Solver},
};

#[derive(Parser)]
#[command(version, about = "Recolor a 3-colored graph so that every vertex changes color")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve an instance given as CSV records `node1,node2,color1,color2`.
    Solve {
        input: PathBuf,
        /// Solve connected components on this many threads.
        #[arg(short = 'j', long)]
        threads: Option<usize>,
        /// Give up when the implication graph has more literals.
        #[arg(long)]
        max_literals: Option<usize>,
        /// Also write the compiled clauses in DIMACS CNF.
        #[arg(long)]
        cnf: Option<PathBuf>,
    },
    /// Write a random instance as CSV.
    Generate {
        #[arg(short = 'n', long)]
        vertices: u32,
        #[arg(short = 'm', long)]
        edges: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Make the original coloring proper.
        #[arg(long)]
        proper: bool,
        /// Defaults to standard output.
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let env = env_logger::Env::new()
        .filter("TRICOLOR_LOG")
        .write_style("TRICOLOR_LOG_STYLE");
    env_logger::init_from_env(env);

    match Cli::parse().command {
        Command::Solve {
            input,
            threads,
            max_literals,
            cnf,
        } => solve_file(input, threads, Limits { max_literals }, cnf),
        Command::Generate {
            vertices,
            edges,
            seed,
            proper,
            output,
        } => generate_file(
            Params {
                vertices,
                edges,
                proper,
            },
            seed,
            output,
        ),
    }
}

fn solve_file(
    input: PathBuf,
    threads: Option<usize>,
    limits: Limits,
    cnf: Option<PathBuf>,
) -> Result<()> {
    let file = File::open(&input).with_context(|| format!("cannot open {}", input.display()))?;
    let problem =
        tio::read_problem(file).with_context(|| format!("cannot load {}", input.display()))?;
    debug!("loaded {} vertices from {}", problem.len(), input.display());

    if let Some(path) = cnf {
        let mut file =
            File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;
        tio::cnf::write_cnf(&mut file, &solver::compile::compile(&problem))
            .with_context(|| format!("cannot write {}", path.display()))?;
    }

    let solution = match threads {
        Some(n) => parallel::solve(problem, Some(n), limits)?,
        None => Solver::with_limits(problem, limits).solve()?,
    };

    tio::write_solution(&mut io::stdout(), &solution)?;
    Ok(())
}

fn generate_file(params: Params, seed: Option<u64>, output: Option<PathBuf>) -> Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let problem = generate::random_problem(&mut rng, params);

    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    tio::write_problem(writer, &problem).context("cannot write instance")?;
    Ok(())
}
