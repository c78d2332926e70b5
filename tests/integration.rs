use std::fs;

use rand::{rngs::StdRng, SeedableRng};
use tricolor::{
    generate::{random_problem, Params},
    io, parallel,
    solver::{self, Limits},
    types::Solution,
};

enum Mode {
    Serial,
    Parallel,
}

fn test_dir(path: &str, recolorable: bool, mode: Mode) {
    let mut count = 0;
    for entry in fs::read_dir(path).unwrap() {
        let path = entry.unwrap().path();
        let file = fs::File::open(&path).unwrap();

        let problem = io::read_problem(file).unwrap();
        let solution = match mode {
            Mode::Serial => solver::Solver::new(problem.clone()).solve().unwrap(),
            Mode::Parallel => parallel::solve(problem.clone(), Some(4), Limits::default()).unwrap(),
        };
        assert!(
            solver::verify(&problem, recolorable, &solution),
            "{}: {solution:?}",
            path.display()
        );
        count += 1;
    }
    assert!(count > 0, "no instances in {path}");
}

#[test]
fn recolorable_serial() {
    test_dir("tests/data/recolorable", true, Mode::Serial);
}

#[test]
fn recolorable_parallel() {
    test_dir("tests/data/recolorable", true, Mode::Parallel);
}

#[test]
fn unrecolorable_serial() {
    test_dir("tests/data/unrecolorable", false, Mode::Serial);
}

#[test]
fn unrecolorable_parallel() {
    test_dir("tests/data/unrecolorable", false, Mode::Parallel);
}

#[test]
fn generated_instances_agree() {
    let mut rng = StdRng::seed_from_u64(2025);
    for round in 0..50 {
        let params = Params {
            vertices: 40,
            edges: 30 + round,
            proper: round % 2 == 0,
        };
        let problem = random_problem(&mut rng, params);

        let serial = solver::recolor(&problem);
        let parallel = parallel::solve(problem.clone(), Some(3), Limits::default()).unwrap();
        let recolorable = serial != Solution::Unsat;

        assert!(solver::verify(&problem, recolorable, &serial));
        assert!(solver::verify(&problem, recolorable, &parallel));
    }
}

#[test]
fn csv_round_trip_solves_alike() {
    let mut rng = StdRng::seed_from_u64(11);
    let params = Params {
        vertices: 25,
        edges: 40,
        proper: true,
    };
    let problem = random_problem(&mut rng, params);

    let mut buf: Vec<u8> = vec![];
    io::write_problem(&mut buf, &problem).unwrap();
    let reread = io::read_problem(buf.as_slice()).unwrap();

    // isolated vertices do not survive the CSV form
    let connected: Vec<u32> = problem
        .vertices()
        .filter(|&v| !problem.neighbors(v).is_empty())
        .collect();
    let problem = problem.restrict(&connected);
    assert_eq!(reread.colors(), problem.colors());

    let expected = solver::recolor(&problem) != Solution::Unsat;
    assert!(solver::verify(&reread, expected, &solver::recolor(&reread)));
}
