pub mod generate;
pub mod io;
pub mod parallel;
pub mod solver;
pub mod types;
