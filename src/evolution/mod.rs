pub mod builder;
pub mod evaluation;
pub mod options;
pub mod solver;

pub use builder::SolverBuilder;
pub use evaluation::evaluate_population;
pub use options::{LogLevel, SolverOptions, SolverOptionsBuilder};
pub use solver::{EvolutionResult, Solver};
