pub mod breeding;
pub mod error;
pub mod evolution;
pub mod individual;
pub mod operators;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionResult, Solver, SolverBuilder, SolverOptions};
pub use individual::{Fitness, Individual};
pub use operators::{GenerationInfo, OperatorSet, Operators};
pub use population::{IndividualId, Population};
pub use selection::{Direction, ElitistSelection, ParetoSelection, SelectionStrategy};
