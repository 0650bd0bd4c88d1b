pub mod crowding;
pub mod direction;
pub mod dominance;
pub mod elitist;
pub mod pareto;
pub mod selection_strategy;

pub use crowding::{crowding_distance, crowding_order};
pub use direction::Direction;
pub use dominance::{
    domination_matrix, pareto_layers, Dominance, DominationMatrix, ParetoDominance,
    StrictDominance,
};
pub use elitist::ElitistSelection;
pub use pareto::{non_dominated_front, ParetoSelection};
pub use selection_strategy::{SelectionOutcome, SelectionStrategy};
