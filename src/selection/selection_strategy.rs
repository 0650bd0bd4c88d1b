use std::fmt::Debug;

use crate::error::Result;
use crate::individual::Fitness;
use crate::population::{IndividualId, Population};

/// What a selection pass decided about the elite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Handle of the elite, always a live member of the population.
    pub elite: IndividualId,
    /// Whether the elite is strictly better than the previous one.
    /// The solver resets its stagnation counter on `true` and increments it otherwise.
    pub improved: bool,
}

/// Trait for the survivor selection stage of the generational loop.
///
/// A selection strategy shrinks an evaluated population back to the target size,
/// in place, and names the elite that the variation stage must leave untouched.
///
/// # Examples
///
/// ```
/// use evogen::individual::Individual;
/// use evogen::population::Population;
/// use evogen::selection::{ElitistSelection, SelectionStrategy};
///
/// let mut population: Population<&str, f64> = Population::new();
/// population.insert(Individual::with_fitness("a", 0.5));
/// population.insert(Individual::with_fitness("b", 0.8));
/// population.insert(Individual::with_fitness("c", 0.3));
///
/// let selection = ElitistSelection::default();
/// let outcome = selection.select(&mut population, 2, None).unwrap();
///
/// let elite = population.get(outcome.elite).unwrap();
/// assert_eq!(*elite.value(), "b");
/// assert!(outcome.improved);
/// ```
pub trait SelectionStrategy<F>: Debug + Send + Sync
where
    F: Fitness,
{
    /// Selects the survivors of the current generation.
    ///
    /// # Arguments
    ///
    /// * `population` - The evaluated population; unselected members are removed from it.
    /// * `population_size` - The target number of survivors.
    /// * `previous_elite` - The elite chosen by the previous pass, if any. It is a
    ///   live member of `population` when the call starts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - A member has not been evaluated
    /// - Fitness values are inconsistent (e.g. objective vectors of different lengths)
    fn select<V>(
        &self,
        population: &mut Population<V, F>,
        population_size: usize,
        previous_elite: Option<IndividualId>,
    ) -> Result<SelectionOutcome>
    where
        V: Clone;
}
