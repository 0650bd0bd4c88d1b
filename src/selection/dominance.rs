//! # Dominance
//!
//! Pairwise dominance between objective vectors and the layering (non-dominated
//! sorting) built on top of it.
//!
//! Two predicates are provided. [`StrictDominance`], the default, requires the
//! dominating vector to be strictly better in every objective. [`ParetoDominance`]
//! is the textbook rule: no worse in any objective and strictly better in at least
//! one. The strict rule dominates less often, so first layers are larger and
//! ties between vectors sharing a component value never separate them.
//!
//! Layering uses an explicit O(n²) domination matrix. That is fine for
//! populations up to a few thousand members; a divide-and-conquer sort could
//! replace [`pareto_layers`] behind the same signature.

use std::fmt::Debug;

use crate::selection::direction::Direction;

/// A dominance predicate over objective vectors.
pub trait Dominance: Debug + Send + Sync {
    /// Returns `true` if `a` dominates `b`.
    fn dominates(&self, a: &[f64], b: &[f64]) -> bool;
}

/// `a` dominates `b` iff `a` is strictly better in every objective.
///
/// ```
/// use evogen::selection::{Direction, Dominance, StrictDominance};
///
/// let strict = StrictDominance::new(Direction::Minimize);
/// assert!(strict.dominates(&[1.0, 1.0], &[2.0, 2.0]));
/// assert!(!strict.dominates(&[1.0, 2.0], &[2.0, 2.0]));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrictDominance {
    direction: Direction,
}

impl StrictDominance {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl Dominance for StrictDominance {
    fn dominates(&self, a: &[f64], b: &[f64]) -> bool {
        !a.is_empty()
            && a.len() == b.len()
            && a
                .iter()
                .zip(b)
                .all(|(&x, &y)| self.direction.is_strictly_better(x, y))
    }
}

/// `a` dominates `b` iff `a` is no worse in every objective and strictly better
/// in at least one.
///
/// ```
/// use evogen::selection::{Direction, Dominance, ParetoDominance};
///
/// let pareto = ParetoDominance::new(Direction::Minimize);
/// assert!(pareto.dominates(&[1.0, 2.0], &[2.0, 2.0]));
/// assert!(!pareto.dominates(&[2.0, 2.0], &[2.0, 2.0]));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParetoDominance {
    direction: Direction,
}

impl ParetoDominance {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl Dominance for ParetoDominance {
    fn dominates(&self, a: &[f64], b: &[f64]) -> bool {
        if a.is_empty() || a.len() != b.len() {
            return false;
        }

        let mut strictly_better_somewhere = false;
        for (&x, &y) in a.iter().zip(b) {
            if !self.direction.is_no_worse(x, y) {
                return false;
            }
            if self.direction.is_strictly_better(x, y) {
                strictly_better_somewhere = true;
            }
        }
        strictly_better_somewhere
    }
}

/// Square matrix where cell `(i, j)` records whether member `i` dominates member `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominationMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl DominationMatrix {
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn dominates(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.size + j]
    }

    /// Number of members dominating `j`.
    pub fn dominator_count(&self, j: usize) -> usize {
        (0..self.size).filter(|&i| self.dominates(i, j)).count()
    }
}

/// Builds the pairwise domination matrix. The diagonal is always `false`.
pub fn domination_matrix<T, D>(objectives: &[T], dominance: &D) -> DominationMatrix
where
    T: AsRef<[f64]>,
    D: Dominance + ?Sized,
{
    let size = objectives.len();
    let mut cells = vec![false; size * size];

    for i in 0..size {
        for j in 0..size {
            if i != j {
                cells[i * size + j] =
                    dominance.dominates(objectives[i].as_ref(), objectives[j].as_ref());
            }
        }
    }

    DominationMatrix { size, cells }
}

/// Partitions members into dominance layers, best layer first.
///
/// Each layer holds the unassigned members that no other unassigned member
/// dominates. A predicate that is not a strict partial order can leave every
/// remaining member dominated; the members with the fewest unassigned
/// dominators then form the next layer, so the loop always makes progress.
/// Every member appears in exactly one layer and no layer is empty.
///
/// ```
/// use evogen::selection::{domination_matrix, pareto_layers, Direction, StrictDominance};
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
///     vec![4.0, 4.0], // dominated by [3, 3]
/// ];
/// let matrix = domination_matrix(&objectives, &StrictDominance::new(Direction::Minimize));
///
/// assert_eq!(pareto_layers(&matrix), vec![vec![0, 1, 2], vec![3]]);
/// ```
pub fn pareto_layers(matrix: &DominationMatrix) -> Vec<Vec<usize>> {
    let size = matrix.len();
    let mut remaining_dominators: Vec<usize> =
        (0..size).map(|j| matrix.dominator_count(j)).collect();
    let mut assigned = vec![false; size];
    let mut unassigned = size;
    let mut layers = Vec::new();

    while unassigned > 0 {
        let threshold = (0..size)
            .filter(|&j| !assigned[j])
            .map(|j| remaining_dominators[j])
            .min()
            .unwrap_or(0);

        if threshold > 0 {
            tracing::debug!(
                layer = layers.len(),
                threshold,
                "dominance relation has a cycle, layering by fewest dominators"
            );
        }

        let layer: Vec<usize> = (0..size)
            .filter(|&j| !assigned[j] && remaining_dominators[j] == threshold)
            .collect();

        for &i in &layer {
            assigned[i] = true;
        }
        for &i in &layer {
            for j in 0..size {
                if !assigned[j] && matrix.dominates(i, j) {
                    remaining_dominators[j] -= 1;
                }
            }
        }

        unassigned -= layer.len();
        layers.push(layer);
    }

    layers
}
