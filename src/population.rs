//! # Population
//!
//! A `Population` is an arena of individuals addressed by `IndividualId` handles.
//! Ids are handed out in increasing order and never reused, so iteration follows
//! insertion order and removing one member leaves every other handle valid.
//! Selection stages hold ids (for the elite, for Pareto layers) across inserts
//! and removals instead of positional indices.

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;

use crate::individual::Individual;

/// Stable handle to a member of a [`Population`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualId(u64);

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An insertion-ordered collection of individuals with stable identity.
#[derive(Debug, Clone)]
pub struct Population<V, F> {
    members: BTreeMap<IndividualId, Individual<V, F>>,
    next_id: u64,
}

impl<V, F> Population<V, F> {
    pub fn new() -> Self {
        Self {
            members: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Adds an individual and returns its handle.
    pub fn insert(&mut self, individual: Individual<V, F>) -> IndividualId {
        let id = IndividualId(self.next_id);
        self.next_id += 1;
        self.members.insert(id, individual);
        id
    }

    /// Removes a member. Other handles stay valid.
    pub fn remove(&mut self, id: IndividualId) -> Option<Individual<V, F>> {
        self.members.remove(&id)
    }

    pub fn get(&self, id: IndividualId) -> Option<&Individual<V, F>> {
        self.members.get(&id)
    }

    pub fn get_mut(&mut self, id: IndividualId) -> Option<&mut Individual<V, F>> {
        self.members.get_mut(&id)
    }

    pub fn contains(&self, id: IndividualId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Snapshot of all handles in insertion order.
    pub fn ids(&self) -> Vec<IndividualId> {
        self.members.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndividualId, &Individual<V, F>)> {
        self.members.iter().map(|(id, individual)| (*id, individual))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (IndividualId, &mut Individual<V, F>)> {
        self.members
            .iter_mut()
            .map(|(id, individual)| (*id, individual))
    }

    /// Keeps only the members for which `keep` returns `true`.
    pub fn retain<P>(&mut self, mut keep: P)
    where
        P: FnMut(IndividualId, &Individual<V, F>) -> bool,
    {
        self.members.retain(|id, individual| keep(*id, individual));
    }

    /// Number of members whose fitness cache is empty.
    pub fn stale_count(&self) -> usize {
        self.members
            .values()
            .filter(|individual| !individual.is_evaluated())
            .count()
    }

    /// Removes every member. Ids handed out before are not reused.
    pub fn clear(&mut self) {
        self.members.clear();
    }
}

impl<V, F> Population<V, F>
where
    V: Send,
    F: Send,
{
    /// Parallel mutable iteration over members. The arena structure itself
    /// cannot change while the iterator is alive.
    pub(crate) fn par_iter_mut(
        &mut self,
    ) -> impl ParallelIterator<Item = (&IndividualId, &mut Individual<V, F>)> {
        self.members.par_iter_mut()
    }
}

impl<V, F> Default for Population<V, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, F> FromIterator<Individual<V, F>> for Population<V, F> {
    fn from_iter<I: IntoIterator<Item = Individual<V, F>>>(iter: I) -> Self {
        let mut population = Population::new();
        for individual in iter {
            population.insert(individual);
        }
        population
    }
}
