//! State history and driver lifecycle.

use serde::{Deserialize, Serialize};

/// Lifecycle of an evolution driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Holding the configured starting state; no step taken yet.
    Initialized,
    /// At least one step taken.
    Running,
    /// A `run` finished. Stepping again resumes `Running`.
    Completed,
}

/// Append-only sequence of states recorded across epochs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateHistory<S> {
    states: Vec<S>,
}

impl<S> StateHistory<S> {
    pub(crate) fn new(first: S) -> Self {
        Self {
            states: vec![first],
        }
    }

    pub(crate) fn push(&mut self, state: S) {
        self.states.push(state);
    }

    /// Number of recorded states.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false; a history starts with at least one state.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Most recent state.
    pub fn last(&self) -> Option<&S> {
        self.states.last()
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.states.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.states.iter()
    }

    pub fn as_slice(&self) -> &[S] {
        &self.states
    }

    pub fn into_vec(self) -> Vec<S> {
        self.states
    }
}

impl<'a, S> IntoIterator for &'a StateHistory<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

/// Current state, its history and the lifecycle phase, owned by a driver.
#[derive(Debug, Clone)]
pub(crate) struct Timeline<S> {
    pub(crate) state: S,
    pub(crate) history: StateHistory<S>,
    pub(crate) phase: Phase,
}

impl<S: Clone> Timeline<S> {
    pub(crate) fn new(start: S) -> Self {
        Self {
            history: StateHistory::new(start.clone()),
            state: start,
            phase: Phase::Initialized,
        }
    }

    /// History seeded with an earlier state ahead of `start`.
    pub(crate) fn with_prior(prior: S, start: S) -> Self {
        let mut timeline = Self::new(prior);
        timeline.history.push(start.clone());
        timeline.state = start;
        timeline
    }

    /// Replace the state wholesale and record it. Returns the replaced state.
    pub(crate) fn advance(&mut self, next: S) -> S {
        self.history.push(next.clone());
        self.phase = Phase::Running;
        std::mem::replace(&mut self.state, next)
    }

    pub(crate) fn finish(&mut self) {
        self.phase = Phase::Completed;
    }
}
