//! Second-order (reversible) 1-D driver.
//!
//! `next[i] = f(partition_i(current)) - previous[i]`, which for booleans is
//! `f(..) XOR previous[i]`. Swapping the last two states and applying the
//! same rule walks the history backwards.

use std::sync::Arc;

use log::{debug, trace};

use crate::schema::{ConfigError, Topology};

use super::automaton::expect_topology;
use super::{
    Automaton, Cell, Configuration, EngineError, OneDimensional, Phase, Rule, RuleEvaluator,
    StateHistory, StepOutcome, Timeline, neighborhood,
};

#[derive(Debug, Clone)]
pub struct SecondOrder<C: Cell> {
    configuration: Arc<Configuration<C>>,
    previous: Vec<C>,
    timeline: Timeline<Vec<C>>,
}

impl<C: Cell> SecondOrder<C> {
    /// Start at the configured `(previous, start)` pair.
    ///
    /// The history begins with both states, previous first.
    pub fn new(configuration: Arc<Configuration<C>>) -> Result<Self, ConfigError> {
        expect_topology(&configuration, Topology::SecondOrder1d)?;
        let previous = configuration
            .previous_state()
            .ok_or(ConfigError::MissingPreviousState)?
            .to_vec();
        let timeline = Timeline::with_prior(previous.clone(), configuration.start_state().to_vec());
        Ok(Self {
            configuration,
            previous,
            timeline,
        })
    }

    /// State one timestep before the current one.
    pub fn previous(&self) -> &[C] {
        &self.previous
    }

    /// A fresh automaton whose starting pair is the current pair swapped.
    ///
    /// Running it with the same rule for as many epochs as this one has
    /// taken retraces this history in reverse.
    pub fn time_reversed(&self) -> Result<Self, ConfigError> {
        debug!(
            "reversing second-order automaton after {} states",
            self.timeline.history.len()
        );
        let configuration = self
            .configuration
            .reseeded(self.previous.clone(), Some(self.timeline.state.clone()))?;
        Self::new(Arc::new(configuration))
    }
}

impl<C: Cell> Automaton for SecondOrder<C> {
    type Rule = Rule;
    type State = Vec<C>;

    fn state(&self) -> &Vec<C> {
        &self.timeline.state
    }

    fn history(&self) -> &StateHistory<Vec<C>> {
        &self.timeline.history
    }

    fn phase(&self) -> Phase {
        self.timeline.phase
    }

    fn reset(&mut self) {
        if let Some(previous) = self.configuration.previous_state() {
            self.previous = previous.to_vec();
        }
        self.timeline = Timeline::with_prior(
            self.previous.clone(),
            self.configuration.start_state().to_vec(),
        );
    }

    fn step(&mut self, rule: Rule) -> Result<StepOutcome, EngineError> {
        let config = &*self.configuration;
        let evaluator = RuleEvaluator::new(config, rule)?;
        let current = &self.timeline.state;
        let previous = &self.previous;

        let next = (0..current.len())
            .map(|cell| {
                let partition = neighborhood::extract(config, current, cell)?;
                let value = evaluator.second_order(cell, &partition, previous[cell])?;
                trace!("cell {cell}: {partition:?} / {:?} -> {value:?}", previous[cell]);
                Ok(value)
            })
            .collect::<Result<Vec<C>, EngineError>>()?;

        self.previous = self.timeline.advance(next);
        Ok(StepOutcome::Advanced)
    }

    fn finish(&mut self) {
        self.timeline.finish();
    }
}

impl<C: Cell> OneDimensional<C> for SecondOrder<C> {
    fn configuration(&self) -> &Arc<Configuration<C>> {
        &self.configuration
    }
}
