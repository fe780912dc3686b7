//! Standard 1-D driver: one overlapping neighborhood per cell.

use std::sync::Arc;

use log::trace;

use crate::schema::{ConfigError, Topology};

use super::automaton::expect_topology;
use super::{
    Automaton, Cell, Configuration, EngineError, OneDimensional, Phase, Rule, RuleEvaluator,
    StateHistory, StepOutcome, Timeline, neighborhood,
};

/// Wolfram-style elementary automaton, generalized to any partition size and
/// cell alphabet.
#[derive(Debug, Clone)]
pub struct Elementary<C: Cell> {
    configuration: Arc<Configuration<C>>,
    timeline: Timeline<Vec<C>>,
}

impl<C: Cell> Elementary<C> {
    /// Start at the configuration's starting state.
    pub fn new(configuration: Arc<Configuration<C>>) -> Result<Self, ConfigError> {
        expect_topology(&configuration, Topology::Standard1d)?;
        let timeline = Timeline::new(configuration.start_state().to_vec());
        Ok(Self {
            configuration,
            timeline,
        })
    }
}

impl<C: Cell> Automaton for Elementary<C> {
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
        self.timeline = Timeline::new(self.configuration.start_state().to_vec());
    }

    fn step(&mut self, rule: Rule) -> Result<StepOutcome, EngineError> {
        let config = &*self.configuration;
        let evaluator = RuleEvaluator::new(config, rule)?;
        let current = &self.timeline.state;

        let next = (0..current.len())
            .map(|cell| {
                let partition = neighborhood::extract(config, current, cell)?;
                let value = evaluator.neighborhood(cell, &partition)?;
                trace!("cell {cell}: {partition:?} -> {value:?}");
                Ok(value)
            })
            .collect::<Result<Vec<C>, EngineError>>()?;

        self.timeline.advance(next);
        Ok(StepOutcome::Advanced)
    }

    fn finish(&mut self) {
        self.timeline.finish();
    }
}

impl<C: Cell> OneDimensional<C> for Elementary<C> {
    fn configuration(&self) -> &Arc<Configuration<C>> {
        &self.configuration
    }
}
