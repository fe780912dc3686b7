//! Block 1-D driver: the state is tiled into non-overlapping blocks.

use std::sync::Arc;

use log::trace;

use crate::schema::{ConfigError, Topology};

use super::automaton::expect_topology;
use super::{
    Automaton, Cell, Configuration, EngineError, OneDimensional, Phase, Rule, RuleEvaluator,
    StateHistory, StepOutcome, Timeline, neighborhood,
};

/// Blocks start at cells `0, P, 2P, ...`. Each block's pattern selects a rule
/// digit that is applied to all of its cells. A trailing partial block reads
/// past the edge through the boundary but only writes its in-range cells.
#[derive(Debug, Clone)]
pub struct Block<C: Cell> {
    configuration: Arc<Configuration<C>>,
    timeline: Timeline<Vec<C>>,
}

impl<C: Cell> Block<C> {
    pub fn new(configuration: Arc<Configuration<C>>) -> Result<Self, ConfigError> {
        expect_topology(&configuration, Topology::Block1d)?;
        let timeline = Timeline::new(configuration.start_state().to_vec());
        Ok(Self {
            configuration,
            timeline,
        })
    }

    /// First cell of every block.
    pub fn block_starts(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.configuration.state_size()).step_by(self.configuration.partition_size())
    }
}

impl<C: Cell> Automaton for Block<C> {
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
        let len = current.len();

        let mut next = current.clone();
        for start in self.block_starts() {
            let block = neighborhood::extract(config, current, start)?;
            let output = evaluator.block(start, &block)?;
            trace!("block {start}: {block:?} -> {output:?}");

            let end = (start + block.len()).min(len);
            next[start..end].copy_from_slice(&output[..end - start]);
        }

        self.timeline.advance(next);
        Ok(StepOutcome::Advanced)
    }

    fn finish(&mut self) {
        self.timeline.finish();
    }
}

impl<C: Cell> OneDimensional<C> for Block<C> {
    fn configuration(&self) -> &Arc<Configuration<C>> {
        &self.configuration
    }
}
