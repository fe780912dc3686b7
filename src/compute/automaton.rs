//! Evolution driver interface and 1-D variant dispatch.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::schema::{ConfigError, Topology};

use super::{
    Block, Cell, Configuration, Elementary, EngineError, Phase, Rule, RuleTrial, SecondOrder,
    StateHistory, Survey, neighborhood,
};

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new state was computed and recorded.
    Advanced,
    /// The new state equals the current one; nothing was recorded.
    Converged,
}

/// A driver that evolves a state one epoch at a time.
///
/// Every step builds the next state from an immutable view of the current
/// one and then replaces it wholesale, appending it to the history.
pub trait Automaton {
    /// What selects the local transition.
    type Rule: Copy + fmt::Debug;
    /// Whole-automaton state.
    type State: Clone + PartialEq + fmt::Debug;

    /// Current state.
    fn state(&self) -> &Self::State;

    /// States recorded since the last reset.
    fn history(&self) -> &StateHistory<Self::State>;

    fn phase(&self) -> Phase;

    /// Return to the configured starting state with a fresh history.
    fn reset(&mut self);

    /// Advance one epoch.
    fn step(&mut self, rule: Self::Rule) -> Result<StepOutcome, EngineError>;

    /// Mark the current run as completed.
    fn finish(&mut self);

    /// Step `epochs` times, stopping early on convergence.
    fn run(
        &mut self,
        rule: Self::Rule,
        epochs: usize,
    ) -> Result<&StateHistory<Self::State>, EngineError> {
        for epoch in 0..epochs {
            if self.step(rule)? == StepOutcome::Converged {
                debug!("rule {:?} converged at epoch {}", rule, epoch + 1);
                break;
            }
        }
        self.finish();
        Ok(self.history())
    }
}

/// Drivers over a 1-D [`Configuration`].
pub trait OneDimensional<C: Cell>: Automaton<Rule = Rule, State = Vec<C>> {
    /// Shared, frozen configuration.
    fn configuration(&self) -> &Arc<Configuration<C>>;

    /// Partition the rule would see for `cell` in the current state.
    fn partition(&self, cell: usize) -> Result<Vec<C>, EngineError> {
        neighborhood::extract(self.configuration(), self.state(), cell)
    }

    /// Run every rule in the configuration's rule space for `epochs` steps,
    /// each from a fresh copy of the starting state.
    fn run_all(&self, epochs: usize) -> Result<Vec<RuleTrial<C>>, EngineError> {
        Survey::new(Arc::clone(self.configuration()), epochs).run()
    }
}

/// Fail unless `config` describes a `expected` automaton.
pub(crate) fn expect_topology<C: Cell>(
    config: &Configuration<C>,
    expected: Topology,
) -> Result<(), ConfigError> {
    if config.topology() != expected {
        return Err(ConfigError::TopologyMismatch {
            expected,
            actual: config.topology(),
        });
    }
    Ok(())
}

/// Any 1-D automaton, selected by the configuration's topology.
#[derive(Debug, Clone)]
pub enum LineAutomaton<C: Cell> {
    Elementary(Elementary<C>),
    SecondOrder(SecondOrder<C>),
    Block(Block<C>),
}

impl<C: Cell> LineAutomaton<C> {
    /// Create the driver matching `configuration.topology()`.
    pub fn new(configuration: Arc<Configuration<C>>) -> Result<Self, ConfigError> {
        match configuration.topology() {
            Topology::Standard1d => Ok(Self::Elementary(Elementary::new(configuration)?)),
            Topology::SecondOrder1d => Ok(Self::SecondOrder(SecondOrder::new(configuration)?)),
            Topology::Block1d => Ok(Self::Block(Block::new(configuration)?)),
            topology @ Topology::Moore2d => Err(ConfigError::UnsupportedTopology {
                topology,
                reason: "grid automata are driven by Life",
            }),
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            LineAutomaton::Elementary($inner) => $body,
            LineAutomaton::SecondOrder($inner) => $body,
            LineAutomaton::Block($inner) => $body,
        }
    };
}

impl<C: Cell> Automaton for LineAutomaton<C> {
    type Rule = Rule;
    type State = Vec<C>;

    fn state(&self) -> &Vec<C> {
        dispatch!(self, a => a.state())
    }

    fn history(&self) -> &StateHistory<Vec<C>> {
        dispatch!(self, a => a.history())
    }

    fn phase(&self) -> Phase {
        dispatch!(self, a => a.phase())
    }

    fn reset(&mut self) {
        dispatch!(self, a => a.reset())
    }

    fn step(&mut self, rule: Rule) -> Result<StepOutcome, EngineError> {
        dispatch!(self, a => a.step(rule))
    }

    fn finish(&mut self) {
        dispatch!(self, a => a.finish())
    }
}

impl<C: Cell> OneDimensional<C> for LineAutomaton<C> {
    fn configuration(&self) -> &Arc<Configuration<C>> {
        dispatch!(self, a => a.configuration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AutomatonConfig, Boundary};

    fn configuration(topology: Topology) -> Arc<Configuration<bool>> {
        let config = AutomatonConfig {
            topology,
            boundary: Boundary::Cyclic,
            width: 9,
            ..Default::default()
        };
        let mut start = vec![false; 9];
        start[4] = true;
        let previous = (topology == Topology::SecondOrder1d).then(|| vec![false; 9]);
        Arc::new(Configuration::new(&config, start, previous).unwrap())
    }

    #[test]
    fn test_dispatch_by_topology() {
        for topology in [Topology::Standard1d, Topology::SecondOrder1d, Topology::Block1d] {
            let automaton = LineAutomaton::new(configuration(topology)).unwrap();
            let matches = matches!(
                (&automaton, topology),
                (LineAutomaton::Elementary(_), Topology::Standard1d)
                    | (LineAutomaton::SecondOrder(_), Topology::SecondOrder1d)
                    | (LineAutomaton::Block(_), Topology::Block1d)
            );
            assert!(matches, "wrong variant for {topology}");
        }
    }

    #[test]
    fn test_run_lifecycle() {
        let mut automaton = LineAutomaton::new(configuration(Topology::Standard1d)).unwrap();
        assert_eq!(automaton.phase(), Phase::Initialized);
        assert_eq!(automaton.history().len(), 1);

        automaton.step(Rule(90)).unwrap();
        assert_eq!(automaton.phase(), Phase::Running);

        let history = automaton.run(Rule(90), 3).unwrap();
        assert_eq!(history.len(), 5);
        assert_eq!(automaton.phase(), Phase::Completed);

        automaton.reset();
        assert_eq!(automaton.phase(), Phase::Initialized);
        assert_eq!(automaton.history().len(), 1);
        assert_eq!(automaton.state(), automaton.configuration().start_state());
    }

    #[test]
    fn test_partition_accessor() {
        let automaton = LineAutomaton::new(configuration(Topology::Standard1d)).unwrap();
        assert_eq!(automaton.partition(4).unwrap(), vec![false, true, false]);
        assert_eq!(automaton.partition(0).unwrap(), vec![false, false, false]);
    }

    #[test]
    fn test_failed_step_leaves_state() {
        let mut automaton = LineAutomaton::new(configuration(Topology::Standard1d)).unwrap();
        assert!(matches!(
            automaton.step(Rule(256)),
            Err(EngineError::RuleOutOfRange { .. })
        ));
        assert_eq!(automaton.history().len(), 1);
        assert_eq!(automaton.phase(), Phase::Initialized);
    }
}
