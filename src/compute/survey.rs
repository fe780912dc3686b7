//! Exhaustive rule surveys over one 1-D configuration.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use super::{Automaton, Cell, Configuration, EngineError, LineAutomaton, Rule, StateHistory};

/// History produced by one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleTrial<C> {
    pub rule: Rule,
    pub history: StateHistory<Vec<C>>,
}

/// Runs every rule of a configuration's rule space from the same start.
///
/// Each trial gets a fresh automaton; the configuration itself is shared.
#[derive(Debug, Clone)]
pub struct Survey<C: Cell> {
    configuration: Arc<Configuration<C>>,
    epochs: usize,
    cancelled: Arc<AtomicBool>,
}

impl<C: Cell> Survey<C> {
    pub fn new(configuration: Arc<Configuration<C>>, epochs: usize) -> Self {
        Self {
            configuration,
            epochs,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get cancellation handle.
    ///
    /// Setting it stops the survey before the next trial or epoch.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Every rule in order.
    pub fn rules(&self) -> impl Iterator<Item = Rule> + use<C> {
        (0..self.configuration.rule_count()).map(Rule)
    }

    /// Run a single rule from the starting state. `None` if cancelled.
    pub fn trial(&self, rule: Rule) -> Result<Option<RuleTrial<C>>, EngineError> {
        if self.is_cancelled() {
            return Ok(None);
        }
        let mut automaton = LineAutomaton::new(Arc::clone(&self.configuration))?;
        for _ in 0..self.epochs {
            if self.is_cancelled() {
                return Ok(None);
            }
            automaton.step(rule)?;
        }
        automaton.finish();
        debug!("rule {rule}: {} states", automaton.history().len());
        Ok(Some(RuleTrial {
            rule,
            history: automaton.history().clone(),
        }))
    }

    /// Run rules in order, handing each trial to `visit` until it breaks,
    /// the survey is cancelled or the rule space is exhausted.
    ///
    /// Returns the number of trials visited.
    pub fn for_each<F>(&self, mut visit: F) -> Result<usize, EngineError>
    where
        F: FnMut(RuleTrial<C>) -> ControlFlow<()>,
    {
        info!(
            "surveying {} rules over {} epochs",
            self.configuration.rule_count(),
            self.epochs
        );
        let mut visited = 0;
        for rule in self.rules() {
            let Some(trial) = self.trial(rule)? else {
                info!("survey cancelled after {visited} rules");
                break;
            };
            visited += 1;
            if visit(trial).is_break() {
                break;
            }
        }
        Ok(visited)
    }

    /// Every trial, in rule order.
    pub fn run(&self) -> Result<Vec<RuleTrial<C>>, EngineError> {
        let mut trials = Vec::new();
        self.for_each(|trial| {
            trials.push(trial);
            ControlFlow::Continue(())
        })?;
        Ok(trials)
    }

    /// Like [`Survey::run`], with trials spread over the rayon thread pool.
    ///
    /// Cancellation stops new trials from being scheduled. Trials cut short
    /// by it are dropped.
    pub fn par_run(&self) -> Result<Vec<RuleTrial<C>>, EngineError> {
        info!(
            "surveying {} rules over {} epochs in parallel",
            self.configuration.rule_count(),
            self.epochs
        );
        let trials = (0..self.configuration.rule_count())
            .into_par_iter()
            .take_any_while(|_| !self.is_cancelled())
            .map(|rule| self.trial(Rule(rule)))
            .collect::<Result<Vec<_>, EngineError>>()?;
        Ok(trials.into_iter().flatten().collect())
    }
}
