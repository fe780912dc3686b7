//! Frozen configuration of one 1-D automaton run.

use crate::schema::{AutomatonConfig, Bias, Boundary, ConfigError, Interaction, Topology};

use super::{Cell, EngineError, PermutationTable, Rule};

/// Immutable description of a 1-D automaton: topology, rule semantics,
/// starting state(s) and the permutation table built from them.
///
/// Constructed once per run and shared read-only by every extraction and
/// evaluation, including across all trials of a rule survey.
#[derive(Debug, Clone)]
pub struct Configuration<C: Cell> {
    topology: Topology,
    boundary: Boundary,
    bias: Bias,
    interaction: Interaction,
    partition_size: usize,
    start: Vec<C>,
    previous: Option<Vec<C>>,
    permutations: PermutationTable<C>,
    rule_count: u128,
}

impl<C: Cell> Configuration<C> {
    /// Validate `config` against the starting state(s) and freeze it.
    ///
    /// `previous` is the state one timestep before `start` and is required
    /// for (and only accepted by) second-order automata.
    pub fn new(
        config: &AutomatonConfig,
        start: Vec<C>,
        previous: Option<Vec<C>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if !config.topology.is_1d() {
            return Err(ConfigError::UnsupportedTopology {
                topology: config.topology,
                reason: "grid automata are configured with LifeConfiguration",
            });
        }
        if start.len() != config.width {
            return Err(ConfigError::StartStateLength {
                expected: config.width,
                actual: start.len(),
            });
        }
        match (&previous, config.topology) {
            (None, Topology::SecondOrder1d) => return Err(ConfigError::MissingPreviousState),
            (Some(_), topology) if topology != Topology::SecondOrder1d => {
                return Err(ConfigError::UnexpectedPreviousState);
            }
            (Some(prev), _) if prev.len() != start.len() => {
                return Err(ConfigError::PreviousStateLength {
                    expected: start.len(),
                    actual: prev.len(),
                });
            }
            _ => {}
        }

        let too_large = || ConfigError::RuleSpaceTooLarge {
            permutations: config.partition_size,
        };
        let permutations = PermutationTable::new(config.partition_size).ok_or_else(too_large)?;
        let exponent = u32::try_from(permutations.len()).map_err(|_| too_large())?;
        let rule_count = (C::STATES as u128)
            .checked_pow(exponent)
            .ok_or(ConfigError::RuleSpaceTooLarge {
                permutations: permutations.len(),
            })?;

        Ok(Self {
            topology: config.topology,
            boundary: config.boundary,
            bias: config.bias,
            interaction: config.interaction(),
            partition_size: config.partition_size,
            start,
            previous,
            permutations,
            rule_count,
        })
    }

    /// Same parameters, new starting window.
    pub fn reseeded(&self, start: Vec<C>, previous: Option<Vec<C>>) -> Result<Self, ConfigError> {
        Self::new(&self.to_config(), start, previous)
    }

    /// Declarative form of these parameters.
    pub fn to_config(&self) -> AutomatonConfig {
        AutomatonConfig {
            topology: self.topology,
            boundary: self.boundary,
            bias: self.bias,
            interaction: Some(self.interaction),
            partition_size: self.partition_size,
            width: self.start.len(),
            height: 1,
        }
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    #[inline]
    pub fn partition_bias(&self) -> Bias {
        self.bias
    }

    #[inline]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    #[inline]
    pub fn partition_size(&self) -> usize {
        self.partition_size
    }

    #[inline]
    pub fn state_size(&self) -> usize {
        self.start.len()
    }

    /// State at epoch 0.
    pub fn start_state(&self) -> &[C] {
        &self.start
    }

    /// State one timestep before the start (second-order only).
    pub fn previous_state(&self) -> Option<&[C]> {
        self.previous.as_deref()
    }

    /// Every partition value assignment, in rule-digit order.
    pub fn partition_permutations(&self) -> &PermutationTable<C> {
        &self.permutations
    }

    /// Number of permutation table entries.
    #[inline]
    pub fn total_permutations(&self) -> usize {
        self.permutations.len()
    }

    /// Number of distinct rules, `STATES^total_permutations`.
    #[inline]
    pub fn rule_count(&self) -> u128 {
        self.rule_count
    }

    /// Reject rules outside `0..rule_count()`.
    pub fn check_rule(&self, rule: Rule) -> Result<(), EngineError> {
        if rule.get() >= self.rule_count {
            return Err(EngineError::RuleOutOfRange {
                rule,
                count: self.rule_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Digit;

    fn config(topology: Topology, partition_size: usize) -> AutomatonConfig {
        AutomatonConfig {
            topology,
            partition_size,
            width: 8,
            ..Default::default()
        }
    }

    #[test]
    fn test_accessors() {
        let cfg = Configuration::new(&config(Topology::Standard1d, 3), vec![false; 8], None).unwrap();
        assert_eq!(cfg.partition_size(), 3);
        assert_eq!(cfg.state_size(), 8);
        assert_eq!(cfg.boundary(), Boundary::Cyclic);
        assert_eq!(cfg.partition_bias(), Bias::Left);
        assert_eq!(cfg.interaction(), Interaction::NeighborhoodToRuleBit);
        assert_eq!(cfg.total_permutations(), 8);
        assert_eq!(cfg.rule_count(), 256);
        assert_eq!(cfg.partition_permutations().len(), 8);
        assert!(cfg.previous_state().is_none());
    }

    #[test]
    fn test_previous_length_mismatch() {
        let result = Configuration::new(
            &config(Topology::SecondOrder1d, 3),
            vec![false; 8],
            Some(vec![false; 7]),
        );
        assert!(matches!(
            result,
            Err(ConfigError::PreviousStateLength {
                expected: 8,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_previous_required_for_second_order() {
        let result = Configuration::new(&config(Topology::SecondOrder1d, 3), vec![false; 8], None);
        assert!(matches!(result, Err(ConfigError::MissingPreviousState)));
    }

    #[test]
    fn test_previous_rejected_for_standard() {
        let result = Configuration::new(
            &config(Topology::Standard1d, 3),
            vec![false; 8],
            Some(vec![false; 8]),
        );
        assert!(matches!(result, Err(ConfigError::UnexpectedPreviousState)));
    }

    #[test]
    fn test_grid_topology_rejected() {
        let result = Configuration::new(&config(Topology::Moore2d, 3), vec![false; 8], None);
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedTopology { .. })
        ));
    }

    #[test]
    fn test_start_length_must_match_width() {
        let result = Configuration::new(&config(Topology::Standard1d, 3), vec![false; 5], None);
        assert!(matches!(result, Err(ConfigError::StartStateLength { .. })));
    }

    #[test]
    fn test_rule_space_limit() {
        let ok = Configuration::new(&config(Topology::Standard1d, 6), vec![false; 8], None).unwrap();
        assert_eq!(ok.rule_count(), 1u128 << 64);

        let result = Configuration::new(&config(Topology::Standard1d, 7), vec![false; 8], None);
        assert!(matches!(result, Err(ConfigError::RuleSpaceTooLarge { .. })));
    }

    #[test]
    fn test_ternary_rule_count() {
        let start = vec![Digit::<3>::default(); 8];
        let cfg = Configuration::new(&config(Topology::Standard1d, 2), start, None).unwrap();
        assert_eq!(cfg.total_permutations(), 9);
        assert_eq!(cfg.rule_count(), 19683);
    }

    #[test]
    fn test_check_rule() {
        let cfg = Configuration::new(&config(Topology::Standard1d, 3), vec![false; 8], None).unwrap();
        assert!(cfg.check_rule(Rule(255)).is_ok());
        assert!(matches!(
            cfg.check_rule(Rule(256)),
            Err(EngineError::RuleOutOfRange { .. })
        ));
    }

    #[test]
    fn test_reseeded_keeps_parameters() {
        let cfg = Configuration::new(
            &config(Topology::SecondOrder1d, 3),
            vec![false; 8],
            Some(vec![true; 8]),
        )
        .unwrap();
        let swapped = cfg
            .reseeded(vec![true; 8], Some(vec![false; 8]))
            .unwrap();
        assert_eq!(swapped.topology(), Topology::SecondOrder1d);
        assert_eq!(swapped.start_state(), &[true; 8]);
        assert_eq!(swapped.previous_state(), Some(&[false; 8][..]));
    }
}
