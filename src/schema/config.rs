//! Configuration types for automaton parameters.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compute::{Cell, Configuration, Grid, LifeConfiguration};

fn default_partition_size() -> usize {
    3
}

fn default_height() -> usize {
    1
}

/// Shape of the automaton and how partitions tile the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Overlapping neighborhood centered on each cell (Wolfram's elementary CA).
    #[default]
    Standard1d,
    /// Non-overlapping blocks of `partition_size` cells.
    Block1d,
    /// Neighborhood rule combined with the state one timestep back.
    SecondOrder1d,
    /// Rectangular grid, eight-cell Moore neighborhood.
    Moore2d,
}

impl Topology {
    /// Interaction used when none is given explicitly.
    pub fn default_interaction(self) -> Interaction {
        match self {
            Topology::Standard1d => Interaction::NeighborhoodToRuleBit,
            Topology::Block1d => Interaction::BlockToRuleBit,
            Topology::SecondOrder1d => Interaction::SecondOrderNeighborhoodToRuleBit,
            Topology::Moore2d => Interaction::GameOfLife,
        }
    }

    /// Whether `interaction` is implemented for this topology.
    pub fn supports(self, interaction: Interaction) -> bool {
        self.default_interaction() == interaction
    }

    /// Whether this is one of the 1-D topologies.
    pub fn is_1d(self) -> bool {
        !matches!(self, Topology::Moore2d)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::Standard1d => "standard 1-D",
            Topology::Block1d => "block 1-D",
            Topology::SecondOrder1d => "second-order 1-D",
            Topology::Moore2d => "2-D Moore",
        };
        f.write_str(name)
    }
}

/// Handling of partition cells that fall past the edges of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Wrap around to the opposite edge (periodic).
    #[default]
    Cyclic,
    /// Use the zero cell value.
    Zero,
}

/// Which side of an even-sized partition receives the extra cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bias {
    /// Extra cell on the left of the target.
    #[default]
    Left,
    /// Extra cell on the right of the target.
    Right,
    /// No side preferred. Only valid where no extra cell exists.
    Center,
}

/// How a partition (and prior state) is turned into the next value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// `cell = rule digit at the partition's permutation index`.
    NeighborhoodToRuleBit,
    /// Rule digit combined with the cell one timestep back (XOR for booleans).
    SecondOrderNeighborhoodToRuleBit,
    /// Rule digit for the block pattern applied to every cell of the block.
    BlockToRuleBit,
    /// Conway's B3/S23.
    GameOfLife,
}

impl Interaction {
    /// Short identifier used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Interaction::NeighborhoodToRuleBit => "neighborhood_to_rule_bit",
            Interaction::SecondOrderNeighborhoodToRuleBit => {
                "second_order_neighborhood_to_rule_bit"
            }
            Interaction::BlockToRuleBit => "block_to_rule_bit",
            Interaction::GameOfLife => "game_of_life",
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declarative description of one automaton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatonConfig {
    /// Automaton shape.
    #[serde(default)]
    pub topology: Topology,
    /// Edge handling for 1-D partitions. Ignored by the Moore topology.
    #[serde(default)]
    pub boundary: Boundary,
    /// Extra-cell side for even partitions.
    #[serde(default)]
    pub bias: Bias,
    /// Rule interaction; defaults by topology.
    #[serde(default)]
    pub interaction: Option<Interaction>,
    /// Cells consulted per transition (1-D only).
    #[serde(default = "default_partition_size")]
    pub partition_size: usize,
    /// Cells per row.
    pub width: usize,
    /// Rows. Use 1 for 1-D automata.
    #[serde(default = "default_height")]
    pub height: usize,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            topology: Topology::Standard1d,
            boundary: Boundary::default(),
            bias: Bias::Left,
            interaction: None,
            partition_size: 3,
            width: 31,
            height: 1,
        }
    }
}

impl AutomatonConfig {
    /// Resolved interaction.
    #[inline]
    pub fn interaction(&self) -> Interaction {
        self.interaction
            .unwrap_or_else(|| self.topology.default_interaction())
    }

    /// Total number of cells (width * height).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyState);
        }
        let interaction = self.interaction();
        if !self.topology.supports(interaction) {
            return Err(ConfigError::UnsupportedInteraction {
                topology: self.topology,
                interaction,
            });
        }
        if self.topology.is_1d() {
            if self.height != 1 {
                return Err(ConfigError::InvalidHeight {
                    topology: self.topology,
                    height: self.height,
                });
            }
            if self.partition_size == 0 {
                return Err(ConfigError::InvalidPartitionSize);
            }
            let centered = self.topology != Topology::Block1d;
            if centered && self.partition_size % 2 == 0 && self.bias == Bias::Center {
                return Err(ConfigError::UnsupportedBias {
                    bias: self.bias,
                    partition_size: self.partition_size,
                });
            }
        }
        Ok(())
    }

    /// Engine configuration of a 1-D automaton.
    pub fn build_line<C: Cell>(
        &self,
        start: Vec<C>,
        previous: Option<Vec<C>>,
    ) -> Result<Configuration<C>, ConfigError> {
        Configuration::new(self, start, previous)
    }

    /// Engine configuration of a Life grid.
    pub fn build_grid<C: Cell>(&self, start: Grid<C>) -> Result<LifeConfiguration<C>, ConfigError> {
        LifeConfiguration::new(self, start)
    }

    /// Load from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save as pretty-printed JSON.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("State must contain at least one cell")]
    EmptyState,
    #[error("Partition size must be non-zero")]
    InvalidPartitionSize,
    /// Rule integers are `u128`; for booleans this caps the partition size at 6.
    #[error("Rule space for {permutations} permutations does not fit in 128 bits")]
    RuleSpaceTooLarge { permutations: usize },
    #[error("{topology} automata need height 1, got {height}")]
    InvalidHeight { topology: Topology, height: usize },
    #[error("Start state has {actual} cells, configured width is {expected}")]
    StartStateLength { expected: usize, actual: usize },
    #[error("Previous state has {actual} cells, start state has {expected}")]
    PreviousStateLength { expected: usize, actual: usize },
    #[error("Second-order automata need a previous state")]
    MissingPreviousState,
    #[error("Only second-order automata take a previous state")]
    UnexpectedPreviousState,
    #[error("{topology} automata do not implement {interaction}")]
    UnsupportedInteraction {
        topology: Topology,
        interaction: Interaction,
    },
    #[error("{bias:?} bias has no meaning for even partition size {partition_size}")]
    UnsupportedBias { bias: Bias, partition_size: usize },
    #[error("Driver expects a {expected} automaton, configuration is {actual}")]
    TopologyMismatch { expected: Topology, actual: Topology },
    #[error("{topology} is not supported here: {reason}")]
    UnsupportedTopology {
        topology: Topology,
        reason: &'static str,
    },
    #[error("Grid rows must all have {expected} cells, row {row} has {actual}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Pattern {pattern} does not fit a {width}x{height} state")]
    PatternDimension {
        pattern: &'static str,
        width: usize,
        height: usize,
    },
    #[error("Probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("Failed to read or write configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_valid() {
        assert!(AutomatonConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_interactions_supported() {
        for topology in [
            Topology::Standard1d,
            Topology::Block1d,
            Topology::SecondOrder1d,
            Topology::Moore2d,
        ] {
            assert!(topology.supports(topology.default_interaction()));
        }
    }

    #[test]
    fn test_rejects_mismatched_interaction() {
        let config = AutomatonConfig {
            interaction: Some(Interaction::GameOfLife),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedInteraction { .. })
        ));
    }

    #[test]
    fn test_rejects_center_bias_for_even_partition() {
        let config = AutomatonConfig {
            partition_size: 4,
            bias: Bias::Center,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedBias { .. })
        ));

        // Odd partitions have no extra cell, any bias is fine.
        let config = AutomatonConfig {
            bias: Bias::Center,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_tall_1d() {
        let config = AutomatonConfig {
            height: 4,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidHeight { .. })
        ));
    }

    #[test]
    fn test_json_defaults() {
        let config: AutomatonConfig =
            serde_json::from_str(r#"{ "topology": "moore2d", "width": 8, "height": 6 }"#).unwrap();
        assert_eq!(config.interaction(), Interaction::GameOfLife);
        assert_eq!(config.boundary, Boundary::Cyclic);
        assert_eq!(config.cell_count(), 48);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_omitted_fields_match_default() {
        let config: AutomatonConfig = serde_json::from_str(r#"{ "width": 31 }"#).unwrap();
        assert_eq!(config, AutomatonConfig::default());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("automaton.json");

        let config = AutomatonConfig {
            topology: Topology::SecondOrder1d,
            boundary: Boundary::Zero,
            bias: Bias::Right,
            partition_size: 4,
            ..Default::default()
        };
        config.to_json_file(&path).unwrap();

        let loaded = AutomatonConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
