//! Errors raised while evolving an automaton.

use crate::schema::ConfigError;

use super::Rule;

/// Failures during extraction, rule evaluation or stepping.
///
/// None of these are transient; they indicate a caller or configuration
/// defect and the step that raised one leaves the automaton untouched.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(
        "Partition for cell {cell} has {actual} cells, expected {expected}: {partition}"
    )]
    InvariantViolation {
        cell: usize,
        expected: usize,
        actual: usize,
        partition: String,
    },
    #[error("Partition for cell {cell} is not in the permutation table: {partition}")]
    PartitionNotFound { cell: usize, partition: String },
    #[error("Interaction {interaction} cannot evaluate a {input} input")]
    UnsupportedOperation {
        interaction: &'static str,
        input: &'static str,
    },
    #[error("Rule {rule} is outside the rule space 0..{count}")]
    RuleOutOfRange { rule: Rule, count: u128 },
    #[error("Cell {cell} is outside a state of {size} cells")]
    CellOutOfRange { cell: usize, size: usize },
    #[error("Cell ({x}, {y}) is outside a {width}x{height} grid")]
    CoordinateOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
