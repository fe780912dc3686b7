//! Rule evaluation: partition (plus prior state) to next value.
//!
//! The evaluator is pure. Drivers feed it partitions extracted from an
//! immutable view of the current state and collect its outputs into a fresh
//! state.

use crate::schema::Interaction;

use super::{Cell, Configuration, EngineError, PermutationTable, Rule};

/// Maps partitions to outputs for one interaction and rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleEvaluator<'a, C: Cell> {
    interaction: Interaction,
    table: Option<&'a PermutationTable<C>>,
    rule: Rule,
}

impl<'a, C: Cell> RuleEvaluator<'a, C> {
    /// Evaluator for a 1-D configuration and rule.
    ///
    /// Fails if `rule` is outside the configuration's rule space.
    pub fn new(config: &'a Configuration<C>, rule: Rule) -> Result<Self, EngineError> {
        config.check_rule(rule)?;
        Ok(Self {
            interaction: config.interaction(),
            table: Some(config.partition_permutations()),
            rule,
        })
    }

    /// Evaluator for the fixed Game of Life rule.
    pub fn life() -> Self {
        Self {
            interaction: Interaction::GameOfLife,
            table: None,
            rule: Rule::default(),
        }
    }

    #[inline]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    #[inline]
    pub fn rule(&self) -> Rule {
        self.rule
    }

    fn require(&self, interaction: Interaction, input: &'static str) -> Result<(), EngineError> {
        if self.interaction != interaction {
            return Err(EngineError::UnsupportedOperation {
                interaction: self.interaction.name(),
                input,
            });
        }
        Ok(())
    }

    /// Rule digit for `partition`, located through the permutation table.
    fn digit(&self, cell: usize, partition: &[C], input: &'static str) -> Result<usize, EngineError> {
        let table = self.table.ok_or(EngineError::UnsupportedOperation {
            interaction: self.interaction.name(),
            input,
        })?;
        if partition.len() != table.partition_size() {
            return Err(EngineError::InvariantViolation {
                cell,
                expected: table.partition_size(),
                actual: partition.len(),
                partition: format!("{:?}", partition),
            });
        }
        let offset = table
            .position(partition)
            .ok_or_else(|| EngineError::PartitionNotFound {
                cell,
                partition: format!("{:?}", partition),
            })?;
        Ok(self.rule.digit(offset, C::STATES))
    }

    /// Standard mapping: the rule digit at the partition's table position.
    pub fn neighborhood(&self, cell: usize, partition: &[C]) -> Result<C, EngineError> {
        self.require(Interaction::NeighborhoodToRuleBit, "neighborhood")?;
        Ok(C::from_digit(self.digit(cell, partition, "neighborhood")?))
    }

    /// Second-order mapping: the standard output for the current partition
    /// combined with the same cell one timestep back (XOR for booleans).
    pub fn second_order(&self, cell: usize, partition: &[C], previous: C) -> Result<C, EngineError> {
        self.require(Interaction::SecondOrderNeighborhoodToRuleBit, "second-order")?;
        let first_order = C::from_digit(self.digit(cell, partition, "second-order")?);
        Ok(C::combine_previous(first_order, previous))
    }

    /// Block mapping: the rule digit for the block pattern is applied to every
    /// cell of the block (a set bit inverts a boolean block).
    pub fn block(&self, cell: usize, block: &[C]) -> Result<Vec<C>, EngineError> {
        self.require(Interaction::BlockToRuleBit, "block")?;
        let digit = self.digit(cell, block, "block")?;
        Ok(block.iter().map(|c| c.offset(digit)).collect())
    }

    /// Game of Life mapping over a Moore partition.
    pub fn moore(&self, cell: C, neighbors: &[C]) -> Result<C, EngineError> {
        self.require(Interaction::GameOfLife, "moore")?;
        Ok(game_of_life(cell, neighbors))
    }
}

/// B3/S23: a live cell survives with 2 or 3 live neighbors, a dead cell is
/// born with exactly 3.
pub fn game_of_life<C: Cell>(cell: C, neighbors: &[C]) -> C {
    let live = neighbors.iter().filter(|c| c.is_live()).count();
    let next = if cell.is_live() {
        live == 2 || live == 3
    } else {
        live == 3
    };
    if next { C::from_digit(1) } else { C::default() }
}
