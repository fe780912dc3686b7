//! Compute module - Partition extraction, rule evaluation and evolution drivers.

mod automaton;
mod block;
mod cell;
mod configuration;
mod elementary;
mod error;
mod evaluator;
mod history;
mod life;
mod permutation;
mod rule;
mod second_order;
mod survey;

pub mod neighborhood;

pub use automaton::*;
pub use block::*;
pub use cell::*;
pub use configuration::*;
pub use elementary::*;
pub use error::*;
pub use evaluator::*;
pub use history::{Phase, StateHistory};
pub use life::*;
pub use permutation::*;
pub use rule::*;
pub use second_order::*;
pub use survey::*;

pub(crate) use history::Timeline;
