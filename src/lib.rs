//! Cellular - Discrete cellular automata.
//!
//! This crate evolves one-dimensional automata (elementary, block and
//! second-order reversible) under arbitrary rule numbers, and Conway's Game
//! of Life on a bounded grid.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Declarative configuration and seed patterns
//! - `compute`: Permutation tables, partition extraction, rule evaluation and
//!   evolution drivers
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use cellular::{
//!     compute::{Automaton, LineAutomaton, Rule},
//!     schema::{AutomatonConfig, Seed},
//! };
//!
//! // 31 cells, three-cell neighborhoods, cyclic edges
//! let config = AutomatonConfig::default();
//!
//! // All live except the center cell
//! let start = Seed::default().line::<bool>(config.width)?;
//! let configuration = Arc::new(config.build_line(start, None)?);
//!
//! let mut automaton = LineAutomaton::new(configuration)?;
//! let history = automaton.run(Rule(90), 15)?;
//!
//! println!("{} states recorded", history.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{Automaton, Configuration, Life, LineAutomaton, Rule};
pub use schema::{AutomatonConfig, Pattern, Seed};
