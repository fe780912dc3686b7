//! Seed types for initializing automaton states.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::compute::{Cell, Grid};

use super::ConfigError;

/// Starting state(s) of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern for the starting state.
    pub pattern: Pattern,
    /// Pattern for the state one timestep earlier (second-order only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Pattern>,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: Pattern::Wolfram,
            previous: None,
        }
    }
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Every cell live except the center one.
    Wolfram,
    /// Only the center cell live.
    Single,
    /// Each cell live with `probability`. Multi-state cells draw a uniform
    /// non-zero digit when live.
    Random {
        probability: f64,
        /// RNG seed.
        seed: u64,
    },
    /// Glider heading down and right, bounding box top-left at `origin`.
    Glider {
        #[serde(default)]
        origin: (usize, usize),
    },
    /// Explicit live cells as `(x, y)`. Use `y = 0` for 1-D states.
    /// Cells outside the state are ignored.
    Custom { live: Vec<(usize, usize)> },
}

impl Pattern {
    /// Short identifier used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Wolfram => "wolfram",
            Pattern::Single => "single",
            Pattern::Random { .. } => "random",
            Pattern::Glider { .. } => "glider",
            Pattern::Custom { .. } => "custom",
        }
    }

    /// Row-major cells of a `width` x `height` state.
    pub fn generate<C: Cell>(&self, width: usize, height: usize) -> Result<Vec<C>, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyState);
        }
        let live = C::from_digit(1);
        let center = (height / 2) * width + width / 2;
        let mut cells = vec![C::default(); width * height];

        match self {
            Pattern::Wolfram => {
                cells.fill(live);
                cells[center] = C::default();
            }
            Pattern::Single => cells[center] = live,
            Pattern::Random { probability, seed } => {
                if !(0.0..=1.0).contains(probability) {
                    return Err(ConfigError::InvalidProbability(*probability));
                }
                let mut rng = StdRng::seed_from_u64(*seed);
                for cell in cells.iter_mut() {
                    if rng.gen_bool(*probability) {
                        *cell = C::from_digit(rng.gen_range(1..C::STATES));
                    }
                }
            }
            Pattern::Glider { origin: (ox, oy) } => {
                if ox + 3 > width || oy + 3 > height {
                    return Err(ConfigError::PatternDimension {
                        pattern: self.name(),
                        width,
                        height,
                    });
                }
                for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
                    cells[(oy + y) * width + ox + x] = live;
                }
            }
            Pattern::Custom { live: coords } => {
                for &(x, y) in coords {
                    if x < width && y < height {
                        cells[y * width + x] = live;
                    }
                }
            }
        }
        Ok(cells)
    }
}

impl Seed {
    /// Starting state of a 1-D automaton.
    pub fn line<C: Cell>(&self, width: usize) -> Result<Vec<C>, ConfigError> {
        self.pattern.generate(width, 1)
    }

    /// Previous state of a 1-D automaton, if the seed has one.
    pub fn previous_line<C: Cell>(&self, width: usize) -> Result<Option<Vec<C>>, ConfigError> {
        self.previous
            .as_ref()
            .map(|pattern| pattern.generate(width, 1))
            .transpose()
    }

    /// Starting grid of a 2-D automaton.
    pub fn grid<C: Cell>(&self, width: usize, height: usize) -> Result<Grid<C>, ConfigError> {
        let cells = self.pattern.generate(width, height)?;
        Grid::from_cells(width, height, cells)
    }
}
