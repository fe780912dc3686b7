//! Two-dimensional Game of Life over a Moore neighborhood.
//!
//! Cells outside the grid are absent rather than dead: an edge cell has five
//! neighbors and a corner cell three.

use std::sync::Arc;

use log::{debug, trace};
use serde::Serialize;

use crate::schema::{AutomatonConfig, ConfigError, Topology};

use super::{
    Automaton, Cell, EngineError, Phase, RuleEvaluator, StateHistory, StepOutcome, Timeline,
};

/// Row-major grid, indexed `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid<C> {
    width: usize,
    height: usize,
    cells: Vec<C>,
}

impl<C: Cell> Grid<C> {
    /// All-dead grid. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::from_cells(width, height, vec![C::default(); width * height])
    }

    /// Wrap row-major `cells`, which must hold exactly `width * height` values.
    pub fn from_cells(width: usize, height: usize, cells: Vec<C>) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyState);
        }
        if cells.len() != width * height {
            return Err(ConfigError::StartStateLength {
                expected: width * height,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build from rows, which must be non-empty and equally long.
    pub fn from_rows(rows: Vec<Vec<C>>) -> Result<Self, ConfigError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(ConfigError::EmptyState);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(ConfigError::RaggedGrid {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Dead grid with the given `(x, y)` cells set live. Coordinates outside
    /// the grid are ignored.
    pub fn with_live(
        width: usize,
        height: usize,
        live: &[(usize, usize)],
    ) -> Result<Self, ConfigError> {
        let mut grid = Self::new(width, height)?;
        for &(x, y) in live {
            if x < width && y < height {
                grid.cells[y * width + x] = C::from_digit(1);
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Option<C> {
        (x < self.width && y < self.height).then(|| self.cells[self.idx(x, y)])
    }

    pub fn set(&mut self, x: usize, y: usize, value: C) -> Result<(), EngineError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_range(x, y));
        }
        let i = self.idx(x, y);
        self.cells[i] = value;
        Ok(())
    }

    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[C]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Coordinates of every live cell, row by row.
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_live())
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_live()).count()
    }

    fn out_of_range(&self, x: usize, y: usize) -> EngineError {
        EngineError::CoordinateOutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

/// In-grid Moore neighbors of `(x, y)`, scanned row by row with the center
/// skipped.
pub fn moore<C: Cell>(grid: &Grid<C>, x: usize, y: usize) -> Vec<C> {
    let mut neighbors = Vec::with_capacity(8);
    if grid.cells.is_empty() {
        return neighbors;
    }
    for ny in y.saturating_sub(1)..=(y + 1).min(grid.height - 1) {
        for nx in x.saturating_sub(1)..=(x + 1).min(grid.width - 1) {
            if (nx, ny) != (x, y) {
                neighbors.push(grid.cells[grid.idx(nx, ny)]);
            }
        }
    }
    neighbors
}

/// The fixed B3/S23 rule. Life has exactly one rule, so stepping takes this
/// marker instead of a rule number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameOfLife;

/// Frozen configuration of a Life run.
#[derive(Debug, Clone)]
pub struct LifeConfiguration<C: Cell> {
    start: Grid<C>,
}

impl<C: Cell> LifeConfiguration<C> {
    /// Validate `config` against the starting grid.
    pub fn new(config: &AutomatonConfig, start: Grid<C>) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.topology != Topology::Moore2d {
            return Err(ConfigError::TopologyMismatch {
                expected: Topology::Moore2d,
                actual: config.topology,
            });
        }
        if start.width != config.width || start.height != config.height {
            return Err(ConfigError::StartStateLength {
                expected: config.cell_count(),
                actual: start.cells.len(),
            });
        }
        Ok(Self { start })
    }

    /// Configuration sized to `start`.
    pub fn from_grid(start: Grid<C>) -> Result<Self, ConfigError> {
        let config = AutomatonConfig {
            topology: Topology::Moore2d,
            width: start.width,
            height: start.height,
            ..Default::default()
        };
        Self::new(&config, start)
    }

    pub fn start_state(&self) -> &Grid<C> {
        &self.start
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.start.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.start.height
    }

    pub fn to_config(&self) -> AutomatonConfig {
        AutomatonConfig {
            topology: Topology::Moore2d,
            width: self.width(),
            height: self.height(),
            ..Default::default()
        }
    }
}

/// Game of Life driver.
///
/// A step whose result equals the current grid reports
/// [`StepOutcome::Converged`] and records nothing, so a still life's history
/// ends at its first fixed state. Oscillators are not detected.
#[derive(Debug, Clone)]
pub struct Life<C: Cell> {
    configuration: Arc<LifeConfiguration<C>>,
    timeline: Timeline<Grid<C>>,
    converged: bool,
}

impl<C: Cell> Life<C> {
    pub fn new(configuration: Arc<LifeConfiguration<C>>) -> Self {
        let timeline = Timeline::new(configuration.start.clone());
        Self {
            configuration,
            timeline,
            converged: false,
        }
    }

    pub fn configuration(&self) -> &Arc<LifeConfiguration<C>> {
        &self.configuration
    }

    /// Whether a step has found the grid to be a still life.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Moore partition of `(x, y)` in the current grid.
    pub fn partition(&self, x: usize, y: usize) -> Result<Vec<C>, EngineError> {
        let grid = &self.timeline.state;
        if x >= grid.width || y >= grid.height {
            return Err(grid.out_of_range(x, y));
        }
        Ok(moore(grid, x, y))
    }
}

impl<C: Cell> Automaton for Life<C> {
    type Rule = GameOfLife;
    type State = Grid<C>;

    fn state(&self) -> &Grid<C> {
        &self.timeline.state
    }

    fn history(&self) -> &StateHistory<Grid<C>> {
        &self.timeline.history
    }

    fn phase(&self) -> Phase {
        self.timeline.phase
    }

    fn reset(&mut self) {
        self.timeline = Timeline::new(self.configuration.start.clone());
        self.converged = false;
    }

    fn step(&mut self, _rule: GameOfLife) -> Result<StepOutcome, EngineError> {
        let evaluator = RuleEvaluator::<C>::life();
        let current = &self.timeline.state;

        let mut cells = Vec::with_capacity(current.cells.len());
        for y in 0..current.height {
            for x in 0..current.width {
                let neighbors = moore(current, x, y);
                let value = evaluator.moore(current.cells[current.idx(x, y)], &neighbors)?;
                trace!("({x}, {y}): {neighbors:?} -> {value:?}");
                cells.push(value);
            }
        }
        let next = Grid {
            width: current.width,
            height: current.height,
            cells,
        };

        if next == *current {
            debug!(
                "still life after {} states, {} live cells",
                self.timeline.history.len(),
                next.live_count()
            );
            self.converged = true;
            return Ok(StepOutcome::Converged);
        }
        self.timeline.advance(next);
        Ok(StepOutcome::Advanced)
    }

    fn finish(&mut self) {
        self.timeline.finish();
    }
}
