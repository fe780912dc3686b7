//! 1-D partition extraction.
//!
//! Centered topologies use a window around the target cell:
//!
//! ```text
//! radius = size / 2
//! odd size:          [cell - radius,     cell + radius + 1)
//! even, left bias:   [cell - radius,     cell + radius)
//! even, right bias:  [cell - radius + 1, cell + radius + 1)
//! ```
//!
//! Block topology takes `size` cells starting at the target. Positions past
//! either edge wrap (cyclic) or read as the zero cell (zero boundary), so the
//! result always has exactly `size` cells.

use crate::schema::{Bias, Boundary, Topology};

use super::{Cell, Configuration, EngineError};

/// Half-open window `[lhs, rhs)` of a centered partition.
pub fn window(size: usize, bias: Bias, cell: usize) -> (isize, isize) {
    let radius = (size / 2) as isize;
    let cell = cell as isize;
    let mut lhs = cell - radius;
    let mut rhs = cell + radius;

    if size % 2 == 0 {
        if bias == Bias::Right {
            lhs += 1;
            rhs += 1;
        }
    } else {
        rhs += 1;
    }
    (lhs, rhs)
}

/// Offset of the target cell inside a centered partition.
pub fn target_offset(size: usize, bias: Bias) -> usize {
    if size % 2 == 0 && bias == Bias::Right {
        size / 2 - 1
    } else {
        size / 2
    }
}

/// Cell at a possibly out-of-range position. An empty state reads as all
/// zero cells under either boundary.
#[inline]
fn fetch<C: Cell>(state: &[C], position: isize, boundary: Boundary) -> C {
    let len = state.len() as isize;
    if len == 0 {
        return C::default();
    }
    match boundary {
        Boundary::Cyclic => state[position.rem_euclid(len) as usize],
        Boundary::Zero if (0..len).contains(&position) => state[position as usize],
        Boundary::Zero => C::default(),
    }
}

/// Centered neighborhood of `cell`.
pub fn centered<C: Cell>(
    state: &[C],
    cell: usize,
    size: usize,
    bias: Bias,
    boundary: Boundary,
) -> Vec<C> {
    let (lhs, rhs) = window(size, bias, cell);
    (lhs..rhs).map(|pos| fetch(state, pos, boundary)).collect()
}

/// Block of `size` cells starting at `start`.
pub fn block<C: Cell>(state: &[C], start: usize, size: usize, boundary: Boundary) -> Vec<C> {
    let start = start as isize;
    (start..start + size as isize)
        .map(|pos| fetch(state, pos, boundary))
        .collect()
}

/// Partition of `cell` under `config`'s topology, bias and boundary.
///
/// Fails if `cell` is outside the state or the extracted partition does not
/// have the configured size.
pub fn extract<C: Cell>(
    config: &Configuration<C>,
    state: &[C],
    cell: usize,
) -> Result<Vec<C>, EngineError> {
    if cell >= state.len() {
        return Err(EngineError::CellOutOfRange {
            cell,
            size: state.len(),
        });
    }

    let size = config.partition_size();
    let partition = match config.topology() {
        Topology::Block1d => block(state, cell, size, config.boundary()),
        _ => centered(state, cell, size, config.partition_bias(), config.boundary()),
    };

    if partition.len() != size {
        return Err(EngineError::InvariantViolation {
            cell,
            expected: size,
            actual: partition.len(),
            partition: format!("{:?}", partition),
        });
    }
    Ok(partition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AutomatonConfig;
    use proptest::prelude::*;

    /// All live except a single dead cell in the middle.
    fn wolfram(size: usize) -> Vec<bool> {
        let mut state = vec![true; size];
        state[size / 2] = false;
        state
    }

    fn configuration(
        topology: Topology,
        size: usize,
        bias: Bias,
        boundary: Boundary,
        start: Vec<bool>,
    ) -> Configuration<bool> {
        let config = AutomatonConfig {
            topology,
            boundary,
            bias,
            partition_size: size,
            width: start.len(),
            ..Default::default()
        };
        Configuration::new(&config, start, None).unwrap()
    }

    #[test]
    fn test_window_odd() {
        assert_eq!(window(3, Bias::Left, 5), (4, 7));
        assert_eq!(window(5, Bias::Right, 5), (3, 8));
    }

    #[test]
    fn test_window_even() {
        assert_eq!(window(4, Bias::Left, 0), (-2, 2));
        assert_eq!(window(4, Bias::Right, 0), (-1, 3));
    }

    #[test]
    fn test_zero_boundary_left_bias_literal() {
        let state = wolfram(31);
        let partition = centered(&state, 0, 4, Bias::Left, Boundary::Zero);
        assert_eq!(partition, vec![false, false, true, true]);
    }

    #[test]
    fn test_zero_boundary_right_bias_literal() {
        let state = wolfram(31);
        let partition = centered(&state, 0, 4, Bias::Right, Boundary::Zero);
        assert_eq!(partition, vec![false, true, true, true]);
    }

    #[test]
    fn test_cyclic_wraps_both_edges() {
        let state = vec![true, false, false, false, false, true, false];
        assert_eq!(
            centered(&state, 0, 3, Bias::Left, Boundary::Cyclic),
            vec![false, true, false]
        );
        assert_eq!(
            centered(&state, 6, 3, Bias::Left, Boundary::Cyclic),
            vec![true, false, true]
        );
    }

    #[test]
    fn test_zero_pads_right_edge() {
        let state = vec![true; 5];
        assert_eq!(
            centered(&state, 4, 3, Bias::Left, Boundary::Zero),
            vec![true, true, false]
        );
    }

    #[test]
    fn test_partition_wider_than_state() {
        let state = vec![true, false];
        assert_eq!(
            centered(&state, 0, 5, Bias::Left, Boundary::Cyclic),
            vec![true, false, true, false, true]
        );
        assert_eq!(
            centered(&state, 0, 5, Bias::Left, Boundary::Zero),
            vec![false, false, true, false, false]
        );
    }

    #[test]
    fn test_empty_state_reads_zero() {
        let state: Vec<bool> = Vec::new();
        for boundary in [Boundary::Cyclic, Boundary::Zero] {
            assert_eq!(centered(&state, 0, 3, Bias::Left, boundary), vec![false; 3]);
            assert_eq!(block(&state, 0, 2, boundary), vec![false; 2]);
        }
    }

    #[test]
    fn test_block_wraps_and_pads() {
        let state = vec![true, false, false, true, true];
        assert_eq!(block(&state, 3, 3, Boundary::Cyclic), vec![true, true, true]);
        assert_eq!(block(&state, 3, 3, Boundary::Zero), vec![true, true, false]);
    }

    #[test]
    fn test_target_position_odd() {
        let cfg = configuration(Topology::Standard1d, 3, Bias::Left, Boundary::Zero, wolfram(31));
        for cell in 0..31 {
            let partition = extract(&cfg, cfg.start_state(), cell).unwrap();
            assert_eq!(partition[1], cfg.start_state()[cell]);
            assert_eq!(partition.len(), 3);
        }
    }

    #[test]
    fn test_target_position_even() {
        for (bias, offset) in [(Bias::Left, 2), (Bias::Right, 1)] {
            let cfg = configuration(Topology::Standard1d, 4, bias, Boundary::Zero, wolfram(31));
            assert_eq!(target_offset(4, bias), offset);
            for cell in 0..31 {
                let partition = extract(&cfg, cfg.start_state(), cell).unwrap();
                assert_eq!(partition[offset], cfg.start_state()[cell]);
            }
        }
    }

    #[test]
    fn test_block_partition_starts_at_cell() {
        let cfg = configuration(Topology::Block1d, 3, Bias::Left, Boundary::Zero, wolfram(31));
        for cell in 0..31 {
            let partition = extract(&cfg, cfg.start_state(), cell).unwrap();
            assert_eq!(partition[0], cfg.start_state()[cell]);
            assert_eq!(partition.len(), 3);
        }
    }

    #[test]
    fn test_extract_out_of_range() {
        let cfg = configuration(Topology::Standard1d, 3, Bias::Left, Boundary::Zero, wolfram(31));
        assert!(matches!(
            extract(&cfg, cfg.start_state(), 31),
            Err(EngineError::CellOutOfRange { cell: 31, size: 31 })
        ));
    }

    fn boundary_strategy() -> impl Strategy<Value = Boundary> {
        prop_oneof![Just(Boundary::Cyclic), Just(Boundary::Zero)]
    }

    fn bias_strategy() -> impl Strategy<Value = Bias> {
        prop_oneof![Just(Bias::Left), Just(Bias::Right)]
    }

    proptest! {
        #[test]
        fn prop_partition_length_is_constant(
            state in proptest::collection::vec(any::<bool>(), 1..40),
            size in 1usize..=6,
            bias in bias_strategy(),
            boundary in boundary_strategy(),
        ) {
            for cell in 0..state.len() {
                prop_assert_eq!(centered(&state, cell, size, bias, boundary).len(), size);
                prop_assert_eq!(block(&state, cell, size, boundary).len(), size);
            }
        }

        #[test]
        fn prop_target_cell_at_offset(
            state in proptest::collection::vec(any::<bool>(), 1..40),
            size in 1usize..=6,
            bias in bias_strategy(),
            boundary in boundary_strategy(),
        ) {
            let offset = target_offset(size, bias);
            for cell in 0..state.len() {
                let partition = centered(&state, cell, size, bias, boundary);
                prop_assert_eq!(partition[offset], state[cell]);
            }
        }
    }
}
