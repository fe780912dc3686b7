//! Cell value types.
//!
//! A cell is any small, copyable value with a finite number of states. Each
//! state maps to a digit `0..STATES`, which is what the permutation table and
//! rule integers are built from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A discrete cell value.
pub trait Cell: Copy + Eq + Default + fmt::Debug + Send + Sync + 'static {
    /// Number of distinct states (the arity).
    const STATES: usize;

    /// Digit of this value, in `0..STATES`.
    fn to_digit(self) -> usize;

    /// Value for a digit. Digits are reduced modulo `STATES`.
    fn from_digit(digit: usize) -> Self;

    /// Whether this cell counts as live (any non-zero digit).
    #[inline]
    fn is_live(self) -> bool {
        self.to_digit() != 0
    }

    /// Combine a first-order output with the cell one timestep back.
    ///
    /// Computes `(output - previous) mod STATES`, which is XOR for booleans.
    /// Applying it again with the window swapped recovers `previous`.
    #[inline]
    fn combine_previous(output: Self, previous: Self) -> Self {
        Self::from_digit(output.to_digit() + Self::STATES - previous.to_digit())
    }

    /// Offset a cell by a rule digit, `(self + digit) mod STATES`.
    #[inline]
    fn offset(self, digit: usize) -> Self {
        Self::from_digit(self.to_digit() + digit)
    }
}

impl Cell for bool {
    const STATES: usize = 2;

    #[inline]
    fn to_digit(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_digit(digit: usize) -> Self {
        digit % 2 == 1
    }

    #[inline]
    fn combine_previous(output: Self, previous: Self) -> Self {
        output ^ previous
    }

    #[inline]
    fn offset(self, digit: usize) -> Self {
        self ^ (digit % 2 == 1)
    }
}

/// Multi-state cell holding a digit in `0..K`. `K` must be at least 2;
/// smaller arities fail to compile once the type is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digit<const K: u8>(u8);

impl<const K: u8> Digit<K> {
    /// Create a digit, or `None` if `value >= K`.
    pub fn new(value: u8) -> Option<Self> {
        (usize::from(value) < Self::STATES).then_some(Self(value))
    }

    /// Raw digit value.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl<const K: u8> Cell for Digit<K> {
    const STATES: usize = {
        assert!(K >= 2, "a digit cell needs at least two states");
        K as usize
    };

    #[inline]
    fn to_digit(self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn from_digit(digit: usize) -> Self {
        Self((digit % Self::STATES) as u8)
    }
}

impl<const K: u8> fmt::Display for Digit<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_digits() {
        assert_eq!(false.to_digit(), 0);
        assert_eq!(true.to_digit(), 1);
        assert!(bool::from_digit(3));
        assert!(!bool::from_digit(2));
    }

    #[test]
    fn test_bool_combine_is_xor() {
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(bool::combine_previous(a, b), a ^ b);
                assert_eq!(a.offset(b as usize), a ^ b);
            }
        }
    }

    #[test]
    fn test_digit_bounds() {
        assert!(Digit::<3>::new(2).is_some());
        assert!(Digit::<3>::new(3).is_none());
        assert_eq!(Digit::<3>::from_digit(4).get(), 1);
    }

    #[test]
    fn test_smallest_digit_arity() {
        assert_eq!(Digit::<2>::STATES, 2);
        assert!(Digit::<2>::new(1).is_some());
        assert!(Digit::<2>::new(2).is_none());
        assert_eq!(Digit::<2>::from_digit(3).get(), 1);
        assert_eq!(Digit::<2>::from_digit(1).offset(1).get(), 0);
    }

    #[test]
    fn test_digit_combine_inverts() {
        // new = f - prev; applying again with (prev, cur) swapped yields prev.
        for f in 0..3u8 {
            for prev in 0..3u8 {
                let f = Digit::<3>(f);
                let prev = Digit::<3>(prev);
                let next = Digit::combine_previous(f, prev);
                assert_eq!(Digit::combine_previous(f, next), prev);
            }
        }
    }
}
