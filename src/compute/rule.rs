//! Rule integers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A rule number: digit `i` (bit `i` for booleans) is the output for the
/// `i`-th entry of the permutation table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rule(pub u128);

impl Rule {
    /// Digit at `offset` in base `states`.
    ///
    /// Offsets past the width of a `u128` read as zero.
    #[inline]
    pub fn digit(self, offset: usize, states: usize) -> usize {
        let base = states as u128;
        let place = u32::try_from(offset)
            .ok()
            .and_then(|exponent| base.checked_pow(exponent));
        match place {
            Some(place) => ((self.0 / place) % base) as usize,
            None => 0,
        }
    }

    /// Raw rule number.
    #[inline]
    pub fn get(self) -> u128 {
        self.0
    }
}

impl From<u128> for Rule {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for Rule {
    fn from(value: u64) -> Self {
        Self(value as u128)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_digits() {
        // Rule 90 = 0b0101_1010
        let rule = Rule(90);
        let bits: Vec<usize> = (0..8).map(|i| rule.digit(i, 2)).collect();
        assert_eq!(bits, vec![0, 1, 0, 1, 1, 0, 1, 0]);
    }

    #[test]
    fn test_ternary_digits() {
        // 2*9 + 0*3 + 1
        let rule = Rule(19);
        assert_eq!(rule.digit(0, 3), 1);
        assert_eq!(rule.digit(1, 3), 0);
        assert_eq!(rule.digit(2, 3), 2);
    }

    #[test]
    fn test_digit_past_width() {
        assert_eq!(Rule(u128::MAX).digit(200, 2), 0);
    }
}
