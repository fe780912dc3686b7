//! Exhaustive partition permutation table.
//!
//! Entries are enumerated in counting order: position 0 is the most
//! significant digit and every position runs `0..STATES`. For booleans and a
//! partition of 3 this is `000, 001, 010, ..., 111`, so an entry's index is
//! the partition read as a base-`STATES` number. That index is the digit
//! offset read from a rule integer.

use std::fmt;

use super::Cell;

/// All `STATES^size` partitions of a given size, in counting order.
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable<C: Cell> {
    size: usize,
    entries: Vec<Vec<C>>,
}

impl<C: Cell> PermutationTable<C> {
    /// Build the table for partitions of `size` cells.
    ///
    /// Returns `None` if `STATES^size` does not fit in `usize`.
    pub fn new(size: usize) -> Option<Self> {
        let exponent = u32::try_from(size).ok()?;
        let len = C::STATES.checked_pow(exponent)?;

        let mut entries = Vec::with_capacity(len);
        let mut partition = vec![C::default(); size];
        enumerate(&mut entries, &mut partition, 0);

        Some(Self { size, entries })
    }

    /// Partition size the table was built for.
    #[inline]
    pub fn partition_size(&self) -> usize {
        self.size
    }

    /// Number of entries (`STATES^size`).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty. Never true for a constructed table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&[C]> {
        self.entries.get(index).map(Vec::as_slice)
    }

    /// Index of `partition` in the table.
    ///
    /// `None` when the partition has the wrong length or contains a digit
    /// outside `0..STATES`.
    pub fn position(&self, partition: &[C]) -> Option<usize> {
        if partition.len() != self.size {
            return None;
        }
        partition.iter().try_fold(0usize, |acc, cell| {
            let digit = cell.to_digit();
            (digit < C::STATES).then(|| acc * C::STATES + digit)
        })
    }

    /// Iterate over every entry in order.
    pub fn iter(&self) -> impl Iterator<Item = &[C]> + '_ {
        self.entries.iter().map(Vec::as_slice)
    }

    /// All entries in order.
    pub fn entries(&self) -> &[Vec<C>] {
        &self.entries
    }
}

/// Depth-first counting: fix `cell`, try every digit low to high, recurse.
fn enumerate<C: Cell>(entries: &mut Vec<Vec<C>>, partition: &mut [C], cell: usize) {
    if cell == partition.len() {
        entries.push(partition.to_vec());
        return;
    }
    for digit in 0..C::STATES {
        partition[cell] = C::from_digit(digit);
        enumerate(entries, partition, cell + 1);
    }
}

impl<C: Cell> fmt::Debug for PermutationTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermutationTable")
            .field("partition_size", &self.size)
            .field("len", &self.entries.len())
            .finish()
    }
}
