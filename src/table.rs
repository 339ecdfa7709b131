//! Dense storage for per-state quantities.
//!
//! Only non-terminal states `(i, j, k)` with `i, j < target` and `i + k < target`
//! are stored. The `k` extent shrinks as `i` grows, so the table is jagged: the
//! block for banked score `i` holds `target * (target - i)` cells laid out
//! `j`-major. Everything lives in one flat buffer addressed through
//! [`StateTable::index`].

use serde::{Deserialize, Serialize};

use crate::error::PigError;

/// Number of reachable non-terminal states for a target score, `None` if it
/// does not fit in `usize`.
pub fn state_count(target: u32) -> Option<usize> {
    let t = usize::try_from(target).ok()?;
    // t * (t + 1) is always even.
    t.checked_mul(t.checked_add(1)?)
        .map(|n| n / 2)?
        .checked_mul(t)
}

/// Flat jagged table over all non-terminal `(i, j, k)` coordinates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StateTable<T> {
    target: u32,
    cells: Vec<T>,
}

impl<T: Copy> StateTable<T> {
    /// Allocates a table for `target` with every cell set to `fill`.
    ///
    /// Fails instead of aborting when the size overflows or memory runs out.
    pub fn new(target: u32, fill: T) -> Result<Self, PigError> {
        let len = state_count(target).ok_or(PigError::InvalidConfiguration(
            "target score is too large to tabulate",
        ))?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| PigError::TableAllocation(len))?;
        cells.resize(len, fill);
        Ok(Self { target, cells })
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `(i, j, k)` addresses a stored cell.
    #[inline]
    pub fn contains(&self, i: u32, j: u32, k: u32) -> bool {
        i < self.target && j < self.target && k < self.target - i
    }

    #[inline]
    fn index(&self, i: u32, j: u32, k: u32) -> usize {
        debug_assert!(self.contains(i, j, k), "({i}, {j}, {k}) outside table");
        let (t, i, j, k) = (
            self.target as usize,
            i as usize,
            j as usize,
            k as usize,
        );
        // Sum of block sizes t * (t - a) for a < i.
        let block = t * (i * t - i * i.saturating_sub(1) / 2);
        block + j * (t - i) + k
    }

    #[inline]
    pub fn get(&self, i: u32, j: u32, k: u32) -> T {
        self.cells[self.index(i, j, k)]
    }

    /// Checked access for coordinates that did not come from the solver loops.
    pub fn try_get(&self, i: u32, j: u32, k: u32) -> Option<T> {
        if self.contains(i, j, k) {
            Some(self.get(i, j, k))
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, i: u32, j: u32, k: u32, value: T) {
        let idx = self.index(i, j, k);
        self.cells[idx] = value;
    }

    /// Iterates every stored coordinate in `i`, `j`, `k` ascending order.
    pub fn coordinates(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let t = self.target;
        (0..t).flat_map(move |i| (0..t).flat_map(move |j| (0..t - i).map(move |k| (i, j, k))))
    }

    /// Whether the buffer length agrees with the layout for `target`.
    pub(crate) fn is_consistent(&self) -> bool {
        state_count(self.target) == Some(self.cells.len())
    }
}
