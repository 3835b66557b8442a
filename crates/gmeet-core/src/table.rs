//! Dense `n × n` tables for order relations and binary operations.
//!
//! Row-major storage, `table[a*n + b]`. The lattice algorithms only rely on
//! O(1) `get(a, b)`, so a sparse representation can replace this type
//! without touching them.

use serde::{Deserialize, Serialize};

/// Square table indexed by a pair of element ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareTable<T> {
    n: usize,
    cells: Vec<T>,
}

impl<T: Copy> SquareTable<T> {
    /// Table of side `n` with every cell set to `value`
    pub fn filled(n: usize, value: T) -> Self {
        Self {
            n,
            cells: vec![value; n * n],
        }
    }

    /// Table whose cell `(a, b)` is `f(a, b)`
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(n * n);
        for a in 0..n {
            for b in 0..n {
                cells.push(f(a, b));
            }
        }
        Self { n, cells }
    }

    /// Side length
    pub fn side(&self) -> usize {
        self.n
    }

    /// Cell `(a, b)`
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> T {
        self.cells[a * self.n + b]
    }

    /// Overwrite cell `(a, b)`
    #[inline]
    pub fn set(&mut self, a: usize, b: usize, value: T) {
        self.cells[a * self.n + b] = value;
    }

    /// Row `a` as a slice
    pub fn row(&self, a: usize) -> &[T] {
        &self.cells[a * self.n..(a + 1) * self.n]
    }

    /// Transposed copy
    pub fn transposed(&self) -> Self {
        Self::from_fn(self.n, |a, b| self.get(b, a))
    }
}

impl SquareTable<bool> {
    /// Build from nested rows, rejecting ragged input
    pub fn from_rows(rows: &[Vec<bool>]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return None;
        }
        Some(Self::from_fn(n, |a, b| rows[a][b]))
    }

    /// Nested rows, the shape the harness serialises
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.n).map(|a| self.row(a).to_vec()).collect()
    }
}
