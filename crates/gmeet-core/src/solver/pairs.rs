//! Unordered element pairs packed into one integer key.

/// `(a, b)` with `a ≤ b` stored as `a * n + b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct PairKey(usize);

impl PairKey {
    /// Pack an unordered pair; `(a, b)` and `(b, a)` give the same key.
    #[inline]
    pub(crate) fn pack(n: usize, a: usize, b: usize) -> Self {
        if a > b {
            Self(b * n + a)
        } else {
            Self(a * n + b)
        }
    }

    #[inline]
    pub(crate) fn unpack(self, n: usize) -> (usize, usize) {
        (self.0 / n, self.0 % n)
    }

    /// Dense index in `0..n²`
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}
