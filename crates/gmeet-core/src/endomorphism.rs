//! Functions from a lattice to itself.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::errors::{GMeetError, Result};
use crate::lattice::Lattice;

/// Total function on the elements of a lattice, `h[x] ∈ 0..n`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endomorphism(Vec<usize>);

impl Endomorphism {
    /// Validate `values` against `lattice`.
    pub fn new(lattice: &Lattice, values: Vec<usize>) -> Result<Self> {
        let n = lattice.n();
        if values.len() != n {
            return Err(GMeetError::invalid_endomorphism(format!(
                "expected {n} values, got {}",
                values.len()
            )));
        }
        if let Some((x, &v)) = values.iter().enumerate().find(|&(_, &v)| v >= n) {
            return Err(GMeetError::invalid_endomorphism(format!(
                "h[{x}] = {v} is not an element of a lattice of size {n}"
            )));
        }
        Ok(Self(values))
    }

    /// Already validated values from inside the crate
    pub(crate) fn from_valid(values: Vec<usize>) -> Self {
        Self(values)
    }

    /// The identity function
    pub fn identity(lattice: &Lattice) -> Self {
        Self((0..lattice.n()).collect())
    }

    /// Every element mapped to `value`
    pub fn constant(lattice: &Lattice, value: usize) -> Result<Self> {
        Self::new(lattice, vec![value; lattice.n()])
    }

    /// Number of elements in the domain
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Domain is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values as a slice
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [usize] {
        &mut self.0
    }

    /// Unwrap into the value vector
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Pointwise meet
    pub fn meet(&self, lattice: &Lattice, other: &Self) -> Self {
        Self(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(&a, &b)| lattice.glb(a, b))
                .collect(),
        )
    }

    /// Pointwise join
    pub fn join(&self, lattice: &Lattice, other: &Self) -> Self {
        Self(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(&a, &b)| lattice.lub(a, b))
                .collect(),
        )
    }

    /// `self[x] ≤ other[x]` for every `x`
    pub fn is_below(&self, lattice: &Lattice, other: &Self) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .all(|(&a, &b)| lattice.leq(a, b))
    }

    /// `a ≤ b ⟹ h(a) ≤ h(b)`, checked on covering edges
    pub fn is_monotone(&self, lattice: &Lattice) -> bool {
        (0..lattice.n()).all(|b| {
            lattice
                .children(b)
                .iter()
                .all(|&a| lattice.leq(self.0[a], self.0[b]))
        })
    }

    /// `h(⊥) = ⊥` and `h(a ∨ b) = h(a) ∨ h(b)` for every pair
    pub fn is_join_endomorphism(&self, lattice: &Lattice) -> bool {
        let h = &self.0;
        let bottom = lattice.bottom();
        if h[bottom] != bottom {
            return false;
        }
        let n = lattice.n();
        (0..n).all(|a| {
            ((a + 1)..n).all(|b| h[lattice.lub(a, b)] == lattice.lub(h[a], h[b]))
        })
    }
}

impl Index<usize> for Endomorphism {
    type Output = usize;

    fn index(&self, x: usize) -> &usize {
        &self.0[x]
    }
}

impl AsRef<[usize]> for Endomorphism {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}
