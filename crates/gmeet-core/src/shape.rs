//! Declarative lattice shapes for harnesses and configuration files.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::lattice::Lattice;

/// How to build a [`Lattice`]
///
/// Serialized with a `shape` tag, e.g. `{ "shape": "preset", "size": 10,
/// "seed": 0 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum LatticeShape {
    /// Chain of `n` elements
    Total {
        /// Element count
        n: usize,
    },
    /// Boolean lattice of `2^log2n` elements
    Powerset {
        /// Size of the underlying set
        log2n: u32,
    },
    /// Seeded pseudo-random lattice
    Preset {
        /// Exact element count
        size: usize,
        /// Generator seed
        seed: u64,
    },
    /// Explicit covering relation
    Covering {
        /// `children[b]` lists the elements directly below `b`
        children: Vec<Vec<usize>>,
    },
}

impl LatticeShape {
    /// Construct the lattice this shape describes.
    pub fn build(&self) -> Result<Lattice> {
        match self {
            LatticeShape::Total { n } => Lattice::total(*n),
            LatticeShape::Powerset { log2n } => Lattice::powerset(*log2n),
            LatticeShape::Preset { size, seed } => Lattice::preset(*size, *seed),
            LatticeShape::Covering { children } => Lattice::from_children(children.clone()),
        }
    }
}

/// Construct a lattice from a [`LatticeShape`].
pub fn build_lattice(shape: &LatticeShape) -> Result<Lattice> {
    shape.build()
}
