#![deny(clippy::dbg_macro)]
#![deny(clippy::todo)]
//! # GMeet Core - Finite Lattices and Join-Endomorphism Solvers
//!
//! Given a finite lattice `L` and any function `h: L → L`, compute the
//! greatest join-endomorphism pointwise below `h`: the largest `g` with
//! `g(⊥) = ⊥`, `g(a ∨ b) = g(a) ∨ g(b)` and `g ≤ h`. This crate provides:
//! - Order utilities: topological sort, closure, covering relations
//! - A dense-table lattice model with join and meet lookup in O(1)
//! - Generators for chains, powersets and seeded pseudo-random lattices
//! - Monotone closure operators
//! - Five solvers that agree on the result and differ in operation count
//! - A sampler of random test functions in five classes
//!
//! ## Design Principles
//!
//! - **Immutable lattices**: built once, shared read-only by every run
//! - **Owned inputs**: a solver consumes its own copy of `h`
//! - **Hard failures**: malformed input is rejected at construction with
//!   [`GMeetError`], internal invariant breaks abort
//! - **Advisory counting**: operation counts are instrumentation only
//!
//! ## Usage
//!
//! ```rust
//! use gmeet_core::{run_solver, Endomorphism, Lattice, SolverKind};
//!
//! let lattice = Lattice::powerset(2)?;
//! let h = Endomorphism::new(&lattice, vec![1, 1, 1, 1])?;
//! let out = run_solver(SolverKind::GMeetPlus, &lattice, h)?;
//! assert_eq!(out.h.as_slice(), &[0, 1, 1, 1]);
//! # Ok::<(), gmeet_core::GMeetError>(())
//! ```

// ============================================================================
// Submodules
// ============================================================================

pub mod closure;
pub mod endomorphism;
pub mod errors;
pub mod generator;
pub mod lattice;
pub mod order;
pub mod prelude;
pub mod sampler;
pub mod shape;
pub mod solver;
pub mod table;

// ============================================================================
// Re-exports
// ============================================================================

pub use endomorphism::Endomorphism;
pub use errors::{GMeetError, Result};
pub use lattice::{IrreducibleOrder, Lattice};
pub use sampler::{sample_function, FunctionKind};
pub use shape::{build_lattice, LatticeShape};
pub use solver::{
    run_solver, run_solver_meet, run_solver_meet_with_config, run_solver_with_config, OpCounter,
    SolverConfig, SolverKind, SolverOutput,
};
pub use table::SquareTable;
