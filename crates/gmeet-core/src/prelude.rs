//! GMeet core prelude.
//!
//! Curated re-exports for harnesses.

pub use crate::closure::{max_join_below_naive, max_monotone_below, min_monotone_above};
pub use crate::{
    build_lattice, run_solver, run_solver_meet, run_solver_meet_with_config,
    run_solver_with_config, sample_function, Endomorphism, FunctionKind, GMeetError, Lattice,
    LatticeShape, SolverConfig, SolverKind, SolverOutput,
};
