//! Unified error type for GMeet operations
//!
//! Every failure in the core is a precondition violation: a relation that is
//! not a finite lattice, an unknown name, a function that is not an
//! endomorphism of the lattice it is paired with, or a solver overrunning its
//! worklist budget. None of them are retried.

use serde::{Deserialize, Serialize};

/// Unified error type for all GMeet operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum GMeetError {
    /// The supplied order or covering relation is not a finite lattice
    #[error("Invalid lattice: {reason}")]
    InvalidLattice {
        /// What property was violated
        reason: String,
    },

    /// Generator parameters that cannot produce a lattice
    #[error("Invalid shape: {reason}")]
    InvalidShape {
        /// Why the shape was rejected
        reason: String,
    },

    /// A function kind name that the sampler does not know
    #[error("Unknown function kind: {kind}")]
    UnknownFunctionKind {
        /// The name as supplied
        kind: String,
    },

    /// A solver name that is not part of the family
    #[error("Unknown solver: {name}")]
    UnknownSolver {
        /// The name as supplied
        name: String,
    },

    /// The function is not an endomorphism of the lattice
    #[error("Invalid endomorphism: {reason}")]
    InvalidEndomorphism {
        /// Length or range mismatch
        reason: String,
    },

    /// A worklist solver ran past its step budget
    #[error("Solver {solver} exceeded its step budget after {steps} steps")]
    IterationCapExceeded {
        /// Solver name
        solver: String,
        /// Steps performed when the cap was hit
        steps: u64,
    },

    /// Harness configuration could not be loaded or validated
    #[error("Configuration error: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },
}

impl GMeetError {
    /// Create an invalid lattice error
    pub fn invalid_lattice(reason: impl Into<String>) -> Self {
        Self::InvalidLattice {
            reason: reason.into(),
        }
    }

    /// Create an invalid shape error
    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            reason: reason.into(),
        }
    }

    /// Create an unknown function kind error
    pub fn unknown_function_kind(kind: impl Into<String>) -> Self {
        Self::UnknownFunctionKind { kind: kind.into() }
    }

    /// Create an unknown solver error
    pub fn unknown_solver(name: impl Into<String>) -> Self {
        Self::UnknownSolver { name: name.into() }
    }

    /// Create an invalid endomorphism error
    pub fn invalid_endomorphism(reason: impl Into<String>) -> Self {
        Self::InvalidEndomorphism {
            reason: reason.into(),
        }
    }

    /// Create an iteration cap error
    pub fn iteration_cap(solver: impl Into<String>, steps: u64) -> Self {
        Self::IterationCapExceeded {
            solver: solver.into(),
            steps,
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

/// Standard Result type for GMeet operations
pub type Result<T> = std::result::Result<T, GMeetError>;

impl From<std::io::Error> for GMeetError {
    fn from(err: std::io::Error) -> Self {
        Self::config(err.to_string())
    }
}
