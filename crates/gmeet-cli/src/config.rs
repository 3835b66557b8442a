//! Experiment configuration
//!
//! Loaded from TOML (or JSON) files. Every field has a default, so a file
//! only needs the values it changes:
//!
//! ```toml
//! sizes = [5, 10, 20, 50]
//! lattices_per_size = 4
//! functions_per_lattice = 200
//! kind = "join-of-monotone-and-join-endomorphism"
//! solvers = ["GMeetMonoLazy", "GMeetPlus"]
//! time_limit_ms = 2
//!
//! [solver]
//! max_worklist_steps = 1000000
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use gmeet_core::generator::MAX_POWERSET_LOG2;
use gmeet_core::{FunctionKind, GMeetError, LatticeShape, Result, SolverConfig, SolverKind};
use serde::{Deserialize, Serialize};

/// Lattice family used by generated workloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeFamily {
    /// Chain with `size` elements
    Total,
    /// Boolean lattice, `size` is the exponent
    Powerset,
    /// Seeded pseudo-random lattice with `size` elements
    Preset,
}

impl ShapeFamily {
    /// Shape of the given size; the seed only matters for presets.
    pub fn shape(self, size: usize, seed: u64) -> Result<LatticeShape> {
        Ok(match self {
            ShapeFamily::Total => LatticeShape::Total { n: size },
            ShapeFamily::Powerset => LatticeShape::Powerset {
                log2n: u32::try_from(size).map_err(|_| {
                    GMeetError::invalid_shape(format!("powerset exponent {size} is too large"))
                })?,
            },
            ShapeFamily::Preset => LatticeShape::Preset { size, seed },
        })
    }
}

/// Parameters of a solver comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Lattice sizes, visited in order
    pub sizes: Vec<usize>,
    /// Lattices generated per size
    pub lattices_per_size: usize,
    /// Functions sampled per lattice
    pub functions_per_lattice: usize,
    /// Seed for lattice seeds and function sampling
    pub seed: u64,
    /// Class of sampled inputs
    pub kind: FunctionKind,
    /// Solvers to compare; the first one provides the reference output
    pub solvers: Vec<SolverKind>,
    /// Average time per function above which a solver is dropped for
    /// larger sizes, with 20% slack
    pub time_limit_ms: Option<u64>,
    /// Lattice family
    pub shape: ShapeFamily,
    /// Solver tuning
    pub solver: SolverConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            sizes: vec![1, 2, 5, 10, 20, 50],
            lattices_per_size: 10,
            functions_per_lattice: 100,
            seed: 0,
            kind: FunctionKind::JoinOfMonotoneAndJoinEndomorphism,
            solvers: SolverKind::ALL.to_vec(),
            time_limit_ms: None,
            shape: ShapeFamily::Preset,
            solver: SolverConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Read a `.toml` or `.json` file and validate it.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GMeetError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| GMeetError::config(format!("invalid TOML: {e}")))?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| GMeetError::config(format!("invalid JSON: {e}")))?,
            _ => return Err(GMeetError::config("unsupported file format")),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(GMeetError::config("sizes cannot be empty"));
        }
        match self.shape {
            ShapeFamily::Powerset => {
                if let Some(&k) = self.sizes.iter().find(|&&k| k > MAX_POWERSET_LOG2 as usize) {
                    return Err(GMeetError::config(format!(
                        "powerset exponent {k} exceeds {MAX_POWERSET_LOG2}"
                    )));
                }
            }
            ShapeFamily::Total | ShapeFamily::Preset => {
                if self.sizes.contains(&0) {
                    return Err(GMeetError::config("sizes must be at least 1"));
                }
            }
        }
        if self.lattices_per_size == 0 {
            return Err(GMeetError::config("lattices_per_size cannot be 0"));
        }
        if self.functions_per_lattice == 0 {
            return Err(GMeetError::config("functions_per_lattice cannot be 0"));
        }
        if self.solvers.is_empty() {
            return Err(GMeetError::config("at least one solver is required"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.solvers.iter().find(|kind| !seen.insert(**kind)) {
            return Err(GMeetError::config(format!("solver {dup} listed twice")));
        }
        if self.time_limit_ms == Some(0) {
            return Err(GMeetError::config("time_limit_ms cannot be 0"));
        }
        Ok(())
    }
}
