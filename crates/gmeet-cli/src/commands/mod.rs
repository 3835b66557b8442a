//! Subcommand arguments and handlers

pub mod experiment;
pub mod lattice;
pub mod sample;
pub mod solve;

use anyhow::{Context, Result};
use clap::Args;
use gmeet_core::{Lattice, LatticeShape};
use serde::Serialize;

use crate::config::ShapeFamily;

/// Lattice selection shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct ShapeArgs {
    /// Lattice family
    #[arg(long, value_enum, default_value = "preset")]
    pub shape: ShapeFamily,

    /// Element count, or the exponent for `powerset`
    #[arg(long, default_value_t = 10)]
    pub size: usize,

    /// Generator seed for `preset`
    #[arg(long, default_value_t = 0)]
    pub lattice_seed: u64,

    /// Explicit covering relation as JSON, e.g. `[[],[0],[0],[1,2]]`;
    /// overrides `--shape`
    #[arg(long)]
    pub children: Option<String>,
}

impl ShapeArgs {
    /// Shape described by the arguments
    pub fn to_shape(&self) -> Result<LatticeShape> {
        if let Some(json) = &self.children {
            let children: Vec<Vec<usize>> =
                serde_json::from_str(json).context("--children is not a JSON list of lists")?;
            return Ok(LatticeShape::Covering { children });
        }
        Ok(self.shape.shape(self.size, self.lattice_seed)?)
    }

    /// Build the lattice
    pub fn build(&self) -> Result<Lattice> {
        let shape = self.to_shape()?;
        shape
            .build()
            .with_context(|| format!("cannot build lattice from {shape:?}"))
    }
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
