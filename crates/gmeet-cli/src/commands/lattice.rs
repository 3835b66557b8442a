//! `gmeet lattice`: build a lattice and print its covering relation

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::{print_json, ShapeArgs};

/// Build a lattice and describe it
#[derive(Args, Debug)]
pub struct LatticeCommand {
    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Include the join-irreducible elements
    #[arg(long)]
    pub irreducibles: bool,
}

#[derive(Serialize)]
struct LatticeSummary<'a> {
    n: usize,
    m: usize,
    top: usize,
    bottom: usize,
    children: &'a [Vec<usize>],
    #[serde(skip_serializing_if = "Option::is_none")]
    join_irreducibles: Option<Vec<usize>>,
}

/// Handle `gmeet lattice`
pub fn handle_lattice_command(cmd: LatticeCommand) -> Result<()> {
    let lattice = cmd.shape.build()?;
    info!(n = lattice.n(), m = lattice.m(), "lattice ready");
    print_json(&LatticeSummary {
        n: lattice.n(),
        m: lattice.m(),
        top: lattice.top(),
        bottom: lattice.bottom(),
        children: lattice.children_lists(),
        join_irreducibles: cmd.irreducibles.then(|| lattice.join_irreducibles()),
    })
}
