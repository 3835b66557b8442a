//! `gmeet sample`: draw a random function over a lattice

use anyhow::Result;
use clap::Args;
use gmeet_core::{sample_function, FunctionKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{print_json, ShapeArgs};

/// Sample a function of a given class
#[derive(Args, Debug)]
pub struct SampleCommand {
    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Function class, e.g. `monotone` or `meet-of-join-endomorphisms`
    #[arg(long, default_value = "arbitrary")]
    pub kind: FunctionKind,

    /// Sampler seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

/// Handle `gmeet sample`
pub fn handle_sample_command(cmd: SampleCommand) -> Result<()> {
    let lattice = cmd.shape.build()?;
    let mut rng = ChaCha8Rng::seed_from_u64(cmd.seed);
    let h = sample_function(&lattice, cmd.kind, &mut rng);
    print_json(&h)
}
