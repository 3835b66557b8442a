//! `gmeet solve`: run a solver on a given or sampled function

use anyhow::{Context, Result};
use clap::Args;
use gmeet_core::{
    run_solver_meet_with_config, run_solver_with_config, sample_function, Endomorphism,
    FunctionKind, Lattice, SolverConfig, SolverKind, SolverOutput,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use super::{print_json, ShapeArgs};

/// Run one solver, or all of them
#[derive(Args, Debug)]
pub struct SolveCommand {
    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Solver name
    #[arg(long, default_value = "GMeetPlus")]
    pub solver: SolverKind,

    /// Run every solver and report each result
    #[arg(long, conflicts_with = "solver")]
    pub all: bool,

    /// Input function as a JSON array; sampled when omitted
    #[arg(long)]
    pub input: Option<String>,

    /// Second function as a JSON array; the solver runs on the pointwise
    /// meet with the input
    #[arg(long)]
    pub meet_with: Option<String>,

    /// Class of the sampled input
    #[arg(long, default_value = "arbitrary")]
    pub kind: FunctionKind,

    /// Sampler seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Worklist step budget for GMeetPlus and DMeetPlus
    #[arg(long)]
    pub max_worklist_steps: Option<u64>,
}

#[derive(Serialize)]
struct SolveReport {
    solver: SolverKind,
    input: Endomorphism,
    #[serde(flatten)]
    output: SolverOutput,
}

/// Handle `gmeet solve`
pub fn handle_solve_command(cmd: SolveCommand) -> Result<()> {
    let lattice = cmd.shape.build()?;
    let input = match &cmd.input {
        Some(json) => parse_function(&lattice, json, "--input")?,
        None => sample_function(&lattice, cmd.kind, &mut ChaCha8Rng::seed_from_u64(cmd.seed)),
    };
    let meet_with = cmd
        .meet_with
        .as_deref()
        .map(|json| parse_function(&lattice, json, "--meet-with"))
        .transpose()?;
    let config = SolverConfig {
        max_worklist_steps: cmd.max_worklist_steps,
    };

    let kinds = if cmd.all {
        SolverKind::ALL.to_vec()
    } else {
        vec![cmd.solver]
    };
    let mut reports = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let output = match &meet_with {
            Some(g) => run_solver_meet_with_config(kind, &lattice, &input, g, &config)?,
            None => run_solver_with_config(kind, &lattice, input.clone(), &config)?,
        };
        info!(solver = %kind, cnt = output.cnt, "solved");
        reports.push(SolveReport {
            solver: kind,
            input: input.clone(),
            output,
        });
    }

    if let [single] = reports.as_slice() {
        print_json(single)
    } else {
        print_json(&reports)
    }
}

fn parse_function(lattice: &Lattice, json: &str, flag: &str) -> Result<Endomorphism> {
    let values: Vec<usize> =
        serde_json::from_str(json).with_context(|| format!("{flag} is not a JSON array"))?;
    Endomorphism::new(lattice, values).with_context(|| format!("{flag} does not fit the lattice"))
}
