//! `gmeet experiment`: compare solvers over generated workloads

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::{info, warn};

use super::print_json;
use crate::config::ExperimentConfig;
use crate::experiment;

/// Run a solver comparison
#[derive(Args, Debug)]
pub struct ExperimentCommand {
    /// Experiment file (`.toml` or `.json`); defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the seed from the file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exit with an error when any solver disagrees with the reference
    #[arg(long)]
    pub strict: bool,
}

/// Handle `gmeet experiment`
pub fn handle_experiment_command(cmd: ExperimentCommand) -> Result<()> {
    let mut config = match &cmd.config {
        Some(path) => ExperimentConfig::load_from_file(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(seed) = cmd.seed {
        config.seed = seed;
    }
    info!(sizes = ?config.sizes, kind = %config.kind, "starting experiment");

    let report = experiment::run(&config)?;
    print_json(&report)?;

    let fails = report.total_fails();
    if fails > 0 {
        warn!(fails, "solvers disagreed");
        if cmd.strict {
            bail!("{fails} outputs disagreed with the reference solver");
        }
    }
    Ok(())
}
