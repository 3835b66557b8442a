//! GMeet command-line harness
//!
//! Builds lattices, samples test functions and runs the GMeet solvers,
//! printing JSON on stdout. Logs go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod experiment;

use commands::{
    experiment::{handle_experiment_command, ExperimentCommand},
    lattice::{handle_lattice_command, LatticeCommand},
    sample::{handle_sample_command, SampleCommand},
    solve::{handle_solve_command, SolveCommand},
};

#[derive(Parser)]
#[command(name = "gmeet")]
#[command(about = "GMeet - greatest join-endomorphisms on finite lattices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a lattice and print its covering relation
    Lattice(LatticeCommand),
    /// Sample a random function over a lattice
    Sample(SampleCommand),
    /// Run a GMeet solver
    Solve(SolveCommand),
    /// Compare solvers over generated workloads
    Experiment(ExperimentCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lattice(cmd) => handle_lattice_command(cmd),
        Commands::Sample(cmd) => handle_sample_command(cmd),
        Commands::Solve(cmd) => handle_solve_command(cmd),
        Commands::Experiment(cmd) => handle_experiment_command(cmd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn solve_arguments_parse() {
        let cli = Cli::try_parse_from([
            "gmeet",
            "solve",
            "--shape",
            "powerset",
            "--size",
            "2",
            "--solver",
            "GMeetMonoLazy",
            "--input",
            "[1,1,1,1]",
        ])
        .unwrap();
        let Commands::Solve(cmd) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(cmd.solver, gmeet_core::SolverKind::GMeetMonoLazy);
        let lattice = cmd.shape.build().unwrap();
        assert_eq!(lattice.n(), 4);
    }

    #[test]
    fn step_cap_applies_to_meet_inputs() {
        let cli = Cli::try_parse_from([
            "gmeet",
            "solve",
            "--shape",
            "powerset",
            "--size",
            "2",
            "--solver",
            "GMeetPlus",
            "--input",
            "[0,1,1,3]",
            "--meet-with",
            "[3,3,3,3]",
            "--max-worklist-steps",
            "0",
        ])
        .unwrap();
        let Commands::Solve(cmd) = cli.command else {
            panic!("expected solve");
        };
        let err = handle_solve_command(cmd).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<gmeet_core::GMeetError>(),
            Some(gmeet_core::GMeetError::IterationCapExceeded { .. })
        ));
    }

    #[test]
    fn unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["gmeet", "sample", "--kind", "antitone"]).is_err());
    }
}
