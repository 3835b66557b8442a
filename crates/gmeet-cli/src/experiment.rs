//! Solver comparison runs
//!
//! For each size, builds a batch of lattices, samples input functions, runs
//! every active solver on identical copies and checks each output against
//! the first solver's. Solvers whose average time per function exceeds the
//! configured limit by more than 20% are dropped for the remaining sizes.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use gmeet_core::{
    run_solver_with_config, sample_function, Endomorphism, FunctionKind, Lattice, SolverKind,
    SolverOutput,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ExperimentConfig, ShapeFamily};

/// Slack over the time limit before a solver is dropped
const TIME_LIMIT_SLACK: f64 = 1.2;

/// Accumulated results of one solver at one size
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolverStats {
    /// Functions solved
    pub runs: u64,
    /// Outputs that differ from the reference solver
    pub fails: u64,
    /// Sum of operation counts
    pub cnt_sum: u64,
    /// Largest operation count
    pub cnt_max: u64,
    /// Average operation count per function
    pub cnt_avg: f64,
    /// Wall-clock time over all runs, in seconds
    pub time_total: f64,
    /// Average time per function, in seconds
    pub time_avg: f64,
    /// First mismatching input, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_example: Option<FailExample>,
}

impl SolverStats {
    fn record(&mut self, outputs: &[SolverOutput], elapsed: Duration) {
        self.runs += outputs.len() as u64;
        self.time_total += elapsed.as_secs_f64();
        for out in outputs {
            self.cnt_sum = self.cnt_sum.saturating_add(out.cnt);
            self.cnt_max = self.cnt_max.max(out.cnt);
        }
        if self.runs > 0 {
            self.cnt_avg = self.cnt_sum as f64 / self.runs as f64;
            self.time_avg = self.time_total / self.runs as f64;
        }
    }
}

/// Input on which a solver disagreed with the reference
#[derive(Debug, Clone, Serialize)]
pub struct FailExample {
    /// Lattice seed
    pub lattice_seed: u64,
    /// Sampled function
    pub input: Endomorphism,
    /// What the solver returned
    pub output: Endomorphism,
    /// What the reference solver returned
    pub expected: Endomorphism,
}

/// Results for one lattice size
#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    /// Requested size (the exponent for powersets)
    pub size: usize,
    /// Lattices generated
    pub lattices: usize,
    /// Per-solver results, keyed by solver name
    pub solvers: BTreeMap<SolverKind, SolverStats>,
}

/// Full experiment output
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    /// Class of sampled inputs
    pub kind: FunctionKind,
    /// Lattice family
    pub shape: ShapeFamily,
    /// One entry per size, in configuration order
    pub sizes: Vec<SizeReport>,
    /// Solvers dropped for exceeding the time limit
    pub timed_out: BTreeSet<SolverKind>,
}

impl ExperimentReport {
    /// Total disagreements over the whole run
    pub fn total_fails(&self) -> u64 {
        self.sizes
            .iter()
            .flat_map(|size| size.solvers.values())
            .map(|stats| stats.fails)
            .sum()
    }
}

/// Run the experiment described by `config`.
pub fn run(config: &ExperimentConfig) -> Result<ExperimentReport> {
    config.validate()?;
    let time_limit = config.time_limit_ms.map(Duration::from_millis);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut timed_out = BTreeSet::new();
    let mut sizes = Vec::with_capacity(config.sizes.len());

    for &size in &config.sizes {
        let active: Vec<SolverKind> = config
            .solvers
            .iter()
            .copied()
            .filter(|kind| !timed_out.contains(kind))
            .collect();
        if active.is_empty() {
            info!(size, "every solver timed out, stopping");
            break;
        }
        info!(size, solvers = active.len(), "running size");

        let mut report = SizeReport {
            size,
            lattices: 0,
            solvers: active.iter().map(|&kind| (kind, SolverStats::default())).collect(),
        };
        for _ in 0..config.lattices_per_size {
            let lattice_seed: u64 = rng.gen();
            let lattice = config
                .shape
                .shape(size, lattice_seed)?
                .build()
                .with_context(|| format!("building lattice of size {size} seed {lattice_seed}"))?;
            let inputs: Vec<Endomorphism> = (0..config.functions_per_lattice)
                .map(|_| sample_function(&lattice, config.kind, &mut rng))
                .collect();
            run_batch(config, &lattice, lattice_seed, &inputs, &active, &mut report)?;
            report.lattices += 1;
        }

        if let Some(limit) = time_limit {
            let limit = limit.as_secs_f64() * TIME_LIMIT_SLACK;
            for (kind, stats) in &report.solvers {
                if stats.time_avg > limit {
                    info!(solver = %kind, size, "solver exceeded time limit, dropping");
                    timed_out.insert(*kind);
                }
            }
        }
        sizes.push(report);
    }

    Ok(ExperimentReport {
        kind: config.kind,
        shape: config.shape,
        sizes,
        timed_out,
    })
}

fn run_batch(
    config: &ExperimentConfig,
    lattice: &Lattice,
    lattice_seed: u64,
    inputs: &[Endomorphism],
    active: &[SolverKind],
    report: &mut SizeReport,
) -> Result<()> {
    let mut expected: Option<Vec<Endomorphism>> = None;
    for &kind in active {
        let start = Instant::now();
        let outputs = inputs
            .iter()
            .map(|h| run_solver_with_config(kind, lattice, h.clone(), &config.solver))
            .collect::<gmeet_core::Result<Vec<_>>>()
            .with_context(|| format!("{kind} failed on lattice seed {lattice_seed}"))?;
        let elapsed = start.elapsed();

        let Some(stats) = report.solvers.get_mut(&kind) else {
            continue;
        };
        stats.record(&outputs, elapsed);

        debug!(solver = %kind, lattice_seed, cnt_max = stats.cnt_max, "batch done");

        let results: Vec<Endomorphism> = outputs.into_iter().map(|out| out.h).collect();
        let Some(reference) = expected.as_ref() else {
            expected = Some(results);
            continue;
        };
        for ((input, output), wanted) in inputs.iter().zip(&results).zip(reference) {
            if output == wanted {
                continue;
            }
            stats.fails += 1;
            if stats.fail_example.is_none() {
                stats.fail_example = Some(FailExample {
                    lattice_seed,
                    input: input.clone(),
                    output: output.clone(),
                    expected: wanted.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig {
            sizes: vec![1, 4, 9],
            lattices_per_size: 2,
            functions_per_lattice: 5,
            seed: 7,
            ..Default::default()
        }
    }

    #[test]
    fn solvers_agree_in_a_small_run() {
        let report = run(&small_config()).unwrap();
        assert_eq!(report.sizes.len(), 3);
        assert_eq!(report.total_fails(), 0);
        for size in &report.sizes {
            assert_eq!(size.lattices, 2);
            assert_eq!(size.solvers.len(), SolverKind::ALL.len());
            for stats in size.solvers.values() {
                assert_eq!(stats.runs, 10);
                assert!(stats.cnt_max as f64 >= stats.cnt_avg);
            }
        }
    }

    #[test]
    fn reruns_are_reproducible() {
        let first = run(&small_config()).unwrap();
        let second = run(&small_config()).unwrap();
        for (a, b) in first.sizes.iter().zip(&second.sizes) {
            for (kind, stats) in &a.solvers {
                assert_eq!(stats.cnt_sum, b.solvers[kind].cnt_sum, "{kind}");
            }
        }
    }

    #[test]
    fn report_serializes_solver_names() {
        let report = run(&ExperimentConfig {
            sizes: vec![3],
            lattices_per_size: 1,
            functions_per_lattice: 1,
            solvers: vec![SolverKind::GMeetPlus],
            ..Default::default()
        })
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["sizes"][0]["solvers"]["GMeetPlus"]["cnt_sum"].is_u64());
        assert_eq!(json["kind"], "join-of-monotone-and-join-endomorphism");
    }
}
