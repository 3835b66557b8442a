//! Solver Performance Benchmarks
//!
//! Runs the five GMeet solvers on identical inputs over preset lattices of
//! growing size, and measures lattice construction separately.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gmeet_core::{run_solver, sample_function, FunctionKind, Lattice, SolverKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Benchmark configuration for different lattice sizes
#[derive(Clone)]
struct BenchConfig {
    size: usize,
    seed: u64,
    kind: FunctionKind,
}

impl BenchConfig {
    fn small() -> Self {
        Self {
            size: 16,
            seed: 1,
            kind: FunctionKind::JoinOfMonotoneAndJoinEndomorphism,
        }
    }

    fn medium() -> Self {
        Self {
            size: 48,
            seed: 2,
            kind: FunctionKind::JoinOfMonotoneAndJoinEndomorphism,
        }
    }

    fn large() -> Self {
        Self {
            size: 96,
            seed: 3,
            kind: FunctionKind::MeetOfJoinEndomorphisms,
        }
    }
}

fn bench_lattice_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice_construction");
    for config in [BenchConfig::small(), BenchConfig::medium(), BenchConfig::large()] {
        group.bench_with_input(
            BenchmarkId::new("preset", config.size),
            &config,
            |b, config| b.iter(|| black_box(Lattice::preset(config.size, config.seed))),
        );
    }
    group.finish();
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("gmeet_solvers");
    for config in [BenchConfig::small(), BenchConfig::medium(), BenchConfig::large()] {
        let Ok(lattice) = Lattice::preset(config.size, config.seed) else {
            continue;
        };
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let h = sample_function(&lattice, config.kind, &mut rng);
        for kind in SolverKind::ALL {
            group.bench_with_input(BenchmarkId::new(kind.name(), config.size), &h, |b, h| {
                b.iter(|| black_box(run_solver(kind, &lattice, h.clone())));
            });
        }
    }
    group.finish();
}

criterion_group!(construction, bench_lattice_construction);
criterion_group!(solvers, bench_solvers);

criterion_main!(construction, solvers);
