//! GMeet solver family
//!
//! Five strategies for the greatest join-endomorphism below a function `h`.
//! They share one contract: take ownership of `h`, lower it in place, and
//! return the unique answer together with an abstract operation count. The
//! count charges table lookups and writes the same way across solvers so
//! that runs on identical inputs can be compared; it plays no part in
//! correctness.
//!
//! | Solver          | Strategy                                                   |
//! |-----------------|------------------------------------------------------------|
//! | `GMeetStar`     | full pair scans, local correction, until a clean pass      |
//! | `GMeetMonoStar` | monotone repair first, then lower the whole down-set       |
//! | `GMeetMonoLazy` | lower only the join, batch monotone repair between passes  |
//! | `GMeetPlus`     | incremental support/conflict/fail worklists                |
//! | `DMeetPlus`     | worklists, then rebuild from join-irreducible values       |

mod dmeet;
mod mono_lazy;
mod mono_star;
mod pairs;
mod plus;
mod star;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::endomorphism::Endomorphism;
use crate::errors::{GMeetError, Result};
use crate::lattice::Lattice;

/// One of the five GMeet solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SolverKind {
    /// Repeated full scans over all pairs
    GMeetStar,
    /// Monotone repair, then down-set lowering per conflict
    GMeetMonoStar,
    /// Monotone repair, join-only lowering, batched re-repair
    GMeetMonoLazy,
    /// Incremental worklist propagation
    GMeetPlus,
    /// Worklist propagation followed by join-irreducible reconstruction
    DMeetPlus,
}

impl SolverKind {
    /// Every solver, in the order reports list them
    pub const ALL: [SolverKind; 5] = [
        SolverKind::GMeetStar,
        SolverKind::GMeetMonoStar,
        SolverKind::GMeetMonoLazy,
        SolverKind::GMeetPlus,
        SolverKind::DMeetPlus,
    ];

    /// Canonical name, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            SolverKind::GMeetStar => "GMeetStar",
            SolverKind::GMeetMonoStar => "GMeetMonoStar",
            SolverKind::GMeetMonoLazy => "GMeetMonoLazy",
            SolverKind::GMeetPlus => "GMeetPlus",
            SolverKind::DMeetPlus => "DMeetPlus",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = GMeetError;

    /// Case-insensitive match on the canonical name
    fn from_str(s: &str) -> Result<Self> {
        SolverKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GMeetError::unknown_solver(s))
    }
}

/// Per-run operation accumulator, threaded through a solver by `&mut`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounter(u64);

impl OpCounter {
    /// Charge `ops` unit operations
    #[inline]
    pub fn add(&mut self, ops: u64) {
        self.0 = self.0.saturating_add(ops);
    }

    /// Charge `ops` given as an element count
    #[inline]
    pub fn add_len(&mut self, ops: usize) {
        self.add(ops as u64);
    }

    /// Operations charged so far
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Tuning knobs shared by the solvers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Worklist pops allowed before `GMeetPlus`/`DMeetPlus` give up.
    ///
    /// `None` derives `(n + 1)^4 + 1024` from the lattice size.
    pub max_worklist_steps: Option<u64>,
}

impl SolverConfig {
    /// Step budget for a lattice of `n` elements
    pub fn worklist_cap(&self, n: usize) -> u64 {
        self.max_worklist_steps.unwrap_or_else(|| {
            let side = (n as u64).saturating_add(1);
            side.saturating_mul(side)
                .saturating_mul(side)
                .saturating_mul(side)
                .saturating_add(1024)
        })
    }
}

/// Result of a solver run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverOutput {
    /// Greatest join-endomorphism below the input
    pub h: Endomorphism,
    /// Abstract operations charged
    pub cnt: u64,
}

/// Run `kind` on `h` with the default [`SolverConfig`].
pub fn run_solver(kind: SolverKind, lattice: &Lattice, h: Endomorphism) -> Result<SolverOutput> {
    run_solver_with_config(kind, lattice, h, &SolverConfig::default())
}

/// Run `kind` on `h`.
///
/// `h` is revalidated against `lattice` because an [`Endomorphism`] built
/// for one lattice may be handed to another of a different size.
pub fn run_solver_with_config(
    kind: SolverKind,
    lattice: &Lattice,
    h: Endomorphism,
    config: &SolverConfig,
) -> Result<SolverOutput> {
    let h = Endomorphism::new(lattice, h.into_inner())?;
    solve(kind, lattice, h, OpCounter::default(), config)
}

/// Run `kind` on the pointwise meet `f ⊓ g`, charging one operation per
/// element for forming the meet.
pub fn run_solver_meet(
    kind: SolverKind,
    lattice: &Lattice,
    f: &Endomorphism,
    g: &Endomorphism,
) -> Result<SolverOutput> {
    run_solver_meet_with_config(kind, lattice, f, g, &SolverConfig::default())
}

/// [`run_solver_meet`] with explicit tuning.
pub fn run_solver_meet_with_config(
    kind: SolverKind,
    lattice: &Lattice,
    f: &Endomorphism,
    g: &Endomorphism,
    config: &SolverConfig,
) -> Result<SolverOutput> {
    let f = Endomorphism::new(lattice, f.as_slice().to_vec())?;
    let g = Endomorphism::new(lattice, g.as_slice().to_vec())?;
    let mut ops = OpCounter::default();
    ops.add_len(lattice.n());
    solve(kind, lattice, f.meet(lattice, &g), ops, config)
}

fn solve(
    kind: SolverKind,
    lattice: &Lattice,
    mut h: Endomorphism,
    mut ops: OpCounter,
    config: &SolverConfig,
) -> Result<SolverOutput> {
    #[cfg(debug_assertions)]
    let original = h.clone();

    tracing::debug!(solver = %kind, n = lattice.n(), "solver start");
    let values = h.as_mut_slice();
    fix_bottom(lattice, values, &mut ops);
    match kind {
        SolverKind::GMeetStar => star::solve(lattice, values, &mut ops),
        SolverKind::GMeetMonoStar => mono_star::solve(lattice, values, &mut ops),
        SolverKind::GMeetMonoLazy => mono_lazy::solve(lattice, values, &mut ops),
        SolverKind::GMeetPlus => plus::solve(lattice, values, &mut ops, config)?,
        SolverKind::DMeetPlus => dmeet::solve(lattice, values, &mut ops, config)?,
    }
    tracing::debug!(solver = %kind, cnt = ops.get(), "solver done");

    #[cfg(debug_assertions)]
    {
        assert!(h.is_join_endomorphism(lattice), "{kind} returned a non join-endomorphism");
        assert!(h.is_below(lattice, &original), "{kind} raised a value above its input");
    }

    Ok(SolverOutput { h, cnt: ops.get() })
}

/// A join-endomorphism maps bottom to bottom, so every solver starts there.
fn fix_bottom(lattice: &Lattice, h: &mut [usize], ops: &mut OpCounter) {
    let bottom = lattice.bottom();
    ops.add(1);
    h[bottom] = bottom;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in SolverKind::ALL {
            assert_eq!(kind.name().parse::<SolverKind>().unwrap(), kind);
        }
        assert_eq!("gmeetplus".parse::<SolverKind>().unwrap(), SolverKind::GMeetPlus);
        assert!(matches!(
            "GMeetFast".parse::<SolverKind>(),
            Err(GMeetError::UnknownSolver { .. })
        ));
    }

    #[test]
    fn every_solver_fixes_bottom_on_the_square() {
        let l = Lattice::powerset(2).unwrap();
        for kind in SolverKind::ALL {
            let h = Endomorphism::new(&l, vec![1, 1, 1, 1]).unwrap();
            let out = run_solver(kind, &l, h).unwrap();
            assert_eq!(out.h.as_slice(), &[0, 1, 1, 1], "{kind}");
            assert!(out.cnt > 0);
        }
    }

    #[test]
    fn wrong_length_rejected() {
        let small = Lattice::total(3).unwrap();
        let big = Lattice::total(5).unwrap();
        let h = Endomorphism::identity(&big);
        assert!(matches!(
            run_solver(SolverKind::GMeetStar, &small, h),
            Err(GMeetError::InvalidEndomorphism { .. })
        ));
    }

    #[test]
    fn meet_entry_point_charges_the_meet() {
        let l = Lattice::powerset(2).unwrap();
        let f = Endomorphism::new(&l, vec![0, 1, 2, 3]).unwrap();
        let g = Endomorphism::new(&l, vec![3, 3, 3, 1]).unwrap();
        let direct = run_solver(SolverKind::GMeetMonoLazy, &l, f.meet(&l, &g)).unwrap();
        let met = run_solver_meet(SolverKind::GMeetMonoLazy, &l, &f, &g).unwrap();
        assert_eq!(direct.h, met.h);
        assert_eq!(met.cnt, direct.cnt + l.n() as u64);
    }

    #[test]
    fn meet_entry_point_honours_the_step_cap() {
        let l = Lattice::powerset(2).unwrap();
        let f = Endomorphism::new(&l, vec![0, 1, 1, 3]).unwrap();
        let g = Endomorphism::constant(&l, l.top()).unwrap();
        let config = SolverConfig {
            max_worklist_steps: Some(0),
        };
        for kind in [SolverKind::GMeetPlus, SolverKind::DMeetPlus] {
            assert!(matches!(
                run_solver_meet_with_config(kind, &l, &f, &g, &config),
                Err(GMeetError::IterationCapExceeded { .. })
            ));
        }
        let relaxed = run_solver_meet(SolverKind::GMeetPlus, &l, &f, &g).unwrap();
        assert_eq!(relaxed.h.as_slice(), &[0, 1, 1, 1]);
    }

    #[test]
    fn default_cap_grows_with_n() {
        let config = SolverConfig::default();
        assert_eq!(config.worklist_cap(1), 16 + 1024);
        assert!(config.worklist_cap(100) > config.worklist_cap(10));
        assert_eq!(config.worklist_cap(usize::MAX), u64::MAX);
        let fixed = SolverConfig { max_worklist_steps: Some(7) };
        assert_eq!(fixed.worklist_cap(100), 7);
    }
}
