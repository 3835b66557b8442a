//! `DMeetPlus`
//!
//! A join-endomorphism is determined by its values on join-irreducible
//! elements: every other element except bottom is the join of its covers
//! from below. After the worklist engine converges, the reducible values
//! are cleared to bottom and rebuilt bottom-up as joins over children.
//!
//! The rebuild is exact and reproduces the engine's result, but it prunes
//! nothing: the count is always the `GMeetPlus` count plus `n + m`.
//! Running the engine on irreducible pairs alone is not enough to reach
//! the greatest join-endomorphism on every lattice.

use super::plus::propagate;
use super::{OpCounter, SolverConfig, SolverKind};
use crate::closure::min_monotone_above;
use crate::errors::Result;
use crate::lattice::Lattice;

pub(super) fn solve(
    lattice: &Lattice,
    h: &mut [usize],
    ops: &mut OpCounter,
    config: &SolverConfig,
) -> Result<()> {
    propagate(lattice, h, ops, config, SolverKind::DMeetPlus)?;

    let bottom = lattice.bottom();
    ops.add_len(lattice.n());
    for (x, value) in h.iter_mut().enumerate() {
        if x != bottom && !lattice.is_join_irreducible(x) {
            *value = bottom;
        }
    }
    ops.add_len(lattice.m());
    min_monotone_above(lattice, h);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuild_matches_engine_on_the_pentagon() {
        // N5: 0 < 1 < 2 < 4 and 0 < 3 < 4, not distributive
        let children = vec![vec![], vec![0], vec![1], vec![0], vec![2, 3]];
        let l = Lattice::from_children(children).unwrap();
        let config = SolverConfig::default();
        let start = vec![0, 2, 4, 3, 4];

        let mut engine = start.clone();
        let mut ops = OpCounter::default();
        propagate(&l, &mut engine, &mut ops, &config, SolverKind::GMeetPlus).unwrap();

        let mut rebuilt = start;
        let mut rebuild_ops = OpCounter::default();
        solve(&l, &mut rebuilt, &mut rebuild_ops, &config).unwrap();
        assert_eq!(rebuilt, engine);
        assert_eq!(rebuild_ops.get(), ops.get() + (l.n() + l.m()) as u64);
    }
}
