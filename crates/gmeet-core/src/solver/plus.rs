//! `GMeetPlus`: incremental propagation over pair worklists.
//!
//! After a monotone repair, every incomparable pair `(u, v)` with join `w`
//! is filed in exactly one bucket:
//!
//! - **support of `w`**: consistent, `h(w) = h(u) ∨ h(v)`
//! - **conflict**: `h(w)` is strictly above `h(u) ∨ h(v)` and must come down
//! - **fail**: `h(w)` is not above `h(u) ∨ h(v)`, so `h(u)` or `h(v)` must
//!   come down to their meet with `h(w)`
//!
//! Lowering `h(x)` invalidates exactly the pairs supported at `x` (they move
//! to fail) and the pairs that have `x` as a component (re-checked by
//! scanning `x`'s row). Nothing else can become inconsistent, so no full
//! rescan is ever needed.

use std::mem;

use indexmap::IndexSet;

use super::pairs::PairKey;
use super::{OpCounter, SolverConfig, SolverKind};
use crate::closure::max_monotone_below;
use crate::errors::{GMeetError, Result};
use crate::lattice::Lattice;

pub(super) fn solve(
    lattice: &Lattice,
    h: &mut [usize],
    ops: &mut OpCounter,
    config: &SolverConfig,
) -> Result<()> {
    propagate(lattice, h, ops, config, SolverKind::GMeetPlus)
}

/// Monotone repair followed by worklist propagation to the GMeet fixed point.
pub(super) fn propagate(
    lattice: &Lattice,
    h: &mut [usize],
    ops: &mut OpCounter,
    config: &SolverConfig,
    kind: SolverKind,
) -> Result<()> {
    ops.add_len(lattice.m());
    max_monotone_below(lattice, h);
    let cap = config.worklist_cap(lattice.n());
    Propagation::seeded(lattice, h, ops).run(kind, cap)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Unfiled,
    Support,
    Conflict,
    Fail,
}

struct Propagation<'a> {
    lattice: &'a Lattice,
    h: &'a mut [usize],
    ops: &'a mut OpCounter,
    n: usize,
    sup: Vec<IndexSet<PairKey>>,
    con: IndexSet<PairKey>,
    fail: IndexSet<PairKey>,
    bucket: Vec<Bucket>,
}

impl<'a> Propagation<'a> {
    fn seeded(lattice: &'a Lattice, h: &'a mut [usize], ops: &'a mut OpCounter) -> Self {
        let n = lattice.n();
        let mut state = Self {
            lattice,
            h,
            ops,
            n,
            sup: vec![IndexSet::new(); n],
            con: IndexSet::new(),
            fail: IndexSet::new(),
            bucket: vec![Bucket::Unfiled; n * n],
        };
        for &(a, b) in lattice.uncomparables() {
            state.file(a, b);
        }
        tracing::trace!(
            pairs = lattice.uncomparables().len(),
            conflicts = state.con.len(),
            fails = state.fail.len(),
            "worklists seeded"
        );
        state
    }

    fn run(mut self, kind: SolverKind, cap: u64) -> Result<()> {
        let mut steps: u64 = 0;
        loop {
            while let Some(key) = self.fail.pop() {
                self.bucket[key.index()] = Bucket::Unfiled;
                steps += 1;
                if steps > cap {
                    return Err(GMeetError::iteration_cap(kind.name(), steps));
                }
                self.repair(key);
            }
            let Some(key) = self.con.pop() else { break };
            self.bucket[key.index()] = Bucket::Unfiled;
            steps += 1;
            if steps > cap {
                return Err(GMeetError::iteration_cap(kind.name(), steps));
            }
            self.resolve(key);
        }
        tracing::trace!(steps, "worklists drained");
        Ok(())
    }

    /// Lower `h(w)` to `h(u) ∨ h(v)` for a conflict pair that is still one.
    fn resolve(&mut self, key: PairKey) {
        let (u, v) = key.unpack(self.n);
        self.ops.add(2);
        let w = self.lattice.lub(u, v);
        let c = self.lattice.lub(self.h[u], self.h[v]);
        if !self.lattice.gt(self.h[w], c) {
            self.file(u, v);
            return;
        }
        self.h[w] = c;
        self.invalidate_supports(w);
        self.sup[w].insert(key);
        self.bucket[key.index()] = Bucket::Support;
        self.check_row(w);
    }

    /// Lower `h(x)` and `h(y)` under `h(x ∨ y)` for a fail pair that is
    /// still one.
    fn repair(&mut self, key: PairKey) {
        let (x, y) = key.unpack(self.n);
        self.ops.add(3);
        let z = self.lattice.lub(x, y);
        let c = self.lattice.lub(self.h[x], self.h[y]);
        if self.lattice.geq(self.h[z], c) {
            self.file(x, y);
            return;
        }
        for xy in [x, y] {
            self.ops.add(1);
            if !self.lattice.geq(self.h[z], self.h[xy]) {
                self.ops.add(1);
                self.h[xy] = self.lattice.glb(self.h[xy], self.h[z]);
                self.invalidate_supports(xy);
                self.check_row(xy);
            }
        }
        self.file(x, y);
    }

    /// Re-file every pair `(u, v)` that `h` no longer keeps consistent.
    fn check_row(&mut self, u: usize) {
        for v in 0..self.n {
            self.ops.add(2);
            let w = self.lattice.lub(u, v);
            if self.lattice.lub(self.h[u], self.h[v]) != self.h[w] {
                self.file(u, v);
            }
        }
    }

    fn invalidate_supports(&mut self, w: usize) {
        for key in mem::take(&mut self.sup[w]) {
            self.bucket[key.index()] = Bucket::Fail;
            self.fail.insert(key);
        }
    }

    /// Move `(u, v)` into the bucket its current state calls for.
    fn file(&mut self, u: usize, v: usize) {
        let key = PairKey::pack(self.n, u, v);
        self.unfile(key);
        self.ops.add(2);
        let w = self.lattice.lub(u, v);
        let c = self.lattice.lub(self.h[u], self.h[v]);
        let bucket = if c == self.h[w] {
            self.sup[w].insert(key);
            Bucket::Support
        } else {
            self.ops.add(1);
            if self.lattice.gt(self.h[w], c) {
                self.con.insert(key);
                Bucket::Conflict
            } else {
                self.fail.insert(key);
                Bucket::Fail
            }
        };
        self.bucket[key.index()] = bucket;
    }

    fn unfile(&mut self, key: PairKey) {
        match self.bucket[key.index()] {
            Bucket::Unfiled => {}
            Bucket::Support => {
                let (u, v) = key.unpack(self.n);
                let w = self.lattice.lub(u, v);
                self.sup[w].swap_remove(&key);
            }
            Bucket::Conflict => {
                self.con.swap_remove(&key);
            }
            Bucket::Fail => {
                self.fail.swap_remove(&key);
            }
        }
        self.bucket[key.index()] = Bucket::Unfiled;
    }
}
