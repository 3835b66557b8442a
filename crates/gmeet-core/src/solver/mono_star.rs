//! `GMeetMonoStar`
//!
//! Starts from the largest monotone function below `h`. A conflict at
//! `ab = a ∨ b` lowers every `x ≤ ab` to its meet with `h(a) ∨ h(b)`,
//! which keeps `h` monotone without a second closure pass.

use super::OpCounter;
use crate::closure::max_monotone_below;
use crate::lattice::Lattice;

pub(super) fn solve(lattice: &Lattice, h: &mut [usize], ops: &mut OpCounter) {
    let n = lattice.n();
    ops.add_len(lattice.m());
    max_monotone_below(lattice, h);

    let mut changed = true;
    while changed {
        changed = false;
        for &(a, b) in lattice.uncomparables() {
            ops.add(2);
            let ab = lattice.lub(a, b);
            let c = lattice.lub(h[a], h[b]);
            if h[ab] == c {
                continue;
            }
            changed = true;
            ops.add_len(n);
            for x in 0..n {
                if lattice.leq(x, ab) {
                    h[x] = lattice.glb(h[x], c);
                    ops.add(1);
                }
            }
        }
    }
}
