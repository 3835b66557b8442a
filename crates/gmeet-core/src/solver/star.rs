//! `GMeetStar`: full scans over every pair until one pass changes nothing.

use super::OpCounter;
use crate::lattice::Lattice;

pub(super) fn solve(lattice: &Lattice, h: &mut [usize], ops: &mut OpCounter) {
    let n = lattice.n();
    let mut changed = true;
    let mut passes = 0u32;
    while changed {
        changed = false;
        passes += 1;
        for a in 0..n {
            for b in (a + 1)..n {
                ops.add(2);
                let ab = lattice.lub(a, b);
                let c = lattice.lub(h[a], h[b]);
                if h[ab] == c {
                    continue;
                }
                changed = true;
                ops.add(1);
                if lattice.gt(h[ab], c) {
                    h[ab] = c;
                } else {
                    h[a] = lattice.glb(h[a], h[ab]);
                    h[b] = lattice.glb(h[b], h[ab]);
                    ops.add(2);
                }
            }
        }
    }
    tracing::trace!(passes, "GMeetStar converged");
}
