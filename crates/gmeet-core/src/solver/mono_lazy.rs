//! `GMeetMonoLazy`: lower only the join on conflict and repair
//! monotonicity once per pass that changed something.

use super::OpCounter;
use crate::closure::max_monotone_below;
use crate::lattice::Lattice;

pub(super) fn solve(lattice: &Lattice, h: &mut [usize], ops: &mut OpCounter) {
    ops.add_len(lattice.m());
    max_monotone_below(lattice, h);

    let mut changed = true;
    while changed {
        changed = false;
        for &(a, b) in lattice.uncomparables() {
            ops.add(3);
            let ab = lattice.lub(a, b);
            let c = lattice.lub(h[a], h[b]);
            if lattice.geq(c, h[ab]) {
                continue;
            }
            ops.add(1);
            h[ab] = lattice.glb(h[ab], c);
            changed = true;
        }
        if changed {
            ops.add_len(lattice.m());
            max_monotone_below(lattice, h);
        }
    }
}
