//! Monotone closure operators
//!
//! In-place fixed-point passes over a function `h` on a lattice. Each
//! returns whether any value changed. They never raise a value above its
//! input except [`min_monotone_above`], which never lowers one.

use crate::lattice::Lattice;

/// Largest monotone function below `h`.
///
/// Walks the top-down order so that every parent is final before its
/// children are visited, meeting `h[x]` with `h[p]` for each cover `p`.
pub fn max_monotone_below(lattice: &Lattice, h: &mut [usize]) -> bool {
    let mut changed = false;
    for &x in lattice.topo_up_down() {
        let z = lattice
            .parents(x)
            .iter()
            .fold(h[x], |z, &p| lattice.glb(z, h[p]));
        if z != h[x] {
            h[x] = z;
            changed = true;
        }
    }
    changed
}

/// Smallest monotone function above `h`, the dual of [`max_monotone_below`].
pub fn min_monotone_above(lattice: &Lattice, h: &mut [usize]) -> bool {
    let mut changed = false;
    for &x in lattice.topo_down_up() {
        let z = lattice
            .children(x)
            .iter()
            .fold(h[x], |z, &c| lattice.lub(z, h[c]));
        if z != h[x] {
            h[x] = z;
            changed = true;
        }
    }
    changed
}

/// Largest join-endomorphism below `h`, by repeated full scans.
///
/// For each pair with `h(a ∨ b) ≠ h(a) ∨ h(b)`: lower `h(a ∨ b)` when it is
/// strictly above `h(a) ∨ h(b)`, otherwise lower `h(a)` and `h(b)` to their
/// meet with `h(a ∨ b)`. Stops after a scan without changes.
pub fn max_join_below_naive(lattice: &Lattice, h: &mut [usize]) -> bool {
    let n = lattice.n();
    let bottom = lattice.bottom();
    let mut ever_changed = h[bottom] != bottom;
    h[bottom] = bottom;
    let mut changed = true;
    while changed {
        changed = false;
        for a in 0..n {
            for b in (a + 1)..n {
                let ab = lattice.lub(a, b);
                let c = lattice.lub(h[a], h[b]);
                if h[ab] == c {
                    continue;
                }
                changed = true;
                if lattice.gt(h[ab], c) {
                    h[ab] = c;
                } else {
                    h[a] = lattice.glb(h[a], h[ab]);
                    h[b] = lattice.glb(h[b], h[ab]);
                }
            }
        }
        ever_changed |= changed;
    }
    ever_changed
}
