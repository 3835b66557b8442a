//! Lattice generator
//!
//! Covering relations for specific shapes. Every function returns
//! `children` lists in the format accepted by [`Lattice::from_children`].
//!
//! [`Lattice::from_children`]: crate::Lattice::from_children

use crate::errors::{GMeetError, Result};

/// Largest exponent accepted by [`powerset`]; the dense tables grow as `4^k`.
pub const MAX_POWERSET_LOG2: u32 = 16;

/// Seeded linear congruential sequence driving [`preset`].
///
/// `next = (cur * 257 + 1) mod 7_778_777`. The sequence is part of the
/// output contract: the same seed always yields the same lattice.
#[derive(Debug, Clone)]
pub struct PresetRng {
    current: u64,
}

impl PresetRng {
    const BASE: u64 = 257;
    const MODULUS: u64 = 7_778_777;

    /// Start the sequence at `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            current: seed % Self::MODULUS,
        }
    }

    /// Advance and return the new state
    pub fn next_value(&mut self) -> u64 {
        self.current = (self.current * Self::BASE + 1) % Self::MODULUS;
        self.current
    }

    /// Advance and reduce into `0..bound`
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_value() % bound as u64) as usize
    }
}

/// The chain `0 < 1 < … < n-1`.
pub fn total(n: usize) -> Result<Vec<Vec<usize>>> {
    if n == 0 {
        return Err(GMeetError::invalid_shape("a chain needs at least one element"));
    }
    Ok((0..n)
        .map(|x| if x == 0 { Vec::new() } else { vec![x - 1] })
        .collect())
}

/// Boolean lattice of `2^log2n` elements by repeated doubling.
///
/// Each doubling keeps the current lattice as the lower half and adds a
/// shifted copy above it, each copied element covering its original.
pub fn powerset(log2n: u32) -> Result<Vec<Vec<usize>>> {
    if log2n > MAX_POWERSET_LOG2 {
        return Err(GMeetError::invalid_shape(format!(
            "powerset exponent {log2n} exceeds {MAX_POWERSET_LOG2}"
        )));
    }
    let n = 1usize << log2n;
    let mut children = vec![Vec::new()];
    while children.len() < n {
        children = doubled(&children);
    }
    Ok(children)
}

fn doubled(children: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = children.len();
    let upper = children.iter().enumerate().map(|(x, below)| {
        let mut shifted = Vec::with_capacity(below.len() + 1);
        shifted.push(x);
        shifted.extend(below.iter().map(|y| y + n));
        shifted
    });
    children.iter().cloned().chain(upper).collect()
}

/// Direct product: element `(i, j)` is `i * n2 + j`.
pub fn product(left: &[Vec<usize>], right: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n2 = right.len();
    let mut out = Vec::with_capacity(left.len() * n2);
    for (i, below_i) in left.iter().enumerate() {
        for (j, below_j) in right.iter().enumerate() {
            let mut covers = Vec::with_capacity(below_i.len() + below_j.len());
            covers.extend(below_i.iter().map(|&c| c * n2 + j));
            covers.extend(below_j.iter().map(|&c| i * n2 + c));
            out.push(covers);
        }
    }
    out
}

/// Disjoint sum with `addition` placed above `base`.
///
/// Every minimal element of the addition gets every maximal element of the
/// base as a child.
pub fn stack(base: &[Vec<usize>], addition: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let offset = base.len();
    let mut has_parent = vec![false; offset];
    for below in base {
        for &a in below {
            has_parent[a] = true;
        }
    }
    let maxima: Vec<usize> = (0..offset).filter(|&x| !has_parent[x]).collect();

    let mut out = base.to_vec();
    for below in addition {
        if below.is_empty() {
            out.push(maxima.clone());
        } else {
            out.push(below.iter().map(|y| y + offset).collect());
        }
    }
    out
}

/// Replace the covering edge `a ⋖ b` by a chain of `nodes` new elements.
pub fn subdivide(
    children: &[Vec<usize>],
    (a, b): (usize, usize),
    nodes: usize,
) -> Vec<Vec<usize>> {
    let n = children.len();
    let mut out = children.to_vec();
    if nodes == 0 {
        return out;
    }
    for i in 0..nodes {
        out.push(vec![if i == 0 { a } else { n + i - 1 }]);
    }
    let last = n + nodes - 1;
    for child in &mut out[b] {
        if *child == a {
            *child = last;
        }
    }
    out
}

/// Covering edge `(child, parent)` picked by `choice` among all edges.
fn pick_edge(children: &[Vec<usize>], choice: usize) -> Option<(usize, usize)> {
    let m: usize = children.iter().map(Vec::len).sum();
    if m == 0 {
        return None;
    }
    let mut k = choice % m;
    for (b, below) in children.iter().enumerate() {
        if k < below.len() {
            return Some((below[k], b));
        }
        k -= below.len();
    }
    None
}

/// Seeded pseudo-random lattice with exactly `size` elements.
///
/// Starts from the two-element chain and grows by one of three moves per
/// step, chosen by [`PresetRng`]:
///
/// - product with a smaller preset lattice (falls back to subdivision when
///   no factor of at least two elements fits)
/// - stacking a smaller preset lattice on top
/// - subdividing a covering edge with a chain, clamped to the remaining size
pub fn preset(size: usize, seed: u64) -> Result<Vec<Vec<usize>>> {
    match size {
        0 => return Err(GMeetError::invalid_shape("a lattice needs at least one element")),
        1 => return total(1),
        _ => {}
    }
    let mut rng = PresetRng::new(seed);
    let mut children = total(2)?;
    while children.len() < size {
        let n = children.len();
        let remaining = size - n;
        let max_factor = size / n;
        match rng.below(4) {
            0 if max_factor >= 2 => {
                let k = 2 + rng.below(max_factor - 1);
                let factor = preset(k, rng.next_value())?;
                tracing::trace!(n, k, "preset: product");
                children = product(&children, &factor);
            }
            1 => {
                let k = 1 + rng.below(remaining);
                let addition = preset(k, rng.next_value())?;
                tracing::trace!(n, k, "preset: stack");
                children = stack(&children, &addition);
            }
            _ => {
                let choice = rng.next_value() as usize;
                let Some(edge) = pick_edge(&children, choice) else {
                    return Err(GMeetError::invalid_shape("no covering edge to subdivide"));
                };
                let mut nodes = 1;
                while nodes < remaining && rng.below(4) == 0 {
                    nodes += 1;
                }
                tracing::trace!(n, nodes, a = edge.0, b = edge.1, "preset: subdivide");
                children = subdivide(&children, edge, nodes);
            }
        }
    }
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lattice;

    #[test]
    fn rng_sequence_is_fixed() {
        let mut rng = PresetRng::new(0);
        assert_eq!(rng.next_value(), 1);
        assert_eq!(rng.next_value(), 258);
        assert_eq!(rng.next_value(), 258 * 257 + 1);
    }

    #[test]
    fn powerset_two_is_a_square() {
        let children = powerset(2).unwrap();
        assert_eq!(children, vec![vec![], vec![0], vec![0], vec![1, 2]]);
    }

    #[test]
    fn product_of_chains_is_a_grid() {
        let l = Lattice::from_children(product(&total(2).unwrap(), &total(3).unwrap())).unwrap();
        assert_eq!(l.n(), 6);
        // 2×3 grid has 7 covering edges
        assert_eq!(l.m(), 7);
    }

    #[test]
    fn stack_bridges_top_to_bottom() {
        let children = stack(&powerset(1).unwrap(), &powerset(1).unwrap());
        assert_eq!(children, vec![vec![], vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn subdivide_inserts_a_chain() {
        let children = subdivide(&total(2).unwrap(), (0, 1), 2);
        let l = Lattice::from_children(children).unwrap();
        assert_eq!(l.n(), 4);
        assert!(l.lt(2, 3) && l.lt(3, 1));
        assert_eq!(l.children(1), &[3]);
    }

    #[test]
    fn preset_hits_exact_size() {
        for size in 1..40 {
            for seed in [0, 1, 2, 42] {
                let children = preset(size, seed).unwrap();
                assert_eq!(children.len(), size, "size {size} seed {seed}");
                assert!(Lattice::from_children(children).is_ok());
            }
        }
    }

    #[test]
    fn preset_is_deterministic() {
        assert_eq!(preset(10, 0).unwrap(), preset(10, 0).unwrap());
        assert_eq!(preset(57, 9).unwrap(), preset(57, 9).unwrap());
    }

    #[test]
    fn degenerate_shapes_rejected() {
        assert!(total(0).is_err());
        assert!(preset(0, 3).is_err());
        assert!(powerset(MAX_POWERSET_LOG2 + 1).is_err());
    }
}
