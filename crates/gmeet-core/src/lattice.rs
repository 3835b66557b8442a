//! Finite lattice model
//!
//! A [`Lattice`] is built once, from either a covering relation or a full
//! order relation, and is read-only afterwards. Construction derives every
//! table the solvers need:
//!
//! - the order relation `leq` and its inverse `geq` (strict variants are
//!   derived on lookup)
//! - the join (`lub`) and meet (`glb`) tables
//! - the covering relation in both directions (`children`, `parents`)
//! - `top`, `bottom`, the bottom-up and top-down topological orders
//! - the list of incomparable pairs
//!
//! Anything that is not a finite lattice is rejected with
//! [`GMeetError::InvalidLattice`].

use crate::errors::{GMeetError, Result};
use crate::generator;
use crate::order;
use crate::table::SquareTable;

/// Immutable finite lattice over the elements `0..n`
#[derive(Debug, Clone)]
pub struct Lattice {
    n: usize,
    m: usize,
    top: usize,
    bottom: usize,
    leq: SquareTable<bool>,
    geq: SquareTable<bool>,
    is_child: SquareTable<bool>,
    lub: SquareTable<usize>,
    glb: SquareTable<usize>,
    children: Vec<Vec<usize>>,
    parents: Vec<Vec<usize>>,
    topo_down_up: Vec<usize>,
    topo_up_down: Vec<usize>,
    uncomparables: Vec<(usize, usize)>,
}

/// Order induced on the join-irreducible elements of a lattice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrreducibleOrder {
    /// Sub-index to lattice element
    pub sub_to_super: Vec<usize>,
    /// Lattice element to sub-index, `None` for join-reducible elements
    pub super_to_sub: Vec<Option<usize>>,
    /// Order relation restricted to the irreducibles
    pub leq: SquareTable<bool>,
}

impl Lattice {
    /// Build from a covering relation, `children[b]` listing the elements
    /// directly below `b`.
    pub fn from_children(children: Vec<Vec<usize>>) -> Result<Self> {
        if children.is_empty() {
            return Err(GMeetError::invalid_lattice("no elements"));
        }
        let leq = order::children_to_leq(&children)?;
        check_covering_edges(&children, &leq)?;
        Self::build(leq, children)
    }

    /// Build from a full order relation, `leq[a][b]` meaning `a ≤ b`.
    pub fn from_leq(rows: &[Vec<bool>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(GMeetError::invalid_lattice("no elements"));
        }
        let leq = SquareTable::from_rows(rows)
            .ok_or_else(|| GMeetError::invalid_lattice("order relation is not square"))?;
        order::check_partial_order(&leq)?;
        let children = order::leq_to_children(&leq);
        Self::build(leq, children)
    }

    /// The chain `0 < 1 < … < n-1`.
    pub fn total(n: usize) -> Result<Self> {
        Self::from_children(generator::total(n)?)
    }

    /// The Boolean lattice of subsets of a `log2n`-element set.
    pub fn powerset(log2n: u32) -> Result<Self> {
        Self::from_children(generator::powerset(log2n)?)
    }

    /// Seeded pseudo-random lattice with exactly `size` elements.
    pub fn preset(size: usize, seed: u64) -> Result<Self> {
        Self::from_children(generator::preset(size, seed)?)
    }

    fn build(leq: SquareTable<bool>, children: Vec<Vec<usize>>) -> Result<Self> {
        let n = leq.side();
        let parents = order::children_to_parents(&children);
        let is_child = order::children_to_is_child(&children);
        let m = children.iter().map(Vec::len).sum();

        let bottom = unique_extreme(&children, "bottom")?;
        let top = unique_extreme(&parents, "top")?;

        let topo_down_up = order::topo_sort(&children)?;
        let topo_up_down = order::topo_sort(&parents)?;
        let geq = leq.transposed();

        let lub = scan_bounds(&leq, &topo_down_up, true)?;
        // A bounded finite poset with all joins has all meets.
        let glb = scan_bounds(&geq, &topo_up_down, false)?;

        let mut uncomparables = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                if !leq.get(a, b) && !leq.get(b, a) {
                    uncomparables.push((a, b));
                }
            }
        }

        tracing::debug!(
            n,
            m,
            top,
            bottom,
            uncomparable_pairs = uncomparables.len(),
            "lattice built"
        );

        Ok(Self {
            n,
            m,
            top,
            bottom,
            leq,
            geq,
            is_child,
            lub,
            glb,
            children,
            parents,
            topo_down_up,
            topo_up_down,
            uncomparables,
        })
    }

    /// Number of elements
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of edges of the covering relation
    pub fn m(&self) -> usize {
        self.m
    }

    /// Greatest element
    pub fn top(&self) -> usize {
        self.top
    }

    /// Least element
    pub fn bottom(&self) -> usize {
        self.bottom
    }

    /// `a ≤ b`
    #[inline]
    pub fn leq(&self, a: usize, b: usize) -> bool {
        self.leq.get(a, b)
    }

    /// `a ≥ b`
    #[inline]
    pub fn geq(&self, a: usize, b: usize) -> bool {
        self.geq.get(a, b)
    }

    /// `a < b`
    #[inline]
    pub fn lt(&self, a: usize, b: usize) -> bool {
        a != b && self.leq.get(a, b)
    }

    /// `a > b`
    #[inline]
    pub fn gt(&self, a: usize, b: usize) -> bool {
        a != b && self.geq.get(a, b)
    }

    /// Join `a ∨ b`
    #[inline]
    pub fn lub(&self, a: usize, b: usize) -> usize {
        self.lub.get(a, b)
    }

    /// Meet `a ∧ b`
    #[inline]
    pub fn glb(&self, a: usize, b: usize) -> usize {
        self.glb.get(a, b)
    }

    /// `a` is covered by `b`
    pub fn is_child(&self, a: usize, b: usize) -> bool {
        self.is_child.get(a, b)
    }

    /// Elements directly below `x`
    pub fn children(&self, x: usize) -> &[usize] {
        &self.children[x]
    }

    /// Elements directly above `x`
    pub fn parents(&self, x: usize) -> &[usize] {
        &self.parents[x]
    }

    /// Whole covering relation, one list of children per element
    pub fn children_lists(&self) -> &[Vec<usize>] {
        &self.children
    }

    /// Full order relation
    pub fn leq_table(&self) -> &SquareTable<bool> {
        &self.leq
    }

    /// Elements ordered so that nothing precedes one of its predecessors
    pub fn topo_down_up(&self) -> &[usize] {
        &self.topo_down_up
    }

    /// Elements ordered so that nothing follows one of its successors
    pub fn topo_up_down(&self) -> &[usize] {
        &self.topo_up_down
    }

    /// Unordered incomparable pairs `(a, b)` with `a < b` as ids
    pub fn uncomparables(&self) -> &[(usize, usize)] {
        &self.uncomparables
    }

    /// Elements below `start` in top-down order.
    pub fn walk_down(&self, start: usize) -> impl Iterator<Item = usize> + '_ {
        self.topo_up_down
            .iter()
            .copied()
            .filter(move |&x| self.leq(x, start))
    }

    /// Elements below `start` in bottom-up order.
    pub fn walk_up(&self, start: usize) -> impl Iterator<Item = usize> + '_ {
        self.topo_down_up
            .iter()
            .copied()
            .filter(move |&x| self.leq(x, start))
    }

    /// Element with exactly one lower cover
    pub fn is_join_irreducible(&self, x: usize) -> bool {
        self.children[x].len() == 1
    }

    /// All join-irreducible elements in increasing id order
    pub fn join_irreducibles(&self) -> Vec<usize> {
        (0..self.n).filter(|&x| self.is_join_irreducible(x)).collect()
    }

    /// Order relation induced on the join-irreducible elements.
    ///
    /// The induced poset is not a lattice in general, so it is returned as a
    /// bare relation together with the index maps.
    pub fn sub_lattice_irreducibles(&self) -> IrreducibleOrder {
        let sub_to_super = self.join_irreducibles();
        let mut super_to_sub = vec![None; self.n];
        for (i, &x) in sub_to_super.iter().enumerate() {
            super_to_sub[x] = Some(i);
        }
        let leq = SquareTable::from_fn(sub_to_super.len(), |i, j| {
            self.leq(sub_to_super[i], sub_to_super[j])
        });
        IrreducibleOrder {
            sub_to_super,
            super_to_sub,
            leq,
        }
    }
}

fn unique_extreme(adjacent: &[Vec<usize>], name: &str) -> Result<usize> {
    let mut candidates = (0..adjacent.len()).filter(|&x| adjacent[x].is_empty());
    match (candidates.next(), candidates.next()) {
        (Some(x), None) => Ok(x),
        (None, _) => Err(GMeetError::invalid_lattice(format!("no {name} element"))),
        (Some(x), Some(y)) => Err(GMeetError::invalid_lattice(format!(
            "{name} is not unique: {x} and {y}"
        ))),
    }
}

/// Every listed edge must be a cover and listed once.
fn check_covering_edges(children: &[Vec<usize>], leq: &SquareTable<bool>) -> Result<()> {
    let n = children.len();
    let lt = |a: usize, b: usize| a != b && leq.get(a, b);
    for (b, below) in children.iter().enumerate() {
        for (i, &a) in below.iter().enumerate() {
            if below[..i].contains(&a) {
                return Err(GMeetError::invalid_lattice(format!(
                    "edge {a} -> {b} listed twice"
                )));
            }
            if let Some(x) = (0..n).find(|&x| lt(a, x) && lt(x, b)) {
                return Err(GMeetError::invalid_lattice(format!(
                    "{a} -> {b} is not a covering edge, {x} lies between"
                )));
            }
        }
    }
    Ok(())
}

/// Least common upper bounds along a topological order.
///
/// `up[a][b]` means `b` is above `a` in the scanned direction. For each pair
/// the scan starts at the later of the two positions; the first common bound
/// found is the least one if it exists. With `verify` set, the candidate is
/// checked against every later common bound.
fn scan_bounds(
    up: &SquareTable<bool>,
    topo: &[usize],
    verify: bool,
) -> Result<SquareTable<usize>> {
    let n = up.side();
    let mut position = vec![0; n];
    for (i, &x) in topo.iter().enumerate() {
        position[x] = i;
    }
    let mut table = SquareTable::filled(n, 0);
    for a in 0..n {
        for b in a..n {
            let start = position[a].max(position[b]);
            let mut later = topo[start..]
                .iter()
                .filter(|&&x| up.get(a, x) && up.get(b, x));
            let Some(&least) = later.next() else {
                return Err(GMeetError::invalid_lattice(format!(
                    "{a} and {b} have no common bound"
                )));
            };
            if verify {
                if let Some(&other) = later.find(|&&x| !up.get(least, x)) {
                    return Err(GMeetError::invalid_lattice(format!(
                        "{a} and {b} have no join: {least} and {other} are both minimal upper bounds"
                    )));
                }
            }
            table.set(a, b, least);
            table.set(b, a, least);
        }
    }
    Ok(table)
}
