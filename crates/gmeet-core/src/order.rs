//! Order utilities
//!
//! Generic primitives over element ids `0..n`: covering relations given as
//! adjacency lists (`children[b]` lists the elements directly below `b`),
//! topological sorting, and conversion between covering relations and full
//! order relations.

use crate::errors::{GMeetError, Result};
use crate::table::SquareTable;

/// Invert an adjacency list: `children[b] ∋ a` becomes `parents[a] ∋ b`.
pub fn children_to_parents(children: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut parents = vec![Vec::new(); children.len()];
    for (b, below) in children.iter().enumerate() {
        for &a in below {
            parents[a].push(b);
        }
    }
    parents
}

/// `is_child[a][b]` holds when `a` is listed among the children of `b`.
pub fn children_to_is_child(children: &[Vec<usize>]) -> SquareTable<bool> {
    let mut is_child = SquareTable::filled(children.len(), false);
    for (b, below) in children.iter().enumerate() {
        for &a in below {
            is_child.set(a, b, true);
        }
    }
    is_child
}

/// Reject adjacency lists that reference ids outside `0..n`.
pub fn check_indices(children: &[Vec<usize>]) -> Result<()> {
    let n = children.len();
    for (b, below) in children.iter().enumerate() {
        if let Some(&a) = below.iter().find(|&&a| a >= n) {
            return Err(GMeetError::invalid_lattice(format!(
                "element {b} lists child {a}, but there are only {n} elements"
            )));
        }
    }
    Ok(())
}

/// Depth-first topological sort where requirements come first.
///
/// `req[x]` lists the elements that must appear before `x`. Roots are
/// visited in increasing id order and requirements in list order, so the
/// output is deterministic. Fails when the relation has a cycle.
pub fn topo_sort(req: &[Vec<usize>]) -> Result<Vec<usize>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unseen,
        Open,
        Done,
    }

    let n = req.len();
    let mut mark = vec![Mark::Unseen; n];
    let mut topo = Vec::with_capacity(n);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if mark[root] != Mark::Unseen {
            continue;
        }
        mark[root] = Mark::Open;
        stack.push((root, 0));
        while let Some(frame) = stack.last_mut() {
            let (x, next) = *frame;
            if let Some(&y) = req[x].get(next) {
                frame.1 += 1;
                match mark[y] {
                    Mark::Unseen => {
                        mark[y] = Mark::Open;
                        stack.push((y, 0));
                    }
                    Mark::Open => {
                        return Err(GMeetError::invalid_lattice(format!(
                            "cycle through elements {y} and {x}"
                        )));
                    }
                    Mark::Done => {}
                }
            } else {
                mark[x] = Mark::Done;
                topo.push(x);
                stack.pop();
            }
        }
    }
    Ok(topo)
}

/// Order relation generated by a covering relation.
///
/// Walks the bottom-up topological order and unions each element's
/// down-set into the down-set of every parent.
pub fn children_to_leq(children: &[Vec<usize>]) -> Result<SquareTable<bool>> {
    check_indices(children)?;
    let n = children.len();
    let topo = topo_sort(children)?;
    let parents = children_to_parents(children);
    let mut leq = SquareTable::filled(n, false);
    for a in 0..n {
        leq.set(a, a, true);
    }
    for &a in &topo {
        for &b in &parents[a] {
            for x in 0..n {
                if leq.get(x, a) {
                    leq.set(x, b, true);
                }
            }
        }
    }
    Ok(leq)
}

/// Reflexive-transitive closure by all-pairs reachability (Warshall).
pub fn transitive_closure(relation: &SquareTable<bool>) -> SquareTable<bool> {
    let n = relation.side();
    let mut reach = relation.clone();
    for a in 0..n {
        reach.set(a, a, true);
    }
    for k in 0..n {
        for i in 0..n {
            if !reach.get(i, k) {
                continue;
            }
            for j in 0..n {
                if reach.get(k, j) {
                    reach.set(i, j, true);
                }
            }
        }
    }
    reach
}

/// Validate that `leq` is reflexive, antisymmetric and transitive.
pub fn check_partial_order(leq: &SquareTable<bool>) -> Result<()> {
    let n = leq.side();
    for a in 0..n {
        if !leq.get(a, a) {
            return Err(GMeetError::invalid_lattice(format!(
                "relation is not reflexive at {a}"
            )));
        }
        for b in (a + 1)..n {
            if leq.get(a, b) && leq.get(b, a) {
                return Err(GMeetError::invalid_lattice(format!(
                    "relation is not antisymmetric: {a} and {b}"
                )));
            }
        }
    }
    let closure = transitive_closure(leq);
    for a in 0..n {
        for b in 0..n {
            if closure.get(a, b) && !leq.get(a, b) {
                return Err(GMeetError::invalid_lattice(format!(
                    "relation is not transitive: {a} reaches {b}"
                )));
            }
        }
    }
    Ok(())
}

/// Covering relation of a partial order.
///
/// `a` is a child of `b` when `a < b` and nothing lies strictly between.
/// Children are listed in increasing id order.
pub fn leq_to_children(leq: &SquareTable<bool>) -> Vec<Vec<usize>> {
    let n = leq.side();
    let lt = |a: usize, b: usize| a != b && leq.get(a, b);
    let mut children = vec![Vec::new(); n];
    for (b, below) in children.iter_mut().enumerate() {
        let strictly_below: Vec<usize> = (0..n).filter(|&a| lt(a, b)).collect();
        for &a in &strictly_below {
            if !strictly_below.iter().any(|&x| lt(a, x)) {
                below.push(a);
            }
        }
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Vec<Vec<usize>> {
        vec![vec![], vec![0], vec![0], vec![1, 2]]
    }

    #[test]
    fn topo_puts_requirements_first() {
        let topo = topo_sort(&diamond()).unwrap();
        assert_eq!(topo, vec![0, 1, 2, 3]);
        let parents = children_to_parents(&diamond());
        let down = topo_sort(&parents).unwrap();
        assert_eq!(down.first(), Some(&3));
        assert_eq!(down.last(), Some(&0));
    }

    #[test]
    fn topo_detects_cycles() {
        let cyclic = vec![vec![1], vec![0]];
        assert!(matches!(
            topo_sort(&cyclic),
            Err(GMeetError::InvalidLattice { .. })
        ));
    }

    #[test]
    fn leq_matches_warshall_closure() {
        let children = diamond();
        let leq = children_to_leq(&children).unwrap();
        let closure = transitive_closure(&children_to_is_child(&children));
        assert_eq!(leq, closure);
        assert!(leq.get(0, 3));
        assert!(!leq.get(1, 2));
    }

    #[test]
    fn covering_round_trip() {
        let children = diamond();
        let leq = children_to_leq(&children).unwrap();
        assert_eq!(leq_to_children(&leq), children);
    }

    #[test]
    fn out_of_range_child_rejected() {
        let bad = vec![vec![], vec![5]];
        assert!(children_to_leq(&bad).is_err());
    }

    #[test]
    fn non_transitive_relation_rejected() {
        // 0 ≤ 1 ≤ 2 but not 0 ≤ 2
        let rows = vec![
            vec![true, true, false],
            vec![false, true, true],
            vec![false, false, true],
        ];
        let leq = SquareTable::from_rows(&rows).unwrap();
        let err = check_partial_order(&leq).unwrap_err();
        assert!(err.to_string().contains("transitive"));
    }
}
