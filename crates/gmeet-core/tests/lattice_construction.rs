//! Lattice construction and generator tests

use gmeet_core::generator;
use gmeet_core::order::{children_to_leq, leq_to_children, transitive_closure};
use gmeet_core::{GMeetError, Lattice, LatticeShape, SquareTable};
use proptest::prelude::*;

/// Covering relation of a generated lattice in canonical form: children
/// sorted by id, as `leq_to_children` lists them.
fn canonical(mut children: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    for below in &mut children {
        below.sort_unstable();
    }
    children
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn covering_round_trip(size in 1usize..48, seed in any::<u64>()) {
        let children = generator::preset(size, seed).unwrap();
        let leq = children_to_leq(&children).unwrap();
        prop_assert_eq!(leq_to_children(&leq), canonical(children));
    }

    #[test]
    fn joins_and_meets_are_bounds(size in 1usize..40, seed in any::<u64>()) {
        let l = Lattice::preset(size, seed).unwrap();
        prop_assert_eq!(l.n(), size);
        for a in 0..l.n() {
            prop_assert!(l.leq(l.bottom(), a) && l.leq(a, l.top()));
            for b in 0..l.n() {
                let j = l.lub(a, b);
                let m = l.glb(a, b);
                prop_assert!(l.leq(a, j) && l.leq(b, j));
                prop_assert!(l.leq(m, a) && l.leq(m, b));
                for x in 0..l.n() {
                    if l.leq(a, x) && l.leq(b, x) {
                        prop_assert!(l.leq(j, x));
                    }
                    if l.leq(x, a) && l.leq(x, b) {
                        prop_assert!(l.leq(x, m));
                    }
                }
            }
        }
    }

    #[test]
    fn topological_orders_respect_the_order(size in 1usize..40, seed in any::<u64>()) {
        let l = Lattice::preset(size, seed).unwrap();
        let mut up = vec![0; l.n()];
        for (i, &x) in l.topo_down_up().iter().enumerate() {
            up[x] = i;
        }
        let mut down = vec![0; l.n()];
        for (i, &x) in l.topo_up_down().iter().enumerate() {
            down[x] = i;
        }
        for a in 0..l.n() {
            for b in 0..l.n() {
                if l.lt(a, b) {
                    prop_assert!(up[a] < up[b]);
                    prop_assert!(down[b] < down[a]);
                }
            }
        }
    }

    #[test]
    fn from_leq_agrees_with_from_children(size in 1usize..32, seed in any::<u64>()) {
        let l = Lattice::preset(size, seed).unwrap();
        let rebuilt = Lattice::from_leq(&l.leq_table().to_rows()).unwrap();
        prop_assert_eq!(rebuilt.uncomparables(), l.uncomparables());
        prop_assert_eq!(rebuilt.m(), l.m());
        for a in 0..l.n() {
            for b in 0..l.n() {
                prop_assert_eq!(rebuilt.lub(a, b), l.lub(a, b));
                prop_assert_eq!(rebuilt.glb(a, b), l.glb(a, b));
            }
        }
    }
}

#[test]
fn preset_ten_zero_is_reproducible() {
    let first = Lattice::preset(10, 0).unwrap();
    let second = Lattice::preset(10, 0).unwrap();
    assert_eq!(first.n(), 10);
    assert_eq!(first.children_lists(), second.children_lists());
}

#[test]
fn powerset_uncomparables_and_irreducibles() {
    let l = Lattice::powerset(3).unwrap();
    assert_eq!(l.n(), 8);
    assert_eq!(l.m(), 12);
    // atoms are the only join-irreducibles of a Boolean lattice
    assert_eq!(l.join_irreducibles(), vec![1, 2, 4]);
    let irr = l.sub_lattice_irreducibles();
    assert_eq!(irr.super_to_sub[4], Some(2));
    assert_eq!(irr.super_to_sub[3], None);
}

#[test]
fn relation_closure_matches_lattice_order() {
    let l = Lattice::preset(30, 17).unwrap();
    let covers = SquareTable::from_fn(l.n(), |a, b| l.is_child(a, b));
    assert_eq!(&transitive_closure(&covers), l.leq_table());
}

#[test]
fn malformed_inputs_are_rejected() {
    let cases: Vec<Vec<Vec<usize>>> = vec![
        // two minimal elements
        vec![vec![], vec![], vec![0, 1]],
        // two maximal elements
        vec![vec![], vec![0], vec![0]],
        // cycle
        vec![vec![2], vec![0], vec![1]],
        // 0 -> 2 skips 1
        vec![vec![], vec![0], vec![0, 1]],
        // 1 and 2 have two minimal upper bounds
        vec![vec![], vec![0], vec![0], vec![1, 2], vec![1, 2], vec![3, 4]],
        // no elements
        vec![],
    ];
    for children in cases {
        let err = Lattice::from_children(children.clone()).unwrap_err();
        assert!(
            matches!(err, GMeetError::InvalidLattice { .. }),
            "{children:?} gave {err}"
        );
    }
}

#[test]
fn malformed_order_relations_are_rejected() {
    // rows of `leq` for 0 < {1, 2} < {3, 4} < 5: 1 and 2 have no least
    // upper bound
    let up: [&[usize]; 6] = [
        &[0, 1, 2, 3, 4, 5],
        &[1, 3, 4, 5],
        &[2, 3, 4, 5],
        &[3, 5],
        &[4, 5],
        &[5],
    ];
    let no_join: Vec<Vec<bool>> = up
        .iter()
        .map(|above| (0..6).map(|b| above.contains(&b)).collect())
        .collect();
    let cases: Vec<Vec<Vec<bool>>> = vec![
        // ragged rows
        vec![vec![true, true], vec![true]],
        // 0 <= 1 and 1 <= 0
        vec![vec![true, true], vec![true, true]],
        no_join,
    ];
    for rows in cases {
        let err = Lattice::from_leq(&rows).unwrap_err();
        assert!(
            matches!(err, GMeetError::InvalidLattice { .. }),
            "{rows:?} gave {err}"
        );
    }
}

#[test]
fn covering_shape_from_json() {
    let shape: LatticeShape = serde_json::from_value(serde_json::json!({
        "shape": "covering",
        "children": [[], [0], [0], [1, 2]],
    }))
    .unwrap();
    let l = shape.build().unwrap();
    assert_eq!(l.top(), 3);
    assert_eq!(l.bottom(), 0);
}
