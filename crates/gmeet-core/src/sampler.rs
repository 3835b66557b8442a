//! Random function sampler
//!
//! Test inputs for the solvers, drawn from five classes of functions. The
//! caller supplies the random source so runs can be reproduced from a seed.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::closure::{max_join_below_naive, min_monotone_above};
use crate::endomorphism::Endomorphism;
use crate::errors::{GMeetError, Result};
use crate::lattice::Lattice;

/// Class of function produced by [`sample_function`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionKind {
    /// Uniform random values, no constraint
    Arbitrary,
    /// Order preserving
    Monotone,
    /// Bottom preserving and join preserving
    JoinEndomorphism,
    /// Pointwise meet of two independent join-endomorphisms
    MeetOfJoinEndomorphisms,
    /// Pointwise join of a monotone function and a join-endomorphism
    JoinOfMonotoneAndJoinEndomorphism,
}

impl FunctionKind {
    /// Every kind
    pub const ALL: [FunctionKind; 5] = [
        FunctionKind::Arbitrary,
        FunctionKind::Monotone,
        FunctionKind::JoinEndomorphism,
        FunctionKind::MeetOfJoinEndomorphisms,
        FunctionKind::JoinOfMonotoneAndJoinEndomorphism,
    ];

    /// Canonical kebab-case name
    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Arbitrary => "arbitrary",
            FunctionKind::Monotone => "monotone",
            FunctionKind::JoinEndomorphism => "join-endomorphism",
            FunctionKind::MeetOfJoinEndomorphisms => "meet-of-join-endomorphisms",
            FunctionKind::JoinOfMonotoneAndJoinEndomorphism => {
                "join-of-monotone-and-join-endomorphism"
            }
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FunctionKind {
    type Err = GMeetError;

    /// Accepts the kebab-case name or the spaced label, e.g.
    /// `"meet of join-endomorphisms"`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(' ', "-");
        FunctionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| GMeetError::unknown_function_kind(s))
    }
}

/// Draw a function of class `kind` over `lattice`.
pub fn sample_function<R: Rng + ?Sized>(
    lattice: &Lattice,
    kind: FunctionKind,
    rng: &mut R,
) -> Endomorphism {
    match kind {
        FunctionKind::Arbitrary => random_arbitrary(lattice, rng),
        FunctionKind::Monotone => random_monotone(lattice, rng),
        FunctionKind::JoinEndomorphism => random_join_endomorphism(lattice, rng),
        FunctionKind::MeetOfJoinEndomorphisms => {
            let f = random_join_endomorphism(lattice, rng);
            let g = random_join_endomorphism(lattice, rng);
            f.meet(lattice, &g)
        }
        FunctionKind::JoinOfMonotoneAndJoinEndomorphism => {
            let f = random_monotone(lattice, rng);
            let g = random_join_endomorphism(lattice, rng);
            f.join(lattice, &g)
        }
    }
}

/// Uniform random values in `0..n`.
pub fn random_arbitrary<R: Rng + ?Sized>(lattice: &Lattice, rng: &mut R) -> Endomorphism {
    let n = lattice.n();
    Endomorphism::from_valid((0..n).map(|_| rng.gen_range(0..n)).collect())
}

/// Random monotone function.
///
/// Starts from uniform values and visits the elements in random order.
/// Visiting `a` meets every value strictly below `a` with `f(a)` and joins
/// every value strictly above it with `f(a)`. Each visit keeps every
/// relation already established, so one sweep is enough.
pub fn random_monotone<R: Rng + ?Sized>(lattice: &Lattice, rng: &mut R) -> Endomorphism {
    let n = lattice.n();
    let mut f = random_arbitrary(lattice, rng).into_inner();
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    for a in order {
        for x in 0..n {
            if lattice.lt(x, a) {
                f[x] = lattice.glb(f[a], f[x]);
            }
            if lattice.gt(x, a) {
                f[x] = lattice.lub(f[a], f[x]);
            }
        }
    }
    let f = Endomorphism::from_valid(f);
    assert!(f.is_monotone(lattice), "sampled function is not monotone");
    f
}

/// Random join-endomorphism.
///
/// A monotone sample is kept on the join-irreducible elements only, then
/// closed upward with [`min_monotone_above`] and corrected downward with
/// [`max_join_below_naive`].
pub fn random_join_endomorphism<R: Rng + ?Sized>(lattice: &Lattice, rng: &mut R) -> Endomorphism {
    let bottom = lattice.bottom();
    let mut f = random_monotone(lattice, rng).into_inner();
    for (x, value) in f.iter_mut().enumerate() {
        if !lattice.is_join_irreducible(x) {
            *value = bottom;
        }
    }
    min_monotone_above(lattice, &mut f);
    max_join_below_naive(lattice, &mut f);
    let f = Endomorphism::from_valid(f);
    debug_assert!(f.is_join_endomorphism(lattice));
    f
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn kind_names_parse() {
        for kind in FunctionKind::ALL {
            assert_eq!(kind.name().parse::<FunctionKind>().unwrap(), kind);
        }
        assert_eq!(
            "join of monotone and join-endomorphism".parse::<FunctionKind>().unwrap(),
            FunctionKind::JoinOfMonotoneAndJoinEndomorphism
        );
        assert!(matches!(
            "antitone".parse::<FunctionKind>(),
            Err(GMeetError::UnknownFunctionKind { .. })
        ));
    }

    #[test]
    fn classes_have_their_property() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for seed in 0..6 {
            let l = Lattice::preset(24, seed).unwrap();
            let monotone = sample_function(&l, FunctionKind::Monotone, &mut rng);
            assert!(monotone.is_monotone(&l));
            let join = sample_function(&l, FunctionKind::JoinEndomorphism, &mut rng);
            assert!(join.is_join_endomorphism(&l));
            let meet = sample_function(&l, FunctionKind::MeetOfJoinEndomorphisms, &mut rng);
            assert!(meet.is_monotone(&l));
            let mixed =
                sample_function(&l, FunctionKind::JoinOfMonotoneAndJoinEndomorphism, &mut rng);
            assert!(mixed.is_monotone(&l));
            let any = sample_function(&l, FunctionKind::Arbitrary, &mut rng);
            assert_eq!(any.len(), l.n());
        }
    }

    #[test]
    fn same_seed_same_function() {
        let l = Lattice::powerset(3).unwrap();
        let a = sample_function(&l, FunctionKind::Monotone, &mut ChaCha8Rng::seed_from_u64(5));
        let b = sample_function(&l, FunctionKind::Monotone, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&FunctionKind::MeetOfJoinEndomorphisms).unwrap();
        assert_eq!(json, "\"meet-of-join-endomorphisms\"");
    }
}
