use std::cmp::Ordering;
use std::fmt;

use laddermer::index::DisplayIndex;
use laddermer::{Generator, IndexKey, BOSON_ALGEBRA_ID, FERMION_ALGEBRA_ID, SPIN_ALGEBRA_ID};

/// One factor of a product Hilbert space: the state space of a single
/// degree of freedom, together with the number of bits needed to encode
/// its basis states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementarySpace<Ix: IndexKey> {
    /// Two-dimensional fermionic factor: occupied or empty.
    Fermion { index: Ix },
    /// Truncated bosonic factor holding occupations `0 ..= 2^bits - 1`.
    Boson { bits: u32, index: Ix },
    /// `multiplicity`-dimensional spin factor storing the shifted magnetic
    /// number `n = m + s`.
    Spin { multiplicity: u32, index: Ix },
    /// Factor of a user-defined algebra.
    Extension { algebra_id: u32, bits: u32, index: Ix },
}

use ElementarySpace::{Boson, Extension, Fermion, Spin};

impl<Ix: IndexKey> ElementarySpace<Ix> {
    #[must_use]
    pub fn fermion(index: impl Into<Ix>) -> Self {
        Fermion { index: index.into() }
    }

    /// Bosonic factor with occupations `0 ..= 2^bits - 1`.
    ///
    /// # Panics
    ///
    /// Panics when `bits` is zero or exceeds 63.
    #[must_use]
    pub fn boson(bits: u32, index: impl Into<Ix>) -> Self {
        assert!(bits > 0 && bits < 64, "boson occupation bits must be in 1..=63");
        Boson { bits, index: index.into() }
    }

    /// Spin factor of the given multiplicity `2s + 1`.
    ///
    /// # Panics
    ///
    /// Panics when `multiplicity < 2`.
    #[must_use]
    pub fn spin(multiplicity: u32, index: impl Into<Ix>) -> Self {
        assert!(multiplicity >= 2, "spin multiplicity must be at least 2");
        Spin { multiplicity, index: index.into() }
    }

    #[must_use]
    pub fn algebra_id(&self) -> u32 {
        match self {
            Fermion { .. } => FERMION_ALGEBRA_ID,
            Boson { .. } => BOSON_ALGEBRA_ID,
            Spin { .. } => SPIN_ALGEBRA_ID,
            Extension { algebra_id, .. } => *algebra_id,
        }
    }

    #[must_use]
    pub fn index(&self) -> &Ix {
        match self {
            Fermion { index } | Boson { index, .. } | Spin { index, .. } | Extension { index, .. } => index,
        }
    }

    /// Number of binary digits needed to encode any basis state of this
    /// factor.
    #[must_use]
    pub fn n_bits(&self) -> u32 {
        match self {
            Fermion { .. } => 1,
            Boson { bits, .. } | Extension { bits, .. } => *bits,
            // Smallest b with 2^b >= multiplicity.
            Spin { multiplicity, .. } => u32::BITS - (multiplicity - 1).leading_zeros(),
        }
    }

    /// Default elementary space of a generator's degree of freedom.
    ///
    /// Fermions and spins determine their factor completely; bosons have
    /// no default because the occupation cutoff is caller policy, and
    /// extension generators are consulted through their capability object.
    #[must_use]
    pub fn for_generator(generator: &Generator<Ix>) -> Option<Self> {
        match generator {
            Generator::Fermion { index, .. } => Some(Fermion { index: index.clone() }),
            Generator::Boson { .. } => None,
            Generator::Spin { multiplicity, index, .. } => {
                Some(Spin { multiplicity: *multiplicity, index: index.clone() })
            }
            Generator::Extension(ext) => ext.get().space_bits().map(|bits| Extension {
                algebra_id: ext.get().algebra_id(),
                bits,
                index: ext.get().index().clone(),
            }),
        }
    }
}

impl<Ix: IndexKey> PartialOrd for ElementarySpace<Ix> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Ix: IndexKey> Ord for ElementarySpace<Ix> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.algebra_id().cmp(&other.algebra_id()).then_with(|| match (self, other) {
            (Fermion { index: i1 }, Fermion { index: i2 }) => i1.cmp(i2),
            (Boson { bits: b1, index: i1 }, Boson { bits: b2, index: i2 }) => {
                b1.cmp(b2).then_with(|| i1.cmp(i2))
            }
            (Spin { multiplicity: m1, index: i1 }, Spin { multiplicity: m2, index: i2 }) => {
                m1.cmp(m2).then_with(|| i1.cmp(i2))
            }
            (Extension { bits: b1, index: i1, .. }, Extension { bits: b2, index: i2, .. }) => {
                b1.cmp(b2).then_with(|| i1.cmp(i2))
            }
            // Equal algebra ids imply equal variants.
            _ => unreachable!(),
        })
    }
}

impl<Ix: IndexKey> fmt::Display for ElementarySpace<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fermion { index } => write!(f, "fermion({})", DisplayIndex(index)),
            Boson { bits, index } => write!(f, "boson[{bits}]({})", DisplayIndex(index)),
            Spin { multiplicity, index } => write!(f, "spin[{multiplicity}]({})", DisplayIndex(index)),
            Extension { algebra_id, bits, index } => {
                write!(f, "algebra#{algebra_id}[{bits}]({})", DisplayIndex(index))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laddermer::SpinComponent;

    type Space = ElementarySpace<(&'static str, i32)>;

    #[test]
    fn bit_widths() {
        assert_eq!(Space::fermion(("up", 0)).n_bits(), 1);
        assert_eq!(Space::boson(4, ("x", 0)).n_bits(), 4);
        assert_eq!(Space::spin(2, ("i", 0)).n_bits(), 1);
        assert_eq!(Space::spin(3, ("i", 0)).n_bits(), 2);
        assert_eq!(Space::spin(4, ("i", 0)).n_bits(), 2);
        assert_eq!(Space::spin(5, ("i", 0)).n_bits(), 3);
    }

    #[test]
    fn spaces_order_by_algebra_then_payload_then_index() {
        let f = Space::fermion(("up", 9));
        let b = Space::boson(2, ("a", 0));
        let s_half = Space::spin(2, ("z", 0));
        let s_one = Space::spin(3, ("a", 0));
        assert!(f < b);
        assert!(b < s_half);
        assert!(s_half < s_one);
    }

    #[test]
    fn default_spaces_per_generator() {
        let c_dag: Generator<(&'static str, i32)> = Generator::fermion(true, ("up", 1));
        assert_eq!(
            ElementarySpace::for_generator(&c_dag),
            Some(Space::fermion(("up", 1)))
        );
        let a: Generator<(&'static str, i32)> = Generator::boson(false, ("x", 0));
        assert_eq!(ElementarySpace::for_generator(&a), None);
        let sz: Generator<(&'static str, i32)> = Generator::spin_mult(4, SpinComponent::Z, ("j", 0));
        assert_eq!(
            ElementarySpace::for_generator(&sz),
            Some(Space::spin(4, ("j", 0)))
        );
    }
}
