use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::index::{DisplayIndex, IndexKey};

/// ID of the fermionic algebra.
pub const FERMION_ALGEBRA_ID: u32 = 0;
/// ID of the bosonic algebra.
pub const BOSON_ALGEBRA_ID: u32 = 1;
/// ID of the spin/angular-momentum algebra.
pub const SPIN_ALGEBRA_ID: u32 = 2;
/// Smallest ID available to user-defined algebras.
pub const EXTENSION_ALGEBRA_ID_MIN: u32 = 3;

/// S+, S- or Sz.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum SpinComponent {
    #[display("+")]
    Plus,
    #[display("-")]
    Minus,
    #[display("z")]
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("spin {0} is not a positive half-integer")]
pub struct InvalidSpinError(pub f64);

/// Affine combination `constant + sum of coefficient * generator`.
///
/// Produced by [`Generator::swap_with`] as the correction restoring
/// canonical order, by [`Generator::simplify_adjacent`] as the replacement
/// of a collapsible pair, and by [`Generator::conj`] as the Hermitian
/// conjugate of a single generator.
#[derive(Clone, Debug, Default)]
pub struct LinearFunction<Ix: IndexKey> {
    pub constant: f64,
    pub terms: Vec<(f64, Generator<Ix>)>,
}

impl<Ix: IndexKey> LinearFunction<Ix> {
    #[must_use]
    pub fn new() -> Self {
        LinearFunction { constant: 0.0, terms: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.constant = 0.0;
        self.terms.clear();
    }

    pub fn set_constant(&mut self, constant: f64) {
        self.constant = constant;
        self.terms.clear();
    }

    pub fn push(&mut self, coefficient: f64, generator: Generator<Ix>) {
        self.terms.push((coefficient, generator));
    }

    #[must_use]
    pub fn is_vanishing(&self) -> bool {
        self.constant == 0.0 && self.terms.is_empty()
    }
}

/// Capability set of a user-defined algebra generator.
///
/// Implementors pick an algebra id of at least
/// [`EXTENSION_ALGEBRA_ID_MIN`]; comparison methods are only invoked
/// between generators reporting the same id.
pub trait ExtendedGenerator<Ix: IndexKey>: fmt::Debug + Send + Sync {
    fn algebra_id(&self) -> u32;

    fn index(&self) -> &Ix;

    fn eq_in_algebra(&self, other: &dyn ExtendedGenerator<Ix>) -> bool;

    fn cmp_in_algebra(&self, other: &dyn ExtendedGenerator<Ix>) -> Ordering;

    /// Commutation rule. Called with `self > lower`; writes the linear
    /// correction into `out` and returns the coefficient `c` such that
    /// `self * lower = c * lower * self + out`.
    fn swap_with(&self, lower: &dyn ExtendedGenerator<Ix>, out: &mut LinearFunction<Ix>) -> f64;

    /// Replacement of the adjacent product `self * right` (with
    /// `self <= right`), if one applies.
    fn simplify_adjacent(&self, right: &dyn ExtendedGenerator<Ix>, out: &mut LinearFunction<Ix>) -> bool {
        let _ = (right, out);
        false
    }

    /// Smallest power of this generator that vanishes identically, if any.
    fn vanishing_power(&self) -> Option<u32> {
        None
    }

    /// Hermitian conjugate of this single generator.
    fn conj_into(&self, out: &mut LinearFunction<Ix>);

    /// Bits needed to encode the default state space of this degree of
    /// freedom, when one exists.
    fn space_bits(&self) -> Option<u32> {
        None
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Shared handle to a user-defined generator.
#[derive(Clone, Debug)]
pub struct ExtGenerator<Ix: IndexKey>(Arc<dyn ExtendedGenerator<Ix>>);

impl<Ix: IndexKey> ExtGenerator<Ix> {
    pub fn new(generator: impl ExtendedGenerator<Ix> + 'static) -> Self {
        debug_assert!(generator.algebra_id() >= EXTENSION_ALGEBRA_ID_MIN);
        ExtGenerator(Arc::new(generator))
    }

    #[must_use]
    pub fn get(&self) -> &dyn ExtendedGenerator<Ix> {
        &*self.0
    }
}

impl<Ix: IndexKey> PartialEq for ExtGenerator<Ix> {
    fn eq(&self, other: &Self) -> bool {
        self.0.algebra_id() == other.0.algebra_id() && self.0.eq_in_algebra(other.get())
    }
}

impl<Ix: IndexKey> Eq for ExtGenerator<Ix> {}

impl<Ix: IndexKey> PartialOrd for ExtGenerator<Ix> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Ix: IndexKey> Ord for ExtGenerator<Ix> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .algebra_id()
            .cmp(&other.0.algebra_id())
            .then_with(|| self.0.cmp_in_algebra(other.get()))
    }
}

/// Atomic element of the operator algebra: a ladder operator or spin
/// component at an index, or a user-defined generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generator<Ix: IndexKey> {
    Fermion { dagger: bool, index: Ix },
    Boson { dagger: bool, index: Ix },
    Spin { multiplicity: u32, component: SpinComponent, index: Ix },
    Extension(ExtGenerator<Ix>),
}

use Generator::{Boson, Extension, Fermion, Spin};

impl<Ix: IndexKey> Generator<Ix> {
    #[must_use]
    pub fn fermion(dagger: bool, index: impl Into<Ix>) -> Self {
        Fermion { dagger, index: index.into() }
    }

    #[must_use]
    pub fn boson(dagger: bool, index: impl Into<Ix>) -> Self {
        Boson { dagger, index: index.into() }
    }

    /// Spin-1/2 generator.
    #[must_use]
    pub fn spin(component: SpinComponent, index: impl Into<Ix>) -> Self {
        Spin { multiplicity: 2, component, index: index.into() }
    }

    /// Generator of a `2 * spin + 1`-dimensional spin algebra. Fails when
    /// `2 * spin` is not a positive integer.
    pub fn spin_s(spin: f64, component: SpinComponent, index: impl Into<Ix>) -> Result<Self, InvalidSpinError> {
        let twice = 2.0 * spin;
        if twice < 1.0 || twice.fract() != 0.0 {
            return Err(InvalidSpinError(spin));
        }
        Ok(Spin {
            multiplicity: twice as u32 + 1,
            component,
            index: index.into(),
        })
    }

    #[must_use]
    pub fn spin_mult(multiplicity: u32, component: SpinComponent, index: impl Into<Ix>) -> Self {
        assert!(multiplicity >= 2, "spin multiplicity must be at least 2");
        Spin { multiplicity, component, index: index.into() }
    }

    #[must_use]
    pub fn extension(generator: impl ExtendedGenerator<Ix> + 'static) -> Self {
        Extension(ExtGenerator::new(generator))
    }

    #[must_use]
    pub fn algebra_id(&self) -> u32 {
        match self {
            Fermion { .. } => FERMION_ALGEBRA_ID,
            Boson { .. } => BOSON_ALGEBRA_ID,
            Spin { .. } => SPIN_ALGEBRA_ID,
            Extension(ext) => ext.get().algebra_id(),
        }
    }

    #[must_use]
    pub fn index(&self) -> &Ix {
        match self {
            Fermion { index, .. } | Boson { index, .. } | Spin { index, .. } => index,
            Extension(ext) => ext.get().index(),
        }
    }

    /// Whether this is a creation operator; `None` for spin and extension
    /// generators.
    #[must_use]
    pub fn dagger(&self) -> Option<bool> {
        match self {
            Fermion { dagger, .. } | Boson { dagger, .. } => Some(*dagger),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_fermion(&self) -> bool {
        matches!(self, Fermion { .. })
    }

    #[must_use]
    pub fn is_boson(&self) -> bool {
        matches!(self, Boson { .. })
    }

    #[must_use]
    pub fn is_spin(&self) -> bool {
        matches!(self, Spin { .. })
    }

    /// Commutation rule. Requires `self > lower`. Writes the linear
    /// correction into `out` and returns the coefficient `c` such that
    /// `self * lower = c * lower * self + out`.
    pub fn swap_with(&self, lower: &Self, out: &mut LinearFunction<Ix>) -> f64 {
        debug_assert!(self > lower);
        out.clear();
        match (self, lower) {
            (Fermion { dagger: d1, index: i1 }, Fermion { dagger: d2, index: i2 }) => {
                // c c+ = -c+ c + delta
                if d1 != d2 && i1 == i2 {
                    out.constant = 1.0;
                }
                -1.0
            }
            (Boson { dagger: d1, index: i1 }, Boson { dagger: d2, index: i2 }) => {
                // a a+ = a+ a + delta
                if d1 != d2 && i1 == i2 {
                    out.constant = 1.0;
                }
                1.0
            }
            (
                Spin { multiplicity: m1, component: c1, index: i1 },
                Spin { multiplicity: m2, component: c2, index: i2 },
            ) => {
                if m1 == m2 && i1 == i2 {
                    match (c1, c2) {
                        // S- S+ = S+ S- - 2 Sz
                        (SpinComponent::Minus, SpinComponent::Plus) => {
                            out.push(
                                -2.0,
                                Spin {
                                    multiplicity: *m1,
                                    component: SpinComponent::Z,
                                    index: i1.clone(),
                                },
                            );
                        }
                        // Sz S+ = S+ Sz + S+
                        (SpinComponent::Z, SpinComponent::Plus) => out.push(1.0, lower.clone()),
                        // Sz S- = S- Sz - S-
                        (SpinComponent::Z, SpinComponent::Minus) => out.push(-1.0, lower.clone()),
                        _ => unreachable!(),
                    }
                }
                1.0
            }
            (Extension(a), Extension(b)) if a.get().algebra_id() == b.get().algebra_id() => {
                a.get().swap_with(b.get(), out)
            }
            // Generators of distinct algebras commute.
            _ => 1.0,
        }
    }

    /// Replacement of the adjacent product `self * right`, if one applies.
    /// Requires `self <= right`.
    pub fn simplify_adjacent(&self, right: &Self, out: &mut LinearFunction<Ix>) -> bool {
        debug_assert!(self <= right);
        match (self, right) {
            (Fermion { .. }, Fermion { .. }) if self == right => {
                // c c = c+ c+ = 0
                out.clear();
                true
            }
            (Spin { multiplicity: 2, component, .. }, _) if self == right => {
                out.clear();
                if *component == SpinComponent::Z {
                    // Sz Sz = 1/4 for spin 1/2
                    out.constant = 0.25;
                }
                true
            }
            (Extension(a), Extension(b)) if a.get().algebra_id() == b.get().algebra_id() => {
                a.get().simplify_adjacent(b.get(), out)
            }
            _ => false,
        }
    }

    /// Smallest power of this generator that vanishes identically, if any.
    #[must_use]
    pub fn vanishing_power(&self) -> Option<u32> {
        match self {
            Fermion { .. } => Some(2),
            Spin { multiplicity, component, .. } if *component != SpinComponent::Z => Some(*multiplicity),
            Extension(ext) => ext.get().vanishing_power(),
            _ => None,
        }
    }

    /// Hermitian conjugate of this single generator, written into `out`.
    pub fn conj(&self, out: &mut LinearFunction<Ix>) {
        out.clear();
        match self {
            Fermion { dagger, index } => out.push(1.0, Fermion { dagger: !dagger, index: index.clone() }),
            Boson { dagger, index } => out.push(1.0, Boson { dagger: !dagger, index: index.clone() }),
            Spin { multiplicity, component, index } => {
                let conj_component = match component {
                    SpinComponent::Plus => SpinComponent::Minus,
                    SpinComponent::Minus => SpinComponent::Plus,
                    SpinComponent::Z => SpinComponent::Z,
                };
                out.push(
                    1.0,
                    Spin {
                        multiplicity: *multiplicity,
                        component: conj_component,
                        index: index.clone(),
                    },
                );
            }
            Extension(ext) => ext.get().conj_into(out),
        }
    }
}

impl<Ix: IndexKey> PartialOrd for Generator<Ix> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Ix: IndexKey> Ord for Generator<Ix> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.algebra_id().cmp(&other.algebra_id()).then_with(|| match (self, other) {
            // Within the ladder algebras: c+_1 < c+_2 < ... < c_2 < c_1.
            (Fermion { dagger: d1, index: i1 }, Fermion { dagger: d2, index: i2 })
            | (Boson { dagger: d1, index: i1 }, Boson { dagger: d2, index: i2 }) => match (d1, d2) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (true, true) => i1.cmp(i2),
                (false, false) => i2.cmp(i1),
            },
            (
                Spin { multiplicity: m1, component: c1, index: i1 },
                Spin { multiplicity: m2, component: c2, index: i2 },
            ) => m1.cmp(m2).then_with(|| i1.cmp(i2)).then_with(|| c1.cmp(c2)),
            (Extension(a), Extension(b)) => a.cmp(b),
            // Equal algebra ids imply equal variants.
            _ => unreachable!(),
        })
    }
}

impl<Ix: IndexKey> fmt::Display for Generator<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fermion { dagger, index } => {
                write!(f, "C{}({})", if *dagger { "+" } else { "" }, DisplayIndex(index))
            }
            Boson { dagger, index } => {
                write!(f, "A{}({})", if *dagger { "+" } else { "" }, DisplayIndex(index))
            }
            Spin { multiplicity, component, index } => {
                f.write_str("S")?;
                if *multiplicity != 2 {
                    if multiplicity % 2 == 0 {
                        write!(f, "{}/2", multiplicity - 1)?;
                    } else {
                        write!(f, "{}", (multiplicity - 1) / 2)?;
                    }
                }
                write!(f, "{component}({})", DisplayIndex(index))
            }
            Extension(ext) => ext.get().write(f),
        }
    }
}
