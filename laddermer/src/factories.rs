//! Free functions building one-generator (and number-operator)
//! expressions. Generic over the coefficient ring and the index key;
//! anything convertible into the key is accepted, so both
//! `c_dag(("up", 1))` over tuple keys and `c_dag(dyn_index!["up", 1])`
//! over [`DynIndex`](crate::index::DynIndex) read the same.

use num_complex::Complex64;

use crate::expression::Expression;
use crate::generator::{Generator, SpinComponent};
use crate::index::IndexKey;
use crate::monomial::Monomial;
use crate::scalar::Scalar;

fn single<S: Scalar, Ix: IndexKey>(generator: Generator<Ix>) -> Expression<S, Ix> {
    Expression::from_term(S::one(), Monomial::from_generators([generator]))
}

/// Fermionic creation operator `c+`.
#[must_use]
pub fn c_dag<S: Scalar, Ix: IndexKey>(index: impl Into<Ix>) -> Expression<S, Ix> {
    single(Generator::fermion(true, index))
}

/// Fermionic annihilation operator `c`.
#[must_use]
pub fn c<S: Scalar, Ix: IndexKey>(index: impl Into<Ix>) -> Expression<S, Ix> {
    single(Generator::fermion(false, index))
}

/// Fermion number operator `n = c+ c`.
#[must_use]
pub fn n<S: Scalar, Ix: IndexKey>(index: impl Into<Ix>) -> Expression<S, Ix> {
    let index = index.into();
    Expression::from_term(
        S::one(),
        Monomial::from_generators([
            Generator::fermion(true, index.clone()),
            Generator::fermion(false, index),
        ]),
    )
}

/// Bosonic creation operator `a+`.
#[must_use]
pub fn a_dag<S: Scalar, Ix: IndexKey>(index: impl Into<Ix>) -> Expression<S, Ix> {
    single(Generator::boson(true, index))
}

/// Bosonic annihilation operator `a`.
#[must_use]
pub fn a<S: Scalar, Ix: IndexKey>(index: impl Into<Ix>) -> Expression<S, Ix> {
    single(Generator::boson(false, index))
}

/// Spin-1/2 raising operator.
#[must_use]
pub fn s_p<S: Scalar, Ix: IndexKey>(index: impl Into<Ix>) -> Expression<S, Ix> {
    single(Generator::spin(SpinComponent::Plus, index))
}

/// Spin-1/2 lowering operator.
#[must_use]
pub fn s_m<S: Scalar, Ix: IndexKey>(index: impl Into<Ix>) -> Expression<S, Ix> {
    single(Generator::spin(SpinComponent::Minus, index))
}

/// Spin-1/2 z-projection operator.
#[must_use]
pub fn s_z<S: Scalar, Ix: IndexKey>(index: impl Into<Ix>) -> Expression<S, Ix> {
    single(Generator::spin(SpinComponent::Z, index))
}

/// Raising operator of a `multiplicity`-dimensional spin.
///
/// # Panics
///
/// Panics when `multiplicity < 2`.
#[must_use]
pub fn s_p_mult<S: Scalar, Ix: IndexKey>(multiplicity: u32, index: impl Into<Ix>) -> Expression<S, Ix> {
    single(Generator::spin_mult(multiplicity, SpinComponent::Plus, index))
}

/// Lowering operator of a `multiplicity`-dimensional spin.
///
/// # Panics
///
/// Panics when `multiplicity < 2`.
#[must_use]
pub fn s_m_mult<S: Scalar, Ix: IndexKey>(multiplicity: u32, index: impl Into<Ix>) -> Expression<S, Ix> {
    single(Generator::spin_mult(multiplicity, SpinComponent::Minus, index))
}

/// z-projection operator of a `multiplicity`-dimensional spin.
///
/// # Panics
///
/// Panics when `multiplicity < 2`.
#[must_use]
pub fn s_z_mult<S: Scalar, Ix: IndexKey>(multiplicity: u32, index: impl Into<Ix>) -> Expression<S, Ix> {
    single(Generator::spin_mult(multiplicity, SpinComponent::Z, index))
}

/// Spin-1/2 `Sx = (S+ + S-) / 2`.
#[must_use]
pub fn s_x<Ix: IndexKey>(index: impl Into<Ix>) -> Expression<Complex64, Ix> {
    let index = index.into();
    (s_p::<Complex64, Ix>(index.clone()) + s_m::<Complex64, Ix>(index)).scale(Complex64::new(0.5, 0.0))
}

/// Spin-1/2 `Sy = (S+ - S-) / 2i`.
#[must_use]
pub fn s_y<Ix: IndexKey>(index: impl Into<Ix>) -> Expression<Complex64, Ix> {
    let index = index.into();
    (s_p::<Complex64, Ix>(index.clone()) - s_m::<Complex64, Ix>(index)).scale(Complex64::new(0.0, -0.5))
}
