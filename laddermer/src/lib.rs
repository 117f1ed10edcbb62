//! Polynomial expressions in quantum-mechanical ladder operators.
//!
//! Expressions are sums of `coefficient * monomial` terms over fermionic
//! (`c`, `c+`), bosonic (`a`, `a+`) and spin (`S+`, `S-`, `Sz`) generators
//! at arbitrary composite indices. Every algebraic operation reduces its
//! result to canonical normal-ordered form using the commutation and
//! anticommutation rules of the underlying algebras, so equality of
//! operators is equality of expressions:
//!
//! ```
//! use laddermer::prelude::*;
//!
//! type Expr = Expression<f64, (&'static str, i32)>;
//!
//! // {c, c+} = 1 at one site
//! let anticommutator: Expr =
//!     c_dag(("up", 1)) * c(("up", 1)) + c(("up", 1)) * c_dag(("up", 1));
//! assert_eq!(anticommutator, Expr::constant(1.0));
//! ```
//!
//! Index keys are either fixed tuples of atoms, checked at compile time,
//! or the runtime-typed [`index::DynIndex`]. Coefficients are any
//! [`scalar::Scalar`] ring; real and complex floats and integers ship in
//! the crate.

pub mod expression;
pub mod factories;
pub mod generator;
pub mod hc;
pub mod index;
pub mod monomial;
pub mod scalar;

pub use expression::{Expression, ExpressionComplex, ExpressionReal};
pub use generator::{
    ExtGenerator, ExtendedGenerator, Generator, InvalidSpinError, LinearFunction, SpinComponent,
    BOSON_ALGEBRA_ID, EXTENSION_ALGEBRA_ID_MIN, FERMION_ALGEBRA_ID, SPIN_ALGEBRA_ID,
};
pub use hc::Hc;
pub use index::{DynAtom, DynIndex, IndexAtom, IndexKey};
pub use monomial::Monomial;
pub use scalar::Scalar;

pub use num_complex::{Complex, Complex64};

/// Everything needed to build and combine operator expressions.
pub mod prelude {
    pub use crate::expression::{Expression, ExpressionComplex, ExpressionReal};
    pub use crate::factories::{
        a, a_dag, c, c_dag, n, s_m, s_m_mult, s_p, s_p_mult, s_x, s_y, s_z, s_z_mult,
    };
    pub use crate::generator::{Generator, SpinComponent};
    pub use crate::hc::Hc;
    pub use crate::index::{DynIndex, IndexKey};
    pub use crate::monomial::Monomial;
    pub use crate::scalar::Scalar;
}
