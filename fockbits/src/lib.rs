//! Bit-encoded Fock-space layout and compiled operator actions for
//! [`laddermer`] expressions.
//!
//! A [`HilbertSpace`] assigns every degree of freedom referenced by an
//! expression a disjoint range of bits inside a `u64` basis-state index:
//! one bit per fermionic mode, an occupation field per truncated bosonic
//! mode, a shifted-magnetic-number field per spin. A [`LinearOperator`]
//! compiles an expression against that layout into per-algebra bit plans
//! and then maps basis states to sparse linear combinations of basis
//! states:
//!
//! ```
//! use fockbits::{boson_bits, HilbertSpace, LinearOperator};
//! use laddermer::prelude::*;
//!
//! // Number operator of one bosonic mode truncated at occupation 3.
//! let number: Expression<f64, i32> = a_dag(0) * a(0);
//! let space = HilbertSpace::from_expression_with(&number, boson_bits(2)).unwrap();
//! let operator = LinearOperator::new(&number, &space).unwrap();
//!
//! let image = operator.apply(1);
//! assert_eq!(image[&1], 1.0);
//! ```

pub mod action;
pub mod hilbert;
pub mod loperator;
pub mod space;
pub mod state;

pub use action::{ActionError, MonomialAction, MAX_PRECOMPUTED_SQRT};
pub use hilbert::{boson_bits, BitRange, HilbertSpace, SpaceError};
pub use loperator::LinearOperator;
pub use space::ElementarySpace;
pub use state::SparseStateVector;
