use std::ops::{Add, Sub};

use crate::expression::Expression;
use crate::index::IndexKey;
use crate::scalar::Scalar;

/// Hermitian-conjugate placeholder: `expr + Hc` is `expr + expr.conj()`
/// and `expr - Hc` is `expr - expr.conj()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hc;

impl<S: Scalar, Ix: IndexKey> Add<Hc> for Expression<S, Ix> {
    type Output = Expression<S, Ix>;

    fn add(self, _: Hc) -> Self::Output {
        let conjugate = self.conj();
        self + conjugate
    }
}

impl<S: Scalar, Ix: IndexKey> Sub<Hc> for Expression<S, Ix> {
    type Output = Expression<S, Ix>;

    fn sub(self, _: Hc) -> Self::Output {
        let conjugate = self.conj();
        self - conjugate
    }
}
