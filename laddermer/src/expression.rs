use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use itertools::Itertools;
use num_complex::Complex64;

use crate::generator::{Generator, LinearFunction};
use crate::index::IndexKey;
use crate::monomial::Monomial;
use crate::scalar::Scalar;

/// Polynomial in algebra generators: a sum of `coefficient * monomial`
/// terms, kept in canonical normal-ordered form.
///
/// Every stored monomial is canonical (no adjacent swap or simplification
/// applies), every stored coefficient is nonzero, and iteration follows the
/// monomial total order. All algebraic operations re-establish these
/// invariants before returning.
#[derive(Clone, Debug)]
pub struct Expression<S: Scalar, Ix: IndexKey> {
    terms: BTreeMap<Monomial<Ix>, S>,
}

/// Real-coefficient expression.
pub type ExpressionReal<Ix> = Expression<f64, Ix>;
/// Complex-coefficient expression.
pub type ExpressionComplex<Ix> = Expression<Complex64, Ix>;

impl<S: Scalar, Ix: IndexKey> Expression<S, Ix> {
    /// The zero expression.
    #[must_use]
    pub fn zero() -> Self {
        Expression { terms: BTreeMap::new() }
    }

    /// A constant expression (the coefficient of the identity monomial).
    #[must_use]
    pub fn constant(value: S) -> Self {
        let mut expression = Self::zero();
        expression.accumulate(Monomial::identity(), value);
        expression
    }

    /// Expression holding a single `coefficient * monomial` term, reduced
    /// to canonical form.
    #[must_use]
    pub fn from_term(coefficient: S, monomial: Monomial<Ix>) -> Self {
        let mut expression = Self::zero();
        expression.insert_normalized(monomial, coefficient);
        expression
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in monomial order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Monomial<Ix>, &S)> {
        self.terms.iter()
    }

    /// Coefficient of a monomial, if the monomial is present.
    #[must_use]
    pub fn coefficient(&self, monomial: &Monomial<Ix>) -> Option<&S> {
        self.terms.get(monomial)
    }

    /// Coefficient of the identity monomial.
    #[must_use]
    pub fn constant_term(&self) -> S {
        self.terms.get(&Monomial::identity()).cloned().unwrap_or_else(S::zero)
    }

    /// Hermitian conjugate: reverse each monomial, conjugate each
    /// generator, conjugate each coefficient, and renormalize.
    #[must_use]
    pub fn conj(&self) -> Self {
        let mut result = Self::zero();
        let mut conjugate = LinearFunction::new();
        for (monomial, coefficient) in &self.terms {
            // Expand the product of per-generator conjugates right-to-left.
            let mut expanded = vec![(Monomial::identity(), coefficient.conj())];
            for generator in monomial.iter().rev() {
                generator.conj(&mut conjugate);
                let mut next = Vec::with_capacity(expanded.len() * (conjugate.terms.len() + 1));
                for (prefix, weight) in &expanded {
                    if conjugate.constant != 0.0 {
                        next.push((prefix.clone(), weight.clone() * S::from_f64(conjugate.constant)));
                    }
                    for (term_weight, term_generator) in &conjugate.terms {
                        let mut monomial = prefix.clone();
                        monomial.push(term_generator.clone());
                        next.push((monomial, weight.clone() * S::from_f64(*term_weight)));
                    }
                }
                expanded = next;
            }
            for (monomial, weight) in expanded {
                result.insert_normalized(monomial, weight);
            }
        }
        result
    }

    /// Multiply every coefficient by `factor`.
    #[must_use]
    pub fn scale(&self, factor: S) -> Self {
        let mut result = Self::zero();
        for (monomial, coefficient) in &self.terms {
            result.accumulate(monomial.clone(), coefficient.clone() * factor.clone());
        }
        result
    }

    /// Add `coefficient` to the stored value of an already-canonical
    /// monomial, dropping the entry if the sum vanishes.
    fn accumulate(&mut self, monomial: Monomial<Ix>, coefficient: S) {
        if coefficient.is_vanishing() {
            return;
        }
        match self.terms.entry(monomial) {
            Entry::Vacant(entry) => {
                entry.insert(coefficient);
            }
            Entry::Occupied(mut entry) => {
                let sum = entry.get().clone() + coefficient;
                if sum.is_vanishing() {
                    entry.remove();
                } else {
                    entry.insert(sum);
                }
            }
        }
    }

    /// Reduce `coefficient * monomial` to canonical form and fold it in.
    ///
    /// Worklist form of the bubble pass: each candidate term is scanned
    /// left to right for the first defect. An out-of-order pair is swapped
    /// through [`Generator::swap_with`], splicing the linear correction in
    /// as shorter candidate terms; a collapsible adjacent pair is replaced
    /// by its expansion; a run reaching the generator's vanishing power
    /// kills the term. Swaps strictly reduce the inversion count at fixed
    /// length and every correction is strictly shorter, so the worklist
    /// drains.
    fn insert_normalized(&mut self, monomial: Monomial<Ix>, coefficient: S) {
        let mut queue = vec![(monomial, coefficient)];
        while let Some((monomial, coefficient)) = queue.pop() {
            if coefficient.is_vanishing() {
                continue;
            }
            match first_defect(&monomial) {
                None => self.accumulate(monomial, coefficient),
                Some(Defect::Swap(at)) => {
                    let mut correction = LinearFunction::new();
                    let factor = monomial[at].swap_with(&monomial[at + 1], &mut correction);
                    queue.push((
                        monomial.with_swapped(at),
                        coefficient.clone() * S::from_f64(factor),
                    ));
                    push_replacements(&mut queue, &monomial, at, &correction, &coefficient);
                }
                Some(Defect::Replace(at, replacement)) => {
                    push_replacements(&mut queue, &monomial, at, &replacement, &coefficient);
                }
                Some(Defect::Vanish) => {}
            }
        }
    }
}

/// First structural defect of a monomial, scanning left to right.
enum Defect<Ix: IndexKey> {
    /// Adjacent pair out of order.
    Swap(usize),
    /// Adjacent pair with a simplification; carries the replacement.
    Replace(usize, LinearFunction<Ix>),
    /// A run of one generator reached its vanishing power.
    Vanish,
}

fn first_defect<Ix: IndexKey>(monomial: &Monomial<Ix>) -> Option<Defect<Ix>> {
    let mut run = 1u32;
    for at in 0..monomial.len().saturating_sub(1) {
        let left = &monomial[at];
        let right = &monomial[at + 1];
        if left > right {
            return Some(Defect::Swap(at));
        }
        let mut replacement = LinearFunction::new();
        if left.simplify_adjacent(right, &mut replacement) {
            return Some(Defect::Replace(at, replacement));
        }
        if left == right {
            run += 1;
            if left.vanishing_power().is_some_and(|power| run >= power) {
                return Some(Defect::Vanish);
            }
        } else {
            run = 1;
        }
    }
    None
}

/// Queue the terms of `function` spliced over the pair at `at`, `at + 1`.
fn push_replacements<S: Scalar, Ix: IndexKey>(
    queue: &mut Vec<(Monomial<Ix>, S)>,
    monomial: &Monomial<Ix>,
    at: usize,
    function: &LinearFunction<Ix>,
    coefficient: &S,
) {
    if function.constant != 0.0 {
        queue.push((
            monomial.with_pair_replaced(at, None),
            coefficient.clone() * S::from_f64(function.constant),
        ));
    }
    for (weight, generator) in &function.terms {
        queue.push((
            monomial.with_pair_replaced(at, Some(generator)),
            coefficient.clone() * S::from_f64(*weight),
        ));
    }
}

impl<Ix: IndexKey> Expression<f64, Ix> {
    /// Promote a real-coefficient expression to complex coefficients.
    #[must_use]
    pub fn to_complex(&self) -> Expression<Complex64, Ix> {
        let mut result = Expression::zero();
        for (monomial, coefficient) in &self.terms {
            result.accumulate(monomial.clone(), Complex64::new(*coefficient, 0.0));
        }
        result
    }
}

impl<S: Scalar, Ix: IndexKey> Default for Expression<S, Ix> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<S: Scalar, Ix: IndexKey> PartialEq for Expression<S, Ix> {
    fn eq(&self, other: &Self) -> bool {
        self.terms.len() == other.terms.len()
            && self
                .terms
                .iter()
                .zip(&other.terms)
                .all(|((m1, s1), (m2, s2))| m1 == m2 && (s1.clone() - s2.clone()).is_vanishing())
    }
}

impl<'e, S: Scalar, Ix: IndexKey> IntoIterator for &'e Expression<S, Ix> {
    type Item = (&'e Monomial<Ix>, &'e S);
    type IntoIter = std::collections::btree_map::Iter<'e, Monomial<Ix>, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl<S: Scalar, Ix: IndexKey> AddAssign<&Expression<S, Ix>> for Expression<S, Ix> {
    fn add_assign(&mut self, rhs: &Expression<S, Ix>) {
        for (monomial, coefficient) in &rhs.terms {
            self.accumulate(monomial.clone(), coefficient.clone());
        }
    }
}

impl<S: Scalar, Ix: IndexKey> AddAssign for Expression<S, Ix> {
    fn add_assign(&mut self, rhs: Self) {
        for (monomial, coefficient) in rhs.terms {
            self.accumulate(monomial, coefficient);
        }
    }
}

impl<S: Scalar, Ix: IndexKey> SubAssign<&Expression<S, Ix>> for Expression<S, Ix> {
    fn sub_assign(&mut self, rhs: &Expression<S, Ix>) {
        for (monomial, coefficient) in &rhs.terms {
            self.accumulate(monomial.clone(), -coefficient.clone());
        }
    }
}

impl<S: Scalar, Ix: IndexKey> SubAssign for Expression<S, Ix> {
    fn sub_assign(&mut self, rhs: Self) {
        for (monomial, coefficient) in rhs.terms {
            self.accumulate(monomial, -coefficient);
        }
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl<S: Scalar, Ix: IndexKey> $trait for Expression<S, Ix> {
            type Output = Expression<S, Ix>;

            fn $method(mut self, rhs: Self) -> Self::Output {
                self.$assign_method(rhs);
                self
            }
        }

        impl<S: Scalar, Ix: IndexKey> $trait<&Expression<S, Ix>> for Expression<S, Ix> {
            type Output = Expression<S, Ix>;

            fn $method(mut self, rhs: &Expression<S, Ix>) -> Self::Output {
                self.$assign_method(rhs);
                self
            }
        }

        impl<S: Scalar, Ix: IndexKey> $trait<Expression<S, Ix>> for &Expression<S, Ix> {
            type Output = Expression<S, Ix>;

            fn $method(self, rhs: Expression<S, Ix>) -> Self::Output {
                let mut result = self.clone();
                result.$assign_method(rhs);
                result
            }
        }

        impl<S: Scalar, Ix: IndexKey> $trait<&Expression<S, Ix>> for &Expression<S, Ix> {
            type Output = Expression<S, Ix>;

            fn $method(self, rhs: &Expression<S, Ix>) -> Self::Output {
                let mut result = self.clone();
                result.$assign_method(rhs);
                result
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);

impl<S: Scalar, Ix: IndexKey> Neg for Expression<S, Ix> {
    type Output = Expression<S, Ix>;

    fn neg(self) -> Self::Output {
        let mut result = Expression::zero();
        for (monomial, coefficient) in self.terms {
            result.accumulate(monomial, -coefficient);
        }
        result
    }
}

impl<S: Scalar, Ix: IndexKey> Neg for &Expression<S, Ix> {
    type Output = Expression<S, Ix>;

    fn neg(self) -> Self::Output {
        self.clone().neg()
    }
}

impl<S: Scalar, Ix: IndexKey> Mul<&Expression<S, Ix>> for &Expression<S, Ix> {
    type Output = Expression<S, Ix>;

    fn mul(self, rhs: &Expression<S, Ix>) -> Self::Output {
        let mut result = Expression::zero();
        for (left_monomial, left_coefficient) in &self.terms {
            for (right_monomial, right_coefficient) in &rhs.terms {
                result.insert_normalized(
                    left_monomial.concat(right_monomial),
                    left_coefficient.clone() * right_coefficient.clone(),
                );
            }
        }
        result
    }
}

impl<S: Scalar, Ix: IndexKey> Mul for Expression<S, Ix> {
    type Output = Expression<S, Ix>;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl<S: Scalar, Ix: IndexKey> Mul<&Expression<S, Ix>> for Expression<S, Ix> {
    type Output = Expression<S, Ix>;

    fn mul(self, rhs: &Expression<S, Ix>) -> Self::Output {
        &self * rhs
    }
}

impl<S: Scalar, Ix: IndexKey> Mul<Expression<S, Ix>> for &Expression<S, Ix> {
    type Output = Expression<S, Ix>;

    fn mul(self, rhs: Expression<S, Ix>) -> Self::Output {
        self * &rhs
    }
}

impl<S: Scalar, Ix: IndexKey> MulAssign<&Expression<S, Ix>> for Expression<S, Ix> {
    fn mul_assign(&mut self, rhs: &Expression<S, Ix>) {
        *self = &*self * rhs;
    }
}

impl<S: Scalar, Ix: IndexKey> MulAssign for Expression<S, Ix> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = &*self * &rhs;
    }
}

// Scalar products for the provided coefficient rings. Other rings go
// through `Expression::scale`.
macro_rules! impl_scalar_products {
    ($($scalar:ty),* $(,)?) => {
        $(
            impl<Ix: IndexKey> Mul<$scalar> for Expression<$scalar, Ix> {
                type Output = Expression<$scalar, Ix>;

                fn mul(self, rhs: $scalar) -> Self::Output {
                    self.scale(rhs)
                }
            }

            impl<Ix: IndexKey> Mul<$scalar> for &Expression<$scalar, Ix> {
                type Output = Expression<$scalar, Ix>;

                fn mul(self, rhs: $scalar) -> Self::Output {
                    self.scale(rhs)
                }
            }

            impl<Ix: IndexKey> Mul<Expression<$scalar, Ix>> for $scalar {
                type Output = Expression<$scalar, Ix>;

                fn mul(self, rhs: Expression<$scalar, Ix>) -> Self::Output {
                    rhs.scale(self)
                }
            }

            impl<Ix: IndexKey> Mul<&Expression<$scalar, Ix>> for $scalar {
                type Output = Expression<$scalar, Ix>;

                fn mul(self, rhs: &Expression<$scalar, Ix>) -> Self::Output {
                    rhs.scale(self)
                }
            }
        )*
    };
}

impl_scalar_products!(i32, i64, f32, f64, num_complex::Complex<f32>, Complex64);

impl<S: Scalar, Ix: IndexKey> fmt::Display for Expression<S, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "{}", S::zero());
        }
        let rendered = self
            .terms
            .iter()
            .map(|(monomial, coefficient)| {
                if monomial.is_identity() {
                    coefficient.to_string()
                } else {
                    format!("{coefficient}*{monomial}")
                }
            })
            .join(" + ");
        f.write_str(&rendered)
    }
}
