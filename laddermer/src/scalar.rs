use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_complex::Complex;
use num_traits::{One, Zero};

/// Capability set required of expression coefficients.
///
/// A scalar forms a commutative ring with a complex-conjugation convention
/// (identity on real types) and a zero test. `from_f64` injects the small
/// rational corrections produced by commutation rules into the ring; lossy
/// realizations (integers) truncate.
pub trait Scalar:
    Zero
    + One
    + Clone
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
{
    fn from_f64(value: f64) -> Self;

    /// Whether the value tests as zero. Floating realizations use a small
    /// threshold so that roundoff residue from normalization is discarded.
    fn is_vanishing(&self) -> bool;

    fn conj(&self) -> Self;

    /// Real part, as an element of the same ring.
    fn re(&self) -> Self;

    /// Imaginary part, as an element of the same ring.
    fn im(&self) -> Self;
}

macro_rules! impl_scalar_for_int {
    ($($int:ty),* $(,)?) => {
        $(impl Scalar for $int {
            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $int
            }

            #[inline]
            fn is_vanishing(&self) -> bool {
                *self == 0
            }

            #[inline]
            fn conj(&self) -> Self {
                *self
            }

            #[inline]
            fn re(&self) -> Self {
                *self
            }

            #[inline]
            fn im(&self) -> Self {
                0
            }
        })*
    };
}

impl_scalar_for_int!(i32, i64);

macro_rules! impl_scalar_for_float {
    ($($float:ty),* $(,)?) => {
        $(impl Scalar for $float {
            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $float
            }

            #[inline]
            fn is_vanishing(&self) -> bool {
                self.abs() < 100.0 * <$float>::EPSILON
            }

            #[inline]
            fn conj(&self) -> Self {
                *self
            }

            #[inline]
            fn re(&self) -> Self {
                *self
            }

            #[inline]
            fn im(&self) -> Self {
                0.0
            }
        })*
    };
}

impl_scalar_for_float!(f32, f64);

macro_rules! impl_scalar_for_complex {
    ($($float:ty),* $(,)?) => {
        $(impl Scalar for Complex<$float> {
            #[inline]
            fn from_f64(value: f64) -> Self {
                Complex::new(value as $float, 0.0)
            }

            #[inline]
            fn is_vanishing(&self) -> bool {
                Scalar::is_vanishing(&self.re) && Scalar::is_vanishing(&self.im)
            }

            #[inline]
            fn conj(&self) -> Self {
                Complex::conj(self)
            }

            #[inline]
            fn re(&self) -> Self {
                Complex::new(self.re, 0.0)
            }

            #[inline]
            fn im(&self) -> Self {
                Complex::new(self.im, 0.0)
            }
        })*
    };
}

impl_scalar_for_complex!(f32, f64);
