use std::collections::HashMap;

use laddermer::Scalar;

/// Sparse vector of basis-state amplitudes, indexed by `u64` state
/// indices. Entries cancelling to zero are dropped on update.
#[derive(Clone, Debug)]
pub struct SparseStateVector<S: Scalar> {
    dim: u128,
    amplitudes: HashMap<u64, S>,
}

impl<S: Scalar> SparseStateVector<S> {
    #[must_use]
    pub fn new(dim: u128) -> Self {
        SparseStateVector { dim, amplitudes: HashMap::new() }
    }

    /// Unit vector along the basis state `index`.
    #[must_use]
    pub fn basis_state(dim: u128, index: u64) -> Self {
        let mut vector = Self::new(dim);
        vector.set(index, S::one());
        vector
    }

    #[must_use]
    pub fn dim(&self) -> u128 {
        self.dim
    }

    /// Number of stored (nonzero) amplitudes.
    #[must_use]
    pub fn n_amplitudes(&self) -> usize {
        self.amplitudes.len()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Amplitude of the basis state `index`; zero when absent.
    #[must_use]
    pub fn amplitude(&self, index: u64) -> S {
        debug_assert!(u128::from(index) < self.dim);
        self.amplitudes.get(&index).cloned().unwrap_or_else(S::zero)
    }

    pub fn set(&mut self, index: u64, amplitude: S) {
        debug_assert!(u128::from(index) < self.dim);
        if amplitude.is_vanishing() {
            self.amplitudes.remove(&index);
        } else {
            self.amplitudes.insert(index, amplitude);
        }
    }

    /// Add `delta` to the stored amplitude, dropping the entry when the
    /// sum vanishes.
    pub fn add_to(&mut self, index: u64, delta: S) {
        debug_assert!(u128::from(index) < self.dim);
        if delta.is_vanishing() {
            return;
        }
        match self.amplitudes.remove(&index) {
            None => {
                self.amplitudes.insert(index, delta);
            }
            Some(current) => {
                let sum = current + delta;
                if !sum.is_vanishing() {
                    self.amplitudes.insert(index, sum);
                }
            }
        }
    }

    /// Stored index/amplitude pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &S)> {
        self.amplitudes.iter().map(|(&index, amplitude)| (index, amplitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additions_cancel_to_empty() {
        let mut vector = SparseStateVector::<f64>::new(16);
        vector.add_to(3, 0.5);
        vector.add_to(3, 0.5);
        assert_eq!(vector.amplitude(3), 1.0);
        vector.add_to(3, -1.0);
        assert!(vector.is_zero());
    }

    #[test]
    fn basis_state_is_a_unit_vector() {
        let vector = SparseStateVector::<f64>::basis_state(8, 5);
        assert_eq!(vector.n_amplitudes(), 1);
        assert_eq!(vector.amplitude(5), 1.0);
        assert_eq!(vector.amplitude(2), 0.0);
    }
}
