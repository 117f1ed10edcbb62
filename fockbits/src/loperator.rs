use std::collections::BTreeMap;

use laddermer::{Expression, IndexKey, Scalar};

use crate::action::{ActionError, MonomialAction};
use crate::hilbert::HilbertSpace;
use crate::state::SparseStateVector;

#[derive(Clone, Debug)]
struct CompiledTerm<S: Scalar> {
    coefficient: S,
    /// One compiled plan per contiguous single-algebra section of the
    /// monomial, in monomial order; applied right to left.
    sections: Vec<MonomialAction>,
}

/// Compiled action of a whole expression on basis states of a Hilbert
/// space.
///
/// The index type is erased at compilation: every generator has been
/// resolved to bit positions. Application is read-only, so one operator
/// may serve many threads.
#[derive(Clone, Debug)]
pub struct LinearOperator<S: Scalar> {
    terms: Vec<CompiledTerm<S>>,
}

impl<S: Scalar> LinearOperator<S> {
    /// Compile `expression` against `space`.
    ///
    /// Fails when a generator's elementary space is missing from `space`
    /// or its algebra has no action implementation.
    pub fn new<Ix: IndexKey>(
        expression: &Expression<S, Ix>,
        space: &HilbertSpace<Ix>,
    ) -> Result<Self, ActionError<Ix>> {
        let mut terms = Vec::with_capacity(expression.len());
        for (monomial, coefficient) in expression {
            let runs: Vec<_> = monomial.powers().map(|(g, p)| (g.clone(), p)).collect();
            let mut sections = Vec::new();
            for section in runs.chunk_by(|a, b| a.0.algebra_id() == b.0.algebra_id()) {
                sections.push(MonomialAction::compile(section, space)?);
            }
            terms.push(CompiledTerm { coefficient: coefficient.clone(), sections });
        }
        Ok(LinearOperator { terms })
    }

    /// Number of compiled monomial terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Act on the basis state `in_index`: the sparse linear combination of
    /// image basis states, with amplitudes summed over terms and zero
    /// sums dropped.
    #[must_use]
    pub fn apply(&self, in_index: u64) -> BTreeMap<u64, S> {
        let mut image = BTreeMap::new();
        for term in &self.terms {
            let mut state = in_index;
            let mut prefactor = 1.0;
            let mut annihilated = false;
            for section in term.sections.iter().rev() {
                let mut next = state;
                if !section.act(state, &mut next, &mut prefactor) {
                    annihilated = true;
                    break;
                }
                state = next;
            }
            if annihilated {
                continue;
            }
            let amplitude = term.coefficient.clone() * S::from_f64(prefactor);
            add_amplitude(&mut image, state, amplitude);
        }
        image
    }

    /// Act on a sparse state vector.
    #[must_use]
    pub fn apply_to(&self, source: &SparseStateVector<S>) -> SparseStateVector<S> {
        let mut destination = SparseStateVector::new(source.dim());
        for (index, amplitude) in source.iter() {
            for (image_index, image_amplitude) in self.apply(index) {
                destination.add_to(image_index, image_amplitude * amplitude.clone());
            }
        }
        destination
    }
}

fn add_amplitude<S: Scalar>(image: &mut BTreeMap<u64, S>, index: u64, amplitude: S) {
    if amplitude.is_vanishing() {
        return;
    }
    match image.remove(&index) {
        None => {
            image.insert(index, amplitude);
        }
        Some(current) => {
            let sum = current + amplitude;
            if !sum.is_vanishing() {
                image.insert(index, sum);
            }
        }
    }
}
