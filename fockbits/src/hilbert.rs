use thiserror::Error;

use laddermer::{Expression, Generator, IndexKey, Scalar};

use crate::space::ElementarySpace;

/// Inclusive range of bit positions assigned to one elementary space
/// inside a state index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitRange {
    pub lo: u32,
    pub hi: u32,
}

impl BitRange {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.hi - self.lo + 1
    }

    /// Mask selecting this range inside a state index.
    #[must_use]
    pub fn mask(&self) -> u64 {
        (((1u128 << self.width()) - 1) as u64) << self.lo
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpaceError<Ix: IndexKey> {
    #[error("elementary space {0} is already part of the Hilbert space")]
    SpaceExists(ElementarySpace<Ix>),
    #[error("elementary space {0} is not part of the Hilbert space")]
    SpaceNotFound(ElementarySpace<Ix>),
    #[error("no default elementary space for generator {0}")]
    NoDefaultSpace(Generator<Ix>),
    #[error("adding {0} would push the Hilbert space past 64 bits")]
    TooManyBits(ElementarySpace<Ix>),
}

/// Ordered product of elementary spaces, each assigned a disjoint
/// contiguous range of bits of a `u64` state index.
///
/// Spaces are kept sorted under the elementary-space order, so fermionic
/// factors always occupy the lowest bits; ranges are re-packed after every
/// insertion and partition `[0, total_bits)`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct HilbertSpace<Ix: IndexKey> {
    spaces: Vec<(ElementarySpace<Ix>, BitRange)>,
}

impl<Ix: IndexKey> HilbertSpace<Ix> {
    #[must_use]
    pub fn new() -> Self {
        HilbertSpace { spaces: Vec::new() }
    }

    /// Product of the given elementary spaces. Fails on duplicates and on
    /// overflow of the 64-bit state index.
    pub fn from_spaces(
        spaces: impl IntoIterator<Item = ElementarySpace<Ix>>,
    ) -> Result<Self, SpaceError<Ix>> {
        let mut hilbert = Self::new();
        for space in spaces {
            hilbert.add(space)?;
        }
        Ok(hilbert)
    }

    /// Hilbert space holding every degree of freedom referenced by an
    /// expression, using default elementary spaces.
    pub fn from_expression<S: Scalar>(expression: &Expression<S, Ix>) -> Result<Self, SpaceError<Ix>> {
        let mut hilbert = Self::new();
        hilbert.extend_from_expression(expression, |_| None)?;
        Ok(hilbert)
    }

    /// As [`from_expression`](Self::from_expression), consulting `fallback`
    /// for generators without a default space (bosons, extensions).
    pub fn from_expression_with<S: Scalar>(
        expression: &Expression<S, Ix>,
        fallback: impl FnMut(&Generator<Ix>) -> Option<ElementarySpace<Ix>>,
    ) -> Result<Self, SpaceError<Ix>> {
        let mut hilbert = Self::new();
        hilbert.extend_from_expression(expression, fallback)?;
        Ok(hilbert)
    }

    /// Add the spaces of every generator of `expression` that is not yet
    /// present.
    pub fn extend_from_expression<S: Scalar>(
        &mut self,
        expression: &Expression<S, Ix>,
        mut fallback: impl FnMut(&Generator<Ix>) -> Option<ElementarySpace<Ix>>,
    ) -> Result<(), SpaceError<Ix>> {
        for (monomial, _) in expression {
            for generator in monomial {
                match ElementarySpace::for_generator(generator) {
                    Some(space) => {
                        if !self.has(&space) {
                            self.add(space)?;
                        }
                    }
                    // No default: any space already covering this degree of
                    // freedom satisfies the generator; otherwise the
                    // fallback must supply one.
                    None => {
                        if self.covers(generator.algebra_id(), generator.index()) {
                            continue;
                        }
                        let space = fallback(generator)
                            .ok_or_else(|| SpaceError::NoDefaultSpace(generator.clone()))?;
                        self.add(space)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Whether some elementary space of the given algebra sits at `index`.
    fn covers(&self, algebra_id: u32, index: &Ix) -> bool {
        self.range_by_index(algebra_id, index).is_some()
    }

    /// Bit range of the space of the given algebra at `index`, regardless
    /// of its width.
    pub(crate) fn range_by_index(&self, algebra_id: u32, index: &Ix) -> Option<BitRange> {
        self.spaces
            .iter()
            .find(|(space, _)| space.algebra_id() == algebra_id && space.index() == index)
            .map(|(_, range)| *range)
    }

    /// Insert an elementary space and re-pack all bit ranges.
    pub fn add(&mut self, space: ElementarySpace<Ix>) -> Result<(), SpaceError<Ix>> {
        if self.total_bits() + space.n_bits() > 64 {
            return Err(SpaceError::TooManyBits(space));
        }
        let at = match self.spaces.binary_search_by(|(s, _)| s.cmp(&space)) {
            Ok(_) => return Err(SpaceError::SpaceExists(space)),
            Err(at) => at,
        };
        self.spaces.insert(at, (space, BitRange { lo: 0, hi: 0 }));
        self.repack();
        Ok(())
    }

    fn repack(&mut self) {
        let mut lo = 0;
        for (space, range) in &mut self.spaces {
            let width = space.n_bits();
            *range = BitRange { lo, hi: lo + width - 1 };
            lo += width;
        }
    }

    #[must_use]
    pub fn has(&self, space: &ElementarySpace<Ix>) -> bool {
        self.spaces.binary_search_by(|(s, _)| s.cmp(space)).is_ok()
    }

    /// Bit range assigned to an elementary space.
    pub fn bit_range(&self, space: &ElementarySpace<Ix>) -> Result<BitRange, SpaceError<Ix>> {
        self.spaces
            .binary_search_by(|(s, _)| s.cmp(space))
            .map(|at| self.spaces[at].1)
            .map_err(|_| SpaceError::SpaceNotFound(space.clone()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Total width of the state index in bits.
    #[must_use]
    pub fn total_bits(&self) -> u32 {
        self.spaces.last().map_or(0, |(_, range)| range.hi + 1)
    }

    /// Number of basis states spanned by this space.
    #[must_use]
    pub fn dim(&self) -> u128 {
        1u128 << self.total_bits()
    }

    /// Spaces and their bit ranges, in space order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&ElementarySpace<Ix>, BitRange)> {
        self.spaces.iter().map(|(space, range)| (space, *range))
    }

    /// Mask of all bits assigned to fermionic factors.
    #[must_use]
    pub fn fermion_mask(&self) -> u64 {
        self.spaces
            .iter()
            .filter(|(space, _)| matches!(space, ElementarySpace::Fermion { .. }))
            .fold(0, |mask, (_, range)| mask | range.mask())
    }
}

/// Fallback for [`HilbertSpace::from_expression_with`] assigning every
/// bosonic mode the same occupation cutoff `2^bits - 1`.
pub fn boson_bits<Ix: IndexKey>(bits: u32) -> impl FnMut(&Generator<Ix>) -> Option<ElementarySpace<Ix>> {
    move |generator| match generator {
        Generator::Boson { index, .. } => Some(ElementarySpace::boson(bits, index.clone())),
        _ => None,
    }
}
