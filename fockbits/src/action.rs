use thiserror::Error;

use laddermer::{Generator, IndexKey, SpinComponent};

use crate::hilbert::HilbertSpace;
use crate::space::ElementarySpace;

/// Size of the precomputed square-root table. Arguments past the table
/// fall back to live computation.
pub const MAX_PRECOMPUTED_SQRT: u64 = 128;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError<Ix: IndexKey> {
    #[error("the Hilbert space does not cover generator {0}, or its algebra has no action")]
    UnknownGenerator(Generator<Ix>),
}

/// Square roots of the first [`MAX_PRECOMPUTED_SQRT`] integers, sized to
/// what a compiled plan can actually request.
#[derive(Clone, Debug, Default)]
struct SqrtTable {
    values: Vec<f64>,
}

impl SqrtTable {
    fn with_max(max_argument: u64) -> Self {
        let len = (max_argument + 1).min(MAX_PRECOMPUTED_SQRT);
        SqrtTable {
            values: (0..len).map(|n| (n as f64).sqrt()).collect(),
        }
    }

    #[inline]
    fn get(&self, n: u64) -> f64 {
        match self.values.get(n as usize) {
            Some(&value) => value,
            None => (n as f64).sqrt(),
        }
    }
}

#[derive(Clone, Debug)]
struct FermionUpdate {
    dagger: bool,
    bit: u32,
    /// Fermionic bits strictly below `bit`; popcount gives the exchange
    /// sign.
    parity_mask: u64,
}

/// Bit toggles with exchange parity for a run of fermionic generators.
#[derive(Clone, Debug, Default)]
pub struct FermionAction {
    /// Stored rightmost-first: the generator acting on the ket first.
    updates: Vec<FermionUpdate>,
    /// Set when a run has power above one; `c c` annihilates any state.
    vanishes: bool,
}

#[derive(Clone, Debug)]
struct BosonUpdate {
    dagger: bool,
    power: u64,
    shift: u32,
    /// Selects the occupation field: `(index >> shift) & mask`.
    mask: u64,
}

/// Ladder moves on truncated bosonic occupation fields.
#[derive(Clone, Debug, Default)]
pub struct BosonAction {
    updates: Vec<BosonUpdate>,
    sqrt: SqrtTable,
}

#[derive(Clone, Debug)]
struct SpinUpdate {
    /// Twice the spin, `2s = multiplicity - 1`.
    s2: u64,
    shift: u32,
    mask: u64,
    component: SpinComponent,
    power: u64,
}

/// Ladder and diagonal moves on the shifted magnetic number
/// `n = m + s` of spin factors.
#[derive(Clone, Debug, Default)]
pub struct SpinAction {
    updates: Vec<SpinUpdate>,
    sqrt: SqrtTable,
}

/// Compiled action of one contiguous single-algebra section of a monomial
/// on basis states of a Hilbert space.
///
/// `act` reads a basis-state index, writes the image index and multiplies
/// the running real prefactor; it returns `false` when the section
/// annihilates the state, leaving `out` meaningless.
#[derive(Clone, Debug)]
pub enum MonomialAction {
    Fermion(FermionAction),
    Boson(BosonAction),
    Spin(SpinAction),
}

impl MonomialAction {
    /// Compile a run-length-encoded generator section against a Hilbert
    /// space. All generators of the section must belong to one algebra.
    pub fn compile<Ix: IndexKey>(
        section: &[(Generator<Ix>, u32)],
        space: &HilbertSpace<Ix>,
    ) -> Result<Self, ActionError<Ix>> {
        match section.first() {
            Some((Generator::Fermion { .. }, _)) => FermionAction::compile(section, space).map(MonomialAction::Fermion),
            Some((Generator::Boson { .. }, _)) => BosonAction::compile(section, space).map(MonomialAction::Boson),
            Some((Generator::Spin { .. }, _)) => SpinAction::compile(section, space).map(MonomialAction::Spin),
            Some((generator, _)) => Err(ActionError::UnknownGenerator(generator.clone())),
            None => Ok(MonomialAction::Fermion(FermionAction::default())),
        }
    }

    /// Apply to the basis state `in_index`.
    #[inline]
    pub fn act(&self, in_index: u64, out_index: &mut u64, coeff: &mut f64) -> bool {
        match self {
            MonomialAction::Fermion(action) => action.act(in_index, out_index, coeff),
            MonomialAction::Boson(action) => action.act(in_index, out_index, coeff),
            MonomialAction::Spin(action) => action.act(in_index, out_index, coeff),
        }
    }
}

fn resolve<Ix: IndexKey>(
    generator: &Generator<Ix>,
    space: &HilbertSpace<Ix>,
) -> Result<crate::hilbert::BitRange, ActionError<Ix>> {
    // Generators with a default space resolve exactly; the rest (bosons,
    // whose occupation cutoff lives in the space) match by algebra and
    // index.
    match ElementarySpace::for_generator(generator) {
        Some(elementary) => space
            .bit_range(&elementary)
            .map_err(|_| ActionError::UnknownGenerator(generator.clone())),
        None => space
            .range_by_index(generator.algebra_id(), generator.index())
            .ok_or_else(|| ActionError::UnknownGenerator(generator.clone())),
    }
}

impl FermionAction {
    fn compile<Ix: IndexKey>(
        section: &[(Generator<Ix>, u32)],
        space: &HilbertSpace<Ix>,
    ) -> Result<Self, ActionError<Ix>> {
        let fermion_mask = space.fermion_mask();
        let mut action = FermionAction::default();
        for (generator, power) in section {
            let Generator::Fermion { dagger, .. } = generator else {
                return Err(ActionError::UnknownGenerator(generator.clone()));
            };
            let range = resolve(generator, space)?;
            if *power > 1 {
                action.vanishes = true;
            }
            action.updates.push(FermionUpdate {
                dagger: *dagger,
                bit: range.lo,
                parity_mask: fermion_mask & ((1u64 << range.lo) - 1),
            });
        }
        action.updates.reverse();
        Ok(action)
    }

    #[inline]
    pub fn act(&self, in_index: u64, out_index: &mut u64, coeff: &mut f64) -> bool {
        if self.vanishes {
            return false;
        }
        let mut state = in_index;
        for update in &self.updates {
            let bit = 1u64 << update.bit;
            if update.dagger {
                if state & bit != 0 {
                    return false;
                }
            } else if state & bit == 0 {
                return false;
            }
            if (state & update.parity_mask).count_ones() & 1 == 1 {
                *coeff = -*coeff;
            }
            state ^= bit;
        }
        *out_index = state;
        true
    }
}

impl BosonAction {
    fn compile<Ix: IndexKey>(
        section: &[(Generator<Ix>, u32)],
        space: &HilbertSpace<Ix>,
    ) -> Result<Self, ActionError<Ix>> {
        let mut updates = Vec::with_capacity(section.len());
        let mut max_occupation = 0;
        for (generator, power) in section {
            let Generator::Boson { dagger, .. } = generator else {
                return Err(ActionError::UnknownGenerator(generator.clone()));
            };
            let range = resolve(generator, space)?;
            let mask = ((1u128 << range.width()) - 1) as u64;
            max_occupation = max_occupation.max(mask);
            updates.push(BosonUpdate {
                dagger: *dagger,
                power: u64::from(*power),
                shift: range.lo,
                mask,
            });
        }
        updates.reverse();
        Ok(BosonAction {
            updates,
            sqrt: SqrtTable::with_max(max_occupation),
        })
    }

    #[inline]
    pub fn act(&self, in_index: u64, out_index: &mut u64, coeff: &mut f64) -> bool {
        let mut state = in_index;
        for update in &self.updates {
            let occupation = (state >> update.shift) & update.mask;
            if update.dagger {
                if occupation + update.power > update.mask {
                    return false;
                }
                for step in 0..update.power {
                    *coeff *= self.sqrt.get(occupation + step + 1);
                }
                state += update.power << update.shift;
            } else {
                if occupation < update.power {
                    return false;
                }
                for step in 0..update.power {
                    *coeff *= self.sqrt.get(occupation - step);
                }
                state -= update.power << update.shift;
            }
        }
        *out_index = state;
        true
    }
}

impl SpinAction {
    fn compile<Ix: IndexKey>(
        section: &[(Generator<Ix>, u32)],
        space: &HilbertSpace<Ix>,
    ) -> Result<Self, ActionError<Ix>> {
        let mut updates = Vec::with_capacity(section.len());
        let mut max_argument = 0;
        for (generator, power) in section {
            let Generator::Spin { multiplicity, component, .. } = generator else {
                return Err(ActionError::UnknownGenerator(generator.clone()));
            };
            let range = resolve(generator, space)?;
            let s2 = u64::from(multiplicity - 1);
            // Largest product under the square root: (s + 1/2)^2 for
            // half-integer spin, s (s + 1) for integer spin.
            let argument_bound = if s2 % 2 == 1 {
                ((s2 + 1) / 2) * ((s2 + 1) / 2)
            } else {
                (s2 / 2) * (s2 / 2 + 1)
            };
            max_argument = max_argument.max(argument_bound);
            updates.push(SpinUpdate {
                s2,
                shift: range.lo,
                mask: ((1u128 << range.width()) - 1) as u64,
                component: *component,
                power: u64::from(*power),
            });
        }
        updates.reverse();
        Ok(SpinAction {
            updates,
            sqrt: SqrtTable::with_max(max_argument),
        })
    }

    #[inline]
    pub fn act(&self, in_index: u64, out_index: &mut u64, coeff: &mut f64) -> bool {
        let mut state = in_index;
        for update in &self.updates {
            let n = (state >> update.shift) & update.mask;
            match update.component {
                SpinComponent::Plus => {
                    if n + update.power > update.s2 {
                        return false;
                    }
                    for step in 0..update.power {
                        *coeff *= self.sqrt.get((update.s2 - (n + step)) * (n + step + 1));
                    }
                    state += update.power << update.shift;
                }
                SpinComponent::Minus => {
                    if n < update.power {
                        return false;
                    }
                    for step in 0..update.power {
                        *coeff *= self.sqrt.get((update.s2 - (n - step) + 1) * (n - step));
                    }
                    state -= update.power << update.shift;
                }
                SpinComponent::Z => {
                    // For integer spin the n = s state is annihilated
                    // outright rather than kept with zero amplitude.
                    if update.s2 % 2 == 0 && n == update.s2 / 2 {
                        return false;
                    }
                    let m = n as f64 - update.s2 as f64 / 2.0;
                    *coeff *= m.powi(update.power as i32);
                }
            }
        }
        *out_index = state;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Gen = Generator<(&'static str, i32)>;
    type Hs = HilbertSpace<(&'static str, i32)>;

    fn one_fermion_space() -> Hs {
        Hs::from_spaces([
            ElementarySpace::fermion(("dn", 0)),
            ElementarySpace::fermion(("up", 0)),
        ])
        .unwrap()
    }

    #[test]
    fn fermion_creation_sets_bit_with_parity() {
        let hs = one_fermion_space();
        // c+_up acting past the occupied dn site picks up a sign.
        let section = [(Gen::fermion(true, ("up", 0)), 1)];
        let action = MonomialAction::compile(&section, &hs).unwrap();

        let mut out = 0;
        let mut coeff = 1.0;
        assert!(action.act(0b01, &mut out, &mut coeff));
        assert_eq!(out, 0b11);
        assert_eq!(coeff, -1.0);

        coeff = 1.0;
        assert!(action.act(0b00, &mut out, &mut coeff));
        assert_eq!(out, 0b10);
        assert_eq!(coeff, 1.0);

        // Doubly-occupied target annihilates.
        assert!(!action.act(0b10, &mut out, &mut coeff));
    }

    #[test]
    fn fermion_square_annihilates_everything() {
        let hs = one_fermion_space();
        let section = [(Gen::fermion(true, ("up", 0)), 2)];
        let action = MonomialAction::compile(&section, &hs).unwrap();
        let mut out = 0;
        let mut coeff = 1.0;
        assert!(!action.act(0b00, &mut out, &mut coeff));
    }

    #[test]
    fn boson_ladder_coefficients() {
        let hs = Hs::from_spaces([ElementarySpace::boson(2, ("x", 0))]).unwrap();
        let raise = MonomialAction::compile(&[(Gen::boson(true, ("x", 0)), 1)], &hs).unwrap();

        let mut out = 0;
        let mut coeff = 1.0;
        assert!(raise.act(1, &mut out, &mut coeff));
        assert_eq!(out, 2);
        assert!((coeff - 2.0_f64.sqrt()).abs() < 1e-12);

        // Occupation 3 is the cutoff for 2 bits.
        assert!(!raise.act(3, &mut out, &mut coeff));
    }

    #[test]
    fn spin_half_raising() {
        let hs = Hs::from_spaces([ElementarySpace::spin(2, ("i", 0))]).unwrap();
        let raise = MonomialAction::compile(&[(Gen::spin(SpinComponent::Plus, ("i", 0)), 1)], &hs).unwrap();

        let mut out = 0;
        let mut coeff = 1.0;
        assert!(raise.act(0, &mut out, &mut coeff));
        assert_eq!(out, 1);
        assert_eq!(coeff, 1.0);
        assert!(!raise.act(1, &mut out, &mut coeff));
    }

    #[test]
    fn integer_spin_sz_annihilates_midpoint() {
        let hs = Hs::from_spaces([ElementarySpace::spin(3, ("j", 0))]).unwrap();
        let sz = MonomialAction::compile(&[(Gen::spin_mult(3, SpinComponent::Z, ("j", 0)), 1)], &hs).unwrap();

        let mut out = 0;
        let mut coeff = 1.0;
        assert!(sz.act(0, &mut out, &mut coeff));
        assert_eq!(out, 0);
        assert_eq!(coeff, -1.0);

        assert!(!sz.act(1, &mut out, &mut coeff));
    }

    #[test]
    fn unknown_space_is_reported() {
        let hs = Hs::new();
        let result = MonomialAction::compile(&[(Gen::fermion(false, ("up", 0)), 1)], &hs);
        assert!(matches!(result, Err(ActionError::UnknownGenerator(_))));
    }
}
