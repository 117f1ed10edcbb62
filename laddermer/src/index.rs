use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;

/// Types usable as a single position of a composite operator index.
pub trait IndexAtom: Clone + Ord + Eq + Hash + fmt::Debug + fmt::Display {}

macro_rules! impl_index_atom {
    ($($atom:ty),* $(,)?) => {
        $(impl IndexAtom for $atom {})*
    };
}

impl_index_atom!(i8, i16, i32, i64, u8, u16, u32, u64, usize, char, bool, String, &'static str);

/// Identity of a degree of freedom.
///
/// An index key is an ordered tuple of printable atoms; the order is
/// lexicographic and equality is elementwise. Fixed-arity tuples of
/// [`IndexAtom`]s realize the compile-time variant, [`DynIndex`] the
/// runtime one.
pub trait IndexKey: Clone + Ord + Eq + Hash + fmt::Debug {
    /// Write the key as a comma-separated list of atoms, without brackets.
    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

macro_rules! impl_index_key_for_atom {
    ($($atom:ty),* $(,)?) => {
        $(impl IndexKey for $atom {
            fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{self}")
            }
        })*
    };
}

impl_index_key_for_atom!(i8, i16, i32, i64, u8, u16, u32, u64, usize, char, bool, String, &'static str);

macro_rules! impl_index_key_for_tuple {
    ($(($first:ident . $first_pos:tt $(, $rest:ident . $rest_pos:tt)*)),* $(,)?) => {
        $(impl<$first: IndexAtom $(, $rest: IndexAtom)*> IndexKey for ($first, $($rest,)*) {
            fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.$first_pos)?;
                $(write!(f, ",{}", self.$rest_pos)?;)*
                Ok(())
            }
        })*
    };
}

impl_index_key_for_tuple!(
    (A.0),
    (A.0, B.1),
    (A.0, B.1, C.2),
    (A.0, B.1, C.2, D.3),
);

/// Adapter rendering any [`IndexKey`] through [`fmt::Display`].
pub struct DisplayIndex<'a, Ix: IndexKey>(pub &'a Ix);

impl<Ix: IndexKey> fmt::Display for DisplayIndex<'_, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write(f)
    }
}

/// One position of a [`DynIndex`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub enum DynAtom {
    Int(i64),
    Real(f64),
    Symbol(String),
}

impl DynAtom {
    fn kind_rank(&self) -> u8 {
        match self {
            DynAtom::Int(_) => 0,
            DynAtom::Real(_) => 1,
            DynAtom::Symbol(_) => 2,
        }
    }
}

impl PartialEq for DynAtom {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DynAtom {}

impl PartialOrd for DynAtom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DynAtom {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DynAtom::Int(a), DynAtom::Int(b)) => a.cmp(b),
            (DynAtom::Real(a), DynAtom::Real(b)) => a.total_cmp(b),
            (DynAtom::Symbol(a), DynAtom::Symbol(b)) => a.cmp(b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

impl Hash for DynAtom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind_rank().hash(state);
        match self {
            DynAtom::Int(value) => value.hash(state),
            // Consistent with the total_cmp-based equality.
            DynAtom::Real(value) => value.to_bits().hash(state),
            DynAtom::Symbol(value) => value.hash(state),
        }
    }
}

impl fmt::Display for DynAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynAtom::Int(value) => write!(f, "{value}"),
            DynAtom::Real(value) => write!(f, "{value}"),
            DynAtom::Symbol(value) => write!(f, "{value}"),
        }
    }
}

macro_rules! impl_from_for_dyn_atom {
    ($($src:ty => $variant:ident ($conv:expr)),* $(,)?) => {
        $(impl From<$src> for DynAtom {
            fn from(value: $src) -> Self {
                DynAtom::$variant($conv(value))
            }
        })*
    };
}

impl_from_for_dyn_atom!(
    i8 => Int(i64::from),
    i16 => Int(i64::from),
    i32 => Int(i64::from),
    i64 => Int(std::convert::identity),
    u8 => Int(i64::from),
    u16 => Int(i64::from),
    u32 => Int(i64::from),
    f32 => Real(f64::from),
    f64 => Real(std::convert::identity),
    String => Symbol(std::convert::identity),
    &str => Symbol(str::to_owned),
);

/// Runtime-typed index: a sequence of atoms, each independently an
/// integer, a real number or a symbol.
///
/// Shorter sequences order before longer ones; sequences of equal length
/// compare elementwise by atom kind and then value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct DynIndex {
    atoms: Vec<DynAtom>,
}

impl DynIndex {
    #[must_use]
    pub fn new() -> Self {
        DynIndex { atoms: Vec::new() }
    }

    #[must_use]
    pub fn from_atoms(atoms: Vec<DynAtom>) -> Self {
        DynIndex { atoms }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> impl Iterator<Item = &DynAtom> {
        self.atoms.iter()
    }
}

impl PartialOrd for DynIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DynIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.atoms
            .len()
            .cmp(&other.atoms.len())
            .then_with(|| self.atoms.cmp(&other.atoms))
    }
}

impl IndexKey for DynIndex {
    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.atoms.iter().join(","))
    }
}

impl fmt::Display for DynIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        IndexKey::write(self, f)
    }
}

macro_rules! impl_from_atom_for_dyn_index {
    ($($src:ty),* $(,)?) => {
        $(impl From<$src> for DynIndex {
            fn from(value: $src) -> Self {
                DynIndex { atoms: vec![DynAtom::from(value)] }
            }
        })*
    };
}

impl_from_atom_for_dyn_index!(i8, i16, i32, i64, u8, u16, u32, f32, f64, String, &str);

macro_rules! impl_from_tuple_for_dyn_index {
    ($(($($name:ident . $pos:tt),+)),* $(,)?) => {
        $(impl<$($name: Into<DynAtom>),+> From<($($name,)+)> for DynIndex {
            fn from(value: ($($name,)+)) -> Self {
                DynIndex { atoms: vec![$(value.$pos.into()),+] }
            }
        })*
    };
}

impl_from_tuple_for_dyn_index!(
    (A.0, B.1),
    (A.0, B.1, C.2),
    (A.0, B.1, C.2, D.3),
);

/// Build a [`DynIndex`] from a heterogeneous list of atoms:
/// `dyn_index!["up", 0, 0.5]`.
#[macro_export]
macro_rules! dyn_index {
    ($($atom:expr),* $(,)?) => {
        $crate::index::DynIndex::from_atoms(vec![$($crate::index::DynAtom::from($atom)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<Ix: IndexKey>(index: &Ix) -> String {
        DisplayIndex(index).to_string()
    }

    #[test]
    fn tuple_keys_print_comma_separated() {
        assert_eq!(render(&("dn", 0)), "dn,0");
        assert_eq!(render(&(2, "dn")), "2,dn");
        assert_eq!(render(&("a", 1, 'x')), "a,1,x");
    }

    #[test]
    fn dyn_index_orders_by_length_first() {
        let short = dyn_index![9];
        let long = dyn_index![0, 0];
        assert!(short < long);
    }

    #[test]
    fn dyn_atom_kinds_are_ranked() {
        assert!(DynAtom::from(100) < DynAtom::from(0.5));
        assert!(DynAtom::from(0.5) < DynAtom::from("a"));
    }

    #[test]
    fn dyn_index_displays_atoms() {
        assert_eq!(dyn_index!["up", 1].to_string(), "up,1");
        assert_eq!(dyn_index![0.5, "x"].to_string(), "0.5,x");
        assert_eq!(DynIndex::new().to_string(), "");
    }
}
