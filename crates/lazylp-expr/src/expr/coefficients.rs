//! Coefficient lookups keyed by index value.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::index::Index;

/// Anything that maps an index value to a numeric coefficient.
///
/// Returning `None` means the index is outside the lookup's domain.
pub trait Coefficients {
    fn coefficient(&self, index: &Index) -> Option<f64>;
}

impl<S: BuildHasher> Coefficients for HashMap<Index, f64, S> {
    fn coefficient(&self, index: &Index) -> Option<f64> {
        self.get(index).copied()
    }
}

impl<S: BuildHasher> Coefficients for HashMap<i64, f64, S> {
    fn coefficient(&self, index: &Index) -> Option<f64> {
        index.as_int().and_then(|key| self.get(&key).copied())
    }
}

impl Coefficients for BTreeMap<Index, f64> {
    fn coefficient(&self, index: &Index) -> Option<f64> {
        self.get(index).copied()
    }
}

impl Coefficients for BTreeMap<i64, f64> {
    fn coefficient(&self, index: &Index) -> Option<f64> {
        index.as_int().and_then(|key| self.get(&key).copied())
    }
}

/// Positional lookup: `Int(i)` reads element `i`.
impl Coefficients for [f64] {
    fn coefficient(&self, index: &Index) -> Option<f64> {
        let pos = usize::try_from(index.as_int()?).ok()?;
        self.get(pos).copied()
    }
}

impl Coefficients for Vec<f64> {
    fn coefficient(&self, index: &Index) -> Option<f64> {
        self.as_slice().coefficient(index)
    }
}

/// Adapter turning a closure into a coefficient lookup.
#[derive(Debug, Clone, Copy)]
pub struct FnCoefficients<F>(pub F);

impl<F> Coefficients for FnCoefficients<F>
where
    F: Fn(&Index) -> Option<f64>,
{
    fn coefficient(&self, index: &Index) -> Option<f64> {
        (self.0)(index)
    }
}
