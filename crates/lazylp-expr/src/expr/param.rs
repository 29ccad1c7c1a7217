//! Constant-or-per-index values used for bounds and right-hand sides.

use std::fmt;
use std::rc::Rc;

use crate::expr::coefficients::Coefficients;
use crate::expr::error::ExprError;
use crate::index::Index;

#[derive(Clone)]
enum Source {
    Constant(f64),
    PerIndex(Rc<dyn Coefficients>),
}

/// A value that may vary with the index it is evaluated at.
///
/// Scalars are normalized into a constant producer, so consumers always go
/// through [`Param::value_at`] and never special-case the scalar form.
#[derive(Clone)]
pub struct Param {
    source: Source,
}

impl Param {
    pub fn constant(value: f64) -> Self {
        Self {
            source: Source::Constant(value),
        }
    }

    pub fn per_index(values: Rc<dyn Coefficients>) -> Self {
        Self {
            source: Source::PerIndex(values),
        }
    }

    /// Value at `index`. A constant ignores the index.
    pub fn value_at(&self, index: Option<&Index>) -> Result<f64, ExprError> {
        match (&self.source, index) {
            (Source::Constant(value), _) => Ok(*value),
            (Source::PerIndex(values), Some(index)) => {
                values
                    .coefficient(index)
                    .ok_or_else(|| ExprError::MissingParam {
                        index: Some(index.clone()),
                    })
            }
            (Source::PerIndex(_), None) => Err(ExprError::MissingParam { index: None }),
        }
    }

    /// The constant value, if this parameter does not vary.
    pub fn as_constant(&self) -> Option<f64> {
        match self.source {
            Source::Constant(value) => Some(value),
            Source::PerIndex(_) => None,
        }
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::constant(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::constant(f64::from(value))
    }
}

impl From<Rc<dyn Coefficients>> for Param {
    fn from(values: Rc<dyn Coefficients>) -> Self {
        Param::per_index(values)
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Source::Constant(value) => f.debug_tuple("Param::Constant").field(&value).finish(),
            Source::PerIndex(_) => f.write_str("Param::PerIndex(..)"),
        }
    }
}
