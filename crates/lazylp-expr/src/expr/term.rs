//! Restartable term producers.
//!
//! A [`TermStream`] never holds terms. It holds the recipe (variable name,
//! index set, optional coefficient lookup) and rebuilds a lazy iterator every
//! time [`TermStream::terms`] is called.

use std::fmt;
use std::rc::Rc;

use crate::expr::coefficients::Coefficients;
use crate::expr::error::ExprError;
use crate::index::{Index, IndexSet};

/// One pass over a stream: formatted terms, or the lookup failure that
/// interrupted it.
pub type Terms = Box<dyn Iterator<Item = Result<String, ExprError>>>;

type Producer = dyn Fn(Option<&Index>) -> Terms;

#[derive(Clone)]
pub struct TermStream {
    var: Rc<str>,
    producer: Rc<Producer>,
}

impl TermStream {
    /// Sum of `var` over `index`, optionally scaled per index.
    ///
    /// Terms render as `"<var>_<i>"`, or `"<coef> <var>_<i>"` when a lookup
    /// is given. Coefficients use the shortest `f64` display, so `2.0`
    /// renders as `2` and negative values carry a leading `-`.
    pub fn sum(
        var: impl Into<String>,
        coefficients: Option<Rc<dyn Coefficients>>,
        index: IndexSet,
    ) -> Self {
        let var: Rc<str> = Rc::from(var.into());
        let name = Rc::clone(&var);
        let producer = move |_row: Option<&Index>| -> Terms {
            let name = Rc::clone(&name);
            match &coefficients {
                None => Box::new(index.iter().map(move |i| Ok(format!("{name}_{i}")))),
                Some(lookup) => {
                    let lookup = Rc::clone(lookup);
                    Box::new(index.iter().map(move |i| match lookup.coefficient(&i) {
                        Some(coef) => Ok(format!("{coef} {name}_{i}")),
                        None => Err(ExprError::MissingCoefficient {
                            var: name.to_string(),
                            index: i,
                        }),
                    }))
                }
            }
        };
        Self {
            var,
            producer: Rc::new(producer),
        }
    }

    /// Custom producer. `row` is the constraint row currently being written
    /// (`None` for the objective and unindexed blocks), which lets a stream
    /// vary its terms per row.
    pub fn from_fn<F, I>(var: impl Into<String>, producer: F) -> Self
    where
        F: Fn(Option<&Index>) -> I + 'static,
        I: IntoIterator<Item = Result<String, ExprError>>,
        I::IntoIter: 'static,
    {
        Self {
            var: Rc::from(var.into()),
            producer: Rc::new(move |row: Option<&Index>| -> Terms {
                Box::new(producer(row).into_iter())
            }),
        }
    }

    /// Variable this stream sums over.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// Start a fresh pass over the terms.
    pub fn terms(&self, row: Option<&Index>) -> Terms {
        (self.producer)(row)
    }
}

impl fmt::Debug for TermStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermStream")
            .field("var", &self.var)
            .finish_non_exhaustive()
    }
}
