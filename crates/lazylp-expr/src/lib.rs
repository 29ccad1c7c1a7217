//! Deferred expression building blocks for lazylp.
//!
//! Nothing in this crate materializes an index set or an expression. Every
//! producer hands out a fresh lazy iterator each time it is asked, so the same
//! model can be drained more than once (e.g. a size estimate followed by the
//! real write).

pub mod expr;
pub mod index;

pub use expr::{Coefficients, ExprError, Expression, FnCoefficients, Param, TermStream, Terms};
pub use index::{Index, IndexSet};
