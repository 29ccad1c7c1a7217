//! Deferred expression types.
//!
//! - `coefficients`: key-based coefficient lookups over index values
//! - `param`: constant-or-per-index values (bounds, right-hand sides)
//! - `term`: TermStream: restartable producer of formatted terms
//! - `expression`: Expression: literal text or an ordered list of streams
//! - `error`: Errors raised while producing terms

pub mod coefficients;
pub mod error;
pub mod expression;
pub mod param;
pub mod term;

pub use coefficients::{Coefficients, FnCoefficients};
pub use error::ExprError;
pub use expression::Expression;
pub use param::Param;
pub use term::{TermStream, Terms};
