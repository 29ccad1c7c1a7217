//! Term production errors.

use crate::index::Index;

/// Failure while draining a deferred producer.
///
/// These surface at write time because they depend on caller-supplied
/// lookups; the writer propagates them unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Coefficient lookup has no value for an index the sum iterates over.
    MissingCoefficient { var: String, index: Index },
    /// Per-index parameter asked for an index outside its domain, or asked
    /// without any index at all.
    MissingParam { index: Option<Index> },
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::MissingCoefficient { .. } => "EXPR_MISSING_COEFFICIENT",
            ExprError::MissingParam { .. } => "EXPR_MISSING_PARAM",
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprError::MissingCoefficient { var, index } => write!(
                f,
                "[{}] No coefficient for `{}` at index {}",
                self.code(),
                var,
                index
            ),
            ExprError::MissingParam { index: Some(index) } => write!(
                f,
                "[{}] Parameter has no value at index {}",
                self.code(),
                index
            ),
            ExprError::MissingParam { index: None } => write!(
                f,
                "[{}] Per-index parameter used without an index",
                self.code()
            ),
        }
    }
}

impl std::error::Error for ExprError {}
