//! Model registry: deferred variables, objective and constraint blocks.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Declaration methods and `make_sum`
//! - [`storage`]: Read access for the writer and callers
//!
//! The registry only does bookkeeping. It never iterates an index set or a
//! term stream; that happens in the writer.

mod builder;
mod error;
mod storage;

use crate::types::{ConstraintBlock, ObjectiveBlock, Variable};
use lazylp_expr::{Expression, TermStream};
use std::collections::{BTreeMap, HashSet};

pub use error::ModelError;

/// Authoritative store of declared variables, the objective and constraint
/// blocks.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    pub(crate) variables: BTreeMap<String, Variable>,
    pub(crate) objective: Option<ObjectiveBlock>,
    // Declaration order.
    pub(crate) constraints: Vec<ConstraintBlock>,
    pub(crate) block_names: HashSet<String>,
    pub(crate) next_block_id: u32,
}

impl ModelRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

const NAME_SYMBOLS: &str = "_.!\"#$%&(),;?@'{}~";

/// LP names start with a letter and continue with letters, digits or a
/// small set of symbols.
pub(crate) fn validate_name(name: &str) -> Result<(), ModelError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || NAME_SYMBOLS.contains(c))
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ModelError::InvalidName(name.to_string()))
    }
}

/// Unwrap an expression into its term streams, rejecting anything the writer
/// could not drain.
pub(crate) fn expression_streams(expression: Expression) -> Result<Vec<TermStream>, ModelError> {
    match expression {
        Expression::Literal(_) => Err(ModelError::InvalidExpression {
            reason: "literal text must be expanded into term streams",
        }),
        Expression::Streams(streams) if streams.is_empty() => Err(ModelError::InvalidExpression {
            reason: "expression has no term streams",
        }),
        Expression::Streams(streams) => Ok(streams),
    }
}
