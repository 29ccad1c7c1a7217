//! Read access to the registry.

use crate::types::{ConstraintBlock, ObjectiveBlock, Variable};

use super::ModelRegistry;

impl ModelRegistry {
    /// Get the number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraint blocks
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Get a variable by name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Variables in name order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn objective(&self) -> Option<&ObjectiveBlock> {
        self.objective.as_ref()
    }

    /// Constraint blocks in declaration order.
    pub fn constraints(&self) -> &[ConstraintBlock] {
        &self.constraints
    }
}
