//! Declaration methods for variables, the objective and constraint blocks.

use std::rc::Rc;

use crate::types::{BlockKey, Comparison, ConstraintBlock, ObjectiveBlock, ObjectiveSense, Variable};
use lazylp_expr::{Coefficients, Expression, IndexSet, Param, TermStream};

use crate::model::error::ModelError;
use crate::model::{ModelRegistry, expression_streams, validate_name};

impl ModelRegistry {
    /// Declare a variable, replacing any earlier declaration with the same
    /// name.
    pub fn declare_variable(&mut self, variable: Variable) -> Result<(), ModelError> {
        validate_name(variable.name())?;

        let kind = variable.kind();
        let replaced = self
            .variables
            .insert(variable.name().to_string(), variable)
            .is_some();
        tracing::debug!(
            component = "model",
            operation = "declare_variable",
            status = "success",
            kind = kind.as_str(),
            replaced,
            "Declared variable"
        );
        Ok(())
    }

    /// Set the objective, replacing any earlier one.
    pub fn set_objective(
        &mut self,
        expression: impl Into<Expression>,
        sense: ObjectiveSense,
    ) -> Result<(), ModelError> {
        let streams = expression_streams(expression.into())?;
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            streams = streams.len(),
            replaced = self.objective.is_some(),
            "Set objective"
        );
        self.objective = Some(ObjectiveBlock { sense, streams });
        Ok(())
    }

    /// Append a constraint block.
    ///
    /// Without `block_name` the block takes the next auto key. With an
    /// `index`, the block is written once per index value and `rhs` is
    /// evaluated at that value.
    pub fn add_constraint(
        &mut self,
        expression: impl Into<Expression>,
        sense: Comparison,
        rhs: impl Into<Param>,
        index: Option<IndexSet>,
        block_name: Option<&str>,
    ) -> Result<BlockKey, ModelError> {
        let streams = expression_streams(expression.into())?;

        let key = match block_name {
            Some(name) => {
                validate_name(name)?;
                if self.block_names.contains(name) {
                    return Err(ModelError::DuplicateBlockName(name.to_string()));
                }
                self.block_names.insert(name.to_string());
                BlockKey::Named(name.to_string())
            }
            None => {
                let id = self.next_block_id;
                self.next_block_id += 1;
                BlockKey::Auto(id)
            }
        };

        tracing::debug!(
            component = "model",
            operation = "add_constraint",
            status = "success",
            block = %key,
            sense = sense.as_str(),
            streams = streams.len(),
            indexed = index.is_some(),
            "Added constraint block"
        );
        self.constraints.push(ConstraintBlock {
            key: key.clone(),
            streams,
            sense,
            rhs: rhs.into(),
            index,
        });
        Ok(key)
    }

    /// Deferred sum of `var`.
    ///
    /// The index is `index` if given, else the variable's default index. The
    /// returned stream re-walks that index on every pass, so it can be
    /// drained any number of times.
    pub fn make_sum(
        &self,
        var: &str,
        coefficients: Option<Rc<dyn Coefficients>>,
        index: Option<IndexSet>,
    ) -> Result<TermStream, ModelError> {
        let index = match index {
            Some(index) => index,
            None => {
                let variable = self
                    .variables
                    .get(var)
                    .ok_or_else(|| ModelError::UnknownVariable(var.to_string()))?;
                variable
                    .default_index()
                    .cloned()
                    .ok_or_else(|| ModelError::MissingIndex(var.to_string()))?
            }
        };
        Ok(TermStream::sum(var, coefficients, index))
    }
}
