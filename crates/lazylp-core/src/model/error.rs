//! Model declaration errors.

/// Errors raised while declaring a model.
///
/// Every variant is produced at declaration time, so a model that reaches the
/// writer has already passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Variable kind outside the supported set
    InvalidKind(String),
    /// Variable or block name not legal in the LP dialect
    InvalidName(String),
    /// Expression is not a non-empty list of term streams
    InvalidExpression { reason: &'static str },
    /// Objective sense is not MIN or MAX
    InvalidSense(String),
    /// Constraint comparison is not <=, >= or ==
    InvalidComparison(String),
    /// Summation over a variable that was never declared
    UnknownVariable(String),
    /// Summation over a declared variable without a default index
    MissingIndex(String),
    /// Explicit block name already taken
    DuplicateBlockName(String),
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidKind(_) => "VARIABLE_INVALID_KIND",
            ModelError::InvalidName(_) => "MODEL_INVALID_NAME",
            ModelError::InvalidExpression { .. } => "EXPR_INVALID",
            ModelError::InvalidSense(_) => "OBJECTIVE_INVALID_SENSE",
            ModelError::InvalidComparison(_) => "CONSTRAINT_INVALID_COMPARISON",
            ModelError::UnknownVariable(_) => "VARIABLE_UNKNOWN",
            ModelError::MissingIndex(_) => "VARIABLE_MISSING_INDEX",
            ModelError::DuplicateBlockName(_) => "CONSTRAINT_DUPLICATE_BLOCK",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidKind(kind) => {
                write!(f, "[{}] Unrecognized variable kind '{}'", self.code(), kind)
            }
            ModelError::InvalidName(name) => {
                write!(f, "[{}] '{}' is not a valid LP name", self.code(), name)
            }
            ModelError::InvalidExpression { reason } => {
                write!(f, "[{}] Invalid expression: {}", self.code(), reason)
            }
            ModelError::InvalidSense(sense) => write!(
                f,
                "[{}] Objective sense must be MIN or MAX (got '{}')",
                self.code(),
                sense
            ),
            ModelError::InvalidComparison(sense) => write!(
                f,
                "[{}] Constraint sense must be <=, >= or == (got '{}')",
                self.code(),
                sense
            ),
            ModelError::UnknownVariable(name) => write!(
                f,
                "[{}] Unrecognized variable name '{}'; declare it or pass an index",
                self.code(),
                name
            ),
            ModelError::MissingIndex(name) => write!(
                f,
                "[{}] Variable '{}' has no default index; pass one explicitly",
                self.code(),
                name
            ),
            ModelError::DuplicateBlockName(name) => write!(
                f,
                "[{}] Constraint block '{}' already exists",
                self.code(),
                name
            ),
        }
    }
}

impl std::error::Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::ModelError;

    #[test]
    fn display_prefixes_error_code() {
        let rendered = ModelError::UnknownVariable("y".to_string()).to_string();
        assert!(rendered.starts_with("[VARIABLE_UNKNOWN]"));
        assert!(rendered.contains("'y'"));

        let rendered = ModelError::DuplicateBlockName("cap".to_string()).to_string();
        assert!(rendered.contains("CONSTRAINT_DUPLICATE_BLOCK"));
        assert!(rendered.contains("cap"));
    }

    #[test]
    fn error_code_is_stable() {
        assert_eq!(
            ModelError::InvalidKind(String::new()).code(),
            "VARIABLE_INVALID_KIND"
        );
        assert_eq!(
            ModelError::InvalidExpression { reason: "" }.code(),
            "EXPR_INVALID"
        );
        assert_eq!(
            ModelError::InvalidSense(String::new()).code(),
            "OBJECTIVE_INVALID_SENSE"
        );
    }
}
