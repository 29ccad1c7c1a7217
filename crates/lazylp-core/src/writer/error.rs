//! Writer error types.

use lazylp_expr::ExprError;

/// Error type for write operations.
///
/// A failed write leaves the output in an undefined partial state; no retry
/// or rollback is attempted.
#[derive(Debug)]
pub enum WriteError {
    /// The sink rejected a write, or the output file could not be opened.
    Io(std::io::Error),
    /// A caller-supplied coefficient, bound or rhs lookup failed mid-write.
    Expr(ExprError),
}

impl WriteError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            WriteError::Io(_) => "WRITE_IO",
            WriteError::Expr(err) => err.code(),
        }
    }
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::Io(err) => {
                write!(f, "[{}] Failed to write LP output: {}", self.code(), err)
            }
            WriteError::Expr(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::Io(err) => Some(err),
            WriteError::Expr(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for WriteError {
    fn from(err: std::io::Error) -> Self {
        WriteError::Io(err)
    }
}

impl From<ExprError> for WriteError {
    fn from(err: ExprError) -> Self {
        WriteError::Expr(err)
    }
}
