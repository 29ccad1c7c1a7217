//! Objective and constraint expressions.

use crate::expr::term::TermStream;

/// Left-hand side of an objective or constraint block.
///
/// Only `Streams` can be serialized. A `Literal` is text that was never
/// expanded into term streams and is rejected when a block is declared.
#[derive(Debug, Clone)]
pub enum Expression {
    Literal(String),
    Streams(Vec<TermStream>),
}

impl Expression {
    pub fn is_literal(&self) -> bool {
        matches!(self, Expression::Literal(_))
    }
}

impl From<TermStream> for Expression {
    fn from(stream: TermStream) -> Self {
        Expression::Streams(vec![stream])
    }
}

impl From<Vec<TermStream>> for Expression {
    fn from(streams: Vec<TermStream>) -> Self {
        Expression::Streams(streams)
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression::Literal(text.to_string())
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Expression::Literal(text)
    }
}
