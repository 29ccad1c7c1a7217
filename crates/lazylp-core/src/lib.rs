//! Lazy LP compiler: deferred model registry and streaming writer.

pub mod config;
pub mod model;
pub mod types;
pub mod writer;

pub use config::WriterConfig;
pub use model::{ModelError, ModelRegistry};
pub use types::{
    BlockKey, Comparison, ConstraintBlock, ObjectiveBlock, ObjectiveSense, VarKind, Variable,
};
pub use writer::{
    LinePacker, LpWriter, WriteError, WriteStats, serialize_expression, write_bulk_to,
};
