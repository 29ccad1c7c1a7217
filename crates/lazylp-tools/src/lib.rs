//! Instrumentation for lazylp: process memory probes and logging setup.

pub mod logging;
pub mod memory;

pub use logging::{LoggingError, enable_logging};
pub use memory::{MemoryError, MemoryProbe, MemorySnapshot, StageMeasurement};
