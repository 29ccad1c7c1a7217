//! Writer configuration types.

/// Width budget for expression lines.
pub const DEFAULT_EXPRESSION_WIDTH: usize = 80;
/// Width budget for the bulk writer.
pub const DEFAULT_BULK_WIDTH: usize = 255;

/// Configuration options for the LP writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    /// Maximum characters per expression line, unless a single term is longer.
    pub expression_width: usize,
    /// Maximum characters per line for [`LpWriter::write_bulk`](crate::LpWriter::write_bulk).
    pub bulk_width: usize,
    /// Emit BOUNDS, GENERAL and BINARY sections before `end`.
    pub declarations: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            expression_width: DEFAULT_EXPRESSION_WIDTH,
            bulk_width: DEFAULT_BULK_WIDTH,
            declarations: false,
        }
    }
}

impl WriterConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expression line width.
    pub fn with_expression_width(mut self, width: usize) -> Self {
        self.expression_width = width;
        self
    }

    /// Set the bulk line width.
    pub fn with_bulk_width(mut self, width: usize) -> Self {
        self.bulk_width = width;
        self
    }

    /// Enable or disable the variable declaration sections.
    pub fn with_declarations(mut self, enabled: bool) -> Self {
        self.declarations = enabled;
        self
    }

    /// Check if this configuration matches the defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
