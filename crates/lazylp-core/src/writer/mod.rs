//! Streaming LP writer.
//!
//! The writer drains every term stream of a [`ModelRegistry`] exactly once per
//! pass and packs the terms into fixed-width lines. At no point does it hold
//! more than one pending line or collect a stream into a container.
//!
//! Output layout:
//!
//! ```text
//! MIN
//! <objective terms, packed>
//! ST
//! [<label>:]
//! <constraint terms, packed>
//! <sense> <rhs>
//! ...
//! [BOUNDS / GENERAL / BINARY]
//! end
//! ```

mod bulk;
mod declarations;
mod error;
mod packer;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use lazylp_expr::{Index, TermStream};

use crate::config::WriterConfig;
use crate::model::ModelRegistry;
use crate::types::{ConstraintBlock, ObjectiveSense};

pub use bulk::write_bulk_to;
pub use error::WriteError;
pub use packer::LinePacker;

pub const CONSTRAINTS_HEADER: &str = "ST";
pub const BOUNDS_HEADER: &str = "BOUNDS";
pub const GENERAL_HEADER: &str = "GENERAL";
pub const BINARY_HEADER: &str = "BINARY";
pub const END_MARKER: &str = "end";

/// Counters for one pass over a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub lines: u64,
    pub bytes: u64,
    pub terms: u64,
}

/// Writes a [`ModelRegistry`] in the LP dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct LpWriter {
    config: WriterConfig,
}

impl LpWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Write `registry` to `path`, creating or truncating the file.
    ///
    /// Returns the absolute path of the written file. The file is closed on
    /// every exit path; on failure its contents are a partial write.
    pub fn write(
        &self,
        registry: &ModelRegistry,
        path: impl AsRef<Path>,
    ) -> Result<PathBuf, WriteError> {
        let path = path.as_ref();
        let started = Instant::now();
        let result = File::create(path)
            .map_err(WriteError::from)
            .and_then(|file| self.drain_model(registry, BufWriter::new(file)));

        match result {
            Ok(stats) => {
                let absolute = std::path::absolute(path)?;
                tracing::info!(
                    component = "writer",
                    operation = "write",
                    status = "success",
                    path = %absolute.display(),
                    lines = stats.lines,
                    bytes = stats.bytes,
                    terms = stats.terms,
                    duration_ms = started.elapsed().as_secs_f64() * 1000.0,
                    "Wrote LP file"
                );
                Ok(absolute)
            }
            Err(err) => {
                tracing::error!(
                    component = "writer",
                    operation = "write",
                    status = "error",
                    code = err.code(),
                    path = %path.display(),
                    "{err}"
                );
                Err(err)
            }
        }
    }

    /// Write `registry` to an arbitrary sink.
    pub fn write_to<W: Write>(
        &self,
        registry: &ModelRegistry,
        sink: W,
    ) -> Result<WriteStats, WriteError> {
        let started = Instant::now();
        let stats = self.drain_model(registry, sink).inspect_err(|err| {
            tracing::error!(
                component = "writer",
                operation = "write_to",
                status = "error",
                code = err.code(),
                "{err}"
            );
        })?;
        tracing::debug!(
            component = "writer",
            operation = "write_to",
            status = "success",
            lines = stats.lines,
            bytes = stats.bytes,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Wrote LP output"
        );
        Ok(stats)
    }

    /// Dry run: drain every stream into a null sink and report the size the
    /// real write would have.
    pub fn estimate(&self, registry: &ModelRegistry) -> Result<WriteStats, WriteError> {
        let started = Instant::now();
        let stats = self.drain_model(registry, io::sink())?;
        tracing::debug!(
            component = "writer",
            operation = "estimate",
            status = "success",
            lines = stats.lines,
            bytes = stats.bytes,
            terms = stats.terms,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Estimated LP output size"
        );
        Ok(stats)
    }

    /// Write arbitrary words to `path` under the bulk width budget.
    ///
    /// Returns the absolute path of the written file.
    pub fn write_bulk<I, S>(&self, path: impl AsRef<Path>, words: I) -> Result<PathBuf, WriteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        let started = Instant::now();
        let width = self.config.bulk_width;
        let result = File::create(path)
            .map_err(WriteError::from)
            .and_then(|file| write_bulk_to(BufWriter::new(file), words, width))
            .and_then(|stats| Ok((std::path::absolute(path)?, stats)));

        match result {
            Ok((absolute, stats)) => {
                tracing::info!(
                    component = "writer",
                    operation = "write_bulk",
                    status = "success",
                    path = %absolute.display(),
                    lines = stats.lines,
                    bytes = stats.bytes,
                    duration_ms = started.elapsed().as_secs_f64() * 1000.0,
                    "Bulk write complete"
                );
                Ok(absolute)
            }
            Err(err) => {
                tracing::error!(
                    component = "writer",
                    operation = "write_bulk",
                    status = "error",
                    code = err.code(),
                    path = %path.display(),
                    "{err}"
                );
                Err(err)
            }
        }
    }

    fn drain_model<W: Write>(
        &self,
        registry: &ModelRegistry,
        sink: W,
    ) -> Result<WriteStats, WriteError> {
        let mut packer = LinePacker::new(sink, self.config.expression_width);

        match registry.objective() {
            Some(objective) => {
                packer.write_line(objective.sense().as_str())?;
                serialize_expression(&mut packer, objective.streams(), None, None)?;
            }
            None => {
                tracing::debug!(
                    component = "writer",
                    operation = "write_objective",
                    status = "skipped",
                    "No objective declared; writing an empty MIN objective"
                );
                packer.write_line(ObjectiveSense::Min.as_str())?;
            }
        }

        packer.write_line(CONSTRAINTS_HEADER)?;
        for block in registry.constraints() {
            write_block(&mut packer, block)?;
        }

        if self.config.declarations {
            declarations::write_declarations(&mut packer, registry)?;
        }

        packer.write_line(END_MARKER)?;
        let (_, stats) = packer.finish()?;
        Ok(stats)
    }
}

/// Drain `streams` into `packer`.
///
/// The first term of the expression is written as-is. Later terms are
/// prefixed with ` + `, or with ` - ` in place of their own leading `-`.
/// On a wrap, `+` stays at the end of the flushed line and a negative term
/// starts the next line with its own `-`, so only a term wider than the
/// budget can produce an over-wide line. Each stream ends its last line, so
/// the next stream starts on a new line.
/// `suffix` goes on its own line after all streams.
pub fn serialize_expression<W: Write>(
    packer: &mut LinePacker<W>,
    streams: &[TermStream],
    suffix: Option<&str>,
    row: Option<&Index>,
) -> Result<(), WriteError> {
    let mut first = true;
    for stream in streams {
        for term in stream.terms(row) {
            let term = term?;
            if first {
                packer.push_word(&term)?;
                first = false;
            } else if let Some(negated) = term.strip_prefix('-') {
                packer.push_or_wrap(" - ", negated, &term)?;
            } else {
                packer.push_joined("+", &term)?;
            }
            packer.count_term();
        }
        packer.flush_line()?;
    }
    if let Some(suffix) = suffix {
        packer.write_line(suffix)?;
    }
    Ok(())
}

fn write_block<W: Write>(
    packer: &mut LinePacker<W>,
    block: &ConstraintBlock,
) -> Result<(), WriteError> {
    match block.index() {
        None => write_row(packer, block, None),
        Some(index) => {
            for row in index.iter() {
                write_row(packer, block, Some(&row))?;
            }
            Ok(())
        }
    }
}

fn write_row<W: Write>(
    packer: &mut LinePacker<W>,
    block: &ConstraintBlock,
    row: Option<&Index>,
) -> Result<(), WriteError> {
    if let Some(label) = block.key().label() {
        match row {
            Some(row) => packer.write_line(&format!("{label}_{row}:"))?,
            None => packer.write_line(&format!("{label}:"))?,
        }
    }
    let rhs = block.rhs().value_at(row)?;
    let suffix = format!("{} {}", block.sense().as_str(), rhs);
    serialize_expression(packer, block.streams(), Some(&suffix), row)
}

#[cfg(test)]
mod tests;
