//! Append-until-overflow writer for arbitrary word sequences.

use std::io::Write;

use super::packer::LinePacker;
use super::{WriteError, WriteStats};

/// Drain `words` into `sink` under a flat `width` budget.
///
/// Words are written verbatim: no separators, no sign handling, no suffix.
/// Only one pending line is held at a time, so `words` may be arbitrarily
/// long.
pub fn write_bulk_to<W, I, S>(sink: W, words: I, width: usize) -> Result<WriteStats, WriteError>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut packer = LinePacker::new(sink, width);
    for word in words {
        packer.push_word(word.as_ref())?;
        packer.count_term();
    }
    let (_, stats) = packer.finish()?;
    Ok(stats)
}
