//! Fixed-width line packing over a byte sink.

use std::io::{self, Write};

use super::WriteStats;

/// Packs words into lines no wider than `width` characters.
///
/// Holds at most one pending line. The width check happens before a word is
/// accepted: if the word would overflow the pending line, that line is
/// written first. A word wider than `width` on its own still goes out whole,
/// alone on its line.
#[derive(Debug)]
pub struct LinePacker<W: Write> {
    sink: W,
    pending: String,
    pending_chars: usize,
    width: usize,
    stats: WriteStats,
}

impl<W: Write> LinePacker<W> {
    pub fn new(sink: W, width: usize) -> Self {
        Self {
            sink,
            pending: String::new(),
            pending_chars: 0,
            width,
            stats: WriteStats::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Text buffered for the current line.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Push `word` verbatim, starting a new line if it would overflow.
    pub fn push_word(&mut self, word: &str) -> io::Result<()> {
        self.push_or_wrap("", word, word)
    }

    /// Push `prefix` and `body` onto the pending line if both fit. Otherwise
    /// flush and start the next line with `wrapped` alone.
    pub fn push_or_wrap(&mut self, prefix: &str, body: &str, wrapped: &str) -> io::Result<()> {
        let chars = prefix.chars().count() + body.chars().count();
        if self.pending_chars + chars <= self.width {
            self.append(prefix);
            self.append(body);
            return Ok(());
        }
        self.flush_line()?;
        self.append(wrapped);
        Ok(())
    }

    /// Push `body` joined to the pending line by ` <op> `.
    ///
    /// On a wrap the operator ends the flushed line and `body` starts the
    /// next one bare. If not even the operator fits, it goes out on a line
    /// of its own (or in front of `body` when that fits).
    pub fn push_joined(&mut self, op: &str, body: &str) -> io::Result<()> {
        let op_chars = op.chars().count();
        let body_chars = body.chars().count();
        if self.pending_chars + op_chars + body_chars + 2 <= self.width {
            self.append(" ");
            self.append(op);
            self.append(" ");
            self.append(body);
            return Ok(());
        }

        if !self.pending.is_empty() && self.pending_chars + op_chars + 1 <= self.width {
            self.append(" ");
            self.append(op);
            self.flush_line()?;
        } else {
            self.flush_line()?;
            self.append(op);
            if op_chars + body_chars + 1 <= self.width {
                self.append(" ");
                self.append(body);
                return Ok(());
            }
            self.flush_line()?;
        }
        self.append(body);
        Ok(())
    }

    fn append(&mut self, text: &str) {
        self.pending.push_str(text);
        self.pending_chars += text.chars().count();
    }

    /// Write the pending line, if any, followed by a newline.
    pub fn flush_line(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        self.sink.write_all(self.pending.as_bytes())?;
        self.sink.write_all(b"\n")?;
        self.stats.lines += 1;
        self.stats.bytes += self.pending.len() as u64 + 1;
        self.pending.clear();
        self.pending_chars = 0;
        Ok(())
    }

    /// Flush pending text, then write `line` on its own, unpacked.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.flush_line()?;
        self.sink.write_all(line.as_bytes())?;
        self.sink.write_all(b"\n")?;
        self.stats.lines += 1;
        self.stats.bytes += line.len() as u64 + 1;
        Ok(())
    }

    pub(crate) fn count_term(&mut self) {
        self.stats.terms += 1;
    }

    pub fn stats(&self) -> WriteStats {
        self.stats
    }

    /// Flush everything and hand back the sink.
    pub fn finish(mut self) -> io::Result<(W, WriteStats)> {
        self.flush_line()?;
        self.sink.flush()?;
        Ok((self.sink, self.stats))
    }
}
