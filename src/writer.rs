use std::io::Write;

use anyhow::Context as _;

use crate::encoding::{OutputEncoding, Unmappable};
use crate::formats::{TranscriptLine, WriteStats};
use crate::repair::repair_line;

const REPORT_MARKER: &str = "###############";

/// Why a line could not be encoded for the destination. I/O failures are not
/// represented here; they end the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    /// The code page has no slot for this character (latin1).
    #[error("cannot encode character {ch:?} at position {position} as {encoding}")]
    UnsupportedCodePoint {
        ch: char,
        position: usize,
        encoding: OutputEncoding,
    },
    /// Any other encoding failure (ascii).
    #[error("{encoding} codec cannot encode character {ch:?} at position {position}")]
    Unencodable {
        ch: char,
        position: usize,
        encoding: OutputEncoding,
    },
}

impl WriteError {
    fn classify(encoding: OutputEncoding, unmappable: Unmappable) -> Self {
        let Unmappable { ch, position } = unmappable;
        match encoding {
            OutputEncoding::Latin1 => Self::UnsupportedCodePoint {
                ch,
                position,
                encoding,
            },
            OutputEncoding::Ascii | OutputEncoding::Utf8 => Self::Unencodable {
                ch,
                position,
                encoding,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Written,
    Repaired,
    Dropped,
}

/// Owns the transcript destination for the duration of a run.
pub struct TranscriptWriter<W: Write> {
    out: W,
    encoding: OutputEncoding,
    stats: WriteStats,
}

impl<W: Write> TranscriptWriter<W> {
    pub fn new(out: W, encoding: OutputEncoding) -> Self {
        Self {
            out,
            encoding,
            stats: WriteStats::default(),
        }
    }

    /// Write one line, retrying once with a repaired copy when it cannot be
    /// encoded. A line that fails both attempts is reported on stderr and
    /// skipped. Errors from the destination itself are returned.
    pub fn write_line(&mut self, line: &TranscriptLine<'_>) -> anyhow::Result<LineOutcome> {
        let err = match self.encode(&line.text) {
            Ok(bytes) => {
                self.write_bytes(&bytes, line)?;
                self.stats.written += 1;
                return Ok(LineOutcome::Written);
            }
            Err(err) => err,
        };

        let repaired = repair_line(&line.text, &err);
        match self.encode(&repaired) {
            Ok(bytes) => {
                self.write_bytes(&bytes, line)?;
                tracing::debug!(link = %line.link, error = %err, "repaired transcript line");
                self.stats.repaired += 1;
                Ok(LineOutcome::Repaired)
            }
            Err(retry_err) => {
                tracing::warn!(link = %line.link, error = %retry_err, "dropped transcript line");
                report_dropped_line(line, &retry_err);
                self.stats.dropped += 1;
                Ok(LineOutcome::Dropped)
            }
        }
    }

    pub fn write_all<'a>(
        &mut self,
        lines: impl IntoIterator<Item = TranscriptLine<'a>>,
    ) -> anyhow::Result<WriteStats> {
        let before = self.stats;
        for line in lines {
            self.write_line(&line)?;
        }
        Ok(WriteStats {
            written: self.stats.written - before.written,
            repaired: self.stats.repaired - before.repaired,
            dropped: self.stats.dropped - before.dropped,
        })
    }

    pub fn stats(&self) -> WriteStats {
        self.stats
    }

    /// Flush and hand back the destination.
    pub fn finish(mut self) -> anyhow::Result<(W, WriteStats)> {
        self.out.flush().context("flush transcript output")?;
        Ok((self.out, self.stats))
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>, WriteError> {
        self.encoding
            .encode(text)
            .map_err(|unmappable| WriteError::classify(self.encoding, unmappable))
    }

    fn write_bytes(&mut self, bytes: &[u8], line: &TranscriptLine<'_>) -> anyhow::Result<()> {
        self.out
            .write_all(bytes)
            .with_context(|| format!("write transcript line from {}", line.link))
    }
}

fn report_dropped_line(line: &TranscriptLine<'_>, err: &WriteError) {
    eprintln!("{REPORT_MARKER}");
    eprintln!("{}", line.link);
    eprintln!("{}", line.text.trim_end_matches('\n'));
    eprintln!("{err}");
    eprintln!("{REPORT_MARKER}");
}
