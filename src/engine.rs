//! Pipeline driver.
//!
//! Reads the whole input into a [`TransactionStore`] first, then renders the
//! report from it. A bad line or a bad date only skips that line or record;
//! the run always reaches the totals once the input is exhausted.

use crate::error::{ReportError, Result};
use crate::report::{render_report, RenderSummary, Totals};
use crate::store::TransactionStore;
use crate::transaction::decode_line;
use chrono::NaiveDateTime;
use log::{error, trace};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Counters collected while reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputStats {
    /// Every line read, including rejected ones
    pub lines_read: usize,

    /// Lines dropped for bad length, bad encoding or unparseable numbers
    pub lines_rejected: usize,

    /// Type or currency codes missing from the code tables
    pub unresolved_codes: usize,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub input: InputStats,
    pub records_stored: usize,
    pub records_skipped: usize,
    pub totals: Totals,
}

impl RunSummary {
    /// `true` when some input was dropped, left unresolved or filtered out.
    pub fn has_diagnostics(&self) -> bool {
        self.input.lines_rejected > 0
            || self.input.unresolved_codes > 0
            || self.records_skipped > 0
    }
}

/// Decodes input lines into a store and renders the report from it.
pub struct ReportEngine {
    store: TransactionStore,
    stats: InputStats,
}

impl ReportEngine {
    /// Creates an engine with an empty store.
    pub fn new() -> Self {
        ReportEngine {
            store: TransactionStore::new(),
            stats: InputStats::default(),
        }
    }

    /// Reads and decodes every line from `reader`.
    ///
    /// Lines are read as raw bytes, so a line that is not valid text is
    /// rejected like any other malformed line. Rejected lines are logged at
    /// error level and skipped. Only I/O errors from the reader abort
    /// processing.
    pub fn process_lines<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            self.stats.lines_read += 1;
            trace!("Line {}: Processing input data", line_no);

            let decoded = std::str::from_utf8(trim_line_ending(&buf))
                .map_err(|_| ReportError::NotAscii)
                .and_then(|line| decode_line(line, line_no));

            match decoded {
                Ok(record) => {
                    self.stats.unresolved_codes += usize::from(record.transaction_type.is_none())
                        + usize::from(record.currency.is_none());
                    self.store.append(record);
                }
                Err(e) => {
                    error!("Line {}: {}", line_no, e);
                    self.stats.lines_rejected += 1;
                }
            }
        }

        Ok(())
    }

    /// Renders the report for everything read so far.
    pub fn write_report<W: Write>(
        &self,
        writer: W,
        generated_at: NaiveDateTime,
    ) -> Result<RenderSummary> {
        render_report(&self.store, generated_at, writer)
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn stats(&self) -> InputStats {
        self.stats
    }
}

/// Strips a trailing `\n` or `\r\n`.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts the input file at `input` into a report at `output`.
///
/// The input file is closed before the output file is created.
pub fn convert(input: &Path, output: &Path, generated_at: NaiveDateTime) -> Result<RunSummary> {
    let mut engine = ReportEngine::new();

    {
        trace!("Opening input file {}", input.display());
        let file = File::open(input)?;
        engine.process_lines(BufReader::new(file))?;
        trace!("Input file read");
    }

    trace!("Creating output file {}", output.display());
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let rendered = engine.write_report(&mut writer, generated_at)?;
    writer.flush()?;
    trace!("Transaction output completed");

    let summary = RunSummary {
        input: engine.stats(),
        records_stored: engine.store().len(),
        records_skipped: rendered.skipped,
        totals: rendered.totals,
    };
    trace!("Conversion completed");

    Ok(summary)
}
