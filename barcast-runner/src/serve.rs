//! Line-delimited JSON serve loop.
//!
//! One batch per input line. Success objects go to `output`; `{"error": ..}`
//! and `{"warning": ..}` objects go to `errors`. A failed batch never stops
//! the loop; only I/O failures on the streams themselves do.

use barcast_core::store::TradeStore;
use barcast_core::Pipeline;
use serde::Serialize;
use serde_json::json;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{info, info_span, warn};

/// Hex characters of the input hash kept in log spans.
const FINGERPRINT_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    /// Non-blank lines read.
    pub batches: usize,
    pub processed: usize,
    pub failed: usize,
    pub warnings: usize,
}

/// Short content hash of an input line, for correlating log lines.
pub fn batch_fingerprint(line: &str) -> String {
    let hash = blake3::hash(line.as_bytes()).to_hex();
    hash.as_str()[..FINGERPRINT_LEN].to_string()
}

fn emit<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<(), ServeError> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer).map_err(ServeError::Write)?;
    writer.flush().map_err(ServeError::Write)
}

/// Run the loop until `input` is exhausted.
pub fn serve<R, W, E>(
    pipeline: &Pipeline,
    store: &mut dyn TradeStore,
    mut input: R,
    mut output: W,
    mut errors: E,
) -> Result<ServeSummary, ServeError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = ServeSummary::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).map_err(ServeError::Read)? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                summary.batches += 1;
                summary.failed += 1;
                warn!(line = line_no, "input line is not valid UTF-8");
                emit(&mut errors, &json!({ "error": e.to_string() }))?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        summary.batches += 1;

        let span = info_span!("batch", line = line_no, fingerprint = %batch_fingerprint(line));
        let _enter = span.enter();

        match pipeline.process_line(line, store) {
            Ok(report) => {
                emit(&mut output, &report.output)?;
                for warning in &report.warnings {
                    emit(&mut errors, &json!({ "warning": warning.to_string() }))?;
                }
                summary.processed += 1;
                summary.warnings += report.warnings.len();
            }
            Err(e) => {
                warn!(error = %e, "batch rejected");
                emit(&mut errors, &json!({ "error": e.to_string() }))?;
                summary.failed += 1;
            }
        }
    }

    info!(
        batches = summary.batches,
        processed = summary.processed,
        failed = summary.failed,
        warnings = summary.warnings,
        "input exhausted"
    );
    Ok(summary)
}
