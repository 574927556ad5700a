//! Card Report CLI
//!
//! Reads a fixed-width transaction file and writes the transaction report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.txt report.xml
//! ```
//!
//! # Exit Codes
//!
//! - `0`: report written, no input problems
//! - `1`: fatal error, nothing or only part of the report written
//! - `2`: report written, but some lines or records were dropped or had
//!   unknown codes
//!
//! # Logging
//!
//! Diagnostics are appended to `card_report_<YYMMDD>.log` in the working
//! directory. If that file cannot be opened they go to stderr instead.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `error` or `debug` to control logging verbosity
//!   (default: `trace`)

use card_report::{convert, logging, ReportError, Result, RunSummary};
use chrono::{Local, NaiveDateTime};
use log::{debug, warn};
use std::env;
use std::path::Path;
use std::process;

fn main() {
    let started_at = Local::now().naive_local();
    if let Err(e) = logging::init(started_at) {
        eprintln!("Warning: cannot open log file ({}), logging to stderr", e);
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(logging::DEFAULT_FILTER),
        )
        .init();
    }

    match run(started_at) {
        Ok(summary) if summary.has_diagnostics() => process::exit(2),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(started_at: NaiveDateTime) -> Result<RunSummary> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(ReportError::MissingArgument);
    }

    let input_path = Path::new(&args[1]);
    let output_path = Path::new(&args[2]);

    let summary = convert(input_path, output_path, started_at)?;

    debug!("Run summary: {:?}", summary);
    if summary.has_diagnostics() {
        warn!(
            "{} of {} lines rejected, {} unresolved codes, {} records skipped for bad dates",
            summary.input.lines_rejected,
            summary.input.lines_read,
            summary.input.unresolved_codes,
            summary.records_skipped
        );
    }

    Ok(summary)
}
