//! # Card Report
//!
//! Converts a fixed-width file of payment-card transactions into a report
//! listing each transaction in words plus a count and sum of the run.
//!
//! ## Design Principles
//!
//! - **Read, then render**: every line is decoded into the store before any
//!   output is written
//! - **Local failures**: a malformed line or implausible date skips only
//!   that line or record
//! - **Integer amounts**: minor units are summed as `u64`; `rust_decimal`
//!   formats them for display
//! - **Deterministic output**: the same input and generation time give the
//!   same bytes
//!
//! ## Example
//!
//! ```no_run
//! use card_report::ReportEngine;
//! use std::io::Cursor;
//!
//! let input = "00123456789012345600000000015020230615143000840\n";
//! let mut engine = ReportEngine::new();
//! engine.process_lines(Cursor::new(input)).unwrap();
//! engine
//!     .write_report(std::io::stdout(), chrono::Local::now().naive_local())
//!     .unwrap();
//! ```

pub mod amount;
pub mod codes;
pub mod engine;
pub mod error;
pub mod logging;
pub mod report;
pub mod store;
pub mod transaction;

pub use amount::MinorUnits;
pub use codes::{Currency, TransactionType};
pub use engine::{convert, InputStats, ReportEngine, RunSummary};
pub use error::{ReportError, Result};
pub use report::{RenderSummary, Totals};
pub use store::TransactionStore;
pub use transaction::{decode_line, RawRecord, Timestamp, TransactionRecord};
