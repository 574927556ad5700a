//! Log file setup for the CLI.
//!
//! Diagnostics go to `card_report_<YYMMDD>.log` in the working directory,
//! one `[timestamp] [LEVEL] message` entry per line.

use chrono::{Local, NaiveDate, NaiveDateTime};
use env_logger::{Builder, Env, Target};
use log::Level;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "trace";

const ENTRY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Name of the log file for runs started on `date`.
pub fn log_file_name(date: NaiveDate) -> String {
    format!("card_report_{}.log", date.format("%y%m%d"))
}

/// Writes one log entry line.
pub fn write_entry<W: Write>(
    writer: &mut W,
    timestamp: NaiveDateTime,
    level: Level,
    message: &dyn fmt::Display,
) -> io::Result<()> {
    writeln!(
        writer,
        "[{}] [{}] {}",
        timestamp.format(ENTRY_TIMESTAMP_FORMAT),
        level,
        message
    )
}

/// Installs the global logger writing to the dated log file.
///
/// Entries are appended, so several runs on one day share a file. Returns
/// the path of the log file.
pub fn init(started_at: NaiveDateTime) -> io::Result<PathBuf> {
    let path = PathBuf::from(log_file_name(started_at.date()));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            write_entry(buf, Local::now().naive_local(), record.level(), record.args())
        })
        .init();

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_micro_opt(h, m, s, 1250))
            .unwrap()
    }

    #[test]
    fn test_log_file_name_uses_two_digit_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(log_file_name(date), "card_report_240309.log");

        let date = NaiveDate::from_ymd_opt(2031, 12, 31).unwrap();
        assert_eq!(log_file_name(date), "card_report_311231.log");
    }

    #[test]
    fn test_write_entry_format() {
        let mut out = Vec::new();
        write_entry(&mut out, at(8, 5, 42), Level::Error, &"Incorrect input data").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[2024-03-09 08:05:42.001250] [ERROR] Incorrect input data\n"
        );
    }

    #[test]
    fn test_write_entry_trace_level() {
        let mut out = Vec::new();
        write_entry(&mut out, at(23, 0, 0), Level::Trace, &format_args!("Line {}", 3)).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("[2024-03-09 23:00:00.001250] [TRACE] Line 3"));
    }
}
