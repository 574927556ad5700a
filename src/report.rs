//! Report rendering.
//!
//! Walks stored records in order, writes one `<msg>` line per record that
//! passes the date check, and closes with a `<totals>` element.

use crate::amount::MinorUnits;
use crate::error::{ReportError, Result};
use crate::transaction::{Timestamp, TransactionRecord};
use chrono::{Datelike, NaiveDateTime};
use log::{error, trace};
use std::borrow::Cow;
use std::io::Write;

/// First masked character of the card number.
pub const MASK_OFFSET: usize = 6;

/// Number of masked characters.
pub const MASK_LEN: usize = 6;

/// Format of the `date` attribute on the totals element.
pub const TOTALS_DATE_FORMAT: &str = "%Y.%m.%d %H:%M";

/// Replaces characters 6 through 11 with `*`, keeping the length.
///
/// Works on characters. Decoded card numbers are always ASCII, so these are
/// also byte positions 6 through 11.
///
/// ```
/// use card_report::report::mask_card_number;
///
/// assert_eq!(mask_card_number("1234567890123456"), "123456******3456");
/// ```
pub fn mask_card_number(card_number: &str) -> String {
    card_number
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if (MASK_OFFSET..MASK_OFFSET + MASK_LEN).contains(&i) {
                '*'
            } else {
                c
            }
        })
        .collect()
}

/// Coarse sanity check on a transaction date.
///
/// Only rejects month > 12, day > 31 or a year after `current_year`.
/// Dates such as 31 February still pass.
pub fn is_plausible(timestamp: &Timestamp, current_year: i32) -> bool {
    timestamp.month <= 12
        && timestamp.day <= 31
        && i64::from(timestamp.year) <= i64::from(current_year)
}

/// Human-readable description of a record, e.g.
/// `Purchase with card 123456******3456 on 06.15.2023 14:30, amount 1.5 USD.`
///
/// Unresolved type or currency labels are left empty.
pub fn describe(record: &TransactionRecord) -> String {
    let ts = &record.timestamp;
    format!(
        "{} with card {} on {:02}.{:02}.{} {:02}:{:02}, amount {} {}.",
        record.transaction_type.map(|t| t.name()).unwrap_or_default(),
        mask_card_number(&record.card_number),
        ts.month,
        ts.day,
        ts.year,
        ts.hour,
        ts.minute,
        record.amount,
        record.currency.map(|c| c.name()).unwrap_or_default(),
    )
}

/// Count and sum of the records that made it into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub count: u64,
    pub sum: MinorUnits,
}

impl Totals {
    fn add(&mut self, amount: MinorUnits) -> Result<()> {
        self.sum = self
            .sum
            .checked_add(amount)
            .ok_or(ReportError::AmountOverflow)?;
        self.count += 1;
        Ok(())
    }
}

/// Result of rendering one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub totals: Totals,

    /// Records left out because their date failed [`is_plausible`]
    pub skipped: usize,
}

/// Writes the full report document.
///
/// `generated_at` is the report generation moment: its year bounds the date
/// check and it is printed on the totals element. Passing the same records
/// and time always produces the same bytes.
pub fn render_report<'a, I, W>(
    records: I,
    generated_at: NaiveDateTime,
    mut writer: W,
) -> Result<RenderSummary>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
    W: Write,
{
    let current_year = generated_at.year();
    let mut summary = RenderSummary::default();

    writeln!(writer, "<root>")?;
    writeln!(writer, "<msg-list>")?;

    for (idx, record) in records.into_iter().enumerate() {
        let position = idx + 1;
        trace!("Processing transaction #{}", position);

        if !is_plausible(&record.timestamp, current_year) {
            let ts = &record.timestamp;
            error!(
                "Transaction #{}: Incorrect transaction date data {:02}.{:02}.{}",
                position, ts.month, ts.day, ts.year
            );
            summary.skipped += 1;
            continue;
        }

        writeln!(writer, "\t<msg>{}</msg>", escape_text(&describe(record)))?;
        summary.totals.add(record.amount)?;
        trace!("Transaction #{} written", position);
    }

    writeln!(writer, "</msg-list>")?;
    writeln!(
        writer,
        "<totals cnt=\"{}\" sum=\"{}\" date=\"{}\"/>",
        summary.totals.count,
        summary.totals.sum.value(),
        generated_at.format(TOTALS_DATE_FORMAT)
    )?;
    writeln!(writer, "</root>")?;
    writer.flush()?;

    Ok(summary)
}

/// Escapes markup characters in element text.
fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
