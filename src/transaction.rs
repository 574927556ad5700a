//! Fixed-width record layout and decoding.
//!
//! Each input line carries five fields with no delimiters:
//!
//! | field            | offset | length |
//! |------------------|--------|--------|
//! | transaction type | 0      | 2      |
//! | card number      | 2      | 16     |
//! | amount           | 18     | 12     |
//! | timestamp        | 30     | 14     |
//! | currency code    | 44     | 3      |

use crate::amount::{parse_digits, MinorUnits};
use crate::codes::{Currency, TransactionType};
use crate::error::{ReportError, Result};
use log::error;

/// Length of a record line, excluding the line terminator.
pub const RECORD_LENGTH: usize = 47;

const TYPE_FIELD: (usize, usize) = (0, 2);
const CARD_FIELD: (usize, usize) = (2, 16);
const AMOUNT_FIELD: (usize, usize) = (18, 12);
const TIMESTAMP_FIELD: (usize, usize) = (30, 14);
const CURRENCY_FIELD: (usize, usize) = (44, 3);

/// Offset and length of year, month, day, hour, minute, second inside the
/// `YYYYMMDDHHMMSS` timestamp field.
const TIMESTAMP_PARTS: [(&str, usize, usize); 6] = [
    ("year", 0, 4),
    ("month", 4, 2),
    ("day", 6, 2),
    ("hour", 8, 2),
    ("minute", 10, 2),
    ("second", 12, 2),
];

/// The five fixed-width fields of one line, not yet interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub type_code: &'a str,
    pub card_number: &'a str,
    pub amount: &'a str,
    pub timestamp: &'a str,
    pub currency_code: &'a str,
}

impl<'a> RawRecord<'a> {
    /// Splits a line into its fields by offset.
    ///
    /// Lines of the wrong length are rejected before any field is read.
    /// Offsets are byte offsets, so lines with non-ASCII characters are
    /// rejected as well.
    pub fn split(line: &'a str) -> Result<Self> {
        if line.len() != RECORD_LENGTH {
            return Err(ReportError::LineLength {
                expected: RECORD_LENGTH,
                actual: line.len(),
            });
        }
        if !line.is_ascii() {
            return Err(ReportError::NotAscii);
        }

        Ok(RawRecord {
            type_code: field(line, TYPE_FIELD, "transaction type")?,
            card_number: field(line, CARD_FIELD, "card number")?,
            amount: field(line, AMOUNT_FIELD, "amount")?,
            timestamp: field(line, TIMESTAMP_FIELD, "timestamp")?,
            currency_code: field(line, CURRENCY_FIELD, "currency")?,
        })
    }

    /// Interprets the fields into a record.
    ///
    /// Unknown type or currency codes are logged and leave the label empty;
    /// malformed numbers reject the whole record.
    pub fn decode(&self, line_no: usize) -> Result<TransactionRecord> {
        let transaction_type = TransactionType::from_code(self.type_code);
        if transaction_type.is_none() {
            error!(
                "Line {}: Incorrect transaction type data {:?}",
                line_no, self.type_code
            );
        }

        let amount = MinorUnits::from_field(self.amount)?;
        let timestamp = Timestamp::from_field(self.timestamp)?;

        let currency = Currency::from_code(self.currency_code);
        if currency.is_none() {
            error!(
                "Line {}: Incorrect transaction currency data {:?}",
                line_no, self.currency_code
            );
        }

        Ok(TransactionRecord {
            transaction_type,
            card_number: self.card_number.to_string(),
            amount,
            timestamp,
            currency,
        })
    }
}

fn field<'a>(
    line: &'a str,
    (offset, len): (usize, usize),
    name: &'static str,
) -> Result<&'a str> {
    line.get(offset..offset + len)
        .ok_or(ReportError::FieldBoundary { field: name })
}

/// Decodes one input line into a record.
pub fn decode_line(line: &str, line_no: usize) -> Result<TransactionRecord> {
    RawRecord::split(line)?.decode(line_no)
}

/// Date and time sub-fields exactly as they appear in the input.
///
/// No calendar validation happens here; see [`crate::report::is_plausible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Timestamp {
    /// Parses a 14-character `YYYYMMDDHHMMSS` field.
    pub fn from_field(field: &str) -> Result<Self> {
        let mut parts = [0u32; 6];
        for (slot, (name, offset, len)) in parts.iter_mut().zip(TIMESTAMP_PARTS) {
            let digits = field
                .get(offset..offset + len)
                .ok_or(ReportError::FieldBoundary { field: name })?;
            *slot = parse_digits(name, digits)?;
        }

        let [year, month, day, hour, minute, second] = parts;
        Ok(Timestamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }
}

/// A decoded transaction line. Never modified after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// `None` when the type code was not in the table
    pub transaction_type: Option<TransactionType>,

    /// Stored verbatim; masking happens when the report is rendered
    pub card_number: String,

    pub amount: MinorUnits,

    pub timestamp: Timestamp,

    /// `None` when the currency code was not in the table
    pub currency: Option<Currency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT_LINE: &str = "001234567890123456000000000150202306151430008";

    fn line(type_code: &str, amount: &str, timestamp: &str, currency: &str) -> String {
        format!("{}1234567890123456{}{}{}", type_code, amount, timestamp, currency)
    }

    #[test]
    fn test_split_fields_by_offset() {
        let text = line("00", "000000000150", "20230615143000", "840");
        let raw = RawRecord::split(&text).unwrap();

        assert_eq!(raw.type_code, "00");
        assert_eq!(raw.card_number, "1234567890123456");
        assert_eq!(raw.amount, "000000000150");
        assert_eq!(raw.timestamp, "20230615143000");
        assert_eq!(raw.currency_code, "840");
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(SHORT_LINE.len(), 45);
        assert!(matches!(
            RawRecord::split(SHORT_LINE),
            Err(ReportError::LineLength { expected: 47, actual: 45 })
        ));

        let long = format!("{}0", line("00", "000000000150", "20230615143000", "840"));
        assert!(matches!(
            RawRecord::split(&long),
            Err(ReportError::LineLength { actual: 48, .. })
        ));
        assert!(RawRecord::split("").is_err());
    }

    #[test]
    fn test_rejects_non_ascii_line() {
        // 'é' is two bytes and straddles the end of the type field
        let text = "0é23456789012345600000000015020230615143000840";
        assert_eq!(text.len(), RECORD_LENGTH);
        assert!(matches!(RawRecord::split(text), Err(ReportError::NotAscii)));

        // 47 bytes with a multi-byte card number
        let text = "00ü2345678901234500000000015020230615143000840";
        assert_eq!(text.len(), RECORD_LENGTH);
        assert!(matches!(decode_line(text, 1), Err(ReportError::NotAscii)));
    }

    #[test]
    fn test_timestamp_rejects_multibyte_boundary() {
        assert!(matches!(
            Timestamp::from_field("20230é15143000"),
            Err(ReportError::FieldBoundary { field: "month" })
        ));
    }

    #[test]
    fn test_decode_purchase() {
        let text = line("00", "000000000150", "20230615143000", "840");
        let record = decode_line(&text, 1).unwrap();

        assert_eq!(record.transaction_type, Some(TransactionType::Purchase));
        assert_eq!(record.card_number, "1234567890123456");
        assert_eq!(record.amount.value(), 150);
        assert_eq!(
            record.timestamp,
            Timestamp {
                year: 2023,
                month: 6,
                day: 15,
                hour: 14,
                minute: 30,
                second: 0,
            }
        );
        assert_eq!(record.currency, Some(Currency::Usd));
    }

    #[test]
    fn test_decode_keeps_record_with_unknown_codes() {
        let text = line("07", "000000000150", "20230615143000", "123");
        let record = decode_line(&text, 1).unwrap();

        assert_eq!(record.transaction_type, None);
        assert_eq!(record.currency, None);
        assert_eq!(record.amount.value(), 150);
    }

    #[test]
    fn test_decode_all_zero_amount() {
        let text = line("01", "000000000000", "20230615143000", "978");
        let record = decode_line(&text, 1).unwrap();
        assert_eq!(record.amount, MinorUnits::ZERO);
        assert_eq!(record.transaction_type, Some(TransactionType::Withdrawal));
    }

    #[test]
    fn test_decode_rejects_non_numeric_amount() {
        let text = line("00", "00000000x150", "20230615143000", "840");
        assert!(matches!(
            decode_line(&text, 1),
            Err(ReportError::InvalidNumber { field: "amount", .. })
        ));
    }

    #[test]
    fn test_decode_rejects_non_numeric_timestamp() {
        let text = line("00", "000000000150", "2023O615143000", "840");
        assert!(matches!(
            decode_line(&text, 1),
            Err(ReportError::InvalidNumber { field: "month", .. })
        ));
    }

    #[test]
    fn test_timestamp_is_not_range_checked() {
        let ts = Timestamp::from_field("99991340996199").unwrap();
        assert_eq!(ts.year, 9999);
        assert_eq!(ts.month, 13);
        assert_eq!(ts.day, 40);
        assert_eq!(ts.hour, 99);
        assert_eq!(ts.minute, 61);
        assert_eq!(ts.second, 99);
    }

    #[test]
    fn test_card_number_is_not_validated() {
        let text = "00ABCD-EFGH-IJ-KL000000000015020230615143000840";
        assert_eq!(text.len(), RECORD_LENGTH);
        let record = decode_line(text, 1).unwrap();
        assert_eq!(record.card_number, "ABCD-EFGH-IJ-KL0");
    }
}
