//! Code tables for transaction types and currencies.
//!
//! Both tables are closed and scanned linearly with exact string comparison.

use std::fmt;

/// Transaction type resolved from the 2-character type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Purchase,
    Withdrawal,
}

const TRANSACTION_TYPES: [(&str, TransactionType); 2] = [
    ("00", TransactionType::Purchase),
    ("01", TransactionType::Withdrawal),
];

impl TransactionType {
    /// Looks up a type code, returning `None` when it is not in the table.
    pub fn from_code(code: &str) -> Option<Self> {
        TRANSACTION_TYPES
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, kind)| *kind)
    }

    pub fn code(self) -> &'static str {
        match self {
            TransactionType::Purchase => "00",
            TransactionType::Withdrawal => "01",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransactionType::Purchase => "Purchase",
            TransactionType::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Currency resolved from the 3-digit ISO 4217 numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Rub,
}

const CURRENCIES: [(&str, Currency); 4] = [
    ("840", Currency::Usd),
    ("978", Currency::Eur),
    ("826", Currency::Gbp),
    ("643", Currency::Rub),
];

impl Currency {
    /// Looks up a numeric currency code, returning `None` when it is not in the table.
    pub fn from_code(code: &str) -> Option<Self> {
        CURRENCIES
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, currency)| *currency)
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "840",
            Currency::Eur => "978",
            Currency::Gbp => "826",
            Currency::Rub => "643",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Rub => "RUB",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
