//! Loosely-typed transaction records
//!
//! Older data files and CSV exports store `amount` either as a number or as
//! a numeric string, ids as arbitrary strings, and dates as ISO strings that
//! may carry a time part. `RawTransaction` accepts all of that and
//! `normalize` turns it into a `Transaction` once, applying a fixed policy:
//!
//! - an unparsable amount becomes zero and is reported
//! - an unparsable date (or unknown type) excludes the record
//! - a non-UUID id is replaced with a fresh one

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;
use super::transaction::{Transaction, TransactionType};

/// An amount as found in the wild
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl Default for RawAmount {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A transaction record before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: RawAmount,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A data-quality problem found while normalizing a record
#[derive(Debug, Clone, PartialEq)]
pub enum DataIssue {
    /// Amount could not be read; it was counted as zero
    UnparsableAmount { raw: String },
    /// Date could not be read; the record is left out of every report
    UnparsableDate { raw: String },
    /// Type was neither expense nor income; the record is left out
    UnknownType { raw: String },
    /// Id was not a UUID; a new one was assigned
    ReplacedId { raw: String },
}

impl DataIssue {
    /// Whether this issue keeps the record out of the working set
    pub fn excludes_record(&self) -> bool {
        matches!(self, Self::UnparsableDate { .. } | Self::UnknownType { .. })
    }
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparsableAmount { raw } => {
                write!(f, "unparsable amount '{}', counted as 0", raw)
            }
            Self::UnparsableDate { raw } => {
                write!(f, "unparsable date '{}', record excluded", raw)
            }
            Self::UnknownType { raw } => {
                write!(f, "unknown transaction type '{}', record excluded", raw)
            }
            Self::ReplacedId { raw } => write!(f, "invalid id '{}', assigned a new one", raw),
        }
    }
}

/// Parse an amount leniently: numbers and numeric strings, else zero.
pub fn coerce_amount(raw: &RawAmount) -> (Money, Option<DataIssue>) {
    let parsed = match raw {
        RawAmount::Number(n) => Money::from_decimal(*n),
        RawAmount::Text(s) => Money::parse(s).ok(),
    };
    match parsed {
        Some(amount) => (amount, None),
        None => (
            Money::zero(),
            Some(DataIssue::UnparsableAmount {
                raw: raw.to_string(),
            }),
        ),
    }
}

/// Parse a calendar date, accepting a trailing time part ("2025-01-05T00:00:00Z").
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    raw.get(..10)
        .filter(|_| raw.as_bytes().get(10) == Some(&b'T'))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

impl RawTransaction {
    /// Convert into a `Transaction`.
    ///
    /// On success returns the transaction plus any non-fatal issues. On
    /// failure returns the issue that excluded the record.
    pub fn normalize(&self) -> Result<(Transaction, Vec<DataIssue>), DataIssue> {
        let kind: TransactionType = self.kind.parse().map_err(|_| DataIssue::UnknownType {
            raw: self.kind.clone(),
        })?;

        let date = parse_date(&self.date).ok_or_else(|| DataIssue::UnparsableDate {
            raw: self.date.clone(),
        })?;

        let mut issues = Vec::new();

        let (amount, amount_issue) = coerce_amount(&self.amount);
        issues.extend(amount_issue);

        let mut txn = Transaction::new(kind, self.category.trim(), amount, date);
        txn.description = self.description.clone().unwrap_or_default();

        if let Some(raw_id) = self.id.as_deref().filter(|s| !s.trim().is_empty()) {
            match raw_id.parse::<TransactionId>() {
                Ok(id) => txn.id = id,
                Err(_) => issues.push(DataIssue::ReplacedId {
                    raw: raw_id.to_string(),
                }),
            }
        }

        if let Some(created_at) = self.created_at {
            txn.created_at = created_at;
            txn.updated_at = self.updated_at.unwrap_or(created_at);
        }

        Ok((txn, issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: &str, amount: RawAmount, date: &str) -> RawTransaction {
        RawTransaction {
            kind: kind.into(),
            category: "Food".into(),
            amount,
            date: date.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_string_and_number_amounts() {
        let (a, issues) = raw("expense", RawAmount::Text("12.50".into()), "2025-01-08")
            .normalize()
            .unwrap();
        assert_eq!(a.amount.cents(), 1250);
        assert!(issues.is_empty());

        let (b, _) = raw("expense", RawAmount::Number(250.0), "2025-01-08")
            .normalize()
            .unwrap();
        assert_eq!(b.amount.cents(), 25000);
    }

    #[test]
    fn test_bad_amount_becomes_zero() {
        let (txn, issues) = raw("expense", RawAmount::Text("twelve".into()), "2025-01-08")
            .normalize()
            .unwrap();
        assert!(txn.amount.is_zero());
        assert_eq!(
            issues,
            vec![DataIssue::UnparsableAmount {
                raw: "twelve".into()
            }]
        );
    }

    #[test]
    fn test_bad_date_excludes_record() {
        let err = raw("expense", RawAmount::Number(1.0), "08/01/2025")
            .normalize()
            .unwrap_err();
        assert!(err.excludes_record());
        assert!(matches!(err, DataIssue::UnparsableDate { .. }));
    }

    #[test]
    fn test_unknown_type_excludes_record() {
        let err = raw("transfer", RawAmount::Number(1.0), "2025-01-08")
            .normalize()
            .unwrap_err();
        assert!(matches!(err, DataIssue::UnknownType { .. }));
    }

    #[test]
    fn test_non_uuid_id_is_replaced() {
        let mut record = raw("income", RawAmount::Number(5000.0), "2025-01-05");
        record.id = Some("1736035200000".into());
        let (_, issues) = record.normalize().unwrap();
        assert!(matches!(issues[0], DataIssue::ReplacedId { .. }));
        assert!(!issues[0].excludes_record());
    }

    #[test]
    fn test_iso_datetime_dates() {
        assert_eq!(
            parse_date("2025-01-05T10:30:00.000Z"),
            NaiveDate::from_ymd_opt(2025, 1, 5)
        );
        assert_eq!(parse_date("2025-01-05"), NaiveDate::from_ymd_opt(2025, 1, 5));
        assert_eq!(parse_date("2025-13-05"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_deserialize_legacy_json() {
        let json = r#"{"id":"1736035200000","type":"expense","category":"Food",
                       "amount":"250","description":"","date":"2025-01-08"}"#;
        let record: RawTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount, RawAmount::Text("250".into()));
        let (txn, _) = record.normalize().unwrap();
        assert_eq!(txn.amount, Money::from_units(250));
    }
}
