//! Transaction record model
//!
//! A `TransactionRecord` is the validated form of a document from the store.
//! Documents are parsed exactly once, here, so nothing past this module deals
//! with stringly-typed fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use super::ids::RecordId;
use super::money::Money;

/// Title used when a document carries neither a title nor a description
pub const UNTITLED: &str = "Sem título";

/// Date format used by stored documents
pub const DOCUMENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// What kind of movement a transaction is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Investment,
}

impl TransactionKind {
    /// Wire name used in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Investment => "investment",
        }
    }

    /// All kinds, in display order
    pub fn all() -> [Self; 3] {
        [Self::Income, Self::Expense, Self::Investment]
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Investment => write!(f, "Investment"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "investment" => Ok(Self::Investment),
            other => Err(RecordError::UnknownType(other.to_string())),
        }
    }
}

/// Settlement status of a transaction
///
/// Statuses the app does not know are preserved verbatim so that a document
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Paid,
    Received,
    Consolidated,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Received => "received",
            Self::Consolidated => "consolidated",
            Self::Other(s) => s,
        }
    }

    /// Whether income with this status counts toward the consolidated balance
    pub fn settles_income(&self) -> bool {
        matches!(self, Self::Consolidated | Self::Paid | Self::Received)
    }

    /// Whether an expense with this status counts toward the consolidated balance
    pub fn settles_expense(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl From<String> for TransactionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "paid" => Self::Paid,
            "received" => Self::Received,
            "consolidated" => Self::Consolidated,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for TransactionStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a document could not become a record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("document is not a JSON object")]
    NotAnObject,

    #[error("missing \"type\" field")]
    MissingType,

    #[error("unknown transaction type {0:?}")]
    UnknownType(String),

    #[error("missing \"date\" field")]
    MissingDate,

    #[error("date {0:?} is not yyyy-MM-dd")]
    InvalidDate(String),

    #[error("amount {0} is out of range")]
    AmountOutOfRange(String),
}

/// A validated transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: RecordId,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub amount: Money,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// Result of parsing one document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub record: TransactionRecord,
    /// The document had no usable numeric `amount`; zero was used
    pub amount_defaulted: bool,
}

impl TransactionRecord {
    /// Create a record with the given essentials and no category or description
    pub fn new(
        kind: TransactionKind,
        status: TransactionStatus,
        amount: Money,
        date: NaiveDate,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            kind,
            status,
            amount,
            date,
            title: title.into(),
            category: String::new(),
            description: String::new(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Parse a store document
    ///
    /// `type` and `date` are required. An `amount` whose cents do not fit in
    /// an `i64` is rejected. A missing or non-numeric `amount` is read as
    /// zero, a missing `status` as pending, and the title falls back to the
    /// description and then to [`UNTITLED`].
    pub fn from_document(id: RecordId, document: &Value) -> Result<ParsedDocument, RecordError> {
        let fields = document.as_object().ok_or(RecordError::NotAnObject)?;

        let kind: TransactionKind = fields
            .get("type")
            .and_then(Value::as_str)
            .ok_or(RecordError::MissingType)?
            .parse()?;

        let date_str = fields
            .get("date")
            .and_then(Value::as_str)
            .ok_or(RecordError::MissingDate)?;
        let date = parse_document_date(date_str)?;

        let (amount, amount_defaulted) = match fields.get("amount").and_then(Value::as_f64) {
            Some(value) => (
                Money::from_decimal(value)
                    .ok_or_else(|| RecordError::AmountOutOfRange(value.to_string()))?,
                false,
            ),
            None => (Money::zero(), true),
        };

        let status = fields
            .get("status")
            .and_then(Value::as_str)
            .map(TransactionStatus::from)
            .unwrap_or_default();

        let text = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let description = text("description");
        let title = text("title")
            .or_else(|| description.clone())
            .unwrap_or_else(|| UNTITLED.to_string());

        Ok(ParsedDocument {
            record: Self {
                id,
                kind,
                status,
                amount,
                date,
                title,
                category: text("category").unwrap_or_default(),
                description: description.unwrap_or_default(),
            },
            amount_defaulted,
        })
    }

    /// Render the record as a store document
    pub fn to_document(&self) -> Value {
        let mut document = json!({
            "amount": self.amount.to_decimal(),
            "type": self.kind.as_str(),
            "status": self.status.as_str(),
            "date": self.date.format(DOCUMENT_DATE_FORMAT).to_string(),
            "title": self.title,
            "category": self.category,
        });
        if !self.description.is_empty() {
            document["description"] = Value::String(self.description.clone());
        }
        document
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format(DOCUMENT_DATE_FORMAT),
            self.kind,
            self.title,
            self.amount
        )
    }
}

/// A document left out of a batch, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Store key, when the document came from the store
    pub document_id: Option<RecordId>,
    pub reason: RecordError,
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.document_id {
            Some(id) => write!(f, "{}: {}", id, self.reason),
            None => write!(f, "(no id): {}", self.reason),
        }
    }
}

/// Outcome of parsing a batch of documents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBatch {
    pub records: Vec<TransactionRecord>,
    pub skipped: Vec<SkippedRecord>,
    /// Records kept with a zero amount because theirs was missing
    pub defaulted_amounts: usize,
}

/// Parse documents, keeping the good ones and listing the rest
///
/// Documents without a store key get a fresh id.
pub fn parse_documents<'a, I>(documents: I) -> ParsedBatch
where
    I: IntoIterator<Item = (Option<RecordId>, &'a Value)>,
{
    let mut batch = ParsedBatch::default();

    for (document_id, document) in documents {
        let id = document_id.clone().unwrap_or_default();
        match TransactionRecord::from_document(id, document) {
            Ok(parsed) => {
                if parsed.amount_defaulted {
                    tracing::debug!(id = %parsed.record.id, "document has no numeric amount, using 0");
                    batch.defaulted_amounts += 1;
                }
                batch.records.push(parsed.record);
            }
            Err(reason) => {
                tracing::debug!(?document_id, %reason, "skipping document");
                batch.skipped.push(SkippedRecord {
                    document_id,
                    reason,
                });
            }
        }
    }

    batch
}

/// Parse a date in the strict `yyyy-MM-dd` form used by documents
pub fn parse_document_date(s: &str) -> Result<NaiveDate, RecordError> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !well_formed {
        return Err(RecordError::InvalidDate(s.to_string()));
    }

    NaiveDate::parse_from_str(s, DOCUMENT_DATE_FORMAT)
        .map_err(|_| RecordError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(document: Value) -> Result<ParsedDocument, RecordError> {
        TransactionRecord::from_document(RecordId::from("doc"), &document)
    }

    #[test]
    fn test_parse_full_document() {
        let parsed = parse(json!({
            "amount": 100.5,
            "type": "income",
            "status": "received",
            "date": "2024-01-05",
            "title": "Salary",
            "category": "Work",
        }))
        .unwrap();

        assert!(!parsed.amount_defaulted);
        let record = parsed.record;
        assert_eq!(record.kind, TransactionKind::Income);
        assert_eq!(record.status, TransactionStatus::Received);
        assert_eq!(record.amount.cents(), 10050);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(record.title, "Salary");
        assert_eq!(record.category, "Work");
    }

    #[test]
    fn test_missing_amount_defaults_to_zero() {
        let parsed = parse(json!({"type": "expense", "date": "2024-01-05"})).unwrap();
        assert!(parsed.amount_defaulted);
        assert_eq!(parsed.record.amount, Money::zero());
        assert_eq!(parsed.record.status, TransactionStatus::Pending);
    }

    #[test]
    fn test_non_numeric_amount_defaults_to_zero() {
        let parsed = parse(json!({"type": "expense", "date": "2024-01-05", "amount": "12"})).unwrap();
        assert!(parsed.amount_defaulted);
        assert_eq!(parsed.record.amount, Money::zero());
    }

    #[test]
    fn test_title_fallbacks() {
        let from_description = parse(json!({
            "type": "expense",
            "date": "2024-01-05",
            "description": "Groceries",
        }))
        .unwrap();
        assert_eq!(from_description.record.title, "Groceries");

        let untitled = parse(json!({"type": "expense", "date": "2024-01-05"})).unwrap();
        assert_eq!(untitled.record.title, UNTITLED);
    }

    #[test]
    fn test_invalid_dates_are_rejected() {
        for date in ["05/01/2024", "2024-1-5", "2024-02-30", "2024-01-05T10:00:00", ""] {
            let result = parse(json!({"type": "income", "date": date}));
            assert_eq!(result, Err(RecordError::InvalidDate(date.to_string())), "{date}");
        }
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            parse(json!({"date": "2024-01-05"})),
            Err(RecordError::MissingType)
        );
        assert_eq!(parse(json!({"type": "income"})), Err(RecordError::MissingDate));
        assert_eq!(
            parse(json!({"type": "transfer", "date": "2024-01-05"})),
            Err(RecordError::UnknownType("transfer".into()))
        );
        assert_eq!(parse(json!([1, 2])), Err(RecordError::NotAnObject));
    }

    #[test]
    fn test_huge_amounts_are_rejected() {
        for amount in [json!(1e17), json!(-1e30), json!(u64::MAX)] {
            let result = parse(json!({"type": "investment", "date": "2024-01-05", "amount": amount}));
            assert!(
                matches!(result, Err(RecordError::AmountOutOfRange(_))),
                "{amount}: {result:?}"
            );
        }

        let largest = parse(json!({"type": "investment", "date": "2024-01-05", "amount": 9e16}))
            .unwrap();
        assert_eq!(largest.record.amount.cents(), 9_000_000_000_000_000_000);
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let parsed = parse(json!({"type": "income", "date": "2024-01-05", "status": "late"})).unwrap();
        assert_eq!(parsed.record.status, TransactionStatus::Other("late".into()));
        assert_eq!(parsed.record.to_document()["status"], "late");
    }

    #[test]
    fn test_status_settlement_rules() {
        for status in ["consolidated", "paid", "received"] {
            assert!(TransactionStatus::from(status).settles_income());
        }
        assert!(!TransactionStatus::Pending.settles_income());
        assert!(TransactionStatus::Paid.settles_expense());
        assert!(!TransactionStatus::Received.settles_expense());
        assert!(!TransactionStatus::Consolidated.settles_expense());
    }

    #[test]
    fn test_parse_documents_splits_good_and_bad() {
        let good = json!({"type": "income", "date": "2024-01-05", "amount": 10});
        let no_amount = json!({"type": "expense", "date": "2024-01-06"});
        let bad_date = json!({"type": "income", "date": "yesterday", "amount": 10});

        let batch = parse_documents([
            (Some(RecordId::from("a")), &good),
            (Some(RecordId::from("b")), &no_amount),
            (None, &bad_date),
        ]);

        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.defaulted_amounts, 1);
        assert_eq!(
            batch.skipped,
            vec![SkippedRecord {
                document_id: None,
                reason: RecordError::InvalidDate("yesterday".into()),
            }]
        );
        assert_eq!(batch.skipped[0].to_string(), "(no id): date \"yesterday\" is not yyyy-MM-dd");
    }

    #[test]
    fn test_document_round_trip_keeps_fields() {
        let mut record = TransactionRecord::new(
            TransactionKind::Investment,
            TransactionStatus::Pending,
            Money::from_cents(2500),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
            "Index fund",
        );
        record.category = "Stocks".into();

        let document = record.to_document();
        assert_eq!(document["date"], "2024-01-07");
        assert_eq!(document["amount"], 25.0);

        let parsed = TransactionRecord::from_document(record.id.clone(), &document).unwrap();
        assert_eq!(parsed.record, record);
    }
}
