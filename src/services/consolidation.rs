//! Balance consolidation
//!
//! Reduces transaction records into the consolidated balance (settled income
//! minus paid expenses) and the invested balance, in a single pass.
//!
//! | kind       | counted when                               | total                 |
//! |------------|--------------------------------------------|-----------------------|
//! | income     | status is consolidated, paid or received   | `income_consolidated` |
//! | expense    | status is paid                             | `expenses_paid`       |
//! | investment | always                                     | `invested_balance`    |
//!
//! Totals saturate at the bounds of [`Money`] rather than overflow.
//!
//! Whether the selected period restricts the totals is the caller's choice,
//! expressed as a [`BalanceScope`].

use serde_json::Value;

use crate::config::settings::{BalanceScopeSetting, Settings};
use crate::error::SaldoResult;
use crate::models::{
    parse_documents, DateRange, Money, ParsedBatch, RecordId, SkippedRecord, TransactionKind,
    TransactionRecord,
};
use crate::storage::Storage;

/// Which records a consolidation covers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BalanceScope {
    /// Every record, whatever its date
    #[default]
    AllTime,
    /// Only records dated inside the range
    Within(DateRange),
}

impl BalanceScope {
    /// Build the scope the settings ask for, given the selected range
    pub fn from_setting(setting: BalanceScopeSetting, range: &DateRange) -> Self {
        match setting {
            BalanceScopeSetting::AllTime => Self::AllTime,
            BalanceScopeSetting::Period => Self::Within(range.clone()),
        }
    }

    pub fn includes(&self, record: &TransactionRecord) -> bool {
        match self {
            Self::AllTime => true,
            Self::Within(range) => range.contains(record.date),
        }
    }

    /// Short label for headers
    pub fn label(&self) -> String {
        match self {
            Self::AllTime => "All time".to_string(),
            Self::Within(range) => range.display_text.clone(),
        }
    }
}

/// Totals produced by a consolidation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consolidation {
    /// Income with a settled status
    pub income_consolidated: Money,
    /// Expenses with status paid
    pub expenses_paid: Money,
    /// `income_consolidated - expenses_paid`
    pub consolidated_balance: Money,
    /// Sum of all investments
    pub invested_balance: Money,
    /// Records inside the scope (whether or not their status counted)
    pub in_scope: usize,
    /// Records left out because of their date
    pub out_of_range: usize,
    /// Parsed documents whose missing amount was read as zero
    pub defaulted_amounts: usize,
    /// Documents that could not be parsed
    pub skipped: Vec<SkippedRecord>,
}

impl Consolidation {
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Reduce parsed records into totals
pub fn consolidate<'a, I>(records: I, scope: &BalanceScope) -> Consolidation
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut result = Consolidation::default();

    for record in records {
        if !scope.includes(record) {
            result.out_of_range += 1;
            continue;
        }
        result.in_scope += 1;

        match record.kind {
            TransactionKind::Income if record.status.settles_income() => {
                result.income_consolidated =
                    result.income_consolidated.saturating_add(record.amount);
            }
            TransactionKind::Expense if record.status.settles_expense() => {
                result.expenses_paid = result.expenses_paid.saturating_add(record.amount);
            }
            TransactionKind::Investment => {
                result.invested_balance =
                    result.invested_balance.saturating_add(record.amount);
            }
            TransactionKind::Income | TransactionKind::Expense => {}
        }
    }

    result.consolidated_balance = result
        .income_consolidated
        .saturating_sub(result.expenses_paid);
    result
}

/// Reduce an already parsed batch, carrying its diagnostics along
pub fn consolidate_batch(batch: &ParsedBatch, scope: &BalanceScope) -> Consolidation {
    let mut result = consolidate(&batch.records, scope);
    result.skipped = batch.skipped.clone();
    result.defaulted_amounts = batch.defaulted_amounts;
    result
}

/// Parse raw documents and reduce them
///
/// Never fails: documents that do not parse end up in `skipped`.
pub fn consolidate_documents<'a, I>(documents: I, scope: &BalanceScope) -> Consolidation
where
    I: IntoIterator<Item = (Option<RecordId>, &'a Value)>,
{
    let batch = parse_documents(documents);
    let mut result = consolidate(&batch.records, scope);
    result.skipped = batch.skipped;
    result.defaulted_amounts = batch.defaulted_amounts;
    result
}

/// Service computing balances over the stored documents
pub struct BalanceService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> BalanceService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Consolidate the store over an explicit scope
    pub fn consolidate(&self, scope: &BalanceScope) -> SaldoResult<Consolidation> {
        let batch = self.storage.documents.records()?;
        let result = consolidate_batch(&batch, scope);

        if result.has_skipped() {
            tracing::info!(
                skipped = result.skipped.len(),
                scope = %scope.label(),
                "some documents were left out of the balance"
            );
        }

        Ok(result)
    }

    /// Consolidate using the scope configured in settings
    pub fn consolidate_for(&self, range: &DateRange) -> SaldoResult<Consolidation> {
        let scope = BalanceScope::from_setting(self.settings.balance_scope, range);
        self.consolidate(&scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionStatus;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use serde_json::json;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn record(kind: TransactionKind, status: &str, cents: i64, day: u32) -> TransactionRecord {
        TransactionRecord::new(
            kind,
            TransactionStatus::from(status),
            Money::from_cents(cents),
            date(day),
            "t",
        )
    }

    #[test]
    fn test_reference_example() {
        let docs = [
            json!({"type": "income", "status": "paid", "amount": 100, "date": "2024-01-05"}),
            json!({"type": "expense", "status": "paid", "amount": 40, "date": "2024-01-06"}),
            json!({"type": "investment", "status": "pending", "amount": 25, "date": "2024-01-07"}),
        ];

        let result = consolidate_documents(docs.iter().map(|d| (None, d)), &BalanceScope::AllTime);

        assert_eq!(result.consolidated_balance, Money::from_units_cents(60, 0));
        assert_eq!(result.invested_balance, Money::from_units_cents(25, 0));
        assert_eq!(result.in_scope, 3);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_income_statuses() {
        let records = [
            record(TransactionKind::Income, "consolidated", 100, 1),
            record(TransactionKind::Income, "paid", 200, 1),
            record(TransactionKind::Income, "received", 400, 1),
            record(TransactionKind::Income, "pending", 800, 1),
            record(TransactionKind::Income, "scheduled", 1600, 1),
        ];
        let result = consolidate(&records, &BalanceScope::AllTime);
        assert_eq!(result.income_consolidated.cents(), 700);
        assert_eq!(result.consolidated_balance.cents(), 700);
    }

    #[test]
    fn test_only_paid_expenses_count() {
        let records = [
            record(TransactionKind::Expense, "paid", 100, 1),
            record(TransactionKind::Expense, "received", 200, 1),
            record(TransactionKind::Expense, "consolidated", 400, 1),
            record(TransactionKind::Expense, "pending", 800, 1),
        ];
        let result = consolidate(&records, &BalanceScope::AllTime);
        assert_eq!(result.expenses_paid.cents(), 100);
        assert_eq!(result.consolidated_balance.cents(), -100);
    }

    #[test]
    fn test_investments_ignore_status() {
        let records = [
            record(TransactionKind::Investment, "pending", 100, 1),
            record(TransactionKind::Investment, "whatever", 200, 1),
            record(TransactionKind::Investment, "paid", 400, 1),
        ];
        let result = consolidate(&records, &BalanceScope::AllTime);
        assert_eq!(result.invested_balance.cents(), 700);
        assert_eq!(result.consolidated_balance, Money::zero());
    }

    #[test]
    fn test_malformed_documents_are_reported() {
        let docs = [
            json!({"type": "income", "status": "paid", "amount": 100, "date": "05/01/2024"}),
            json!({"type": "transfer", "status": "paid", "amount": 100, "date": "2024-01-05"}),
            json!({"type": "income", "status": "paid", "date": "2024-01-05"}),
        ];
        let ids = ["bad-date", "bad-type", "no-amount"];

        let result = consolidate_documents(
            ids.iter().zip(docs.iter()).map(|(id, d)| (Some(RecordId::from(*id)), d)),
            &BalanceScope::AllTime,
        );

        assert_eq!(result.consolidated_balance, Money::zero());
        assert_eq!(result.in_scope, 1);
        assert_eq!(result.defaulted_amounts, 1);
        let skipped: Vec<_> = result
            .skipped
            .iter()
            .map(|s| s.document_id.as_ref().unwrap().as_str())
            .collect();
        assert_eq!(skipped, vec!["bad-date", "bad-type"]);
    }

    #[test]
    fn test_amounts_beyond_cent_range_are_skipped() {
        let docs = [
            json!({"type": "investment", "status": "paid", "amount": 1e17, "date": "2024-01-05"}),
            json!({"type": "investment", "status": "paid", "amount": 1e17, "date": "2024-01-06"}),
            json!({"type": "income", "status": "paid", "amount": 10, "date": "2024-01-07"}),
        ];

        let result = consolidate_documents(docs.iter().map(|d| (None, d)), &BalanceScope::AllTime);

        assert_eq!(result.invested_balance, Money::zero());
        assert_eq!(result.consolidated_balance.cents(), 1000);
        assert_eq!(result.skipped.len(), 2);
        assert!(result
            .skipped
            .iter()
            .all(|s| matches!(s.reason, crate::models::RecordError::AmountOutOfRange(_))));
    }

    #[test]
    fn test_large_totals_saturate_instead_of_wrapping() {
        let docs = [
            json!({"type": "investment", "status": "paid", "amount": 5e16, "date": "2024-01-05"}),
            json!({"type": "investment", "status": "paid", "amount": 5e16, "date": "2024-01-06"}),
            json!({"type": "expense", "status": "paid", "amount": 5e16, "date": "2024-01-07"}),
            json!({"type": "expense", "status": "paid", "amount": 5e16, "date": "2024-01-08"}),
        ];

        let result = consolidate_documents(docs.iter().map(|d| (None, d)), &BalanceScope::AllTime);

        assert!(result.skipped.is_empty());
        assert_eq!(result.invested_balance.cents(), i64::MAX);
        assert_eq!(result.expenses_paid.cents(), i64::MAX);
        assert_eq!(result.consolidated_balance.cents(), -i64::MAX);

        let records = [
            record(TransactionKind::Income, "paid", i64::MAX, 1),
            record(TransactionKind::Expense, "paid", i64::MIN, 1),
        ];
        let result = consolidate(&records, &BalanceScope::AllTime);
        assert_eq!(result.consolidated_balance.cents(), i64::MAX);
    }

    #[test]
    fn test_range_scope_filters_by_date() {
        let records = [
            record(TransactionKind::Income, "paid", 100, 5),
            record(TransactionKind::Income, "paid", 200, 15),
            record(TransactionKind::Investment, "paid", 400, 25),
        ];
        let scope = BalanceScope::Within(DateRange::new(date(10), date(20)));

        let result = consolidate(&records, &scope);
        assert_eq!(result.consolidated_balance.cents(), 200);
        assert_eq!(result.invested_balance, Money::zero());
        assert_eq!(result.in_scope, 1);
        assert_eq!(result.out_of_range, 2);

        let all = consolidate(&records, &BalanceScope::AllTime);
        assert_eq!(all.consolidated_balance.cents(), 300);
        assert_eq!(all.invested_balance.cents(), 400);
    }

    #[test]
    fn test_scope_from_setting() {
        let range = DateRange::new(date(1), date(31));
        assert_eq!(
            BalanceScope::from_setting(BalanceScopeSetting::AllTime, &range),
            BalanceScope::AllTime
        );
        assert_eq!(
            BalanceScope::from_setting(BalanceScopeSetting::Period, &range).label(),
            "2024-01-01 to 2024-01-31"
        );
    }

    #[test]
    fn test_balance_service_reads_store() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = crate::config::SaldoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let mut settings = Settings::default();

        storage
            .documents
            .upsert(&record(TransactionKind::Income, "received", 5000, 3))
            .unwrap();
        storage
            .documents
            .upsert(&record(TransactionKind::Expense, "paid", 1500, 28))
            .unwrap();
        storage
            .documents
            .insert_raw(RecordId::from("junk"), json!({"type": "income"}))
            .unwrap();

        let range = DateRange::new(date(1), date(10));
        let service = BalanceService::new(&storage, &settings);
        let all_time = service.consolidate_for(&range).unwrap();
        assert_eq!(all_time.consolidated_balance.cents(), 3500);
        assert_eq!(all_time.skipped.len(), 1);

        settings.balance_scope = BalanceScopeSetting::Period;
        let service = BalanceService::new(&storage, &settings);
        let in_period = service.consolidate_for(&range).unwrap();
        assert_eq!(in_period.consolidated_balance.cents(), 5000);
    }

    fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
        prop_oneof![
            Just(TransactionKind::Income),
            Just(TransactionKind::Expense),
            Just(TransactionKind::Investment),
        ]
    }

    fn status_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("consolidated"),
            Just("paid"),
            Just("received"),
            Just("pending"),
            Just("overdue"),
        ]
    }

    fn record_strategy() -> impl Strategy<Value = TransactionRecord> {
        (kind_strategy(), status_strategy(), 0i64..1_000_000, 1u32..=31)
            .prop_map(|(kind, status, cents, day)| record(kind, status, cents, day))
    }

    proptest! {
        #[test]
        fn prop_totals_match_classification(records in prop::collection::vec(record_strategy(), 0..50)) {
            let result = consolidate(&records, &BalanceScope::AllTime);

            let income: i64 = records
                .iter()
                .filter(|r| r.kind == TransactionKind::Income && r.status.settles_income())
                .map(|r| r.amount.cents())
                .sum();
            let expenses: i64 = records
                .iter()
                .filter(|r| r.kind == TransactionKind::Expense && r.status.as_str() == "paid")
                .map(|r| r.amount.cents())
                .sum();
            let invested: i64 = records
                .iter()
                .filter(|r| r.kind == TransactionKind::Investment)
                .map(|r| r.amount.cents())
                .sum();

            prop_assert_eq!(result.consolidated_balance.cents(), income - expenses);
            prop_assert_eq!(result.invested_balance.cents(), invested);
            prop_assert_eq!(result.in_scope, records.len());
        }

        #[test]
        fn prop_range_scope_partitions_records(
            records in prop::collection::vec(record_strategy(), 0..50),
            start in 1u32..=31,
            len in 0u32..31,
        ) {
            let end = (start + len).min(31);
            let scope = BalanceScope::Within(DateRange::new(date(start), date(end)));
            let result = consolidate(&records, &scope);

            let inside: Vec<_> = records.iter().filter(|r| scope.includes(r)).cloned().collect();
            let expected = consolidate(&inside, &BalanceScope::AllTime);

            prop_assert_eq!(result.in_scope + result.out_of_range, records.len());
            prop_assert_eq!(result.consolidated_balance, expected.consolidated_balance);
            prop_assert_eq!(result.invested_balance, expected.invested_balance);
        }

        #[test]
        fn prop_unparseable_dates_never_count(day in 1u32..=28, cents in 1i64..100_000) {
            let bad = json!({
                "type": "income",
                "status": "paid",
                "amount": cents as f64 / 100.0,
                "date": format!("{:02}/01/2024", day),
            });
            let result = consolidate_documents([(None, &bad)], &BalanceScope::AllTime);

            prop_assert_eq!(result.consolidated_balance, Money::zero());
            prop_assert_eq!(result.skipped.len(), 1);
        }
    }
}
