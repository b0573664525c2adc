//! Transaction service
//!
//! Business logic for the add/edit/delete flow and the month listing.
//! Input is validated here, before anything reaches storage.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    recent_in_month, CategoryCatalog, Money, MonthPeriod, Transaction, TransactionId,
    TransactionType,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    catalog: &'a CategoryCatalog,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionType,
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Changes applied by an edit. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl UpdateTransactionInput {
    /// Whether the edit changes anything at all
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage, catalog: &'a CategoryCatalog) -> Self {
        Self { storage, catalog }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FintrackResult<Transaction> {
        let mut txn = Transaction::new(input.kind, input.category, input.amount, input.date);
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }

        self.check(&mut txn)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(id = %txn.id, kind = txn.kind.as_str(), category = %txn.category, amount = %txn.amount, "transaction created");
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FintrackResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full UUID or short `txn-` identifier
    pub fn find(&self, identifier: &str) -> FintrackResult<Transaction> {
        self.storage.transactions.find_by_prefix(identifier)
    }

    /// Every transaction, newest first
    pub fn list_all(&self) -> FintrackResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    /// Transactions dated in the given month, newest first
    pub fn list_for_month(&self, period: MonthPeriod) -> FintrackResult<Vec<Transaction>> {
        self.storage.transactions.get_by_month(period)
    }

    /// The `limit` most recent transactions of the month
    pub fn recent_for_month(
        &self,
        period: MonthPeriod,
        limit: usize,
    ) -> FintrackResult<Vec<Transaction>> {
        let transactions = self.storage.transactions.get_all()?;
        Ok(recent_in_month(&transactions, period, limit))
    }

    /// Number of stored transactions
    pub fn count(&self) -> FintrackResult<usize> {
        self.storage.transactions.count()
    }

    /// Apply an edit to an existing transaction
    ///
    /// The edited record is validated as a whole, so switching the type also
    /// requires a category from the other list.
    pub fn update(
        &self,
        id: TransactionId,
        input: UpdateTransactionInput,
    ) -> FintrackResult<Transaction> {
        let current = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FintrackError::transaction_not_found(id.to_string()))?;

        let mut replacement = Transaction::new(
            input.kind.unwrap_or(current.kind),
            input.category.unwrap_or_else(|| current.category.clone()),
            input.amount.unwrap_or(current.amount),
            input.date.unwrap_or(current.date),
        );
        replacement.description = input
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_else(|| current.description.clone());

        self.check(&mut replacement)?;

        let mut txn = current;
        txn.replace_with(replacement);

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(id = %txn.id, "transaction updated");
        Ok(txn)
    }

    /// Delete a transaction, returning the removed record
    pub fn delete(&self, id: TransactionId) -> FintrackResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FintrackError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        tracing::info!(id = %txn.id, "transaction deleted");
        Ok(txn)
    }

    /// Validate a transaction and canonicalize its category label
    fn check(&self, txn: &mut Transaction) -> FintrackResult<()> {
        txn.category = self
            .catalog
            .resolve(txn.kind, &txn.category)
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        txn.validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(category: &str, cents: i64, on: NaiveDate) -> CreateTransactionInput {
        CreateTransactionInput {
            kind: TransactionType::Expense,
            category: category.to_string(),
            amount: Money::from_cents(cents),
            date: on,
            description: None,
        }
    }

    #[test]
    fn test_create_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        let mut input = expense("food", 25000, date(2025, 1, 8));
        input.description = Some("  groceries ".into());
        let txn = service.create(input).unwrap();

        assert_eq!(txn.category, "Food");
        assert_eq!(txn.description, "groceries");
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        let err = service.create(expense("", 100, date(2025, 1, 1))).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Please select a category"));

        let err = service.create(expense("Food", 0, date(2025, 1, 1))).unwrap_err();
        assert!(err.to_string().contains("Amount must be greater than 0"));

        let err = service.create(expense("Food", -500, date(2025, 1, 1))).unwrap_err();
        assert!(err.to_string().contains("Amount must be greater than 0"));

        // Salary is an income category
        let err = service.create(expense("Salary", 100, date(2025, 1, 1))).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_update_replaces_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        let txn = service.create(expense("Food", 1000, date(2025, 1, 8))).unwrap();

        let updated = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    amount: Some(Money::from_cents(1500)),
                    description: Some("lunch".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, txn.id);
        assert_eq!(updated.amount.cents(), 1500);
        assert_eq!(updated.category, "Food");
        assert_eq!(updated.description, "lunch");
        assert_eq!(updated.created_at, txn.created_at);
    }

    #[test]
    fn test_update_type_requires_matching_category() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        let txn = service.create(expense("Other", 1000, date(2025, 1, 8))).unwrap();

        // "Other" exists in both lists
        let switched = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    kind: Some(TransactionType::Income),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(switched.is_income());

        let err = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    category: Some("Food".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        let err = service
            .update(TransactionId::new(), UpdateTransactionInput::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        let txn = service.create(expense("Food", 1000, date(2025, 1, 8))).unwrap();
        let removed = service.delete(txn.id).unwrap();

        assert_eq!(removed.id, txn.id);
        assert!(service.get(txn.id).unwrap().is_none());
        assert!(service.delete(txn.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_recent_for_month() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        for day in 1..=10 {
            service
                .create(expense("Food", 100, date(2025, 1, day)))
                .unwrap();
        }
        service
            .create(expense("Food", 100, date(2025, 2, 1)))
            .unwrap();

        let jan = MonthPeriod::new(2025, 1).unwrap();
        assert_eq!(service.list_for_month(jan).unwrap().len(), 10);

        let recent = service.recent_for_month(jan, 8).unwrap();
        assert_eq!(recent.len(), 8);
        assert_eq!(recent[0].date, date(2025, 1, 10));
        assert_eq!(recent[7].date, date(2025, 1, 3));
    }

    #[test]
    fn test_recent_matches_dashboard() {
        use crate::config::Settings;
        use crate::reports::Dashboard;

        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        // Several on one day so the creation-time tiebreak matters
        for _ in 0..6 {
            service.create(expense("Food", 100, date(2025, 1, 4))).unwrap();
        }
        for day in [2, 9, 15, 28] {
            service.create(expense("Transport", 50, date(2025, 1, day))).unwrap();
        }

        let jan = MonthPeriod::new(2025, 1).unwrap();
        let settings = Settings::default();
        let listed = service.recent_for_month(jan, settings.recent_limit).unwrap();
        let dashboard = Dashboard::generate(&service.list_all().unwrap(), &[], jan, &settings);

        let listed_ids: Vec<_> = listed.iter().map(|t| t.id).collect();
        let dashboard_ids: Vec<_> = dashboard.recent.iter().map(|t| t.id).collect();
        assert_eq!(listed_ids, dashboard_ids);
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        let txn = service.create(expense("Food", 1000, date(2025, 1, 8))).unwrap();
        let found = service.find(&txn.id.to_string()).unwrap();
        assert_eq!(found.id, txn.id);
    }
}
