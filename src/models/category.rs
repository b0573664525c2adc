//! Fixed category lists
//!
//! Categories are plain labels, not entities. Expense and income each have
//! their own ordered list; the expense list also drives the budget report,
//! which shows one row per entry in list order.

use serde::{Deserialize, Serialize};

use super::transaction::{TransactionType, TransactionValidationError};

/// Default expense categories, in display order
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Entertainment",
    "Utilities",
    "Health",
    "Shopping",
    "Education",
    "Other",
];

/// Default income categories, in display order
pub const DEFAULT_INCOME_CATEGORIES: [&str; 5] =
    ["Salary", "Freelance", "Investments", "Gifts", "Other"];

/// The expense and income category lists in effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    expense: Vec<String>,
    income: Vec<String>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self {
            expense: DEFAULT_EXPENSE_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            income: DEFAULT_INCOME_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CategoryCatalog {
    /// Build a catalog from explicit lists. Blank and repeated entries
    /// (case-insensitive) are dropped, keeping the first occurrence.
    pub fn new(expense: Vec<String>, income: Vec<String>) -> Self {
        Self {
            expense: dedup_labels(expense),
            income: dedup_labels(income),
        }
    }

    /// Expense categories in display order
    pub fn expense(&self) -> &[String] {
        &self.expense
    }

    /// Income categories in display order
    pub fn income(&self) -> &[String] {
        &self.income
    }

    /// The list that applies to a transaction type
    pub fn for_type(&self, kind: TransactionType) -> &[String] {
        match kind {
            TransactionType::Expense => &self.expense,
            TransactionType::Income => &self.income,
        }
    }

    /// Look up a category for a transaction type, ignoring case and
    /// surrounding whitespace. Returns the canonical label.
    pub fn find(&self, kind: TransactionType, name: &str) -> Option<&str> {
        let wanted = name.trim();
        self.for_type(kind)
            .iter()
            .find(|c| c.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
    }

    /// Like `find`, but reports a validation error for unknown labels
    pub fn resolve(
        &self,
        kind: TransactionType,
        name: &str,
    ) -> Result<String, TransactionValidationError> {
        if name.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }
        self.find(kind, name)
            .map(str::to_string)
            .ok_or_else(|| TransactionValidationError::UnknownCategory {
                kind,
                category: name.trim().to_string(),
            })
    }
}

fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim().to_string();
        if label.is_empty() || out.iter().any(|l| l.eq_ignore_ascii_case(&label)) {
            continue;
        }
        out.push(label);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists() {
        let catalog = CategoryCatalog::default();
        assert_eq!(catalog.expense().len(), 8);
        assert_eq!(catalog.expense()[0], "Food");
        assert_eq!(catalog.expense()[7], "Other");
        assert_eq!(catalog.income().len(), 5);
        assert_eq!(catalog.income()[0], "Salary");
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = CategoryCatalog::default();
        assert_eq!(catalog.find(TransactionType::Expense, " food "), Some("Food"));
        assert_eq!(catalog.find(TransactionType::Income, "salary"), Some("Salary"));
        assert_eq!(catalog.find(TransactionType::Income, "Food"), None);
    }

    #[test]
    fn test_resolve_errors() {
        let catalog = CategoryCatalog::default();
        assert_eq!(
            catalog.resolve(TransactionType::Expense, ""),
            Err(TransactionValidationError::MissingCategory)
        );
        assert!(matches!(
            catalog.resolve(TransactionType::Expense, "Salary"),
            Err(TransactionValidationError::UnknownCategory { .. })
        ));
        assert_eq!(
            catalog.resolve(TransactionType::Expense, "HEALTH"),
            Ok("Health".to_string())
        );
    }

    #[test]
    fn test_new_drops_blank_and_duplicate_labels() {
        let catalog = CategoryCatalog::new(
            vec!["Rent".into(), " ".into(), "rent".into(), "Travel".into()],
            vec!["Salary".into()],
        );
        assert_eq!(catalog.expense(), &["Rent".to_string(), "Travel".to_string()]);
    }
}
