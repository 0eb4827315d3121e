//! Fixed choice lists offered by the add and search forms.
use serde::Deserialize;
use shared::RecordKind;

const DEFAULT_EXPENSE_CATEGORIES: [&str; 9] = [
    "General Expense",
    "OPD Camp Expenses",
    "Patient Traveling (Non-OPD Camp)",
    "Food & Refreshments",
    "Office Rent & Utilities",
    "Transport & Fuel",
    "Purchasing & Maintenance",
    "Medical Expenses",
    "Salaries & Staff Welfare",
];

const DEFAULT_FUNDING_CATEGORIES: [&str; 6] = [
    "Foreign Funding",
    "Awareness Funding",
    "Nutrition Funding",
    "Scholarship",
    "Sponsorship",
    "Local Funding",
];

const DEFAULT_PAYMENT_METHODS: [&str; 2] = ["Cashbook", "Cheque"];

/// Value meaning "do not filter on this field"
pub const ALL_SENTINEL: &str = "All";

/// Lists missing from a config file fall back to the defaults
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub expense_categories: Vec<String>,
    pub funding_categories: Vec<String>,
    pub payment_methods: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            expense_categories: to_owned_list(&DEFAULT_EXPENSE_CATEGORIES),
            funding_categories: to_owned_list(&DEFAULT_FUNDING_CATEGORIES),
            payment_methods: to_owned_list(&DEFAULT_PAYMENT_METHODS),
        }
    }
}

impl Vocabulary {
    pub fn categories(&self, kind: RecordKind) -> &[String] {
        match kind {
            RecordKind::Expense => &self.expense_categories,
            RecordKind::Funding => &self.funding_categories,
        }
    }

    pub fn has_category(&self, kind: RecordKind, category: &str) -> bool {
        self.categories(kind).iter().any(|c| c.trim() == category.trim())
    }

    pub fn has_payment_method(&self, payment_method: &str) -> bool {
        self.payment_methods
            .iter()
            .any(|m| m.trim() == payment_method.trim())
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_sizes() {
        let vocabulary = Vocabulary::default();
        assert_eq!(vocabulary.categories(RecordKind::Expense).len(), 9);
        assert_eq!(vocabulary.categories(RecordKind::Funding).len(), 6);
        assert_eq!(vocabulary.payment_methods, vec!["Cashbook", "Cheque"]);
    }

    #[test]
    fn test_membership_is_per_kind() {
        let vocabulary = Vocabulary::default();
        assert!(vocabulary.has_category(RecordKind::Expense, "Transport & Fuel"));
        assert!(!vocabulary.has_category(RecordKind::Funding, "Transport & Fuel"));
        assert!(vocabulary.has_category(RecordKind::Funding, " Scholarship "));
        assert!(vocabulary.has_payment_method("Cashbook"));
        assert!(!vocabulary.has_payment_method("Card"));
    }
}
