//! Budget display formatting

use crate::models::Budget;

/// Format the list of configured limits
pub fn format_budget_list(budgets: &[Budget], currency: &str) -> String {
    if budgets.is_empty() {
        return "No budget limits set. Use `fintrack budget set <category> <limit>`.\n"
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<15} {:>12}  {}\n", "Category", "Limit", "Updated"));
    output.push_str(&"-".repeat(45));
    output.push('\n');

    for budget in budgets {
        let limit = if budget.is_tracked() {
            budget.limit.format_with_symbol(currency)
        } else {
            "not tracked".to_string()
        };
        output.push_str(&format!(
            "{:<15} {:>12}  {}\n",
            budget.category,
            limit,
            budget.updated_at.format("%Y-%m-%d")
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_budget_list() {
        let budgets = vec![
            Budget::new("Food", Money::from_units(200)),
            Budget::new("Health", Money::zero()),
        ];
        let output = format_budget_list(&budgets, "$");

        assert!(output.contains("$200.00"));
        assert!(output.contains("not tracked"));
    }

    #[test]
    fn test_empty_list() {
        assert!(format_budget_list(&[], "$").contains("No budget limits set"));
    }
}
