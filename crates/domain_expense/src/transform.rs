//! Record transformer for expenses

use serde_json::{json, Value};

use core_kernel::{rows, StoreError, StorePort};

use crate::expense::Expense;

/// Table holding expense rows
pub const EXPENSES_TABLE: &str = "expenses";

/// Shapes a storage expenses row into a presentation Expense
///
/// Total over any row matching the storage shape; a null `description`
/// becomes the empty string (the presentation shape carries no option here).
pub fn expense_from_row(row: &Value) -> Expense {
    Expense {
        id: rows::str_field(row, "id"),
        date: rows::date_field(row, "expense_date"),
        amount: rows::decimal_field(row, "amount"),
        category: rows::str_field(row, "category"),
        description: rows::str_field(row, "description"),
    }
}

/// Shapes an Expense into the snake_case field set the table accepts
pub fn expense_to_row(expense: &Expense) -> Value {
    json!({
        "category": expense.category,
        "amount": expense.amount,
        "description": if expense.description.is_empty() {
            Value::Null
        } else {
            Value::String(expense.description.clone())
        },
        "expense_date": expense.date.format("%Y-%m-%d").to_string(),
    })
}

/// Reads every expense from storage (wholesale refresh path)
pub async fn load_expenses(store: &dyn StorePort) -> Result<Vec<Expense>, StoreError> {
    let rows = store.select_all(EXPENSES_TABLE, None).await?;
    Ok(rows.iter().map(expense_from_row).collect())
}
