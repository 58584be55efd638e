use crate::db::Store;
use crate::error::StoreError;
use crate::models::{Bill, Expense, Stats};

/// Revenue, expenses and profit over every bill and expense on record.
pub fn aggregate(bills: &[Bill], expenses: &[Expense]) -> Stats {
    // Folded from +0.0: an empty f64 `sum` is -0.0
    let revenue = bills.iter().map(|bill| bill.total).fold(0.0, |acc, x| acc + x);

    let expenses_total = expenses
        .iter()
        .map(|expense| match expense.amount.value() {
            Some(amount) => amount,
            None => {
                tracing::warn!(expense = expense.id, amount = ?expense.amount, "Unparseable expense amount counted as 0");
                0.0
            }
        })
        .fold(0.0, |acc, x| acc + x);

    Stats {
        revenue,
        expenses: expenses_total,
        profit: revenue - expenses_total,
        appointments: bills.len(),
    }
}

/// Recomputed on every visit to the dashboard.
pub fn load(store: &Store) -> Result<Stats, StoreError> {
    store.stats()
}
