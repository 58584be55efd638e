use super::matches_person;
use crate::db::Store;
use crate::error::StoreError;
use crate::models::{Bill, RecordId};

/// Invoice history, newest first.
pub fn load(store: &Store) -> Result<Vec<Bill>, StoreError> {
    let mut bills = store.bills()?;
    bills.reverse();
    Ok(bills)
}

pub fn search<'a>(bills: &'a [Bill], query: &str) -> Vec<&'a Bill> {
    bills
        .iter()
        .filter(|bill| matches_person(&bill.customer_name, &bill.customer_phone, query))
        .collect()
}

pub fn find(bills: &[Bill], id: RecordId) -> Option<&Bill> {
    bills.iter().find(|bill| bill.id == id)
}
