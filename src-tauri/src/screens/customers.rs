use serde_json::json;

use super::{matches_person, FormError};
use crate::db::Store;
use crate::error::StoreError;
use crate::models::Customer;

/// The directory as listed: most recently added first.
pub fn load(store: &Store) -> Result<Vec<Customer>, StoreError> {
    let mut customers = store.customers()?;
    customers.reverse();
    Ok(customers)
}

pub fn search<'a>(customers: &'a [Customer], query: &str) -> Vec<&'a Customer> {
    customers
        .iter()
        .filter(|c| matches_person(&c.name, &c.phone, query))
        .collect()
}

pub fn find_by_phone<'a>(customers: &'a [Customer], phone: &str) -> Option<&'a Customer> {
    let phone = phone.trim();
    customers.iter().find(|c| c.phone.trim() == phone)
}

/// Adds a walk-in customer with no visits yet.
pub fn add(store: &Store, name: &str, phone: &str) -> Result<Vec<Customer>, FormError> {
    let (name, phone) = (name.trim(), phone.trim());
    if name.is_empty() || phone.is_empty() {
        return Err(FormError::MissingDetails);
    }

    store.add(
        "customers",
        json!({ "name": name, "phone": phone, "type": "Regular", "visits": 0 }),
    )?;
    Ok(load(store)?)
}
