//! Settings screen: the service menu and the shop details.

use serde_json::{json, Map, Value};

use super::FormError;
use crate::db::Store;
use crate::error::StoreError;
use crate::models::{RecordId, Service, Settings};

pub fn load_menu(store: &Store) -> Result<Vec<Service>, StoreError> {
    store.services()
}

/// Adds a service from the menu form. The price field is read the way the
/// form reads it: leading digits, anything after them ignored.
pub fn add_service(
    store: &Store,
    name: &str,
    price: &str,
    category: Option<&str>,
) -> Result<Vec<Service>, FormError> {
    let name = name.trim();
    if name.is_empty() || price.trim().is_empty() {
        return Err(FormError::MissingDetails);
    }
    let price = parse_price(price).ok_or_else(|| FormError::InvalidPrice(price.to_string()))?;

    let mut item = json!({ "name": name, "price": price });
    if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
        item["category"] = Value::String(category.to_string());
    }
    store.add("services", item)?;
    Ok(load_menu(store)?)
}

pub fn remove_service(store: &Store, id: RecordId) -> Result<Vec<Service>, StoreError> {
    store.delete("services", id)?;
    load_menu(store)
}

pub fn reprice_service(store: &Store, id: RecordId, price: f64) -> Result<Vec<Service>, StoreError> {
    let mut updates = Map::new();
    updates.insert("price".to_string(), json!(price));
    store.update("services", id, updates)?;
    load_menu(store)
}

pub fn shop(store: &Store) -> Result<Settings, StoreError> {
    store.settings()
}

pub fn update_shop(store: &Store, updates: Map<String, Value>) -> Result<Settings, StoreError> {
    store.update_settings(updates)
}

pub(crate) fn parse_price(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}
