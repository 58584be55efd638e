//! The persisted document and per-collection record operations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::models::{
    Bill, Customer, Expense, Record, RecordId, RecordKey, Service, Settings, StaffMember,
};

/// Collections that exist in the schema but no screen uses yet.
pub const RESERVED_COLLECTIONS: [&str; 4] = ["inventory", "coupons", "consents", "formulas"];

pub const DEFAULT_CATEGORIES: [&str; 4] = ["Hair", "Skin", "Aesthetics", "Products"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    Services,
    Staff,
    Customers,
    Bills,
    Expenses,
    Categories,
    Settings,
    Other(String),
}

impl Collection {
    pub fn parse(name: &str) -> Self {
        match name {
            "services" => Collection::Services,
            "staff" => Collection::Staff,
            "customers" => Collection::Customers,
            "bills" => Collection::Bills,
            "expenses" => Collection::Expenses,
            "categories" => Collection::Categories,
            "settings" => Collection::Settings,
            other => Collection::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Collection::Services => "services",
            Collection::Staff => "staff",
            Collection::Customers => "customers",
            Collection::Bills => "bills",
            Collection::Expenses => "expenses",
            Collection::Categories => "categories",
            Collection::Settings => "settings",
            Collection::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Untyped collections: the reserved ones plus any created through `add`.
    #[serde(flatten)]
    pub other: BTreeMap<String, Vec<Value>>,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            settings: Settings::default(),
            services: Vec::new(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            bills: Vec::new(),
            customers: Vec::new(),
            staff: Vec::new(),
            expenses: Vec::new(),
            other: RESERVED_COLLECTIONS
                .iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        }
    }
}

impl Document {
    /// The named collection as JSON records. Unknown names are empty.
    pub fn records(&self, collection: &Collection) -> Result<Vec<Value>, StoreError> {
        match collection {
            Collection::Services => to_records(&self.services),
            Collection::Staff => to_records(&self.staff),
            Collection::Customers => to_records(&self.customers),
            Collection::Bills => to_records(&self.bills),
            Collection::Expenses => to_records(&self.expenses),
            Collection::Categories => Ok(self
                .categories
                .iter()
                .map(|c| Value::String(c.clone()))
                .collect()),
            Collection::Settings => Ok(vec![serde_json::to_value(&self.settings)?]),
            Collection::Other(name) => Ok(self.other.get(name).cloned().unwrap_or_default()),
        }
    }

    /// Appends `item` under `id`. `created_at` is stamped as `createdAt` when given.
    pub fn insert(
        &mut self,
        collection: &Collection,
        item: Value,
        id: RecordId,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        let name = collection.name();
        match collection {
            Collection::Categories => return self.insert_category(item),
            Collection::Settings => return Err(StoreError::NotACollection(name.to_string())),
            _ => {}
        }

        let fields = stamp(name, item, id, created_at)?;
        match collection {
            Collection::Services => self.services.push(decode(name, fields)?),
            Collection::Staff => self.staff.push(decode(name, fields)?),
            Collection::Customers => self.customers.push(decode(name, fields)?),
            Collection::Bills => self.bills.push(decode(name, fields)?),
            Collection::Expenses => self.expenses.push(decode(name, fields)?),
            Collection::Other(other) => self
                .other
                .entry(other.clone())
                .or_default()
                .push(Value::Object(fields)),
            Collection::Categories | Collection::Settings => {}
        }
        Ok(())
    }

    /// Shallow-merges `updates` over the record with `id`. Returns whether a
    /// record was found. The `id` key of `updates` is ignored.
    pub fn merge(
        &mut self,
        collection: &Collection,
        id: RecordId,
        updates: &Map<String, Value>,
    ) -> Result<bool, StoreError> {
        let name = collection.name();
        match collection {
            Collection::Services => merge_typed(&mut self.services, name, id, updates),
            Collection::Staff => merge_typed(&mut self.staff, name, id, updates),
            Collection::Customers => merge_typed(&mut self.customers, name, id, updates),
            Collection::Bills => merge_typed(&mut self.bills, name, id, updates),
            Collection::Expenses => merge_typed(&mut self.expenses, name, id, updates),
            Collection::Categories => Ok(false),
            Collection::Settings => Err(StoreError::NotACollection(name.to_string())),
            Collection::Other(other) => {
                let key = RecordKey::Id(id);
                let record = self
                    .other
                    .get_mut(other)
                    .and_then(|records| records.iter_mut().find(|r| key_of(r, &key)));
                match record {
                    Some(Value::Object(fields)) => {
                        merge_fields(fields, updates);
                        Ok(true)
                    }
                    _ => Ok(false),
                }
            }
        }
    }

    /// Removes every record matching `key`. Returns whether anything was removed.
    pub fn remove(&mut self, collection: &Collection, key: &RecordKey) -> Result<bool, StoreError> {
        let removed = match (collection, key) {
            (Collection::Services, RecordKey::Id(id)) => remove_typed(&mut self.services, *id),
            (Collection::Staff, RecordKey::Id(id)) => remove_typed(&mut self.staff, *id),
            (Collection::Customers, RecordKey::Id(id)) => remove_typed(&mut self.customers, *id),
            (Collection::Bills, RecordKey::Id(id)) => remove_typed(&mut self.bills, *id),
            (Collection::Expenses, RecordKey::Id(id)) => remove_typed(&mut self.expenses, *id),
            (Collection::Categories, RecordKey::Name(category)) => {
                let before = self.categories.len();
                self.categories.retain(|c| c != category);
                self.categories.len() != before
            }
            (Collection::Settings, _) => {
                return Err(StoreError::NotACollection(collection.name().to_string()))
            }
            (Collection::Other(other), key) => match self.other.get_mut(other) {
                Some(records) => {
                    let before = records.len();
                    records.retain(|r| !key_of(r, key));
                    records.len() != before
                }
                None => false,
            },
            _ => false,
        };
        Ok(removed)
    }

    pub fn merge_settings(&mut self, updates: &Map<String, Value>) -> Result<(), StoreError> {
        let mut fields = fields_of("settings", &self.settings)?;
        merge_fields(&mut fields, updates);
        self.settings = decode("settings", fields)?;
        Ok(())
    }

    /// Largest id in any collection, used to seed the id generator.
    pub fn max_id(&self) -> RecordId {
        let typed = self
            .services
            .iter()
            .map(Record::id)
            .chain(self.staff.iter().map(Record::id))
            .chain(self.customers.iter().map(Record::id))
            .chain(self.bills.iter().map(Record::id))
            .chain(self.expenses.iter().map(Record::id));
        let untyped = self
            .other
            .values()
            .flatten()
            .filter_map(|r| r.get("id").and_then(Value::as_i64));
        typed.chain(untyped).max().unwrap_or(0)
    }

    pub fn customer_by_phone_mut(&mut self, phone: &str) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.phone.trim() == phone)
    }

    fn insert_category(&mut self, item: Value) -> Result<(), StoreError> {
        let category = match &item {
            Value::String(name) => name.trim(),
            Value::Object(fields) => fields
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .unwrap_or_default(),
            _ => "",
        };
        if category.is_empty() {
            return Err(StoreError::invalid(
                "categories",
                "expected a category name",
            ));
        }
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
        Ok(())
    }
}

fn to_records<R: Serialize>(records: &[R]) -> Result<Vec<Value>, StoreError> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(StoreError::from))
        .collect()
}

fn stamp(
    collection: &str,
    item: Value,
    id: RecordId,
    created_at: Option<DateTime<Utc>>,
) -> Result<Map<String, Value>, StoreError> {
    let Value::Object(mut fields) = item else {
        return Err(StoreError::invalid(collection, "record must be a JSON object"));
    };
    fields.insert("id".to_string(), Value::from(id));
    if let Some(created_at) = created_at {
        fields.insert("createdAt".to_string(), serde_json::to_value(created_at)?);
    }
    Ok(fields)
}

fn fields_of<R: Serialize>(collection: &str, record: &R) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(StoreError::invalid(collection, "record is not a JSON object")),
    }
}

fn decode<R: DeserializeOwned>(collection: &str, fields: Map<String, Value>) -> Result<R, StoreError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| StoreError::invalid(collection, e.to_string()))
}

fn merge_fields(fields: &mut Map<String, Value>, updates: &Map<String, Value>) {
    for (key, value) in updates {
        if key != "id" {
            fields.insert(key.clone(), value.clone());
        }
    }
}

fn merge_typed<R: Record>(
    records: &mut [R],
    collection: &str,
    id: RecordId,
    updates: &Map<String, Value>,
) -> Result<bool, StoreError> {
    let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
        return Ok(false);
    };
    let mut fields = fields_of(collection, &*record)?;
    merge_fields(&mut fields, updates);
    *record = decode(collection, fields)?;
    Ok(true)
}

fn remove_typed<R: Record>(records: &mut Vec<R>, id: RecordId) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

fn key_of(record: &Value, key: &RecordKey) -> bool {
    record.get("id").is_some_and(|id| key.matches(id))
}
