use std::sync::Mutex;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::document::{Collection, Document};
use crate::error::StoreError;
use crate::ids::IdGenerator;
use crate::models::{
    Bill, BillReceipt, Customer, NewBill, RecordId, RecordKey, Service, Settings, StaffMember,
    Stats,
};
use crate::screens::dashboard;
use crate::storage::Backend;

/// Result of a store mutation: whether the document has to be written back.
enum Outcome<T> {
    Changed(T),
    Unchanged(T),
}

/// What a sale does to the customer directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CustomerPolicy {
    /// Count a visit for a known phone number, leave unknown ones alone.
    CountVisit,
    /// Count a visit, or create the customer on their first visit.
    Upsert,
}

/// Single owner of the document. Every mutation works on a copy of the
/// in-memory snapshot and only replaces it once the backend accepted the
/// write.
pub struct Store {
    document: Mutex<Document>,
    backend: Box<dyn Backend>,
    ids: IdGenerator,
}

impl Store {
    pub fn open(backend: impl Backend + 'static) -> Result<Self, StoreError> {
        let document = match backend.load()? {
            Some(document) => {
                tracing::info!(backend = %backend.describe(), "Document loaded");
                document
            }
            None => {
                let document = Document::default();
                backend.save(&document)?;
                tracing::info!(backend = %backend.describe(), "Created default document");
                document
            }
        };

        let ids = IdGenerator::starting_after(document.max_id());
        Ok(Store {
            document: Mutex::new(document),
            backend: Box::new(backend),
            ids,
        })
    }

    fn read<T>(&self, f: impl FnOnce(&Document) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let document = self.document.lock().map_err(|_| StoreError::Poisoned)?;
        f(&document)
    }

    fn transact<T>(
        &self,
        change: impl FnOnce(&mut Document) -> Result<Outcome<T>, StoreError>,
    ) -> Result<T, StoreError> {
        let mut current = self.document.lock().map_err(|_| StoreError::Poisoned)?;
        let mut next = current.clone();

        match change(&mut next)? {
            Outcome::Unchanged(value) => Ok(value),
            Outcome::Changed(value) => {
                if let Err(e) = self.backend.save(&next) {
                    tracing::error!(backend = %self.backend.describe(), error = %e, "Failed to persist document");
                    return Err(e);
                }
                *current = next;
                Ok(value)
            }
        }
    }

    /// Copy of the whole document.
    pub fn snapshot(&self) -> Result<Document, StoreError> {
        self.read(|document| Ok(document.clone()))
    }

    pub fn get(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collection = Collection::parse(collection);
        self.read(|document| document.records(&collection))
    }

    pub fn add(&self, collection: &str, item: Value) -> Result<Vec<Value>, StoreError> {
        self.insert(collection, item, true)
    }

    /// `add-service`: appends to `services` without a creation timestamp.
    pub fn add_service(&self, item: Value) -> Result<Vec<Value>, StoreError> {
        self.insert("services", item, false)
    }

    fn insert(&self, collection: &str, item: Value, stamped: bool) -> Result<Vec<Value>, StoreError> {
        let collection = Collection::parse(collection);
        let id = self.ids.next();
        let created_at = stamped.then(Utc::now);

        self.transact(|document| {
            document.insert(&collection, item, id, created_at)?;
            tracing::debug!(collection = collection.name(), id, "Record added");
            Ok(Outcome::Changed(document.records(&collection)?))
        })
    }

    pub fn update(
        &self,
        collection: &str,
        id: RecordId,
        updates: Map<String, Value>,
    ) -> Result<Vec<Value>, StoreError> {
        let collection = Collection::parse(collection);
        self.transact(|document| {
            let found = document.merge(&collection, id, &updates)?;
            let records = document.records(&collection)?;
            if found {
                tracing::debug!(collection = collection.name(), id, "Record updated");
                Ok(Outcome::Changed(records))
            } else {
                Ok(Outcome::Unchanged(records))
            }
        })
    }

    pub fn delete(
        &self,
        collection: &str,
        key: impl Into<RecordKey>,
    ) -> Result<Vec<Value>, StoreError> {
        let collection = Collection::parse(collection);
        let key = key.into();
        self.transact(|document| {
            let removed = document.remove(&collection, &key)?;
            let records = document.records(&collection)?;
            if removed {
                tracing::debug!(collection = collection.name(), ?key, "Record deleted");
                Ok(Outcome::Changed(records))
            } else {
                Ok(Outcome::Unchanged(records))
            }
        })
    }

    /// `save-bill`: appends the bill and counts a visit for a known customer.
    pub fn checkout(&self, bill: NewBill) -> Result<BillReceipt, StoreError> {
        self.settle(bill, CustomerPolicy::CountVisit)
    }

    /// Appends the bill and counts the visit, creating the customer on their
    /// first visit. Both changes go out in one write.
    pub fn record_sale(&self, bill: NewBill) -> Result<BillReceipt, StoreError> {
        self.settle(bill, CustomerPolicy::Upsert)
    }

    fn settle(&self, bill: NewBill, policy: CustomerPolicy) -> Result<BillReceipt, StoreError> {
        let now = Utc::now();
        let bill = Bill::from_new(self.ids.next(), now, bill);
        let bill_id = bill.id;
        let customer_id = match policy {
            CustomerPolicy::Upsert => Some(self.ids.next()),
            CustomerPolicy::CountVisit => None,
        };

        self.transact(|document| {
            let phone = bill.customer_phone.trim();
            if !phone.is_empty() {
                match document.customer_by_phone_mut(phone) {
                    Some(customer) => {
                        customer.visits = customer.visits.saturating_add(1);
                        tracing::debug!(customer = customer.id, visits = customer.visits, "Visit counted");
                    }
                    None => {
                        if let Some(id) = customer_id {
                            let customer = Customer::first_visit(id, &bill.customer_name, phone, now);
                            document.customers.push(customer);
                            tracing::debug!(customer = id, "Customer created at checkout");
                        }
                    }
                }
            }

            tracing::info!(bill = bill_id, total = bill.total, items = bill.items.len(), "Bill saved");
            document.bills.push(bill);
            Ok(Outcome::Changed(BillReceipt {
                success: true,
                bill_id,
            }))
        })
    }

    pub fn stats(&self) -> Result<Stats, StoreError> {
        self.read(|document| Ok(dashboard::aggregate(&document.bills, &document.expenses)))
    }

    pub fn settings(&self) -> Result<Settings, StoreError> {
        self.read(|document| Ok(document.settings.clone()))
    }

    pub fn update_settings(&self, updates: Map<String, Value>) -> Result<Settings, StoreError> {
        self.transact(|document| {
            document.merge_settings(&updates)?;
            Ok(Outcome::Changed(document.settings.clone()))
        })
    }

    pub fn services(&self) -> Result<Vec<Service>, StoreError> {
        self.read(|document| Ok(document.services.clone()))
    }

    pub fn categories(&self) -> Result<Vec<String>, StoreError> {
        self.read(|document| Ok(document.categories.clone()))
    }

    pub fn customers(&self) -> Result<Vec<Customer>, StoreError> {
        self.read(|document| Ok(document.customers.clone()))
    }

    pub fn staff(&self) -> Result<Vec<StaffMember>, StoreError> {
        self.read(|document| Ok(document.staff.clone()))
    }

    pub fn bills(&self) -> Result<Vec<Bill>, StoreError> {
        self.read(|document| Ok(document.bills.clone()))
    }
}

#[cfg(feature = "desktop")]
mod app {
    use super::Store;
    use tauri::{AppHandle, Manager};

    pub trait StoreExt {
        fn store(&self) -> &Store;
    }

    impl StoreExt for AppHandle {
        fn store(&self) -> &Store {
            self.state::<Store>().inner()
        }
    }
}

#[cfg(feature = "desktop")]
pub use app::StoreExt;
