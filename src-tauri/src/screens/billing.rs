//! Billing screen: cart building and checkout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::Store;
use crate::error::StoreError;
use crate::models::{BillItem, BillReceipt, Customer, NewBill, RecordId, Service};

/// Category tab that shows the whole menu.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty!")]
    EmptyCart,

    #[error("Enter customer name!")]
    MissingCustomerName,

    #[error("Who did this job? Select Staff!")]
    MissingStaff,

    #[error("Sale already settled")]
    AlreadySettled,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMode {
    #[default]
    Cash,
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    BuildingCart,
    Submitting,
    Settled { bill_id: RecordId },
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    cart: Vec<BillItem>,
    customer_name: String,
    customer_phone: String,
    returning: bool,
    staff: Option<String>,
    payment_mode: PaymentMode,
    state: CheckoutState,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        CheckoutSession {
            cart: Vec::new(),
            customer_name: String::new(),
            customer_phone: String::new(),
            returning: false,
            staff: None,
            payment_mode: PaymentMode::Cash,
            state: CheckoutState::BuildingCart,
        }
    }
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn cart(&self) -> &[BillItem] {
        &self.cart
    }

    /// Appends a copy of `service`. Selecting the same service twice adds two lines.
    pub fn add_service(&mut self, service: &Service) {
        self.cart.push(BillItem::from(service));
    }

    pub fn add_item(&mut self, item: BillItem) {
        self.cart.push(item);
    }

    pub fn remove_line(&mut self, index: usize) -> Option<BillItem> {
        (index < self.cart.len()).then(|| self.cart.remove(index))
    }

    pub fn total(&self) -> f64 {
        self.cart.iter().map(|item| item.price).sum()
    }

    /// Name and phone typed by hand.
    pub fn set_customer(&mut self, name: impl Into<String>, phone: impl Into<String>) {
        self.customer_name = name.into();
        self.customer_phone = phone.into();
        self.returning = false;
    }

    /// Picked from the customer search dropdown.
    pub fn select_customer(&mut self, customer: &Customer) {
        self.customer_name = customer.name.clone();
        self.customer_phone = customer.phone.clone();
        self.returning = true;
    }

    pub fn is_returning(&self) -> bool {
        self.returning
    }

    pub fn set_staff(&mut self, staff: impl Into<String>) {
        let staff = staff.into();
        self.staff = (!staff.trim().is_empty()).then_some(staff);
    }

    pub fn set_payment_mode(&mut self, mode: PaymentMode) {
        self.payment_mode = mode;
    }

    pub fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if self.customer_name.trim().is_empty() {
            return Err(CheckoutError::MissingCustomerName);
        }
        if self.staff.is_none() {
            return Err(CheckoutError::MissingStaff);
        }
        Ok(())
    }

    pub fn to_bill(&self) -> NewBill {
        NewBill {
            customer_name: self.customer_name.clone(),
            customer_phone: self.customer_phone.clone(),
            items: self.cart.clone(),
            total: self.total(),
            staff: self.staff.clone().unwrap_or_default(),
            payment_mode: self.payment_mode.as_str().to_string(),
        }
    }

    /// Validates, then saves the bill and the customer visit in one store write.
    /// On a store failure the cart is kept so the sale can be retried.
    pub fn submit(&mut self, store: &Store) -> Result<BillReceipt, CheckoutError> {
        if matches!(self.state, CheckoutState::Settled { .. }) {
            return Err(CheckoutError::AlreadySettled);
        }
        self.validate()?;

        self.state = CheckoutState::Submitting;
        match store.record_sale(self.to_bill()) {
            Ok(receipt) => {
                self.state = CheckoutState::Settled {
                    bill_id: receipt.bill_id,
                };
                Ok(receipt)
            }
            Err(e) => {
                self.state = CheckoutState::BuildingCart;
                Err(e.into())
            }
        }
    }

    /// Clears the cart and the form for the next sale.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Checkout as sent by the billing screen in one request.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub items: Vec<BillItem>,
    #[serde(default)]
    pub staff: String,
    #[serde(default)]
    pub payment_mode: PaymentMode,
}

impl CheckoutForm {
    pub fn into_session(self) -> CheckoutSession {
        let mut session = CheckoutSession::new();
        for item in self.items {
            session.add_item(item);
        }
        session.set_customer(self.customer_name, self.customer_phone);
        session.set_staff(self.staff);
        session.set_payment_mode(self.payment_mode);
        session
    }
}

pub fn category_tabs(categories: &[String]) -> Vec<String> {
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(categories.iter().cloned())
        .collect()
}

pub fn filter_services<'a>(services: &'a [Service], category: &str) -> Vec<&'a Service> {
    services
        .iter()
        .filter(|service| category == ALL_CATEGORIES || service.category == category)
        .collect()
}

/// Customers offered by the search dropdown.
pub fn suggest_customers<'a>(customers: &'a [Customer], query: &str) -> Vec<&'a Customer> {
    if query.is_empty() {
        return Vec::new();
    }
    super::customers::search(customers, query)
}
