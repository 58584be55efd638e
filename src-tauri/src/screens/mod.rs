//! Screen controllers. Each one loads what its screen shows from the store
//! and sends the screen's mutations back through it.

pub mod billing;
pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod settings;
pub mod staff;

use thiserror::Error;

use crate::error::StoreError;

/// Rejected form input.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Fill all details")]
    MissingDetails,

    #[error("Name is required")]
    MissingName,

    #[error("Price must be a number: {0}")]
    InvalidPrice(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Search used by the customer and invoice lists: name without case, phone as typed.
pub(crate) fn matches_person(name: &str, phone: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase()) || phone.contains(query)
}
