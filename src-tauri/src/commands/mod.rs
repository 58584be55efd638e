pub mod billing;
pub mod categories;
pub mod customers;
pub mod data;
pub mod invoices;
pub mod reports;
pub mod services;
pub mod staff;
