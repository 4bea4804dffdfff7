//! Stamp Ledger

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::TransactionsServiceError;
pub use service::*;
