//! Tenants

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;
pub mod suspension;

pub use errors::TenantsServiceError;
pub use service::*;
