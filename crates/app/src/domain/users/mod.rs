//! Users
//!
//! Owners hold a subscription [`records::Plan`] and own one or more tenants.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::UsersServiceError;
pub use service::*;
