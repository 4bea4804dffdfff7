//! Stampbook Domain Concerns

pub mod branding;
pub mod customers;
pub mod notifications;
pub mod programs;
pub mod tenants;
pub mod transactions;
pub mod users;
