//! Tenant Handlers

pub(crate) mod get;
