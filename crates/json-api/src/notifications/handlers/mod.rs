//! Notification Handlers

pub(crate) mod index;
pub(crate) mod read;
pub(crate) mod read_all;
