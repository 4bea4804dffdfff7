//! Public Handlers

pub(crate) mod tenant;
