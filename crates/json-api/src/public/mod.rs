//! Public, unauthenticated pages

mod handlers;

pub(crate) use handlers::*;
