//! Test Helpers

use crate::domain::customers::{data::NewCustomer, records::CustomerUuid};

pub(crate) fn new_customer(email: &str) -> NewCustomer {
    NewCustomer {
        uuid: CustomerUuid::new(),
        name: "Test Customer".to_string(),
        email: Some(email.to_string()),
        phone: None,
    }
}
