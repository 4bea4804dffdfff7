//! Customer Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use stampbook_app::domain::customers::records::{CustomerRecord, CustomerUuid};

    pub(super) fn make_customer(uuid: CustomerUuid) -> CustomerRecord {
        CustomerRecord {
            uuid,
            name: "Ada Lovelace".to_string(),
            email: Some("ada@example.com".to_string()),
            phone: None,
            current_stamps: 4,
            total_stamps: 9,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }
}
