//! Customer Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Customer UUID
pub type CustomerUuid = TypedUuid<CustomerRecord>;

/// Customer Record
///
/// A customer's membership within one tenant. `current_stamps` is the
/// redeemable balance; `total_stamps` counts every stamp ever earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub uuid: CustomerUuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub current_stamps: u32,
    pub total_stamps: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
