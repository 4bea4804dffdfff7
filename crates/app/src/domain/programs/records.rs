//! Loyalty Program Records

use jiff::Timestamp;

/// Loyalty Program Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyProgramRecord {
    pub reward_threshold: u32,
    pub reward_description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
