//! Loyalty Program Handlers

pub(crate) mod get;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use stampbook_app::domain::programs::records::LoyaltyProgramRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProgramResponse {
    /// Stamps needed to unlock the reward
    pub reward_threshold: u32,

    /// What the customer receives
    pub reward_description: String,

    pub created_at: String,

    pub updated_at: String,
}

impl From<LoyaltyProgramRecord> for ProgramResponse {
    fn from(program: LoyaltyProgramRecord) -> Self {
        ProgramResponse {
            reward_threshold: program.reward_threshold,
            reward_description: program.reward_description,
            created_at: program.created_at.to_string(),
            updated_at: program.updated_at.to_string(),
        }
    }
}
