//! Loyalty Program Data

/// Loyalty Program Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramUpdate {
    pub reward_threshold: u32,
    pub reward_description: String,
}

impl ProgramUpdate {
    /// Threshold as stored, or `None` when it is zero or out of range.
    pub(crate) fn stored_threshold(&self) -> Option<i32> {
        i32::try_from(self.reward_threshold)
            .ok()
            .filter(|threshold| *threshold > 0)
    }

    /// Trimmed description, or `None` when blank.
    pub(crate) fn trimmed_description(&self) -> Option<&str> {
        Some(self.reward_description.trim()).filter(|description| !description.is_empty())
    }
}
