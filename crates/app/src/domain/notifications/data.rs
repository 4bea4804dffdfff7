//! Notification Data

use crate::domain::{
    customers::records::CustomerUuid,
    notifications::records::{NotificationKind, NotificationUuid},
};

/// New Notification Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub uuid: NotificationUuid,
    pub kind: NotificationKind,
    pub message: String,
    pub customer_uuid: Option<CustomerUuid>,
}

impl NewNotification {
    #[must_use]
    pub fn stamps_earned(customer: CustomerUuid, customer_name: &str, amount: u32) -> Self {
        Self::for_customer(
            NotificationKind::StampsEarned,
            customer,
            format!("{customer_name} earned {amount} {}", stamps(amount)),
        )
    }

    #[must_use]
    pub fn stamps_redeemed(customer: CustomerUuid, customer_name: &str, amount: u32) -> Self {
        Self::for_customer(
            NotificationKind::StampsRedeemed,
            customer,
            format!("{customer_name} redeemed {amount} {}", stamps(amount)),
        )
    }

    #[must_use]
    pub fn reward_unlocked(customer: CustomerUuid, customer_name: &str, reward: &str) -> Self {
        Self::for_customer(
            NotificationKind::RewardUnlocked,
            customer,
            format!("{customer_name} unlocked a reward: {reward}"),
        )
    }

    fn for_customer(kind: NotificationKind, customer: CustomerUuid, message: String) -> Self {
        Self {
            uuid: NotificationUuid::new(),
            kind,
            message,
            customer_uuid: Some(customer),
        }
    }
}

fn stamps(amount: u32) -> &'static str {
    if amount == 1 { "stamp" } else { "stamps" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earned_message_pluralises() {
        let customer = CustomerUuid::new();

        assert_eq!(
            NewNotification::stamps_earned(customer, "Ada", 1).message,
            "Ada earned 1 stamp"
        );
        assert_eq!(
            NewNotification::stamps_earned(customer, "Ada", 3).message,
            "Ada earned 3 stamps"
        );
    }

    #[test]
    fn reward_message_names_the_reward() {
        let notification = NewNotification::reward_unlocked(CustomerUuid::new(), "Ada", "Free coffee");

        assert_eq!(notification.kind, NotificationKind::RewardUnlocked);
        assert_eq!(notification.message, "Ada unlocked a reward: Free coffee");
    }
}
