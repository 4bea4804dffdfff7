//! Plan enforcement for an owner's tenants.
//!
//! An owner may keep at most [`Plan::max_active_tenants`] tenants active. The
//! oldest tenants keep their slots; whatever was created last is suspended
//! first, and freed slots re-activate the oldest suspended tenants.
//!
//! [`Plan::max_active_tenants`]: crate::domain::users::records::Plan::max_active_tenants

use crate::domain::tenants::records::{TenantRecord, TenantStatus, TenantUuid};

/// Status transitions needed to bring an owner's tenants in line with a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantStatusChanges {
    /// Tenants moving from suspended to active.
    pub activated: Vec<TenantUuid>,

    /// Tenants moving from active to suspended.
    pub suspended: Vec<TenantUuid>,
}

impl TenantStatusChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.suspended.is_empty()
    }
}

/// Compute which tenants change status when at most `limit` may be active.
///
/// Deleted tenants are ignored. Ordering is by creation time, ties broken by
/// uuid, so the result does not depend on the order of `tenants`.
#[must_use]
pub fn plan_tenant_statuses(tenants: &[TenantRecord], limit: Option<usize>) -> TenantStatusChanges {
    let mut ordered: Vec<&TenantRecord> = tenants
        .iter()
        .filter(|tenant| tenant.deleted_at.is_none())
        .collect();

    ordered.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.uuid.cmp(&b.uuid))
    });

    let keep = limit.unwrap_or(ordered.len());
    let mut changes = TenantStatusChanges::default();

    for (position, tenant) in ordered.into_iter().enumerate() {
        let desired = if position < keep {
            TenantStatus::Active
        } else {
            TenantStatus::Suspended
        };

        if tenant.status == desired {
            continue;
        }

        match desired {
            TenantStatus::Active => changes.activated.push(tenant.uuid),
            TenantStatus::Suspended => changes.suspended.push(tenant.uuid),
        }
    }

    changes
}
