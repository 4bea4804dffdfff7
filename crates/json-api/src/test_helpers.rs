//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use stampbook_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        branding::MockBrandingService, customers::MockCustomersService,
        notifications::MockNotificationsService, programs::MockProgramsService,
        tenants::{MockTenantsService, records::TenantUuid},
        transactions::MockTransactionsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_TENANT_UUID: TenantUuid = TenantUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_tenant(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_tenant_uuid(TEST_TENANT_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks backing a test [`State`]; anything left at its default
/// fails the test when called.
pub(crate) struct Mocks {
    pub tenants: MockTenantsService,
    pub customers: MockCustomersService,
    pub programs: MockProgramsService,
    pub branding: MockBrandingService,
    pub transactions: MockTransactionsService,
    pub notifications: MockNotificationsService,
    pub auth: MockAuthService,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            tenants: strict_tenants_mock(),
            customers: strict_customers_mock(),
            programs: strict_programs_mock(),
            branding: strict_branding_mock(),
            transactions: strict_transactions_mock(),
            notifications: strict_notifications_mock(),
            auth: strict_auth_mock(),
        }
    }
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            tenants: Arc::new(self.tenants),
            customers: Arc::new(self.customers),
            programs: Arc::new(self.programs),
            branding: Arc::new(self.branding),
            transactions: Arc::new(self.transactions),
            notifications: Arc::new(self.notifications),
            auth: Arc::new(self.auth),
        })
    }
}

fn strict_tenants_mock() -> MockTenantsService {
    let mut tenants = MockTenantsService::new();

    tenants.expect_create_tenant().never();
    tenants.expect_get_tenant().never();
    tenants.expect_find_tenant_by_slug().never();
    tenants.expect_list_tenants().never();
    tenants.expect_list_owner_tenants().never();
    tenants.expect_set_tenant_status().never();
    tenants.expect_delete_tenant().never();
    tenants.expect_sync_user_tenants().never();

    tenants
}

fn strict_customers_mock() -> MockCustomersService {
    let mut customers = MockCustomersService::new();

    customers.expect_list_customers().never();
    customers.expect_get_customer().never();
    customers.expect_create_customer().never();
    customers.expect_update_customer().never();
    customers.expect_delete_customer().never();

    customers
}

fn strict_programs_mock() -> MockProgramsService {
    let mut programs = MockProgramsService::new();

    programs.expect_get_program().never();
    programs.expect_upsert_program().never();

    programs
}

fn strict_branding_mock() -> MockBrandingService {
    let mut branding = MockBrandingService::new();

    branding.expect_get_branding().never();
    branding.expect_upsert_branding().never();

    branding
}

fn strict_transactions_mock() -> MockTransactionsService {
    let mut transactions = MockTransactionsService::new();

    transactions.expect_record_transaction().never();
    transactions.expect_list_transactions().never();

    transactions
}

fn strict_notifications_mock() -> MockNotificationsService {
    let mut notifications = MockNotificationsService::new();

    notifications.expect_list_notifications().never();
    notifications.expect_mark_read().never();
    notifications.expect_mark_all_read().never();

    notifications
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}

/// Service with the test tenant already authenticated.
pub(crate) fn tenant_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_tenant)
            .push(route),
    )
}

/// Service without any authenticated tenant.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// Stand-in for an unexpected database failure.
pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}
