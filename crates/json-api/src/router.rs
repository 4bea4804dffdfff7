//! App Router

use salvo::Router;

use crate::{auth, branding, customers, notifications, program, public, tenant, transactions};

/// Routes served to customers without authentication.
pub(crate) fn public_router() -> Router {
    Router::with_path("public/tenants/{slug}").get(public::tenant::handler)
}

/// Routes that require a tenant API token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("tenant").get(tenant::get::handler))
        .push(
            Router::with_path("customers")
                .get(customers::index::handler)
                .post(customers::create::handler)
                .push(
                    Router::with_path("{customer}")
                        .get(customers::get::handler)
                        .put(customers::update::handler)
                        .delete(customers::delete::handler)
                        .push(
                            Router::with_path("transactions")
                                .get(transactions::index::handler)
                                .post(transactions::create::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("program")
                .get(program::get::handler)
                .put(program::update::handler),
        )
        .push(
            Router::with_path("branding")
                .get(branding::get::handler)
                .put(branding::update::handler),
        )
        .push(
            Router::with_path("notifications")
                .get(notifications::index::handler)
                .push(Router::with_path("read").post(notifications::read_all::handler))
                .push(
                    Router::with_path("{notification}/read")
                        .post(notifications::read::handler),
                ),
        )
}
