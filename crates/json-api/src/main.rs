//! Stampbook JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use stampbook_app::{auth::OpenBaoClient, context::AppContext};

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod branding;
mod config;
mod customers;
mod extensions;
mod healthcheck;
mod notifications;
mod observability;
mod program;
mod public;
mod router;
mod shutdown;
mod state;
mod tenant;
#[cfg(test)]
mod test_helpers;
mod transactions;

const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

/// Stampbook JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let addr = config.socket_addr();
    let grace = config.server.shutdown_grace();
    let database = config.database.redacted_url();
    let openbao = OpenBaoClient::new(config.auth.into_openbao_config());

    let app = match AppContext::from_database_url(&config.database.database_url, openbao).await {
        Ok(app) => app,
        Err(init_error) => {
            error!(%database, "failed to initialize app context: {init_error}");

            observability.shutdown();
            process::exit(1);
        }
    };

    info!(%database, "connected as row-level security bound role");
    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;
    let server = Server::new(listener);
    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(build_router(State::from_app_context(app))).await;

    info!("server stopped");

    observability.shutdown();
}

fn build_router(state: Arc<State>) -> Router {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(router::public_router())
        .push(router::app_router());

    let doc = api_doc(&router);

    router
        .push(doc.into_router(OPENAPI_JSON_PATH))
        .push(SwaggerUi::new(OPENAPI_JSON_PATH).into_router("docs"))
}

fn api_doc(router: &Router) -> OpenApi {
    OpenApi::new("Stampbook API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(router)
}
