//! Bearer token authentication for tenant routes.

use std::sync::Arc;

use salvo::{
    http::header::{AUTHORIZATION, HeaderValue, WWW_AUTHENTICATE},
    prelude::*,
};
use tracing::{error, warn};

use stampbook_app::{auth::AuthServiceError, domain::tenants::records::TenantUuid};

use crate::{extensions::*, state::State};

const MISSING_TOKEN_CHALLENGE: &str = r#"Bearer realm="stampbook""#;
const INVALID_TOKEN_CHALLENGE: &str = r#"Bearer realm="stampbook", error="invalid_token""#;

/// Resolve the caller's tenant from `Authorization: Bearer <token>`, or stop
/// the request with 401 (bad token) or 403 (suspended tenant).
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let authenticated = authenticate(bearer_token(req), depot).await;

    match authenticated {
        Ok(tenant_uuid) => {
            depot.insert_tenant_uuid(tenant_uuid);
            ctrl.call_next(req, depot, res).await;
        }
        Err(rejection) => {
            if let Some(challenge) = rejection.challenge {
                res.headers_mut()
                    .insert(WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
            }

            res.render(rejection.status);
            ctrl.skip_rest();
        }
    }
}

#[derive(Debug)]
struct Rejection {
    status: StatusError,
    challenge: Option<&'static str>,
}

impl From<StatusError> for Rejection {
    fn from(status: StatusError) -> Self {
        Self {
            status,
            challenge: None,
        }
    }
}

async fn authenticate(token: Option<&str>, depot: &Depot) -> Result<TenantUuid, Rejection> {
    let token = token.ok_or_else(|| Rejection {
        status: StatusError::unauthorized().brief("Missing or invalid Authorization header"),
        challenge: Some(MISSING_TOKEN_CHALLENGE),
    })?;

    let state = Arc::clone(depot.obtain_or_500::<Arc<State>>()?);

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(into_rejection)
}

fn into_rejection(error: AuthServiceError) -> Rejection {
    match error {
        AuthServiceError::NotFound => Rejection {
            status: StatusError::unauthorized().brief("Invalid API token"),
            challenge: Some(INVALID_TOKEN_CHALLENGE),
        },
        AuthServiceError::TenantSuspended => {
            warn!("rejected api token for suspended tenant");

            StatusError::forbidden().brief("Tenant is suspended").into()
        }
        AuthServiceError::InvalidReference => {
            error!("api token references a missing tenant");

            StatusError::internal_server_error().into()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to validate api token: {source}");

            StatusError::internal_server_error().into()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process api token: {source}");

            StatusError::internal_server_error().into()
        }
        AuthServiceError::OpenBao(source) => {
            error!("OpenBao error during token authentication: {source}");

            StatusError::internal_server_error().into()
        }
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;
    use uuid::Uuid;

    use stampbook_app::auth::MockAuthService;

    use crate::test_helpers::state_with_auth;

    use super::*;

    #[salvo::handler]
    async fn echo_tenant(depot: &mut Depot, res: &mut Response) {
        let tenant = depot
            .tenant_uuid_or_401()
            .map_or_else(|_missing| "missing".to_string(), |uuid| uuid.to_string());

        res.render(tenant);
    }

    fn make_service(auth: MockAuthService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .hoop(handler)
                .push(Router::new().get(echo_tenant)),
        )
    }

    fn challenge(res: &Response) -> Option<&str> {
        res.headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn test_unusable_authorization_headers_return_401() {
        for header in [None, Some("Basic abc123"), Some("Bearer   "), Some("Bearer")] {
            let mut auth = MockAuthService::new();

            auth.expect_authenticate_bearer().never();

            let mut request = TestClient::get("http://example.com");

            if let Some(value) = header {
                request = request.add_header(AUTHORIZATION, value, true);
            }

            let res = request.send(&make_service(auth)).await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "header {header:?} should be rejected"
            );
            assert_eq!(challenge(&res), Some(MISSING_TOKEN_CHALLENGE));
        }
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401_with_invalid_token_challenge() {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "sb_v1_abc.def")
            .return_once(|_token| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer sb_v1_abc.def", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(challenge(&res), Some(INVALID_TOKEN_CHALLENGE));
    }

    #[tokio::test]
    async fn test_suspended_tenant_returns_403() {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_token| Err(AuthServiceError::TenantSuspended));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer sb_v1_abc.def", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(challenge(&res), None);
    }

    #[tokio::test]
    async fn test_valid_token_injects_tenant_uuid() -> TestResult {
        let tenant = TenantUuid::from_uuid(Uuid::nil());

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "sb_v1_abc.def")
            .return_once(move |_token| Ok(tenant));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer sb_v1_abc.def", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, tenant.to_string());

        Ok(())
    }
}
