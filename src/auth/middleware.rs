//! Authentication Middleware
//! Resolves `Authorization: Bearer` tokens to an [`Identity`](crate::auth::models::Identity)
//! before protected handlers run

use crate::auth::{errors::AuthError, gate::SessionGate};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;

/// Auth middleware that validates bearer tokens.
///
/// A missing or malformed header is treated exactly like an invalid token.
pub async fn auth_middleware(
    State(gate): State<Arc<SessionGate>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AuthError::TokenInvalid)?;

    let identity = gate.validate_token(bearer.token())?;

    // Handlers pick this up through `Extension<Identity>`
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{
        account_store::SqliteAccountStore,
        denylist::TokenDenylist,
        jwt::JwtHandler,
        models::{Identity, Role},
    };
    use axum::{
        body::Body,
        http::{header, Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    const TEST_BCRYPT_COST: u32 = 4;

    fn test_gate() -> Arc<SessionGate> {
        let store = Arc::new(SqliteAccountStore::new(":memory:").unwrap());
        let jwt = Arc::new(JwtHandler::new("middleware-test-secret"));
        Arc::new(SessionGate::new(store, jwt, TokenDenylist::new(), TEST_BCRYPT_COST).unwrap())
    }

    fn protected_app(gate: Arc<SessionGate>) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|Extension(identity): Extension<Identity>| async move { identity.email }),
            )
            .route_layer(middleware::from_fn_with_state(gate, auth_middleware))
    }

    async fn call(app: Router, auth: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_bearer_passes() {
        let gate = test_gate();
        let (token, _) = gate
            .register("mw@x.com", "pw", "Mia", Role::Student)
            .unwrap();

        let status = call(protected_app(gate), Some(&format!("Bearer {}", token.token))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_or_malformed_header_rejected() {
        let gate = test_gate();
        assert_eq!(call(protected_app(gate.clone()), None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            call(protected_app(gate.clone()), Some("Token abc")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            call(protected_app(gate), Some("Bearer not.a.jwt")).await,
            StatusCode::UNAUTHORIZED
        );
    }
}
