use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{info, instrument, warn};

use crate::shared::{AppError, AppState};

/// Organiser authentication middleware. Validates the Authorization Bearer header,
/// requires the organiser role and adds OrganiserClaims to the request.
/// Usage: .route_layer(middleware::from_fn_with_state(app_state.clone(), auth::organiser_auth))
#[instrument(skip(state, req, next))]
pub async fn organiser_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!(uri = %req.uri(), "Missing Authorization header on organiser route");
            AppError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    let claims = match state.token_config.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("Organiser authentication failed: {}", e);
            return Err(e);
        }
    };

    if !claims.is_organiser() {
        warn!(sub = %claims.sub, role = %claims.role, "Token lacks organiser role");
        return Err(AppError::Unauthorized(
            "Organiser role required".to_string(),
        ));
    }

    info!(sub = %claims.sub, "Organiser authenticated");

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::types::{OrganiserClaims, ORGANISER_ROLE};
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::post,
        Extension, Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app() -> (Router, AppState) {
        let state = AppStateBuilder::new().build();
        let router = Router::new()
            .route(
                "/guarded",
                post(|Extension(claims): Extension<OrganiserClaims>| async move { claims.sub }),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), organiser_auth))
            .with_state(state.clone());
        (router, state)
    }

    fn guarded(authorization: Option<String>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/guarded");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let (router, _) = app();
        let response = router.oneshot(guarded(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_unauthorized() {
        let (router, _) = app();
        let response = router
            .oneshot(guarded(Some("Basic dGQ6cGFzcw==".to_string())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_role_is_unauthorized() {
        let (router, state) = app();
        let token = state.token_config.create_token("p1", "attendee", 1).unwrap();
        let response = router
            .oneshot(guarded(Some(format!("Bearer {}", token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_organiser_token_passes_claims_through() {
        let (router, state) = app();
        let token = state
            .token_config
            .create_token("td@club", ORGANISER_ROLE, 1)
            .unwrap();
        let response = router
            .oneshot(guarded(Some(format!("Bearer {}", token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"td@club");
    }
}
