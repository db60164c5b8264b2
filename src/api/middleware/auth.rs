//! API-key authorization middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authorizes mutating API requests against the stored API key.
///
/// # Key Transport
///
/// The key is accepted from either of:
///
/// ```text
/// Authorization: Bearer <key>
/// ```
///
/// or a `?key=<key>` query parameter (the transport NFC-tag URLs use).
///
/// # Authorization Flow
///
/// 1. Read-only methods (GET/HEAD/OPTIONS) pass through - state reads are
///    public on the LAN, matching the UI's unauthenticated polling
/// 2. While API-key security is disabled, every request passes
/// 3. Otherwise the supplied key must exactly match the stored one
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) when
/// security is enabled and the key is missing or wrong.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use crate::api::middleware::auth;
///
/// let api = api_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let method = req.method();
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let bearer = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token);
    let provided = bearer.or_else(|| key_from_query(&parts.uri));

    let req = Request::from_parts(parts, body);

    if !st.redirect_service.authorize(provided.as_deref()).await {
        return Err(AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Invalid or missing API key"}),
        ));
    }

    Ok(next.run(req).await)
}

/// Extracts the `key` query parameter, if any.
fn key_from_query(uri: &Uri) -> Option<String> {
    uri.query().and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == "key")
            .map(|(_, value)| value.into_owned())
    })
}
