use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, Header};

use crate::errors::{ApiError, AuthError};
use crate::services::{AuthService, TokenService};

pub const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Clone)]
pub struct RemoteAuthState {
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
}

/// Guards the actuation and snooze submission routes.
///
/// The deployment API key proves the client build, the bearer token proves
/// the user, and the allow-list decides whether that user may operate the
/// door. Missing credentials map to 401, rejected ones to 403, and the
/// verified claims are handed to the handler through request extensions.
pub async fn remote_auth(
    State(state): State<RemoteAuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    state.auth_service.verify_api_key(api_key)?;

    let mut headers = req.headers().get_all(header::AUTHORIZATION).iter();

    let bearer: Authorization<Bearer> =
        Authorization::decode(&mut headers).map_err(|_| AuthError::MissingToken)?;

    let token_data = state
        .token_service
        .retrieve_token_claims(bearer.token())
        .map_err(|_| AuthError::InvalidToken)?;

    if !state.auth_service.is_authorized(&token_data.claims.email) {
        return Err(AuthError::NotAuthorized.into());
    }

    req.extensions_mut().insert(token_data.claims);

    Ok(next.run(req).await)
}
