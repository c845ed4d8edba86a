//! HTTP routes.
//!
//! | Route | Auth | Purpose |
//! |-------|------|---------|
//! | `GET /whoami` | compact token or session | Echo the authenticated key |
//! | `POST /session` | none | Trade a fresh compact token for a session credential |
//! | `POST /verify` | none | Recover the signer of an arbitrary message |

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sigauth_core::{
    unauthorized_response, AuthLayer, AuthService, AuthenticatedKey, AuthenticationApi,
    CredentialSource, PublicKeyHex,
};
use std::sync::Arc;
use tracing::debug;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub pubkey: PublicKeyHex,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// Standard base64 of the 65-byte signature.
    pub signature: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub pubkey: PublicKeyHex,
}

/// Build the node router.
pub fn router(auth: Arc<AuthService>, source: CredentialSource) -> Router {
    let protected = Router::new()
        .route("/whoami", get(whoami))
        .route_layer(AuthLayer::new(auth.clone(), source));

    Router::new()
        .route("/session", post(create_session))
        .route("/verify", post(verify_message))
        .merge(protected)
        .with_state(AppState { auth })
}

/// Unwrap a JSON body. Parse failures get the same 401 as bad credentials.
fn request_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(request)| request).map_err(|e| {
        debug!(status = %e.status(), error = %e.body_text(), "Request body rejected");
        unauthorized_response()
    })
}

async fn whoami(AuthenticatedKey(pubkey): AuthenticatedKey) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse { pubkey })
}

async fn create_session(
    State(state): State<AppState>,
    body: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, Response> {
    let request = request_body(body)?;
    let credential = state
        .auth
        .exchange_for_session(&request.token)
        .map_err(|e| {
            debug!(error = %e, "Session exchange refused");
            unauthorized_response()
        })?;

    Ok(Json(SessionResponse {
        session: credential.into_string(),
    }))
}

async fn verify_message(
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, Response> {
    let request = request_body(body)?;
    let pubkey = state
        .auth
        .verify_arbitrary_message(&request.signature, &request.message)
        .map_err(|e| {
            debug!(error = %e, "Message signature refused");
            unauthorized_response()
        })?;

    Ok(Json(VerifyResponse { pubkey }))
}
