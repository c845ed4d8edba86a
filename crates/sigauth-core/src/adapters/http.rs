//! # HTTP Authentication Layer
//!
//! Tower middleware that authenticates every request before it reaches the
//! router. The credential is read from the `token` query parameter, falling
//! back to the `x-jwt` header (both names configurable), and dispatched
//! through [`AuthenticationApi::authenticate`].
//!
//! On success the recovered key is inserted into the request extensions and
//! handlers read it with the [`AuthenticatedKey`] extractor. Every failure
//! becomes the same 401; the cause is only logged.

use crate::config::AuthConfig;
use crate::ports::inbound::AuthenticationApi;
use axum::{
    body::Body,
    extract::{FromRequestParts, Query},
    http::{header, request::Parts, HeaderValue, Request, StatusCode},
    response::Response,
};
use shared_types::PublicKeyHex;
use std::collections::HashMap;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};

const UNAUTHORIZED_BODY: &str = r#"{"error":"unauthorized"}"#;

/// Where the layer looks for a credential.
#[derive(Clone, Debug)]
pub struct CredentialSource {
    query_param: String,
    header: String,
}

impl CredentialSource {
    pub fn new(query_param: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            query_param: query_param.into(),
            header: header.into(),
        }
    }

    /// Query parameter first, then header. Both are trimmed; empty values
    /// count as absent.
    pub fn extract<B>(&self, req: &Request<B>) -> Option<String> {
        if let Ok(Query(params)) = Query::<HashMap<String, String>>::try_from_uri(req.uri()) {
            if let Some(value) = params
                .get(&self.query_param)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
            {
                return Some(value.to_string());
            }
        }

        req.headers()
            .get(self.header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

impl From<&AuthConfig> for CredentialSource {
    fn from(config: &AuthConfig) -> Self {
        Self::new(&config.token_query_param, &config.token_header)
    }
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

/// Authentication layer
#[derive(Clone)]
pub struct AuthLayer {
    auth: Arc<dyn AuthenticationApi>,
    source: Arc<CredentialSource>,
}

impl AuthLayer {
    pub fn new(auth: Arc<dyn AuthenticationApi>, source: CredentialSource) -> Self {
        Self {
            auth,
            source: Arc::new(source),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            auth: Arc::clone(&self.auth),
            source: Arc::clone(&self.source),
        }
    }
}

/// Authentication middleware
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    auth: Arc<dyn AuthenticationApi>,
    source: Arc<CredentialSource>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let auth = Arc::clone(&self.auth);
        let source = Arc::clone(&self.source);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(credential) = source.extract(&req) else {
                debug!(path = %req.uri().path(), "No credential presented");
                return Ok(unauthorized_response());
            };

            match auth.authenticate(&credential) {
                Ok(pubkey) => {
                    debug!(pubkey = %pubkey, path = %req.uri().path(), "Request authenticated");
                    req.extensions_mut().insert(AuthenticatedKey(pubkey));
                    inner.call(req).await
                }
                Err(e) => {
                    warn!(error = %e, path = %req.uri().path(), "Authentication failed");
                    Ok(unauthorized_response())
                }
            }
        })
    }
}

/// Public key of the authenticated caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedKey(pub PublicKeyHex);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedKey
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedKey>()
            .cloned()
            .ok_or_else(unauthorized_response)
    }
}

/// Generic 401. Carries no detail about why authentication failed.
pub fn unauthorized_response() -> Response {
    let mut response = Response::new(Body::from(UNAUTHORIZED_BODY));
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}
