//! # HTTP Flows
//!
//! Drives the node router end to end without a socket:
//!
//! 1. Compact token → `POST /session` → session credential
//! 2. Session credential (header) or compact token (query) → `GET /whoami`
//! 3. Arbitrary message signature → `POST /verify`

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use sigauth_core::domain::token;
    use sigauth_core::{
        sign, AuthConfig, AuthService, CredentialSource, FixedClock, Secp256k1Keypair,
        SigningMode,
    };
    use sigauth_node::router;
    use sigauth_node::routes::{SessionResponse, VerifyResponse, WhoAmIResponse};
    use std::sync::Arc;
    use tower::ServiceExt;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const NOW: i64 = 1_700_000_000;

    struct Node {
        app: Router,
        clock: Arc<FixedClock>,
    }

    fn node() -> Node {
        let clock = Arc::new(FixedClock::new(NOW));
        let config = AuthConfig::with_secret("a1".repeat(32));
        let auth = Arc::new(AuthService::new(&config, clock.clone()).unwrap());
        Node {
            app: router(auth, CredentialSource::from(&config)),
            clock,
        }
    }

    fn alice() -> Secp256k1Keypair {
        Secp256k1Keypair::from_bytes(&[0xa1; 32]).unwrap()
    }

    fn compact(offset: i64, mode: SigningMode) -> String {
        token::encode((NOW + offset) as u32, &alice(), mode).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn whoami_with_header(credential: &str) -> Request<Body> {
        Request::builder()
            .uri("/whoami")
            .header("x-jwt", credential)
            .body(Body::empty())
            .unwrap()
    }

    async fn json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn session_for(app: &Router, token: &str) -> String {
        let response = app
            .clone()
            .oneshot(post_json("/session", serde_json::json!({ "token": token })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        json::<SessionResponse>(response).await.session
    }

    // =============================================================================
    // SESSION BOOTSTRAP
    // =============================================================================

    #[tokio::test]
    async fn test_compact_token_bootstraps_session() {
        let node = node();
        let session = session_for(&node.app, &compact(0, SigningMode::ForcedUtf8)).await;

        let response = node
            .app
            .clone()
            .oneshot(whoami_with_header(&session))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: WhoAmIResponse = json(response).await;
        assert_eq!(body.pubkey, alice().public_key_hex());
    }

    #[tokio::test]
    async fn test_session_outlives_token_window_until_ttl() {
        let node = node();
        let session = session_for(&node.app, &compact(0, SigningMode::Raw)).await;

        node.clock.advance(24 * 3600);
        let response = node
            .app
            .clone()
            .oneshot(whoami_with_header(&session))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        node.clock.set(NOW + 7 * 24 * 3600);
        let response = node
            .app
            .clone()
            .oneshot(whoami_with_header(&session))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_stale_token_cannot_bootstrap() {
        let node = node();
        let response = node
            .app
            .oneshot(post_json(
                "/session",
                serde_json::json!({ "token": compact(-301, SigningMode::Raw) }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[tokio::test]
    async fn test_malformed_bodies_get_generic_401() {
        let node = node();
        let requests = [
            post_json("/session", serde_json::json!({})),
            post_json("/verify", serde_json::json!({ "message": "m" })),
            Request::builder()
                .method("POST")
                .uri("/session")
                .body(Body::from("not json"))
                .unwrap(),
        ];

        for request in requests {
            let response = node.app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert_eq!(&bytes[..], br#"{"error":"unauthorized"}"#);
        }
    }

    #[tokio::test]
    async fn test_session_from_another_node_rejected() {
        let ours = node();
        let session = session_for(&ours.app, &compact(0, SigningMode::Raw)).await;

        let clock = Arc::new(FixedClock::new(NOW));
        let config = AuthConfig::with_secret("b2".repeat(32));
        let theirs = router(
            Arc::new(AuthService::new(&config, clock).unwrap()),
            CredentialSource::from(&config),
        );

        let response = theirs.oneshot(whoami_with_header(&session)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // =============================================================================
    // DIRECT COMPACT TOKENS
    // =============================================================================

    #[tokio::test]
    async fn test_query_token_both_modes() {
        let node = node();
        for mode in [SigningMode::Raw, SigningMode::ForcedUtf8] {
            let request = Request::builder()
                .uri(format!("/whoami?token={}", compact(-120, mode)))
                .body(Body::empty())
                .unwrap();
            let response = node.app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "mode {mode:?}");
        }
    }

    #[tokio::test]
    async fn test_token_replay_inside_window_is_accepted() {
        let node = node();
        let token = compact(0, SigningMode::Raw);
        for _ in 0..3 {
            let response = node
                .app
                .clone()
                .oneshot(whoami_with_header(&token))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        node.clock.advance(301);
        let response = node.app.oneshot(whoami_with_header(&token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // =============================================================================
    // ARBITRARY MESSAGES
    // =============================================================================

    #[tokio::test]
    async fn test_verify_arbitrary_message() {
        let node = node();
        let message = "withdraw 10 sats to lnbc1...";
        let signature = sign(message.as_bytes(), &alice()).unwrap();

        let response = node
            .app
            .clone()
            .oneshot(post_json(
                "/verify",
                serde_json::json!({
                    "signature": STANDARD.encode(signature.as_bytes()),
                    "message": message,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: VerifyResponse = json(response).await;
        assert_eq!(body.pubkey, alice().public_key_hex());

        // Message paths carry no window: an hour later the same pair still verifies.
        node.clock.advance(3600);
        let response = node
            .app
            .oneshot(post_json(
                "/verify",
                serde_json::json!({
                    "signature": STANDARD.encode(signature.as_bytes()),
                    "message": message,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_verify_wrong_message_and_bad_encoding() {
        let node = node();
        let signature = sign(b"original", &alice()).unwrap();

        let wrong_message = node
            .app
            .clone()
            .oneshot(post_json(
                "/verify",
                serde_json::json!({
                    "signature": STANDARD.encode(signature.as_bytes()),
                    "message": "altered",
                }),
            ))
            .await
            .unwrap();
        // Any 65-byte signature recovers some key; it is not the signer's.
        assert_eq!(wrong_message.status(), StatusCode::OK);
        let body: VerifyResponse = json(wrong_message).await;
        assert_ne!(body.pubkey, alice().public_key_hex());

        let garbage = node
            .app
            .oneshot(post_json(
                "/verify",
                serde_json::json!({ "signature": "%%%", "message": "original" }),
            ))
            .await
            .unwrap();
        assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    }
}
