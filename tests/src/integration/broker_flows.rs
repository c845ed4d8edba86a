//! # Broker Flows
//!
//! Two independent identities share one in-memory broker. Each connects with
//! a derived credential and the other side acknowledges on the reply topic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sigauth_core::{
        reply_topic, AuthConfig, AuthError, AuthService, AuthenticationApi, BrokerGateway,
        BrokerHandshake, BrokerIdentity, FixedClock, HandshakeAck, InMemoryBroker,
        Secp256k1Keypair,
    };
    use std::sync::Arc;

    const NOW: i64 = 1_700_000_000;

    struct Peer {
        identity: Arc<BrokerIdentity>,
        handshake: BrokerHandshake<InMemoryBroker>,
    }

    fn auth(clock: Arc<FixedClock>) -> Arc<AuthService> {
        Arc::new(AuthService::new(&AuthConfig::with_secret("c4".repeat(32)), clock).unwrap())
    }

    fn peer(clock: Arc<FixedClock>, broker: Arc<InMemoryBroker>) -> Peer {
        let identity = Arc::new(BrokerIdentity::new(clock.clone()));
        Peer {
            handshake: BrokerHandshake::new(identity.clone(), auth(clock), broker),
            identity,
        }
    }

    #[tokio::test]
    async fn test_mutual_handshake_over_shared_broker() {
        let clock = Arc::new(FixedClock::new(NOW));
        let broker = Arc::new(InMemoryBroker::new());
        let a = peer(clock.clone(), broker.clone());
        let b = peer(clock.clone(), broker.clone());

        let a_cred = a.handshake.connect_credential().unwrap();
        let b_cred = b.handshake.connect_credential().unwrap();
        assert_ne!(a_cred.username, b_cred.username);

        b.handshake
            .handle_peer_handshake(a_cred.username.as_str(), &a_cred.password)
            .await
            .unwrap();
        a.handshake
            .handle_peer_handshake(b_cred.username.as_str(), &b_cred.password)
            .await
            .unwrap();

        let to_a = broker.on_topic(&reply_topic(&a_cred.username, &a_cred.password));
        let to_b = broker.on_topic(&reply_topic(&b_cred.username, &b_cred.password));
        assert_eq!(to_a.len(), 1);
        assert_eq!(to_b.len(), 1);

        let ack_for_a: HandshakeAck = serde_json::from_slice(&to_a[0].payload).unwrap();
        let ack_for_b: HandshakeAck = serde_json::from_slice(&to_b[0].payload).unwrap();
        assert_eq!(ack_for_a.pubkey, b.identity.username().unwrap());
        assert_eq!(ack_for_b.pubkey, a.identity.username().unwrap());
    }

    #[tokio::test]
    async fn test_stolen_password_with_other_username_rejected() {
        let clock = Arc::new(FixedClock::new(NOW));
        let broker = Arc::new(InMemoryBroker::new());
        let a = peer(clock.clone(), broker.clone());
        let b = peer(clock.clone(), broker.clone());
        let mallory = peer(clock, broker.clone());

        let a_cred = a.handshake.connect_credential().unwrap();
        let mallory_name = mallory.identity.username().unwrap();

        let result = b
            .handshake
            .handle_peer_handshake(mallory_name.as_str(), &a_cred.password)
            .await;
        assert_eq!(result, Err(AuthError::Unauthorized));
        assert!(broker.published().is_empty());
    }

    #[tokio::test]
    async fn test_reconnect_uses_fresh_password() {
        let clock = Arc::new(FixedClock::new(NOW));
        let broker = Arc::new(InMemoryBroker::new());
        let a = peer(clock.clone(), broker.clone());
        let b = peer(clock.clone(), broker.clone());

        let first = a.handshake.connect_credential().unwrap();
        clock.advance(600);

        // The old password has aged out...
        assert!(matches!(
            b.handshake
                .handle_peer_handshake(first.username.as_str(), &first.password)
                .await,
            Err(AuthError::TokenExpired { .. })
        ));

        // ...but a freshly derived one is accepted under the same username.
        let second = a.handshake.connect_credential().unwrap();
        assert_eq!(first.username, second.username);
        b.handshake
            .handle_peer_handshake(second.username.as_str(), &second.password)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_gateway_is_a_trait_object() {
        let broker: Arc<dyn BrokerGateway> = Arc::new(InMemoryBroker::new());
        broker.publish("topic", b"payload".to_vec()).await.unwrap();
    }

    proptest! {
        #[test]
        fn prop_derived_password_verifies_as_username(
            seed in prop::array::uniform32(1u8..0xff),
            now in 1_000_000i64..4_000_000_000,
        ) {
            let clock = Arc::new(FixedClock::new(now));
            let keypair = Secp256k1Keypair::from_bytes(&seed).unwrap();
            let identity = BrokerIdentity::with_keypair(keypair, clock.clone());
            let credential = identity.derive_credential().unwrap();

            let recovered = auth(clock).verify_compact_token(&credential.password, true).unwrap();
            prop_assert_eq!(recovered, credential.username);
        }
    }
}
