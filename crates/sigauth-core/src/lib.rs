//! # Signature Authentication Core
//!
//! Authenticates actors by possession of a secp256k1 private key. An actor
//! signs a domain-separated digest; the verifier recovers the compressed
//! public key from the 65-byte signature alone.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Signature primitive, token codec, replay
//!   window, session bridge, broker identity. No I/O
//! - **Ports Layer** (`ports/`): Inbound API and outbound clock/broker traits
//! - **Service Layer** (`service.rs`): `AuthService`, wiring domain to ports
//! - **Adapters** (`adapters/`): HTTP middleware and broker handshake
//!
//! ## Security Notes
//!
//! - **Malleability**: Signatures with high S values are rejected
//! - **Self-asserted identity**: A recovered key says who signed, nothing
//!   about what they may do
//! - **Replay**: Compact tokens are bounded by recency only. There is no
//!   forward bound and no single-use tracking

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::bus::{BrokerHandshake, InMemoryBroker, PublishedMessage};
pub use adapters::http::{unauthorized_response, AuthLayer, AuthenticatedKey, CredentialSource};
pub use config::{AuthConfig, ConfigError};
pub use domain::broker::{reply_topic, BrokerIdentity};
pub use domain::entities::{
    BrokerCredential, DecodedToken, HandshakeAck, Recovery, RecoverableSignature, SessionClaims,
    SessionCredential, SigningMode,
};
pub use domain::errors::{AuthError, CryptoError};
pub use domain::keypair::Secp256k1Keypair;
pub use domain::replay::ReplayWindow;
pub use domain::session::{is_expired, SessionTokenBridge};
pub use domain::signature::{digest, recover_and_verify, sign};
pub use ports::inbound::AuthenticationApi;
pub use ports::outbound::{BrokerError, BrokerGateway};
pub use service::{AuthService, CredentialKind};
pub use shared_types::{Clock, FixedClock, PublicKeyHex, SystemClock, UnixTimestamp};
