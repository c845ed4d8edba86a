//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define dependencies the authentication core needs.
//! Time comes from [`Clock`]; the message-bus transport is behind
//! [`BrokerGateway`].

use async_trait::async_trait;
use thiserror::Error;

pub use shared_types::Clock;

/// Error from the message-bus transport.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Not connected to the broker.
    #[error("Broker not connected")]
    NotConnected,

    /// Broker refused the publish.
    #[error("Publish rejected on {topic}: {reason}")]
    Rejected { topic: String, reason: String },

    /// Communication error
    #[error("Communication error: {0}")]
    CommunicationError(String),
}

/// Gateway to the message broker.
///
/// The transport itself is an external collaborator; this crate only needs to
/// publish handshake acknowledgments.
#[async_trait]
pub trait BrokerGateway: Send + Sync {
    /// Publish `payload` on `topic`.
    ///
    /// # Errors
    /// * `BrokerError::NotConnected` - No live connection
    /// * `BrokerError::Rejected` - The broker refused the message
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BrokerError>;
}
