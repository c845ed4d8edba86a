//! # Integration Flows
//!
//! Cross-crate flows: the node router driven through `tower::ServiceExt`, and
//! broker handshakes between independent identities.

pub mod broker_flows;
pub mod http_flows;
