//! Node configuration, loaded from environment variables.

use sigauth_core::{AuthConfig, ConfigError};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use tracing::{info, warn};

/// Session secret, hex encoded.
pub const ENV_SESSION_SECRET: &str = "SIGAUTH_SESSION_SECRET";
/// HTTP listen port.
pub const ENV_HTTP_PORT: &str = "SIGAUTH_HTTP_PORT";
/// Replay window for compact tokens, seconds.
pub const ENV_REPLAY_WINDOW_SECS: &str = "SIGAUTH_REPLAY_WINDOW_SECS";
/// Session credential lifetime, seconds.
pub const ENV_SESSION_TTL_SECS: &str = "SIGAUTH_SESSION_TTL_SECS";

/// Default HTTP port.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Node configuration.
#[derive(Clone, Debug)]
pub struct NodeConfig {
    pub bind_addr: IpAddr,
    pub http_port: u16,
    pub auth: AuthConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: DEFAULT_HTTP_PORT,
            auth: AuthConfig::default(),
        }
    }
}

impl NodeConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<NodeConfig, ConfigError> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration through `lookup`.
///
/// Unset variables keep their defaults; set but unparsable ones are an
/// error. The session secret is not validated here.
pub fn load_config_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<NodeConfig, ConfigError> {
    let mut config = NodeConfig::default();

    if let Some(secret) = lookup(ENV_SESSION_SECRET) {
        config.auth.session_secret = Some(secret);
        info!("Loaded session secret from environment");
    }

    if let Some(port) = parse_var(&lookup, ENV_HTTP_PORT)? {
        config.http_port = port;
    }
    if let Some(secs) = parse_var(&lookup, ENV_REPLAY_WINDOW_SECS)? {
        config.auth.replay_window_secs = secs;
    }
    if let Some(secs) = parse_var(&lookup, ENV_SESSION_TTL_SECS)? {
        config.auth.session_ttl_secs = secs;
    }

    Ok(config)
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => {
            warn!(value = %value, "{name} is not valid");
            Err(ConfigError::InvalidValue { name, value })
        }
    }
}
