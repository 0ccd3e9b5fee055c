//! Server settings loaded via OrthoConfig and the resolved server config.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use civicdesk::outbound::persistence::PoolConfig;

use super::cors::{CorsPolicy, CorsPolicyError};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Startup settings read from CLI flags, `CIVICDESK_*` variables, and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CIVICDESK")]
pub struct ServerSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind; defaults to 5000.
    pub port: Option<u16>,
    /// PostgreSQL URL. In-memory adapters are used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Lift sequence counters to the highest stored identifiers on startup.
    #[ortho_config(default = true)]
    pub reconcile_sequences: bool,
    /// Comma-separated browser origins allowed to call the API. Unset or
    /// `*` allows any origin.
    pub cors_origins: Option<String>,
}

impl ServerSettings {
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Pool configuration when a database URL is set.
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_ref().map(|url| {
            PoolConfig::new(url.clone())
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
        })
    }

    /// Cross-origin policy from `cors_origins`.
    ///
    /// # Errors
    /// Returns [`CorsPolicyError`] when an origin is not `scheme://host[:port]`.
    pub fn cors_policy(&self) -> Result<CorsPolicy, CorsPolicyError> {
        self.cors_origins
            .as_deref()
            .map_or(Ok(CorsPolicy::AnyOrigin), CorsPolicy::parse)
    }
}

/// Resolved listener configuration for [`super::create_server`].
pub struct ServerConfig {
    bind_addr: SocketAddr,
    cors: CorsPolicy,
}

impl ServerConfig {
    /// Listen on `bind_addr`, accepting browser calls from any origin.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            cors: CorsPolicy::AnyOrigin,
        }
    }

    #[must_use]
    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    #[must_use]
    pub fn cors(&self) -> &CorsPolicy {
        &self.cors
    }

    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
