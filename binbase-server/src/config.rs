//! Environment-driven server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::handy::HandyConfig;
use crate::store::PgStoreConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);

/// Default static assets directory.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection settings
    pub database: PgStoreConfig,
    /// BIN data provider settings
    pub handy: HandyConfig,
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing keys take their defaults. Malformed numeric values are
    /// logged and replaced by the default.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = PgStoreConfig::default();

        let database = PgStoreConfig::new(
            get("POSTGRES_HOST").unwrap_or(defaults.host),
            get("POSTGRES_DATABASE").unwrap_or(defaults.database),
        )
        .with_port(parse_or(&get, "POSTGRES_PORT", defaults.port))
        .with_credentials(
            get("POSTGRES_USER").unwrap_or(defaults.user),
            get("POSTGRES_PASSWORD").unwrap_or(defaults.password),
        )
        .with_max_connections(parse_or(&get, "POSTGRES_POOL_SIZE", defaults.max_connections));

        let mut handy = HandyConfig::new();
        if let Some(url) = get("HANDY_BASE_URL") {
            handy = handy.with_base_url(url);
        }
        if let Some(key) = get("HANDY_API_KEY").filter(|k| !k.is_empty()) {
            handy = handy.with_api_key(key);
        }

        Self {
            database,
            handy,
            bind_addr: parse_or(&get, "BIND_ADDR", DEFAULT_BIND_ADDR),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match get(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring malformed setting, using default");
            default
        }),
    }
}
