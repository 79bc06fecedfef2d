//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway
//! client. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Raw multi-context configuration: context name → per-context entry.
///
/// Supplied once at construction and only read back on context switch.
pub type RawConfiguration = HashMap<String, ContextConfig>;

/// Root configuration for the gateway client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Per-context configuration entries (e.g. "sandbox", "production").
    pub contexts: RawConfiguration,

    /// Gateway server registry.
    pub servers: ServerRegistry,

    /// Health probe settings.
    pub probe: ProbeConfig,
}

/// One named context: signing globals plus the default request fields seeded
/// on every switch to this context.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ContextConfig {
    /// Signing and environment settings.
    pub globals: GlobalsConfig,

    /// Default field values applied after every context switch.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

/// Per-context signing and environment settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlobalsConfig {
    /// HMAC key as a hex-digit string (decoded to raw bytes before signing).
    pub hmac_key: String,

    /// HMAC algorithm identifier (e.g. "sha512").
    #[serde(default = "default_hmac_algorithm")]
    pub hmac_algorithm: String,

    /// Whether this context targets the production gateway.
    #[serde(default)]
    pub production: bool,

    /// Free-form per-context settings (site, rank, login, ...). Preserved
    /// verbatim; the core never interprets them.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_hmac_algorithm() -> String {
    "sha512".to_string()
}

impl Default for GlobalsConfig {
    fn default() -> Self {
        Self {
            hmac_key: String::new(),
            hmac_algorithm: default_hmac_algorithm(),
            production: false,
            extra: BTreeMap::new(),
        }
    }
}

/// Fixed registry of gateway servers.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerRegistry {
    /// Preferred production server.
    pub primary: ServerConfig,

    /// Production failover server.
    pub secondary: ServerConfig,

    /// Pre-production (test) server.
    pub preprod: ServerConfig,
}

/// A single gateway server entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// URL scheme (e.g. "https").
    pub protocol: String,

    /// Server hostname.
    pub host: String,

    /// Path of the health-check page, with leading slash.
    pub health_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            protocol: "https".to_string(),
            host: String::new(),
            health_path: "/load.html".to_string(),
        }
    }
}

impl ServerConfig {
    /// URL of this server's health-check page.
    pub fn health_url(&self) -> String {
        format!("{}://{}{}", self.protocol, self.host, self.health_path)
    }
}

/// Health probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}
