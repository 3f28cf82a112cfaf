//! Gateway configuration via `graphgate.toml`
//!
//! Everything the gateway needs at startup: where the database is, how
//! callers authenticate, and whether writes are allowed. Read once, turned
//! into [`GatewayOptions`] and never consulted again.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use graphgate_security::{AccessMode, Credential, GatewayOptions, TransportMode};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "graphgate.toml";

/// URI schemes the Bolt driver understands.
pub const SUPPORTED_SCHEMES: &[&str] = &["bolt", "bolt+s", "bolt+ssc", "neo4j", "neo4j+s", "neo4j+ssc"];

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "GRAPHGATE_";

/// Static credentials for single-tenant deployments.
///
/// Either `username`/`password` or `token`, never both.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Basic-auth user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Basic-auth password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl CredentialsConfig {
    fn to_credential(&self) -> Credential {
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            return Credential::bearer(token);
        }
        match self.username.as_deref().filter(|u| !u.is_empty()) {
            Some(user) => Credential::basic(user, self.password.clone().unwrap_or_default()),
            None => Credential::None,
        }
    }
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Gateway configuration loaded from `graphgate.toml`.
///
/// # Example
///
/// ```toml
/// uri = "bolt://localhost:7687"
/// transport_mode = "single-tenant"
/// read_only = false
///
/// [credentials]
/// username = "neo4j"
/// password = "password"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Database URI.
    #[serde(default = "default_uri")]
    pub uri: String,
    /// Target database; server default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// `"single-tenant"` or `"multi-tenant"`.
    #[serde(default = "default_transport_mode")]
    pub transport_mode: String,
    /// Refuse the write operation.
    #[serde(default)]
    pub read_only: bool,
    /// Per-call deadline in milliseconds; none when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_timeout_ms: Option<u64>,
    /// Records pulled per network round-trip.
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
    /// Static credential, single-tenant only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<CredentialsConfig>,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_transport_mode() -> String {
    TransportMode::SingleTenant.as_str().to_string()
}

fn default_fetch_size() -> usize {
    500
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: None,
            transport_mode: default_transport_mode(),
            read_only: false,
            query_timeout_ms: None,
            fetch_size: default_fetch_size(),
            credentials: None,
        }
    }
}

impl GatewayConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# GraphGate configuration
#
# Database URI. Schemes: bolt, bolt+s, bolt+ssc, neo4j, neo4j+s, neo4j+ssc
uri = "bolt://localhost:7687"

# Target database (default: server default)
# database = "neo4j"

# Transport mode: "single-tenant" (default) or "multi-tenant"
#   "single-tenant" = every call runs as the [credentials] below
#   "multi-tenant"  = every call must bring its own bearer token or basic pair
transport_mode = "single-tenant"

# Refuse the write operation entirely (default: false)
read_only = false

# Per-call deadline in milliseconds (default: none)
# query_timeout_ms = 30000

# Records pulled per network round-trip (default: 500)
fetch_size = 500

# Static credential, single-tenant only. Use username/password or token.
# [credentials]
# username = "neo4j"
# password = "password"
# token = "..."
"#
    }

    /// Parse config from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GatewayConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: GatewayConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Load from `path`, apply process environment overrides, validate.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `GRAPHGATE_*` variables returned by `lookup`.
    ///
    /// Recognized: `URI`, `DATABASE`, `USERNAME`, `PASSWORD`, `TOKEN`,
    /// `TRANSPORT_MODE`, `READ_ONLY`, `QUERY_TIMEOUT_MS`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(uri) = var("URI") {
            self.uri = uri;
        }
        if let Some(database) = var("DATABASE") {
            self.database = Some(database).filter(|d| !d.is_empty());
        }
        if let Some(mode) = var("TRANSPORT_MODE") {
            self.transport_mode = mode;
        }
        if let Some(flag) = var("READ_ONLY") {
            self.read_only = parse_bool(&flag).ok_or_else(|| {
                Error::config(format!(
                    "{}READ_ONLY must be true or false, got '{}'",
                    ENV_PREFIX, flag
                ))
            })?;
        }
        if let Some(ms) = var("QUERY_TIMEOUT_MS") {
            let ms = ms.trim().parse::<u64>().map_err(|_| {
                Error::config(format!(
                    "{}QUERY_TIMEOUT_MS must be a number of milliseconds, got '{}'",
                    ENV_PREFIX, ms
                ))
            })?;
            self.query_timeout_ms = Some(ms);
        }

        let username = var("USERNAME");
        let password = var("PASSWORD");
        let token = var("TOKEN");
        if username.is_some() || password.is_some() || token.is_some() {
            let creds = self.credentials.get_or_insert_with(CredentialsConfig::default);
            if username.is_some() {
                creds.username = username;
            }
            if password.is_some() {
                creds.password = password;
            }
            if token.is_some() {
                creds.token = token;
            }
        }
        Ok(())
    }

    /// Parse the transport mode string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known transport mode.
    pub fn transport_mode(&self) -> Result<TransportMode> {
        self.transport_mode.parse().map_err(|e| {
            Error::config(format!("{} in {}", e, CONFIG_FILE_NAME))
        })
    }

    /// The configured per-call deadline.
    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        let uri = self.uri.trim();
        if uri.is_empty() {
            return Err(Error::config("uri must not be empty"));
        }
        let scheme = uri.split("://").next().unwrap_or_default();
        if !uri.contains("://") || !SUPPORTED_SCHEMES.contains(&scheme) {
            return Err(Error::config(format!(
                "unsupported uri '{}', expected one of {} schemes",
                uri,
                SUPPORTED_SCHEMES.join(", ")
            )));
        }

        self.transport_mode()?;

        if let Some(creds) = &self.credentials {
            if creds.token.is_some() && (creds.username.is_some() || creds.password.is_some()) {
                return Err(Error::config(
                    "credentials must set either token or username/password, not both",
                ));
            }
        }
        if self.fetch_size == 0 {
            return Err(Error::config("fetch_size must be greater than zero"));
        }
        if self.query_timeout_ms == Some(0) {
            return Err(Error::config("query_timeout_ms must be greater than zero"));
        }
        Ok(())
    }

    /// The static credential this config declares.
    pub fn static_credential(&self) -> Credential {
        self.credentials
            .as_ref()
            .map(CredentialsConfig::to_credential)
            .unwrap_or_default()
    }

    /// Build the immutable options handed to the gateway at startup.
    ///
    /// In multi-tenant mode the static credential is left out.
    pub fn to_options(&self) -> Result<GatewayOptions> {
        self.validate()?;
        let mode = self.transport_mode()?;

        let mut options = GatewayOptions::new().transport_mode(mode).access_mode(
            if self.read_only {
                AccessMode::ReadOnly
            } else {
                AccessMode::ReadWrite
            },
        );
        if mode == TransportMode::SingleTenant {
            options = options.credential(self.static_credential());
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        if let Some(timeout) = self.query_timeout() {
            options = options.default_timeout(timeout);
        }
        Ok(options)
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
