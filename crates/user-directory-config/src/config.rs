// crates/user-directory-config/src/config.rs
// ============================================================================
// Module: User Directory Configuration
// Description: Configuration loading and validation for the directory client.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: user-directory-client, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed; nothing is built from a
//! config that has not passed [`DirectoryConfig::validate`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use user_directory_client::DEFAULT_BASE_URL;
use user_directory_client::DEFAULT_MAX_RESPONSE_BYTES;
use user_directory_client::DEFAULT_TIMEOUT_MS;
use user_directory_client::DEFAULT_USER_AGENT;
use user_directory_client::DirectoryAuditSink;
use user_directory_client::DirectoryClient;
use user_directory_client::DirectoryClientConfig;
use user_directory_client::DirectoryFileAuditSink;
use user_directory_client::DirectoryNoopAuditSink;
use user_directory_client::DirectoryStderrAuditSink;
use user_directory_client::parse_base_url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "user-directory.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "USER_DIRECTORY_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 300_000;
/// Maximum response body cap in bytes.
pub(crate) const MAX_RESPONSE_BYTES_LIMIT: usize = 64 * 1024 * 1024;
/// Maximum user agent length.
pub(crate) const MAX_USER_AGENT_LENGTH: usize = 256;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Top-level configuration file model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Remote service settings.
    #[serde(default)]
    pub service: ServiceConfig,
    /// Audit logging settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl DirectoryConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service.validate()?;
        self.audit.validate()
    }

    /// Builds the client configuration described by `[service]`.
    #[must_use]
    pub fn client_config(&self) -> DirectoryClientConfig {
        DirectoryClientConfig {
            base_url: self.service.base_url.clone(),
            timeout_ms: self.service.timeout_ms,
            user_agent: self.service.user_agent.clone(),
            max_response_bytes: self.service.max_response_bytes,
        }
    }

    /// Builds the audit sink described by `[audit]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit log file cannot be opened.
    pub fn audit_sink(&self) -> Result<Arc<dyn DirectoryAuditSink>, ConfigError> {
        self.audit.build_sink()
    }

    /// Builds a client wired to the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the sink or the client cannot be built.
    pub fn build_client(&self) -> Result<DirectoryClient, ConfigError> {
        let sink = self.audit_sink()?;
        let client = DirectoryClient::new(&self.client_config())
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(client.with_audit_sink(sink))
    }
}

/// Remote service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Base URL of the directory service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: Option<u64>,
    /// User agent for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Response body cap in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl ServiceConfig {
    /// Validates service settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a setting is out of bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.base_url)?;
        if let Some(timeout_ms) = self.timeout_ms
            && (timeout_ms == 0 || timeout_ms > MAX_TIMEOUT_MS)
        {
            return Err(ConfigError::Invalid(format!(
                "service.timeout_ms must be between 1 and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_RESPONSE_BYTES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "service.max_response_bytes must be between 1 and {MAX_RESPONSE_BYTES_LIMIT}"
            )));
        }
        let user_agent = self.user_agent.trim();
        if user_agent.is_empty() {
            return Err(ConfigError::Invalid("service.user_agent must be set".to_string()));
        }
        if user_agent.len() > MAX_USER_AGENT_LENGTH || user_agent.chars().any(char::is_control) {
            return Err(ConfigError::Invalid(
                "service.user_agent must be printable and at most 256 bytes".to_string(),
            ));
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to a file.
    File,
}

/// Audit logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file path for the `file` sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the file sink has no usable path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (AuditSinkKind::File, Some(path)) if path.as_os_str().is_empty() => {
                Err(ConfigError::Invalid("audit.path must not be empty".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => validate_path(path),
            (AuditSinkKind::None | AuditSinkKind::Stderr, _) => Ok(()),
        }
    }

    /// Builds the configured sink.
    fn build_sink(&self) -> Result<Arc<dyn DirectoryAuditSink>, ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::None, _) => Ok(Arc::new(DirectoryNoopAuditSink)),
            (AuditSinkKind::Stderr, _) => Ok(Arc::new(DirectoryStderrAuditSink)),
            (AuditSinkKind::File, Some(path)) => {
                let sink = DirectoryFileAuditSink::new(path).map_err(|err| {
                    ConfigError::Io(format!("audit log {}: {err}", path.display()))
                })?;
                Ok(Arc::new(sink))
            }
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates the service base URL against the client's rules.
fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    parse_base_url(raw)
        .map(drop)
        .map_err(|err| ConfigError::Invalid(format!("service.base_url: {err}")))
}

/// Default service base URL.
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Default request timeout.
#[allow(clippy::unnecessary_wraps, reason = "Serde default for an optional field.")]
const fn default_timeout_ms() -> Option<u64> {
    Some(DEFAULT_TIMEOUT_MS)
}

/// Default user agent.
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Default response body cap.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}
