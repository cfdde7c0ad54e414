// crates/user-directory-client/src/client.rs
// ============================================================================
// Module: Directory Client
// Description: Blocking client for the remote user directory.
// Purpose: Issue list/get/create calls and decode the service's answers.
// Dependencies: user-directory-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! [`DirectoryClient`] is bound to one base URL supplied through
//! [`DirectoryClientConfig`]; independent clients (for example, one aimed at a
//! local mock) coexist freely. The client holds no mutable state.
//! Invariants:
//! - Any non-2xx status, including 3xx (redirects are not followed), fails
//!   with [`DirectoryError::Remote`].
//! - Lookup references and create payloads are forwarded without validation.
//! - Bodies larger than `max_response_bytes` fail as transport errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use reqwest::Method;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use serde_json::Map;
use serde_json::Value;
use user_directory_core::User;
use user_directory_core::UserRef;

use crate::audit::DirectoryAuditEvent;
use crate::audit::DirectoryAuditEventParams;
use crate::audit::DirectoryAuditSink;
use crate::audit::DirectoryNoopAuditSink;
use crate::audit::DirectoryOperation;
use crate::audit::RequestOutcome;
use crate::error::DirectoryError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Base URL of the public reference directory.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
/// Collection path segment for user resources.
const USERS_SEGMENT: &str = "users";
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default response body cap in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "user-directory/0.1";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for a [`DirectoryClient`].
///
/// # Invariants
/// - `base_url` must pass [`parse_base_url`].
/// - `timeout_ms` (when set) bounds the full request lifecycle; `None` disables it.
/// - `max_response_bytes` is a hard upper bound on response bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryClientConfig {
    /// Base URL of the directory service.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// User agent string for outbound requests.
    pub user_agent: String,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
}

impl DirectoryClientConfig {
    /// Returns the default configuration aimed at `base_url`.
    #[must_use]
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for DirectoryClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: Some(DEFAULT_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Status and decoded body of a successful directory call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResponse {
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Decoded JSON body; `Null` when the body was empty.
    pub body: Value,
}

impl DirectoryResponse {
    /// Returns a top-level body field; `None` when absent or the body is not an object.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    /// Returns a top-level string field.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Consumes the response and returns the body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking client for the user directory service.
pub struct DirectoryClient {
    /// Parsed base URL.
    base_url: Url,
    /// Response body cap in bytes.
    max_response_bytes: usize,
    /// HTTP client used for outbound requests.
    client: Client,
    /// Destination for per-request audit events.
    audit: Arc<dyn DirectoryAuditSink>,
}

impl DirectoryClient {
    /// Creates a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] when the base URL is unusable or the
    /// HTTP client cannot be built.
    pub fn new(config: &DirectoryClientConfig) -> Result<Self, DirectoryError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout_ms.map(Duration::from_millis))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| DirectoryError::Config(format!("http client build failed: {err}")))?;
        Ok(Self {
            base_url,
            max_response_bytes: config.max_response_bytes,
            client,
            audit: Arc::new(DirectoryNoopAuditSink),
        })
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, sink: Arc<dyn DirectoryAuditSink>) -> Self {
        self.audit = sink;
        self
    }

    /// Returns the base URL this client targets.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lists every user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport failure, non-2xx status, or a
    /// body that is not a list of users.
    pub fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        self.list_users_raw()?.into_iter().map(decode_user).collect()
    }

    /// Lists every user as undecoded JSON records.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport failure, non-2xx status, or a
    /// body that is not a JSON array.
    pub fn list_users_raw(&self) -> Result<Vec<Value>, DirectoryError> {
        let url = self.endpoint(&[USERS_SEGMENT])?;
        let response = self.execute(DirectoryOperation::ListUsers, Method::GET, url, None)?;
        match response.body {
            Value::Array(records) => Ok(records),
            other => Err(DirectoryError::Decode(format!(
                "expected user list, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Fetches one user by caller-supplied reference.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Remote`] when the service rejects the
    /// reference (typically 400 or 404), or another [`DirectoryError`] on
    /// transport or decode failure.
    pub fn get_user(&self, id: impl Into<UserRef>) -> Result<User, DirectoryError> {
        decode_user(self.get_user_raw(id)?)
    }

    /// Fetches one user as an undecoded JSON record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    pub fn get_user_raw(&self, id: impl Into<UserRef>) -> Result<Value, DirectoryError> {
        let id = id.into();
        let segment = id.path_segment();
        let url = self.endpoint(&[USERS_SEGMENT, segment.as_ref()])?;
        Ok(self.execute(DirectoryOperation::GetUser, Method::GET, url, None)?.body)
    }

    /// Lists users whose `address.city` equals `city` exactly.
    ///
    /// Filtering is local; the service sees a plain listing request. Records
    /// without a string city are non-matches and are never decoded, so a
    /// malformed neighbour does not fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the underlying listing fails or a
    /// matching record is not a valid user.
    pub fn users_in_city(&self, city: &str) -> Result<Vec<User>, DirectoryError> {
        self.list_users_raw()?
            .into_iter()
            .filter(|record| record_city(record) == Some(city))
            .map(decode_user)
            .collect()
    }

    /// Submits `fields` as a new user and returns the service's answer verbatim.
    ///
    /// No merging, defaulting, or validation is applied to `fields` or to the
    /// echoed body.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    pub fn create_user(
        &self,
        fields: &Map<String, Value>,
    ) -> Result<DirectoryResponse, DirectoryError> {
        let url = self.endpoint(&[USERS_SEGMENT])?;
        self.execute(DirectoryOperation::CreateUser, Method::POST, url, Some(fields))
    }

    /// Builds an endpoint URL by appending path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DirectoryError::Config("base url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends one request and records its audit event.
    fn execute(
        &self,
        operation: DirectoryOperation,
        method: Method,
        url: Url,
        payload: Option<&Map<String, Value>>,
    ) -> Result<DirectoryResponse, DirectoryError> {
        let started = Instant::now();
        let path = url.path().to_string();
        let mut trace = ExchangeTrace::default();
        let result = self.exchange(method.clone(), url, payload, &mut trace);
        let (outcome, error_kind) = match &result {
            Ok(_) => (RequestOutcome::Ok, None),
            Err(err) => (RequestOutcome::Error, Some(err.kind())),
        };
        self.audit.record(&DirectoryAuditEvent::new(DirectoryAuditEventParams {
            operation,
            method: method.as_str().to_string(),
            path,
            status: trace.status,
            outcome,
            error_kind,
            response_bytes: trace.response_bytes,
            latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }));
        result
    }

    /// Performs the HTTP exchange and classifies the response.
    fn exchange(
        &self,
        method: Method,
        url: Url,
        payload: Option<&Map<String, Value>>,
        trace: &mut ExchangeTrace,
    ) -> Result<DirectoryResponse, DirectoryError> {
        let mut request = self.client.request(method, url);
        if let Some(fields) = payload {
            request = request.json(fields);
        }
        let mut response =
            request.send().map_err(|err| DirectoryError::Transport(err.to_string()))?;
        let status = response.status();
        trace.status = Some(status.as_u16());
        let bytes = read_response_limited(&mut response, self.max_response_bytes)?;
        trace.response_bytes = bytes.len();
        if !status.is_success() {
            return Err(DirectoryError::Remote {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(DirectoryResponse {
            status: status.as_u16(),
            body: decode_body(&bytes)?,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Response facts captured for audit events, whether or not the call succeeds.
#[derive(Default)]
struct ExchangeTrace {
    /// HTTP status, once a response arrived.
    status: Option<u16>,
    /// Body bytes read.
    response_bytes: usize,
}

/// Parses and validates a directory base URL.
///
/// The URL must be absolute `http`/`https` with a host, and must not carry
/// credentials, a query, or a fragment.
///
/// # Errors
///
/// Returns [`DirectoryError::Config`] describing the first rule violated.
pub fn parse_base_url(raw: &str) -> Result<Url, DirectoryError> {
    let url = Url::parse(raw)
        .map_err(|err| DirectoryError::Config(format!("invalid base url {raw}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        let scheme = url.scheme();
        return Err(DirectoryError::Config(format!(
            "base url must use http:// or https://, got {scheme}"
        )));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(DirectoryError::Config("base url credentials are not allowed".to_string()));
    }
    if url.host_str().is_none() || url.cannot_be_a_base() {
        return Err(DirectoryError::Config(format!("base url has no host: {raw}")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(DirectoryError::Config(
            "base url must not carry a query or fragment".to_string(),
        ));
    }
    Ok(url)
}

/// Decodes a response body; an empty body decodes to `Null`.
fn decode_body(bytes: &[u8]) -> Result<Value, DirectoryError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes)
        .map_err(|err| DirectoryError::Decode(format!("invalid json body: {err}")))
}

/// Decodes one user record.
fn decode_user(record: Value) -> Result<User, DirectoryError> {
    serde_json::from_value(record)
        .map_err(|err| DirectoryError::Decode(format!("invalid user record: {err}")))
}

/// Returns `address.city` of a raw record when it is a string.
fn record_city(record: &Value) -> Option<&str> {
    record.pointer("/address/city").and_then(Value::as_str)
}

/// Returns a short label for the JSON value kind.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, DirectoryError> {
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| DirectoryError::Config("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(DirectoryError::Transport("response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    response
        .take(max_bytes_u64.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|err| DirectoryError::Transport(format!("failed to read response: {err}")))?;
    if buf.len() > max_bytes {
        return Err(DirectoryError::Transport("response exceeds size limit".to_string()));
    }
    Ok(buf)
}
