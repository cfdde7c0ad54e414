// crates/user-directory-client/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: In-process mock of the user directory service.
// Purpose: Serve the reference dataset locally so client tests avoid the network.
// Dependencies: tiny_http, serde_json, user-directory-client
// ============================================================================

//! ## Overview
//! [`MockDirectory`] mirrors the permissive reference service: it lists ten
//! fixed users, answers 404 with `{}` for unknown ids, and echoes create
//! payloads with id 11 and status 201 without validating them. Alternate
//! modes force a status, a raw body, a redirect, or a slow answer.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only helpers; not every test binary uses every helper."
)]

use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use serde_json::Value;
use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;
use tiny_http::StatusCode;
use user_directory_client::DirectoryClient;
use user_directory_client::DirectoryClientConfig;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Reference dataset served by the mock.
pub const USERS_FIXTURE: &str = include_str!("../fixtures/users.json");

/// Id assigned to every created user.
pub const CREATED_ID: u64 = 11;

/// Returns the reference dataset as JSON records.
pub fn fixture_users() -> Vec<Value> {
    serde_json::from_str(USERS_FIXTURE).expect("fixture parses")
}

// ============================================================================
// SECTION: Mock Server
// ============================================================================

/// Behavior of the mock for every request.
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Serve the reference directory.
    Directory,
    /// Answer every request with the given status and body.
    Status(u16, String),
    /// Answer every request with 200 and the given raw body.
    Body(String),
    /// Answer every request with a 302 pointing at the given location.
    Redirect(String),
    /// Sleep before serving the reference directory.
    Delay(Duration),
}

/// Request observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Request path including any query.
    pub path: String,
    /// Raw request body.
    pub body: String,
}

/// Local user directory served on an ephemeral port.
pub struct MockDirectory {
    /// Base URL of the mock.
    base_url: String,
    /// Shared server handle used to unblock the worker on drop.
    server: Arc<Server>,
    /// Requests seen so far.
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Worker thread.
    handle: Option<JoinHandle<()>>,
}

impl MockDirectory {
    /// Starts a mock serving the reference directory.
    pub fn start() -> Self {
        Self::with_mode(MockMode::Directory)
    }

    /// Starts a mock with the given behavior.
    pub fn with_mode(mode: MockMode) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind mock server"));
        let addr = server.server_addr().to_ip().expect("ip listener");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let worker_server = Arc::clone(&server);
        let worker_requests = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            for request in worker_server.incoming_requests() {
                handle_request(request, &mode, &worker_requests);
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            server,
            requests,
            handle: Some(handle),
        }
    }

    /// Returns the base URL of the mock.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a client aimed at the mock.
    pub fn client(&self) -> DirectoryClient {
        DirectoryClient::new(&self.client_config()).expect("client builds")
    }

    /// Returns a default client config aimed at the mock.
    pub fn client_config(&self) -> DirectoryClientConfig {
        DirectoryClientConfig::for_base_url(self.base_url.clone())
    }

    /// Returns every request seen so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Returns the number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

impl Drop for MockDirectory {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// ============================================================================
// SECTION: Request Handling
// ============================================================================

/// Records and answers one request.
fn handle_request(
    mut request: Request,
    mode: &MockMode,
    requests: &Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let method = request.method().clone();
    let path = request.url().to_string();
    requests.lock().expect("requests lock").push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        body: body.clone(),
    });
    let (status, payload, location) = match mode {
        MockMode::Directory => {
            let (status, payload) = serve_directory(&method, &path, &body);
            (status, payload, None)
        }
        MockMode::Status(status, payload) => (*status, payload.clone(), None),
        MockMode::Body(payload) => (200, payload.clone(), None),
        MockMode::Redirect(target) => (302, String::new(), Some(target.clone())),
        MockMode::Delay(delay) => {
            thread::sleep(*delay);
            let (status, payload) = serve_directory(&method, &path, &body);
            (status, payload, None)
        }
    };
    let mut response = Response::from_string(payload)
        .with_status_code(StatusCode(status))
        .with_header(header("Content-Type", "application/json; charset=utf-8"));
    if let Some(location) = location {
        response.add_header(header("Location", &location));
    }
    let _ = request.respond(response);
}

/// Answers a request the way the reference directory does.
fn serve_directory(method: &Method, path: &str, body: &str) -> (u16, String) {
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match (method, segments.as_slice()) {
        (Method::Get, ["users"]) => (200, USERS_FIXTURE.to_string()),
        (Method::Get, ["users", id]) => lookup(id),
        (Method::Post, ["users"]) => echo_create(body),
        _ => (404, "{}".to_string()),
    }
}

/// Returns the user with the given id, or 404 with an empty object.
fn lookup(segment: &str) -> (u16, String) {
    let found = segment.parse::<u64>().ok().and_then(|id| {
        fixture_users().into_iter().find(|user| user.get("id").and_then(Value::as_u64) == Some(id))
    });
    match found {
        Some(user) => (200, user.to_string()),
        None => (404, "{}".to_string()),
    }
}

/// Echoes a create payload with the next id assigned.
fn echo_create(body: &str) -> (u16, String) {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut fields)) => {
            fields.insert("id".to_string(), Value::from(CREATED_ID));
            (201, Value::Object(fields).to_string())
        }
        Ok(_) => (201, serde_json::json!({ "id": CREATED_ID }).to_string()),
        Err(_) => (500, "SyntaxError: Unexpected token in JSON".to_string()),
    }
}

/// Builds a header from name and value.
fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("valid header")
}
