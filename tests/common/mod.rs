// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stub Scoutbase backend for integration tests.
//!
//! Serves scripted responses on an ephemeral port and records every request
//! it receives, so tests can assert both on what the client did with a
//! response and on exactly which calls it made.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use scoutbase_client::config::Config;
use scoutbase_client::AppState;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Path prefix the stub serves the API under.
const API_PREFIX: &str = "/scoutbase";

/// A request the stub received.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path without the `/scoutbase` prefix
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub cookie: Option<String>,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    set_cookie: Option<String>,
}

#[derive(Default)]
struct StubState {
    replies: Mutex<Vec<(Method, String, Reply)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct StubBackend {
    pub base_url: String,
    state: Arc<StubState>,
}

#[allow(dead_code)]
impl StubBackend {
    /// Start a stub backend with no scripted routes.
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend failed");
        });

        Self {
            base_url: format!("http://{addr}{API_PREFIX}"),
            state,
        }
    }

    /// Answer `method path` (query ignored) with a JSON body. Later
    /// registrations for the same route win.
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) {
        self.add(method, path, status, "application/json", body.to_string());
    }

    /// Answer `method path` with a JSON body and a `Set-Cookie` header.
    pub fn on_with_cookie(&self, method: Method, path: &str, status: u16, body: Value, cookie: &str) {
        let reply = Reply {
            status: StatusCode::from_u16(status).expect("valid status"),
            content_type: "application/json",
            body: body.to_string(),
            set_cookie: Some(cookie.to_string()),
        };
        self.push(method, path, reply);
    }

    /// Answer `method path` with a plain-text body.
    pub fn on_text(&self, method: Method, path: &str, status: u16, body: &str) {
        self.add(method, path, status, "text/plain", body.to_string());
    }

    fn add(&self, method: Method, path: &str, status: u16, content_type: &'static str, body: String) {
        let reply = Reply {
            status: StatusCode::from_u16(status).expect("valid status"),
            content_type,
            body,
            set_cookie: None,
        };
        self.push(method, path, reply);
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.state
            .replies
            .lock()
            .unwrap()
            .push((method, path.to_string(), reply));
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests to one path.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// `METHOD /path` for every request, for asserting call sequences.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Client state pointed at this stub.
    pub fn app_state(&self) -> AppState {
        AppState::new(Config {
            api_url: self.base_url.clone(),
            media_url: self.base_url.trim_end_matches(API_PREFIX).to_string(),
            expiry_redirect_delay: Duration::ZERO,
        })
        .expect("client should build")
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        cookie: headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });

    let reply = state
        .replies
        .lock()
        .unwrap()
        .iter()
        .rev()
        .find(|(m, p, _)| *m == method && *p == path)
        .map(|(_, _, reply)| reply.clone());

    match reply {
        Some(reply) => {
            let mut response = (
                reply.status,
                [(header::CONTENT_TYPE, reply.content_type)],
                reply.body,
            )
                .into_response();
            if let Some(cookie) = reply.set_cookie.and_then(|c| HeaderValue::from_str(&c).ok()) {
                response.headers_mut().insert(header::SET_COOKIE, cookie);
            }
            response
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            json!({"detail": "Not found."}).to_string(),
        )
            .into_response(),
    }
}

/// Mint a token the way the backend does (HS256, `id` claim).
#[allow(dead_code)]
pub fn token_for(user_id: u64) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    encode(
        &Header::new(Algorithm::HS256),
        &json!({"id": user_id, "name": "Test User", "exp": exp}),
        &EncodingKey::from_secret(b"backend_secret_not_known_to_client"),
    )
    .expect("Failed to create JWT")
}

/// Log the client in as `user_id` against the stub, leaving the stub's
/// request log empty.
#[allow(dead_code)]
pub fn logged_in(stub: &StubBackend, user_id: u64) -> AppState {
    let state = stub.app_state();
    state
        .session
        .establish(&token_for(user_id))
        .expect("session should establish");
    state
}

/// Script a successful login for `user_id`.
#[allow(dead_code)]
pub fn script_login(stub: &StubBackend, user_id: u64) {
    stub.on(Method::POST, "/login", 200, json!({"jwt": token_for(user_id)}));
}
