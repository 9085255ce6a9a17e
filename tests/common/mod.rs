//! In-process stub of the NWS weather API and the identity toolkit.
//!
//! Every request is recorded so tests can assert how many upstream calls a
//! tool made and with which headers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const EMAIL: &str = "user@example.com";
pub const PASSWORD: &str = "correct-horse";
pub const API_KEY: &str = "test-api-key";

pub const FORECAST_PATH: &str = "/gridpoints/TEST/1,1/forecast";

/// Canned reply for one stub route
#[derive(Clone, Debug)]
pub enum Reply {
    Json(Value),
    Status(u16),
    /// 200 with a body that is not JSON
    Garbage,
    /// Grid point whose forecast URL points back at this stub
    ForecastLink,
}

/// Replies served by the stub, one per route
#[derive(Clone, Debug)]
pub struct Script {
    pub alerts: Reply,
    pub points: Reply,
    pub forecast: Reply,
    /// Status the sign-in route answers with for any request, instead of checking credentials
    pub sign_in_status: Option<u16>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            alerts: Reply::Json(json!({ "features": [] })),
            points: Reply::ForecastLink,
            forecast: Reply::Json(json!({ "properties": { "periods": [] } })),
            sign_in_status: None,
        }
    }
}

/// One request seen by the stub
#[derive(Clone, Debug)]
pub struct Recorded {
    pub path_and_query: String,
    pub user_agent: Option<String>,
    pub accept: Option<String>,
}

#[derive(Clone)]
struct StubState {
    base_url: String,
    script: Arc<Script>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct StubHandle {
    base_url: String,
    join: JoinHandle<()>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubHandle {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Requests to the weather API, excluding sign-in calls
    pub fn weather_requests(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| !r.path_and_query.starts_with("/accounts:"))
            .collect()
    }
}

impl Drop for StubHandle {
    fn drop(&mut self) {
        self.join.abort();
    }
}

pub async fn spawn_stub(script: Script) -> StubHandle {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        base_url: base_url.clone(),
        script: Arc::new(script),
        requests: Arc::clone(&requests),
    };

    let app = Router::new()
        .route("/alerts", get(handle_alerts))
        .route("/points/{coords}", get(handle_points))
        .route(FORECAST_PATH, get(handle_forecast))
        .route("/accounts:signInWithPassword", post(handle_sign_in))
        .with_state(state);

    let join = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubHandle {
        base_url,
        join,
        requests,
    }
}

fn record(state: &StubState, uri: &Uri, headers: &HeaderMap) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let entry = Recorded {
        path_and_query: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
        user_agent: header_value(header::USER_AGENT),
        accept: header_value(header::ACCEPT),
    };
    if let Ok(mut guard) = state.requests.lock() {
        guard.push(entry);
    }
}

fn respond(state: &StubState, reply: &Reply) -> Response {
    match reply {
        Reply::Json(value) => Json(value.clone()).into_response(),
        Reply::Status(code) => StatusCode::from_u16(*code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Reply::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
        Reply::ForecastLink => Json(json!({
            "properties": { "forecast": format!("{}{}", state.base_url, FORECAST_PATH) }
        }))
        .into_response(),
    }
}

async fn handle_alerts(State(state): State<StubState>, uri: Uri, headers: HeaderMap) -> Response {
    record(&state, &uri, &headers);
    respond(&state, &state.script.alerts)
}

async fn handle_points(State(state): State<StubState>, uri: Uri, headers: HeaderMap) -> Response {
    record(&state, &uri, &headers);
    respond(&state, &state.script.points)
}

async fn handle_forecast(State(state): State<StubState>, uri: Uri, headers: HeaderMap) -> Response {
    record(&state, &uri, &headers);
    respond(&state, &state.script.forecast)
}

#[derive(Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

#[derive(Deserialize)]
struct SignInBody {
    email: String,
    password: String,
}

async fn handle_sign_in(
    State(state): State<StubState>,
    Query(query): Query<KeyQuery>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<SignInBody>,
) -> Response {
    record(&state, &uri, &headers);

    if let Some(code) = state.script.sign_in_status {
        return respond(&state, &Reply::Status(code));
    }
    if query.key.as_deref() != Some(API_KEY) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 400, "message": "API key not valid. Please pass a valid API key." } })),
        )
            .into_response();
    }
    if body.email == EMAIL && body.password == PASSWORD {
        Json(json!({
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": "uid-42",
            "email": body.email,
            "idToken": "token",
            "registered": true
        }))
        .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 400, "message": "INVALID_LOGIN_CREDENTIALS" } })),
        )
            .into_response()
    }
}
