use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use storage::memory::MemoryStore;
use tower::ServiceExt;
use web::{
    app,
    middleware::auth::ApiKeys,
    mirror::{MirrorError, SheetMirror, SheetRecord},
    state::AppState,
};

pub const ADMIN_KEY: &str = "test-admin-key";

/// Keeps every row it is asked to send.
#[derive(Default)]
pub struct RecordingMirror {
    records: Mutex<Vec<SheetRecord>>,
}

impl RecordingMirror {
    pub fn actions(&self) -> Vec<&'static str> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(SheetRecord::action)
            .collect()
    }

    /// Waits for the background sends to land.
    pub async fn wait_for(&self, count: usize) -> Vec<&'static str> {
        for _ in 0..100 {
            if self.records.lock().unwrap().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.actions()
    }
}

#[async_trait]
impl SheetMirror for RecordingMirror {
    async fn send(&self, record: &SheetRecord) -> Result<(), MirrorError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Fails every send, like an unreachable Apps Script endpoint.
pub struct FailingMirror;

#[async_trait]
impl SheetMirror for FailingMirror {
    async fn send(&self, _record: &SheetRecord) -> Result<(), MirrorError> {
        Err(MirrorError::Rejected {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "script error".to_string(),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub mirror: Arc<RecordingMirror>,
}

impl TestApp {
    pub fn new() -> Self {
        let mirror = Arc::new(RecordingMirror::default());
        let state = AppState::new(Arc::new(MemoryStore::new()), mirror.clone());
        Self {
            router: app(state, ApiKeys::from_comma_separated(ADMIN_KEY)),
            mirror,
        }
    }

    #[allow(dead_code)]
    pub fn with_failing_mirror() -> Router {
        let state = AppState::new(Arc::new(MemoryStore::new()), Arc::new(FailingMirror));
        app(state, ApiKeys::from_comma_separated(ADMIN_KEY))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, Method::POST, uri, Some(body), None).await
    }

    #[allow(dead_code)]
    pub async fn get_as_admin(&self, uri: &str, key: Option<&str>) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri, None, key).await
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {key}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Participant fields as the form sends them.
pub fn person(name: &str) -> Value {
    json!({
        "full_name": format!("{name} Raman"),
        "college": "Loyola College",
        "department": "BCom / 2nd Year",
        "phone": "9876543210",
        "email": format!("{}@example.com", name.to_lowercase()),
    })
}

/// Registration body: participant fields plus the session choices.
pub fn registration(name: &str, morning: Value, afternoon: Value) -> Value {
    let mut body = person(name);
    body["morning"] = morning;
    body["afternoon"] = afternoon;
    body
}
