// Shared fixtures; each test binary uses a different subset.
#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use noteful::config::{AppConfig, Environment};
use noteful::domain::{Folder, Note};
use noteful::infrastructure::SqliteStore;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Router wired to a fresh in-memory store
pub struct TestApp {
    pub store: Arc<SqliteStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        let store = Arc::new(SqliteStore::open_in_memory()?);
        let router = noteful::build_app(Arc::clone(&store), &AppConfig::new(Environment::Test));
        Ok(Self { store, router })
    }

    /// Router over the folder fixtures
    pub fn with_folders() -> Result<Self> {
        let app = Self::new()?;
        app.store.seed_folders(&make_folders_array())?;
        Ok(app)
    }

    /// Router over the folder and note fixtures
    pub fn with_notes() -> Result<Self> {
        let app = Self::with_folders()?;
        app.store.seed_notes(&make_notes_array())?;
        Ok(app)
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        send(&self.router, Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<TestResponse> {
        send(&self.router, Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> Result<TestResponse> {
        send(&self.router, Method::PATCH, uri, Some(body)).await
    }

    pub async fn patch_empty(&self, uri: &str) -> Result<TestResponse> {
        send(&self.router, Method::PATCH, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> Result<TestResponse> {
        send(&self.router, Method::DELETE, uri, None).await
    }

    /// Send a body verbatim, for payloads that are not valid JSON
    pub async fn send_raw(&self, method: Method, uri: &str, body: &'static str) -> Result<TestResponse> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))?;
        dispatch(&self.router, request).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body).context("Response body is not JSON")
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Drive one request through a router
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<TestResponse> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };
    dispatch(router, request).await
}

async fn dispatch(router: &Router, request: Request<Body>) -> Result<TestResponse> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await?.to_bytes();

    Ok(TestResponse {
        status,
        headers,
        body,
    })
}

pub const MALICIOUS_IMAGE: &str = r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#;
pub const SANITIZED_IMAGE: &str = r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#;
pub const MALICIOUS_SCRIPT: &str = r#"Naughty naughty very naughty <script>alert("xss");</script>"#;
pub const SANITIZED_SCRIPT: &str =
    r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#;

pub fn fixture_timestamp() -> DateTime<Utc> {
    "2029-01-22T16:28:32.615Z"
        .parse()
        .expect("fixture timestamp is valid RFC 3339")
}

pub fn make_folders_array() -> Vec<Folder> {
    ["First", "Second", "Third", "Fourth"]
        .iter()
        .zip(1..)
        .map(|(ordinal, id)| Folder {
            id,
            folder_name: format!("{ordinal} Test Folder"),
        })
        .collect()
}

pub fn make_malicious_folder() -> Folder {
    Folder {
        id: 911,
        folder_name: MALICIOUS_IMAGE.to_string(),
    }
}

pub fn make_notes_array() -> Vec<Note> {
    (1..=2)
        .map(|id| Note {
            id,
            note_name: format!("Test Note {id}"),
            modified: fixture_timestamp(),
            folderid: id,
            content: format!("Test Content {id}"),
        })
        .collect()
}

pub fn make_malicious_note() -> Note {
    Note {
        id: 3,
        note_name: MALICIOUS_SCRIPT.to_string(),
        modified: fixture_timestamp(),
        folderid: 1,
        content: MALICIOUS_IMAGE.to_string(),
    }
}
