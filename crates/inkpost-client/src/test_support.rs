//! Helpers for tests that talk to a local stand-in for the blog API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use inkpost_shared::ProfileSnapshot;
use inkpost_store::{Session, SqliteStore};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::config::ClientConfig;
use crate::state::AppState;

/// Serve `router` on an ephemeral port and return its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// State pointed at `base_url` with an in-memory session.
pub(crate) fn app_state(base_url: &str) -> AppState {
    let config = ClientConfig {
        backend_available: true,
        base_api_url: base_url.to_string(),
        request_timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    };
    let session = Session::new(Arc::new(SqliteStore::in_memory().unwrap()));
    AppState::with_session(config, session).unwrap()
}

/// State whose session already holds a token and a profile snapshot.
pub(crate) fn signed_in(base_url: &str) -> AppState {
    let state = app_state(base_url);
    state.session.set_token("test-token").unwrap();
    state
        .session
        .set_user(&ProfileSnapshot {
            name: "Jane Roe".into(),
            email: "jane@example.com".into(),
            ..Default::default()
        })
        .unwrap();
    state
}

/// Base URL nothing listens on.
pub(crate) const UNREACHABLE: &str = "http://127.0.0.1:1";

pub(crate) fn post_json(id: i64, avatar: Option<&str>) -> Value {
    json!({
        "id": id,
        "title": format!("Post {id}"),
        "content": "<p>Hello</p>",
        "tags": ["Rust"],
        "createdAt": "2025-05-27T10:00:00.000Z",
        "likes": 3,
        "comments": 1,
        "author": { "id": 7, "name": "Jane Roe", "avatarUrl": avatar }
    })
}
