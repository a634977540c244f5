//! Local registry server for HTTP tests

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Router;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Canned responses served by path
#[derive(Default)]
pub struct TestRegistry {
    routes: HashMap<String, (StatusCode, String)>,
    rate_limited: usize,
}

struct Shared {
    routes: HashMap<String, (StatusCode, String)>,
    rate_limited: usize,
    hits: AtomicUsize,
}

/// A registry listening on a local port
pub struct RunningRegistry {
    pub url: String,
    shared: Arc<Shared>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve package metadata with `dist-tags.latest` at `/{path}`
    pub fn package(self, path: &str, latest: &str) -> Self {
        let body = format!(r#"{{"name": "{}", "dist-tags": {{"latest": "{}"}}}}"#, path, latest);
        self.respond(path, StatusCode::OK, &body)
    }

    /// Serve an arbitrary status and body at `/{path}`
    pub fn respond(mut self, path: &str, status: StatusCode, body: &str) -> Self {
        self.routes
            .insert(format!("/{}", path), (status, body.to_string()));
        self
    }

    /// Answer the first `count` requests with 429
    pub fn rate_limited(mut self, count: usize) -> Self {
        self.rate_limited = count;
        self
    }

    pub async fn start(self) -> RunningRegistry {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let shared = Arc::new(Shared {
            routes: self.routes,
            rate_limited: self.rate_limited,
            hits: AtomicUsize::new(0),
        });

        let app = Router::new().fallback(respond).with_state(shared.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RunningRegistry { url, shared }
    }
}

impl RunningRegistry {
    /// Number of requests received so far
    pub fn hits(&self) -> usize {
        self.shared.hits.load(Ordering::SeqCst)
    }
}

async fn respond(State(shared): State<Arc<Shared>>, uri: Uri) -> (StatusCode, String) {
    let index = shared.hits.fetch_add(1, Ordering::SeqCst);
    if index < shared.rate_limited {
        return (StatusCode::TOO_MANY_REQUESTS, String::new());
    }
    shared
        .routes
        .get(uri.path())
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, String::new()))
}
