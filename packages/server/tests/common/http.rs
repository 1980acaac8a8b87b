//! In-process HTTP helpers: the router is driven with `oneshot`, no sockets.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use server_core::kernel::TestDependencies;
use server_core::server::build_app;
use tower::ServiceExt;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Router wired to mock dependencies that stay inspectable after requests
pub struct TestApp {
    pub mocks: TestDependencies,
    router: Router,
}

impl TestApp {
    pub fn new(mocks: TestDependencies) -> Self {
        init_tracing();
        let router = build_app(mocks.deps(), &[]);
        Self { mocks, router }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Option<Value>) {
        let mut request = Request::builder().method(method).uri(path);
        if body.is_some() {
            request = request.header("content-type", "application/json");
        }
        let request = match body {
            Some(json_body) => request.body(Body::from(json_body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).ok())
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Option<Value>) {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> (StatusCode, Option<Value>) {
        self.request(Method::POST, path, body).await
    }

    /// Raw text body, for non-JSON routes
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }
}
