#![allow(dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use luxemart_storefront::{
    routes::create_app,
    services::description_service::DescriptionGenerator,
    state::AppState,
    storage::{MemoryStore, ProductStorage},
    storefront::Storefront,
};
use serde_json::Value;
use tower::ServiceExt;

/// Canned generator that counts its calls.
#[derive(Clone, Default)]
pub struct CannedDescriber {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl DescriptionGenerator for CannedDescriber {
    async fn generate(&self, name: &str, category: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        format!("{name} for your {category}")
    }
}

/// Hangs on its first call, then answers like [`CannedDescriber`].
#[derive(Clone, Default)]
pub struct StalledOnceDescriber {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl DescriptionGenerator for StalledOnceDescriber {
    async fn generate(&self, name: &str, category: &str) -> String {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        format!("{name} for your {category}")
    }
}

pub fn test_app() -> (Router, CannedDescriber) {
    let describer = CannedDescriber::default();
    (test_app_with(describer.clone()), describer)
}

pub fn test_app_with(describer: impl DescriptionGenerator + 'static) -> Router {
    let storefront = Storefront::load(ProductStorage::new(MemoryStore::new()))
        .expect("seeded storefront");
    create_app(AppState::new(storefront, describer))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
