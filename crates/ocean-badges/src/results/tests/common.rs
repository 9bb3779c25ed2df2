use std::sync::Arc;
use std::time::Duration;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::{json, Value};

use crate::profile::ItemCatalog;
use crate::results::rate_limit::{SlidingWindowLimiter, Unlimited};
use crate::results::service::{ResultPolicy, ResultService};
use crate::results::store::{InMemoryResultStore, ResultStore, StoreError};

pub(super) fn catalog() -> Arc<ItemCatalog> {
    Arc::new(ItemCatalog::standard().expect("bundled catalog parses"))
}

/// Answers every standard item; `score_for` receives the item number (1..=50).
pub(super) fn payload_with(score_for: impl Fn(usize) -> f64) -> Value {
    let answers: Vec<Value> = (1..=50)
        .map(|number| json!({ "id": format!("q{number}"), "score": score_for(number) }))
        .collect();
    json!({ "answers": answers })
}

pub(super) fn neutral_payload() -> Value {
    payload_with(|_| 3.0)
}

pub(super) fn build_service() -> (
    ResultService<InMemoryResultStore, Unlimited>,
    Arc<InMemoryResultStore>,
) {
    let store = Arc::new(InMemoryResultStore::default());
    let service = ResultService::new(
        catalog(),
        store.clone(),
        Arc::new(Unlimited),
        ResultPolicy::default(),
    );
    (service, store)
}

pub(super) fn limited_service(
    limit: u32,
) -> ResultService<InMemoryResultStore, SlidingWindowLimiter> {
    ResultService::new(
        catalog(),
        Arc::new(InMemoryResultStore::default()),
        Arc::new(SlidingWindowLimiter::new(limit, Duration::from_secs(3600))),
        ResultPolicy::default(),
    )
}

/// Store that refuses every operation.
pub(super) struct UnavailableStore;

impl ResultStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn set(&self, _key: &str, _blob: String, _ttl: Duration) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("valid json body")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
