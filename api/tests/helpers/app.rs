use api::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use db::{ReadingStore, test_utils::setup_test_store};
use ingestor::Ingestor;
use serde_json::Value;
use tower::ServiceExt;
use util::config::MqttConfig;

/// Router wired exactly like `main`, plus the handles behind it.
pub struct TestApp {
    pub router: Router,
    pub store: ReadingStore,
    pub ingestor: Ingestor,
}

impl TestApp {
    /// Feeds raw payloads through the ingestor's message handler, in order.
    pub async fn publish_all(&self, payloads: &[&[u8]]) {
        for payload in payloads {
            self.ingestor
                .handle_message("esp32/humidity/test", payload)
                .await;
        }
    }
}

pub async fn make_test_app() -> TestApp {
    let store = setup_test_store().await;
    let ingestor = Ingestor::new(store.clone(), MqttConfig::default());
    let router = api::app(AppState::new(store.clone(), ingestor.status()));

    TestApp {
        router,
        store,
        ingestor,
    }
}

pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    (status, json)
}
