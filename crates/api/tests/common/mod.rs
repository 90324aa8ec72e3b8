#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use khizana_core::app::Wardrobe;
use khizana_core::category::Categorizer;
use khizana_core::gateway::{GatewayError, StylistGateway};
use khizana_core::item::ClothingInfo;
use khizana_core::media::ImageData;
use khizana_core::profile::UserProfile;
use khizana_core::suggestion::OutfitSuggestion;
use khizana_events::EventBus;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use khizana_api::config::ServerConfig;
use khizana_api::router::build_app_router;
use khizana_api::state::AppState;

/// PNG signature plus the start of an IHDR chunk; enough for format sniffing.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

/// Stand-in for the generative backend.
///
/// `analyze` answers with the next queued clothing type (black, casual);
/// every operation can be switched to fail.
#[derive(Default)]
pub struct StubGateway {
    kinds: Mutex<VecDeque<String>>,
    suggestions: Mutex<Vec<OutfitSuggestion>>,
    pub fail_analyze: AtomicBool,
    pub fail_compose: AtomicBool,
    pub fail_suggest: AtomicBool,
    pub compose_calls: AtomicUsize,
    pub suggest_calls: AtomicUsize,
    last_descriptors: Mutex<Vec<String>>,
}

impl StubGateway {
    pub fn queue_kinds(&self, kinds: &[&str]) {
        self.kinds
            .lock()
            .unwrap()
            .extend(kinds.iter().map(|k| k.to_string()));
    }

    pub fn set_suggestions(&self, suggestions: Vec<OutfitSuggestion>) {
        *self.suggestions.lock().unwrap() = suggestions;
    }

    pub fn last_descriptors(&self) -> Vec<String> {
        self.last_descriptors.lock().unwrap().clone()
    }
}

fn unavailable() -> GatewayError {
    GatewayError::Service {
        status: 503,
        body: "unavailable".into(),
    }
}

#[async_trait]
impl StylistGateway for StubGateway {
    async fn analyze(&self, _image: &ImageData) -> Result<ClothingInfo, GatewayError> {
        if self.fail_analyze.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let kind = self
            .kinds
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "قميص".to_string());
        Ok(ClothingInfo {
            kind,
            color: "أسود".into(),
            style: "كاجوال".into(),
            season: "كل المواسم".into(),
            description: "قطعة قطنية".into(),
        })
    }

    async fn professionalize(&self, _image: &ImageData) -> Result<ImageData, GatewayError> {
        Ok(ImageData::new("image/png", vec![1, 1, 1]))
    }

    async fn compose_outfit(
        &self,
        garments: &[ImageData],
        _profile: &UserProfile,
    ) -> Result<ImageData, GatewayError> {
        self.compose_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_compose.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(ImageData::new("image/png", vec![garments.len() as u8]))
    }

    async fn suggest(
        &self,
        descriptors: &[String],
        _occasion: &str,
    ) -> Result<Vec<OutfitSuggestion>, GatewayError> {
        self.suggest_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_descriptors.lock().unwrap() = descriptors.to_vec();
        if self.fail_suggest.load(Ordering::SeqCst) {
            return Err(GatewayError::MalformedResponse("not json".into()));
        }
        Ok(self.suggestions.lock().unwrap().clone())
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 1024 * 1024,
        category_rules_path: None,
    }
}

/// A router plus handles on its collaborators.
pub struct TestApp {
    pub router: Router,
    pub gateway: Arc<StubGateway>,
    pub event_bus: Arc<EventBus>,
    pub shutdown: CancellationToken,
}

/// Build the full application router (same middleware stack as production)
/// around a stub gateway and the built-in categorizer.
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let gateway = Arc::new(StubGateway::default());
    let event_bus = Arc::new(EventBus::default());

    let state = AppState::new(
        Wardrobe::new(Categorizer::default()),
        Arc::clone(&gateway) as Arc<dyn StylistGateway>,
        config.clone(),
        Arc::clone(&event_bus),
    );

    let shutdown = state.shutdown.clone();

    TestApp {
        router: build_app_router(state, &config),
        gateway,
        event_bus,
        shutdown,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> Response<Body> {
        send(&self.router, Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        send(&self.router, Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> Response<Body> {
        send(&self.router, Method::POST, uri, None).await
    }

    pub async fn put(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        send(&self.router, Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        send(&self.router, Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        send(&self.router, Method::DELETE, uri, None).await
    }

    /// Run the whole add-item flow with the next queued type. Returns the
    /// saved item JSON.
    pub async fn add_item(&self, kind: &str) -> serde_json::Value {
        self.gateway.queue_kinds(&[kind]);
        assert_eq!(self.post_empty("/api/v1/intake").await.status(), 201);
        let processed = self
            .post(
                "/api/v1/intake/process",
                serde_json::json!({ "image": png_data_url() }),
            )
            .await;
        assert_eq!(processed.status(), 200);
        let saved = self.post_empty("/api/v1/intake/save").await;
        assert_eq!(saved.status(), 201);
        body_json(saved).await["data"].clone()
    }

    /// Fill in height, weight and photo.
    pub async fn complete_profile(&self) {
        let response = self
            .patch(
                "/api/v1/profile",
                serde_json::json!({
                    "height": "180",
                    "weight": "75",
                    "photo": png_data_url(),
                }),
            )
            .await;
        assert_eq!(response.status(), 200);
    }
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    router.clone().oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn png_data_url() -> String {
    ImageData::new("image/png", PNG_BYTES.to_vec()).to_data_url()
}
