//! Common test infrastructure
//!
//! Spawns the real router on a random port, optionally backed by a mock
//! content-generation provider, and offers a small reqwest client around
//! the finder endpoint.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use pipeline::MatchPolicy;
use server::{build_state, make_app, FinderArgs, FinderConfig, FINDER_PATH};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const DELHI_ENGINEERING_FALLBACK: &str = "Based on our database for \"engineering colleges in Delhi\":\n\n\
🏫 Indian Institute of Technology Delhi\n\
📍 New Delhi, Delhi | ⭐ 4.8/5 | 💰 ₹2.2 Lakhs/year\n\
📚 Top Courses: B.Tech Computer Science, B.Tech Electrical Engineering\n\
🎯 Ranked among the top engineering institutes in India\n\n\
🏫 Delhi Technological University\n\
📍 New Delhi, Delhi | ⭐ 4.4/5 | 💰 ₹2 Lakhs/year\n\
📚 Top Courses: B.Tech Computer Engineering, B.Tech Mechanical Engineering\n\
🎯 Formerly Delhi College of Engineering\n\n";

/// A content-generation provider answering every request with a fixed
/// status and body.
pub struct MockProvider {
    pub endpoint: String,
    pub prompts: Arc<Mutex<Vec<String>>>,
    _shutdown_tx: oneshot::Sender<()>,
}

impl MockProvider {
    pub async fn start(status: StatusCode, reply: &'static str) -> Self {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let sink = prompts.clone();

        let router = Router::new().fallback(move |body: String| {
            let sink = sink.clone();
            async move {
                let value: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
                if let Some(prompt) = value["contents"][0]["parts"][0]["text"].as_str() {
                    sink.lock().unwrap().push(prompt.to_string());
                }
                (status, [("content-type", "application/json")], reply).into_response()
            }
        });

        let (endpoint, shutdown_tx) = serve(router).await;
        Self {
            endpoint,
            prompts,
            _shutdown_tx: shutdown_tx,
        }
    }

    /// A provider whose only candidate says `text`.
    pub async fn answering(text: &str) -> Self {
        let reply = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
        .to_string();
        Self::start(StatusCode::OK, Box::leak(reply.into_boxed_str())).await
    }
}

pub struct TestServer {
    pub base_url: String,
    _shutdown_tx: oneshot::Sender<()>,
}

impl TestServer {
    /// Finder without LLM access, pacing disabled.
    pub async fn spawn() -> Self {
        Self::spawn_with_args(test_args(None)).await
    }

    /// Finder backed by `provider`.
    pub async fn spawn_with_provider(provider: &MockProvider) -> Self {
        Self::spawn_with_args(test_args(Some(provider))).await
    }

    pub async fn spawn_with_args(args: FinderArgs) -> Self {
        let config = FinderConfig::resolve(&args, None).expect("Invalid test config");
        let state = build_state(&config).expect("Failed to build app state");
        let (base_url, shutdown_tx) = serve(make_app(state)).await;
        Self {
            base_url,
            _shutdown_tx: shutdown_tx,
        }
    }

    pub fn finder_url(&self) -> String {
        format!("{}{}", self.base_url, FINDER_PATH)
    }

    pub async fn ask(&self, body: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(self.finder_url())
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn ask_query(&self, query: &str) -> reqwest::Response {
        self.ask(&serde_json::json!({ "query": query }).to_string()).await
    }
}

pub fn test_args(provider: Option<&MockProvider>) -> FinderArgs {
    FinderArgs {
        bind: "127.0.0.1:0".parse().unwrap(),
        catalog: None,
        config: None,
        gemini_api_key: provider.map(|_| "test-key".to_string()),
        gemini_model: "test-model".to_string(),
        gemini_endpoint: provider
            .map(|p| p.endpoint.clone())
            .unwrap_or_else(|| "http://127.0.0.1:9".to_string()),
        max_output_tokens: 5000,
        temperature: 0.7,
        llm_timeout_secs: 5,
        min_delay_ms: 0,
        max_delay_ms: 0,
        match_policy: MatchPolicy::All,
    }
}

async fn serve(router: Router) -> (String, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr: SocketAddr = listener.local_addr().expect("Failed to get local address");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .expect("Server failed");
    });

    (format!("http://{}", addr), shutdown_tx)
}
