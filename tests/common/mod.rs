#![allow(dead_code)]

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use energyzero_gas_prices::config::ApiConfig;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-process stand-in for the GraphQL endpoint
pub struct Upstream {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

struct Reply {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn answer(State(reply): State<Arc<Reply>>, Json(request): Json<Value>) -> (StatusCode, String) {
    reply.requests.lock().await.push(request);
    (reply.status, reply.body.clone())
}

impl Upstream {
    /// Serve `body` with `status` for every POST to `/v1/gql`
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let reply = Arc::new(Reply {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
            requests: requests.clone(),
        });
        let app = Router::new().route("/v1/gql", post(answer)).with_state(reply);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{}/v1/gql", addr),
            requests,
        }
    }

    pub async fn json(status: u16, body: Value) -> Self {
        Self::start(status, body.to_string()).await
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            endpoint: self.endpoint.clone(),
            timeout_seconds: 5,
            ..ApiConfig::default()
        }
    }

    pub async fn requests(&self) -> Vec<Value> {
        self.requests.lock().await.clone()
    }
}
