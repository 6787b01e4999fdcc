use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::{json, Value};

use cookinator::auth::{PasetoMaker, TokenMaker};
use cookinator::middleware::{auth_middleware, AuthPayload};

pub const TEST_KEY: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz012345";

pub struct TestServer {
    pub base_url: String,
    pub token_maker: Arc<PasetoMaker>,
}

/// Echoes the authenticated subject back to the caller
async fn whoami(AuthPayload(payload): AuthPayload) -> Json<Value> {
    Json(json!({ "subject": payload.subject }))
}

/// Start an in-process server with one protected route on a free port
pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let base_url = format!("http://{}", addr);

    let token_maker = Arc::new(PasetoMaker::new(TEST_KEY)?);
    let verifier: Arc<dyn TokenMaker> = token_maker.clone();

    let app = Router::new()
        .route("/whoami", get(whoami))
        .route_layer(from_fn_with_state(verifier, auth_middleware));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let server = TestServer { base_url, token_maker };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            // Any HTTP response (401 included) means the listener is up
            if client.get(self.url("/whoami")).send().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
