// Messenger webhook gateway
//
// Thin HTTP layer around the translation pipeline:
// - GET  /         health check
// - GET  /webhook  verify-token challenge
// - POST /webhook  inbound messages, answered through the Send API

pub mod commands;
pub mod handlers;
pub mod messenger;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::config::Config;
use crate::error::{AnubadError, Result};
use crate::pipeline::TranslationPipeline;
use messenger::{GraphApiSender, MessageSender};

pub const HEALTH_MESSAGE: &str = "Messenger Translator Bot is running ✅";

#[derive(Clone)]
pub struct GatewayState {
    pub pipeline: Arc<TranslationPipeline>,
    pub sender: Arc<dyn MessageSender>,
    pub verify_token: Arc<str>,
}

impl GatewayState {
    pub fn new(
        pipeline: Arc<TranslationPipeline>,
        sender: Arc<dyn MessageSender>,
        verify_token: &str,
    ) -> Self {
        Self {
            pipeline,
            sender,
            verify_token: Arc::from(verify_token),
        }
    }
}

pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/webhook", get(handlers::verify).post(handlers::receive))
        .with_state(state)
}

/// Bind the configured address and serve the webhook until the process exits
pub async fn run_server(config: &Config, pipeline: TranslationPipeline) -> Result<()> {
    let sender = GraphApiSender::new(&config.messenger)?;
    let state = GatewayState::new(
        Arc::new(pipeline),
        Arc::new(sender),
        &config.server.verify_token,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = bind(&addr).await?;
    info!("Webhook server listening on http://{}", addr);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| AnubadError::Server(format!("Webhook server stopped: {}", e)))
}

async fn bind(addr: &str) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AnubadError::Server(format!("Failed to bind {}: {}", addr, e)))
}
