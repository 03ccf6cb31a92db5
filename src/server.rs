// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Development server
//!
//! Serves the map page and its data, and hosts the position bridge on a
//! WebSocket at `/ws`. Routes:
//!
//! | Route            | Response                                  |
//! |------------------|-------------------------------------------|
//! | `GET /`          | map page                                  |
//! | `GET /api/graph` | vis-network payload with current layout   |
//! | `GET /api/nodes` | merged project list                       |
//! | `GET /api/positions` | raw saved layout                      |
//! | `GET /ws`        | bridge channel (only when persisting)     |

use crate::bridge::{BridgeOutcome, PositionBridge};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::types::{PositionMap, ProjectNode};
use crate::vis::{self, VisData};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::{Html, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Shared server state
pub struct AppState {
    /// Dataset without positions
    dataset: Dataset,
    /// Layout as last read or saved
    positions: RwLock<PositionMap>,
    /// Position writer; `None` disables `/ws`
    bridge: Option<Mutex<PositionBridge>>,
}

impl AppState {
    /// Create server state.
    ///
    /// Pass `None` for `bridge` to serve a read-only map.
    #[must_use]
    pub fn new(dataset: Dataset, positions: PositionMap, bridge: Option<PositionBridge>) -> Self {
        Self {
            dataset,
            positions: RwLock::new(positions),
            bridge: bridge.map(Mutex::new),
        }
    }

    /// Whether position updates are accepted
    #[must_use]
    pub fn persists(&self) -> bool {
        self.bridge.is_some()
    }

    /// Current layout
    pub async fn positions(&self) -> PositionMap {
        self.positions.read().await.clone()
    }

    /// Dataset with the current layout applied, as one list
    pub async fn merged_nodes(&self) -> Vec<ProjectNode> {
        let positions = self.positions.read().await;
        let (merged, _) = self.dataset.clone().with_positions(&positions);
        merged.all()
    }

    /// Hand one channel message to the bridge.
    ///
    /// Messages are processed one at a time; the file write runs on the
    /// blocking pool. After a successful write the in-memory layout is
    /// replaced so the next page load sees it.
    pub async fn handle_bridge_message(&self, raw: &str) -> Result<BridgeOutcome> {
        let Some(bridge) = &self.bridge else {
            return Ok(BridgeOutcome::Ignored);
        };
        let guard = bridge.lock().await;
        let writer = guard.clone();
        let raw = raw.to_owned();
        let outcome = tokio::task::spawn_blocking(move || writer.handle(&raw)).await??;
        if let BridgeOutcome::Persisted(map) = &outcome {
            *self.positions.write().await = map.clone();
        }
        Ok(outcome)
    }
}

/// Build the router
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(index))
        .route("/api/graph", get(graph))
        .route("/api/nodes", get(nodes))
        .route("/api/positions", get(positions));

    if state.persists() {
        app = app.route("/ws", get(ws_upgrade));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    use anyhow::Context;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local = listener.local_addr()?;

    info!("Yak map on http://{}", local);
    if !state.persists() {
        info!("Position saving disabled");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn graph(State(state): State<Arc<AppState>>) -> Json<VisData> {
    Json(vis::to_vis(&state.merged_nodes().await))
}

async fn nodes(State(state): State<Arc<AppState>>) -> Json<Vec<ProjectNode>> {
    Json(state.merged_nodes().await)
}

async fn positions(State(state): State<Arc<AppState>>) -> Json<PositionMap> {
    Json(state.positions().await)
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("Bridge client connected");

    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                debug!("Bridge connection error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                if let Err(e) = state.handle_bridge_message(text.as_str()).await {
                    error!("Position update failed: {}", e);
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    debug!("Bridge client disconnected");
}
