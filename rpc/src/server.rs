//! Axum-based HTTP server.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{get, post, put};
use axum::Router;
use feedback_board::Board;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::error::RpcError;
use crate::handlers;

pub type AppState = Arc<Board>;

/// Build the router with every endpoint and the CORS layer.
pub fn router(board: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/feedback",
            get(handlers::list_feedback).post(handlers::submit_feedback),
        )
        .route(
            "/feedback/:id",
            get(handlers::get_feedback).delete(handlers::delete_feedback),
        )
        .route("/feedback/:id/status", put(handlers::update_status))
        .route("/feedback/:id/upvote", post(handlers::upvote))
        .route("/feedback/:id/downvote", post(handlers::downvote))
        .route(
            "/feedback/:id/comments",
            get(handlers::list_comments).post(handlers::add_comment),
        )
        .route(
            "/roadmap",
            get(handlers::list_roadmap).post(handlers::create_roadmap_item),
        )
        .route("/roadmap/board", get(handlers::roadmap_board))
        .route(
            "/roadmap/:id",
            get(handlers::get_roadmap_item)
                .put(handlers::update_roadmap_item)
                .delete(handlers::delete_roadmap_item),
        )
        .route(
            "/changelog",
            get(handlers::list_changelog).post(handlers::create_changelog_entry),
        )
        .route(
            "/changelog/:id",
            get(handlers::get_changelog_entry)
                .put(handlers::update_changelog_entry)
                .delete(handlers::delete_changelog_entry),
        )
        .layer(cors)
        .with_state(board)
}

pub struct RpcServer {
    pub addr: SocketAddr,
    board: AppState,
}

impl RpcServer {
    pub fn new(addr: SocketAddr, board: AppState) -> Self {
        Self { addr, board }
    }

    /// Bind and serve until `shutdown` resolves, then drain open connections.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), RpcError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| RpcError::Server(format!("failed to bind {}: {e}", self.addr)))?;
        let local = listener
            .local_addr()
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!(addr = %local, "HTTP API listening");

        axum::serve(listener, router(self.board))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;

        info!("HTTP API stopped");
        Ok(())
    }
}
