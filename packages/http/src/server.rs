//! The HTTP front end: every request, on any path and with any method, is one
//! dispatcher call driven by the query string.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use dirstore_core::{ActionRequest, Dispatcher, Reply, StoreRoot};
use tokio::net::TcpListener;

use crate::config::{ServerConfig, StatusPolicy};
use crate::error::{Error, Result};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct ServerState {
    dispatcher: Arc<Dispatcher>,
    status_policy: StatusPolicy,
}

impl ServerState {
    pub fn new(dispatcher: Dispatcher, status_policy: StatusPolicy) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            status_policy,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Construct the router. A single fallback handler serves every path and
/// method.
pub fn build_router(state: ServerState) -> Router {
    Router::new().fallback(handle_request).with_state(state)
}

/// Open the store root, bind the configured address, and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let root = StoreRoot::open(&config.root)?;
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;

    tracing::info!(
        root = %root.path().display(),
        "dirstore running at http://localhost:{}",
        addr.port()
    );

    let state = ServerState::new(Dispatcher::new(root), config.status_policy);
    serve_on(listener, state, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves. In-flight
/// requests run to completion.
pub async fn serve_on(
    listener: TcpListener,
    state: ServerState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(Error::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn handle_request(
    State(state): State<ServerState>,
    query: std::result::Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Response {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable query string, treating as empty");
            HashMap::new()
        }
    };

    let request = ActionRequest::from_query(params);
    let dispatcher = Arc::clone(&state.dispatcher);

    // Filesystem calls block; keep them off the async workers.
    let reply = match tokio::task::spawn_blocking(move || dispatcher.dispatch(request)).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!(error = %err, "dispatch task failed");
            Reply::internal()
        }
    };

    let status = state.status_policy.status_for(reply.outcome());
    text_response(status, reply.into_body())
}

fn text_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}
