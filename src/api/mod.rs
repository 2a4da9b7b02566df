use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::PendingError;
use crate::models::ChainInfo;
use crate::node::Connector;
use crate::resolve_stats::ResolveSnapshot;
use crate::resolver::PendingResolver;

pub struct AppState<C> {
    pub resolver: Arc<PendingResolver<C>>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct ChainsResponse {
    chains: Vec<ChainInfo>,
}

/// Query parameters arrive as raw strings so bad input yields our own error
/// body instead of axum's rejection text.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PendingQuery {
    chain_id: Option<String>,
    address: Option<String>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn pending<C: Connector>(
    State(state): State<AppState<C>>,
    Query(query): Query<PendingQuery>,
) -> Response {
    let Some(chain_id) = query.chain_id.as_deref().and_then(|s| s.trim().parse::<u64>().ok()) else {
        return error_response(StatusCode::BAD_REQUEST, "chainId must be an unsigned integer");
    };
    let address = query.address.unwrap_or_default();

    match state.resolver.resolve(chain_id, &address).await {
        Ok(resolution) => Json(resolution).into_response(),
        Err(err) => {
            let status = match err {
                PendingError::UnknownChain(_) | PendingError::InvalidAddress(_) => {
                    StatusCode::BAD_REQUEST
                }
                PendingError::Transport(_) => StatusCode::BAD_GATEWAY,
            };
            error_response(status, err.to_string())
        }
    }
}

async fn chains<C: Connector>(State(state): State<AppState<C>>) -> Json<ChainsResponse> {
    Json(ChainsResponse {
        chains: state.resolver.connector().registry().chains(),
    })
}

async fn stats<C: Connector>(State(state): State<AppState<C>>) -> Json<ResolveSnapshot> {
    Json(state.resolver.stats().snapshot())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn app_router<C: Connector>(state: AppState<C>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pending", get(pending::<C>))
        .route("/chains", get(chains::<C>))
        .route("/stats", get(stats::<C>))
        .with_state(state)
}

pub async fn run_http_server<C: Connector>(addr: &str, state: AppState<C>) -> Result<()> {
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
