use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{delete, get},
    Json, Router,
};
use shared::{
    domain::{Item, ItemId},
    error::{ApiError, ApiException, ErrorCode},
    protocol::CreateItemRequest,
};
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod store;

use config::load_settings;
use store::InventoryStore;

#[derive(Clone)]
struct AppState {
    store: Arc<RwLock<InventoryStore>>,
    api_token: Option<String>,
}

impl AppState {
    fn new(api_token: Option<String>) -> Self {
        Self {
            store: Arc::new(RwLock::new(InventoryStore::default())),
            api_token,
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let auth_enabled = settings.api_token.is_some();
    let app = build_router(AppState::new(settings.api_token));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, auth_enabled, "inventory server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/inventory", get(list_items).post(create_item))
        .route("/api/inventory/:item_id", delete(delete_item))
        .with_state(state)
}

fn error_response(err: ApiException) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
    };
    (status, Json(err.into()))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let Some(expected) = state.api_token.as_deref() else {
        return Ok(());
    };
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if provided == Some(expected) {
        return Ok(());
    }
    warn!("rejected inventory request with missing or invalid bearer token");
    Err(error_response(ApiException::new(
        ErrorCode::Unauthorized,
        "missing or invalid bearer token",
    )))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Item>>> {
    authorize(&state, &headers)?;
    Ok(Json(state.store.read().await.list()))
}

async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    authorize(&state, &headers)?;
    let item = state
        .store
        .write()
        .await
        .create(req)
        .map_err(error_response)?;
    info!(item_id = %item.item_id, name = %item.name, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<i64>,
) -> ApiResult<Json<Item>> {
    authorize(&state, &headers)?;
    let item = state
        .store
        .write()
        .await
        .remove(ItemId(item_id))
        .map_err(error_response)?;
    info!(item_id = %item.item_id, "item deleted");
    Ok(Json(item))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
