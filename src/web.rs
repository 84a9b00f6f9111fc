//! Local JSON API over the synchronizer.
//!
//! Exposes list/search, add, delete, reload and a photo proxy on a local
//! port, for a front end or scripts to drive the same operations as the
//! CLI.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::backend::guess_content_type;
use crate::error::Result;
use crate::inventory::{Inventory, ItemFilter};
use crate::models::Item;

/// Shared application state.
#[derive(Clone)]
struct AppState {
    inventory: Arc<RwLock<Inventory>>,
}

/// List query parameters.
#[derive(Deserialize, Default)]
struct SearchParams {
    q: Option<String>,
    category: Option<String>,
    location: Option<String>,
    condition: Option<String>,
}

impl SearchParams {
    fn into_filter(self) -> ItemFilter {
        ItemFilter {
            search: self.q,
            category: self.category,
            location: self.location,
            condition: self.condition,
        }
    }
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    fn err(message: String) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            error: Some(message),
        })
    }
}

/// GET /api/items?q=&category=&location=&condition=
async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<Vec<Item>>> {
    let inventory = state.inventory.read().await;
    let items: Vec<Item> = inventory
        .search(&params.into_filter())
        .into_iter()
        .cloned()
        .collect();
    ApiResponse::ok(items)
}

/// POST /api/items - add one item (photo attachments go through the CLI)
async fn add_handler(
    State(state): State<AppState>,
    Json(draft): Json<Item>,
) -> Json<ApiResponse<Item>> {
    let mut inventory = state.inventory.write().await;
    match inventory.add(draft, None).await {
        Ok(created) => ApiResponse::ok(created),
        Err(e) => {
            log::error!("Add failed: {}", e);
            ApiResponse::err(e.to_string())
        }
    }
}

/// DELETE /api/items/{id}
async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<ApiResponse<()>> {
    let mut inventory = state.inventory.write().await;
    match inventory.delete(id).await {
        Ok(()) => ApiResponse::ok(()),
        Err(e) => {
            log::error!("Delete failed: {}", e);
            ApiResponse::err(e.to_string())
        }
    }
}

/// POST /api/reload - refetch the list from the backend
async fn reload_handler(State(state): State<AppState>) -> Json<ApiResponse<usize>> {
    let mut inventory = state.inventory.write().await;
    match inventory.load().await {
        Ok(()) => ApiResponse::ok(inventory.items().len()),
        Err(e) => {
            log::error!("Reload failed: {}", e);
            ApiResponse::err(e.to_string())
        }
    }
}

/// GET /api/items/{id}/photo - proxy the item's stored photo
async fn photo_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> std::result::Result<Response, StatusCode> {
    let inventory = state.inventory.read().await;
    let item = inventory
        .items()
        .iter()
        .find(|item| item.id == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    let key = item
        .primary_photo_key()
        .ok_or(StatusCode::NOT_FOUND)?
        .to_string();

    match inventory.client().download_photo(&key).await {
        Ok(bytes) => Response::builder()
            .header(header::CONTENT_TYPE, guess_content_type(&key))
            .body(Body::from(bytes))
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR),
        Err(e) => {
            log::error!("Photo proxy failed: {}", e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

/// Starts the API server on the given port. Runs until the process exits.
pub async fn serve(inventory: Arc<RwLock<Inventory>>, port: u16) -> Result<()> {
    let state = AppState { inventory };

    let app = Router::new()
        .route("/api/items", get(list_handler).post(add_handler))
        .route("/api/items/{id}", axum::routing::delete(delete_handler))
        .route("/api/items/{id}/photo", get(photo_handler))
        .route("/api/reload", post(reload_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    log::info!("Inventory API listening on http://localhost:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
