//! HTTP endpoint handlers

use std::sync::{Arc, MutexGuard};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;

use larder_core::{Item, ItemDraft, LarderError, Repository};

use crate::AppState;

type HandlerError = (StatusCode, String);

/// Response for a delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub item: Item,
}

fn not_found() -> HandlerError {
    (StatusCode::NOT_FOUND, "Item not found".to_string())
}

/// Store failures surface as a generic 500; detail is logged server-side only.
fn store_error(err: LarderError) -> HandlerError {
    tracing::error!("store error: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
}

fn repository(state: &AppState) -> Result<MutexGuard<'_, Repository>, HandlerError> {
    state.repository.lock().map_err(|_| {
        tracing::error!("repository mutex poisoned");
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
    })
}

/// List all items ordered by ascending id, with days-left computed per row
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Item>>, HandlerError> {
    let repo = repository(&state)?;
    let now = Utc::now();

    let items: Vec<Item> = repo
        .list_items()
        .map_err(store_error)?
        .into_iter()
        .map(|item| item.with_days_left(now))
        .collect();

    Ok(Json(items))
}

/// Insert a new item; returns the stored row (no days-left attached)
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ItemDraft>,
) -> Result<Json<Item>, HandlerError> {
    let repo = repository(&state)?;
    let item = repo.insert_item(&draft).map_err(store_error)?;
    Ok(Json(item))
}

/// Replace all five fields of the item matching `id`
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(draft): Json<ItemDraft>,
) -> Result<Json<Item>, HandlerError> {
    let repo = repository(&state)?;

    repo.update_item(id, &draft)
        .map_err(store_error)?
        .map(Json)
        .ok_or_else(not_found)
}

/// Remove the item matching `id`, returning its prior contents
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, HandlerError> {
    let repo = repository(&state)?;

    match repo.delete_item(id).map_err(store_error)? {
        Some(item) => Ok(Json(DeleteResponse {
            message: "Item deleted".to_string(),
            item,
        })),
        None => Err(not_found()),
    }
}
