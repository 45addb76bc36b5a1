use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{IngredientPatch, NewIngredient};
use super::repo_types::IngredientRecord;
use crate::error::{bad_request, store_error};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/ingredients", get(list_ingredients))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/ingredients", post(create_ingredient))
        .route(
            "/ingredients/:id",
            put(update_ingredient).delete(delete_ingredient),
        )
}

#[instrument(skip(state))]
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<IngredientRecord>>, (StatusCode, String)> {
    let rows = state.store.list_ingredients().await.map_err(store_error)?;
    Ok(Json(rows))
}

#[instrument(skip(state, body))]
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(body): Json<NewIngredient>,
) -> Result<(StatusCode, Json<IngredientRecord>), (StatusCode, String)> {
    if body.name.trim().is_empty() {
        return Err(bad_request("name is required"));
    }
    let record = state
        .store
        .create_ingredient(body)
        .await
        .map_err(store_error)?;
    info!(id = %record.id, "ingredient added");
    Ok((StatusCode::CREATED, Json(record)))
}

#[instrument(skip(state, body))]
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<IngredientPatch>,
) -> Result<Json<IngredientRecord>, (StatusCode, String)> {
    if matches!(body.name.as_deref(), Some(n) if n.trim().is_empty()) {
        return Err(bad_request("name must not be blank"));
    }
    let record = state
        .store
        .update_ingredient(id, body)
        .await
        .map_err(store_error)?;
    Ok(Json(record))
}

#[instrument(skip(state))]
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.delete_ingredient(id).await.map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}
