use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{FavoriteRequest, NewRecipe, RecipeListQuery};
use super::repo_types::RecipeRecord;
use crate::error::{bad_request, store_error};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_recipe))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(create_recipe))
        .route("/recipes/:id", delete(delete_recipe))
        .route("/recipes/:id/favorite", put(set_favorite))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(q): Query<RecipeListQuery>,
) -> Result<Json<Vec<RecipeRecord>>, (StatusCode, String)> {
    let rows = state
        .store
        .list_recipes(q.favorites)
        .await
        .map_err(store_error)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeRecord>, (StatusCode, String)> {
    match state.store.get_recipe(id).await.map_err(store_error)? {
        Some(recipe) => Ok(Json(recipe)),
        None => Err((StatusCode::NOT_FOUND, "recipe not found".into())),
    }
}

/// POST /recipes. Also used to save a catalog recipe locally.
#[instrument(skip(state, body))]
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(body): Json<NewRecipe>,
) -> Result<(StatusCode, Json<RecipeRecord>), (StatusCode, String)> {
    if body.title.trim().is_empty() {
        return Err(bad_request("title is required"));
    }
    let recipe = state.store.create_recipe(body).await.map_err(store_error)?;
    info!(id = %recipe.id, ingredients = recipe.ingredients.len(), "recipe saved");
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[instrument(skip(state))]
pub async fn set_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<FavoriteRequest>,
) -> Result<Json<RecipeRecord>, (StatusCode, String)> {
    let recipe = state
        .store
        .set_favorite(id, body.is_favorite)
        .await
        .map_err(store_error)?;
    Ok(Json(recipe))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.delete_recipe(id).await.map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}
