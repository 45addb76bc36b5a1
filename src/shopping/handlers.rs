use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{RecipeShoppingRequest, ShoppingListResponse};
use super::services;
use crate::error::{bad_request, store_error};
use crate::meal_plans::dto::DateRange;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shopping-list", post(shopping_list_for_range))
        .route("/shopping-list/recipe", post(shopping_list_for_recipe))
        .route("/recipes/:id/shortfall", get(recipe_shortfall))
}

#[instrument(skip(state))]
pub async fn shopping_list_for_range(
    State(state): State<AppState>,
    Json(range): Json<DateRange>,
) -> Result<Json<ShoppingListResponse>, (StatusCode, String)> {
    if !range.is_valid() {
        return Err(bad_request("start must not be after end"));
    }
    let res = services::for_date_range(state.store.as_ref(), &state.engine, range)
        .await
        .map_err(store_error)?;
    info!(
        items = res.items.len(),
        unresolved = res.unresolved_recipe_ids.len(),
        "shopping list built"
    );
    Ok(Json(res))
}

#[instrument(skip(state))]
pub async fn recipe_shortfall(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShoppingListResponse>, (StatusCode, String)> {
    let res = services::for_saved_recipe(state.store.as_ref(), &state.engine, id)
        .await
        .map_err(store_error)?;
    Ok(Json(res))
}

#[instrument(skip(state, body))]
pub async fn shopping_list_for_recipe(
    State(state): State<AppState>,
    Json(body): Json<RecipeShoppingRequest>,
) -> Result<Json<ShoppingListResponse>, (StatusCode, String)> {
    if body.title.trim().is_empty() {
        return Err(bad_request("title is required"));
    }
    let res = services::for_external_recipe(
        state.store.as_ref(),
        &state.engine,
        body.title.trim(),
        &body.ingredients,
    )
    .await
    .map_err(store_error)?;
    Ok(Json(res))
}
