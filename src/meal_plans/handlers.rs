use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use time::Date;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{DateRange, MealPlanPatch, NewMealPlan};
use super::repo_types::{MealPlanEntry, MealSlot};
use crate::error::{bad_request, store_error};
use crate::serde_helpers::iso_date;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans", get(list_meal_plans))
        .route("/meal-plans/day/:date", get(meal_plans_for_day))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans", post(create_meal_plan))
        .route(
            "/meal-plans/:id",
            put(update_meal_plan).delete(delete_meal_plan),
        )
        .route("/meal-plans/slot/:date/:slot", delete(clear_slot))
}

fn parse_date(raw: &str) -> Result<Date, (StatusCode, String)> {
    Date::parse(raw.trim(), iso_date::FORMAT)
        .map_err(|_| bad_request(format!("invalid date: {raw}")))
}

#[instrument(skip(state))]
pub async fn list_meal_plans(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> Result<Json<Vec<MealPlanEntry>>, (StatusCode, String)> {
    if !range.is_valid() {
        return Err(bad_request("start must not be after end"));
    }
    let rows = state
        .store
        .meal_plans_in_range(range.start, range.end)
        .await
        .map_err(store_error)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn meal_plans_for_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<MealPlanEntry>>, (StatusCode, String)> {
    let date = parse_date(&date)?;
    let rows = state
        .store
        .meal_plans_in_range(date, date)
        .await
        .map_err(store_error)?;
    Ok(Json(rows))
}

/// Plans a recipe (or a freeform title) for one slot. When a recipe is
/// referenced it must exist; its title is copied if none was given.
#[instrument(skip(state, body))]
pub async fn create_meal_plan(
    State(state): State<AppState>,
    Json(mut body): Json<NewMealPlan>,
) -> Result<(StatusCode, Json<MealPlanEntry>), (StatusCode, String)> {
    match body.recipe_id {
        Some(recipe_id) => {
            let recipe = state
                .store
                .get_recipe(recipe_id)
                .await
                .map_err(store_error)?
                .ok_or_else(|| bad_request(format!("unknown recipe: {recipe_id}")))?;
            if body.recipe_title.as_deref().map_or(true, |t| t.trim().is_empty()) {
                body.recipe_title = Some(recipe.title);
            }
        }
        None => {
            if body.recipe_title.as_deref().map_or(true, |t| t.trim().is_empty()) {
                return Err(bad_request("recipe_id or recipe_title is required"));
            }
        }
    }
    let entry = state
        .store
        .create_meal_plan(body)
        .await
        .map_err(store_error)?;
    info!(id = %entry.id, date = %entry.date, slot = %entry.slot, "meal planned");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state, body))]
pub async fn update_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MealPlanPatch>,
) -> Result<Json<MealPlanEntry>, (StatusCode, String)> {
    if let Some(recipe_id) = body.recipe_id {
        if state
            .store
            .get_recipe(recipe_id)
            .await
            .map_err(store_error)?
            .is_none()
        {
            return Err(bad_request(format!("unknown recipe: {recipe_id}")));
        }
    }
    let entry = state
        .store
        .update_meal_plan(id, body)
        .await
        .map_err(store_error)?;
    Ok(Json(entry))
}

#[instrument(skip(state))]
pub async fn delete_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.delete_meal_plan(id).await.map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Empties one (date, slot) cell of the calendar.
#[instrument(skip(state))]
pub async fn clear_slot(
    State(state): State<AppState>,
    Path((date, slot)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let date = parse_date(&date)?;
    let slot: MealSlot = slot.parse().map_err(bad_request)?;
    let removed = state
        .store
        .delete_meal_plans_at(date, slot)
        .await
        .map_err(store_error)?;
    if removed == 0 {
        warn!(%date, %slot, "nothing planned in slot");
    }
    Ok(StatusCode::NO_CONTENT)
}
