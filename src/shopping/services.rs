use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use super::dto::ShoppingListResponse;
use crate::error::StoreError;
use crate::meal_plans::dto::DateRange;
use crate::recipes::repo_types::{RecipeRecord, RequiredIngredient};
use crate::reconcile::{report::render_text, ShoppingList, ShoppingListEngine};
use crate::serde_helpers::iso_date;
use crate::store::PantryStore;

fn into_response(list: ShoppingList, heading: &str) -> ShoppingListResponse {
    let mut unresolved_recipe_ids: Vec<Uuid> = Vec::new();
    for u in &list.unresolved {
        if !unresolved_recipe_ids.contains(&u.recipe_id) {
            unresolved_recipe_ids.push(u.recipe_id);
        }
    }
    ShoppingListResponse {
        message: list.summary(),
        text: render_text(heading, &list.items),
        items: list.items,
        unresolved_recipe_ids,
    }
}

/// Calendar view: everything planned in `range` against the current pantry.
pub async fn for_date_range(
    store: &dyn PantryStore,
    engine: &ShoppingListEngine,
    range: DateRange,
) -> Result<ShoppingListResponse, StoreError> {
    let plans = store.meal_plans_in_range(range.start, range.end).await?;

    let mut ids: Vec<Uuid> = plans.iter().filter_map(|p| p.recipe_id).collect();
    ids.sort_unstable();
    ids.dedup();
    let recipes: HashMap<Uuid, RecipeRecord> = store
        .get_recipes(&ids)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();
    let pantry = store.list_ingredients().await?;
    debug!(
        plans = plans.len(),
        recipes = recipes.len(),
        pantry = pantry.len(),
        "snapshot loaded"
    );

    let list = engine.for_meal_plans(&plans, &recipes, &pantry);
    let heading = format!(
        "{} 〜 {}",
        iso_date::display(range.start),
        iso_date::display(range.end)
    );
    Ok(into_response(list, &heading))
}

/// Saved recipe view.
pub async fn for_saved_recipe(
    store: &dyn PantryStore,
    engine: &ShoppingListEngine,
    recipe_id: Uuid,
) -> Result<ShoppingListResponse, StoreError> {
    let recipe = store
        .get_recipe(recipe_id)
        .await?
        .ok_or(StoreError::NotFound("recipe"))?;
    let pantry = store.list_ingredients().await?;
    let list = engine.for_recipe(&recipe.title, &recipe.ingredients, &pantry);
    Ok(into_response(list, &recipe.title))
}

/// External recipe view: the caller supplies the ingredient list.
pub async fn for_external_recipe(
    store: &dyn PantryStore,
    engine: &ShoppingListEngine,
    title: &str,
    ingredients: &[RequiredIngredient],
) -> Result<ShoppingListResponse, StoreError> {
    let pantry = store.list_ingredients().await?;
    let list = engine.for_recipe(title, ingredients, &pantry);
    Ok(into_response(list, title))
}
