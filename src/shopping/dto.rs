use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recipes::repo_types::RequiredIngredient;
use crate::reconcile::shortage::ShoppingListItem;

/// Shopping list for a recipe that was never saved (e.g. a catalog hit).
#[derive(Debug, Deserialize)]
pub struct RecipeShoppingRequest {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<RequiredIngredient>,
}

#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    pub items: Vec<ShoppingListItem>,
    /// Recipes referenced by the plan that could not be found.
    pub unresolved_recipe_ids: Vec<Uuid>,
    pub message: String,
    /// Clipboard-ready rendering of `items`.
    pub text: String,
}
