use serde::Deserialize;

use super::repo_types::RequiredIngredient;

fn default_cooking_time() -> i32 {
    30
}
fn default_servings() -> i32 {
    2
}

/// Saves a recipe, either authored locally or picked from the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RequiredIngredient>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default = "default_cooking_time")]
    pub cooking_time: i32,
    #[serde(default = "default_servings")]
    pub servings: i32,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Deserialize)]
pub struct RecipeListQuery {
    #[serde(default)]
    pub favorites: bool,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub is_favorite: bool,
}
