use serde::{Deserialize, Serialize};

use super::{CatalogRecipe, CatalogRecipeDetail, TranslationResult};
use crate::recipes::repo_types::RequiredIngredient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Ingredients,
    Query,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_type: SearchType,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub main_food: Option<String>,
    pub query: Option<String>,
}

impl SearchRequest {
    /// Ingredient terms to search with; `main_food` is appended unless
    /// already listed. Blank terms are dropped.
    pub fn search_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = self
            .ingredients
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(main) = self.main_food.as_deref().map(str::trim) {
            if !main.is_empty() && !terms.iter().any(|t| t == main) {
                terms.push(main.to_string());
            }
        }
        terms
    }
}

#[derive(Debug, Serialize)]
pub struct SearchInfo {
    pub search_type: SearchType,
    pub searched_ingredients: Vec<String>,
    pub query: Option<String>,
    pub translated_query: Option<String>,
    pub total_results: usize,
    pub translations: Vec<TranslationResult>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub recipes: Vec<CatalogRecipe>,
    pub search_info: SearchInfo,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub success: bool,
    pub recipe: CatalogRecipeDetail,
    /// `recipe.ingredients` as shopping-list input.
    pub required_ingredients: Vec<RequiredIngredient>,
}

fn default_source_lang() -> String {
    "ja".into()
}
fn default_target_lang() -> String {
    "en".into()
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
}
