use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use super::dto::{
    DetailResponse, SearchInfo, SearchRequest, SearchResponse, SearchType, TranslateRequest,
    TranslateResponse,
};
use super::{provider_error, CatalogRecipe, RecipeCatalog, TermTranslator, Translator};
use crate::error::{bad_request, store_error};
use crate::recipes::repo_types::RecipeRecord;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search-recipes", post(search_recipes))
        .route("/recipe-detail/:id", get(recipe_detail))
        .route("/recipe-detail/:id/save", post(save_catalog_recipe))
        .route("/translate", post(translate_text))
}

#[instrument(skip(state, body))]
pub async fn search_recipes(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let res = run_search(
        state.catalog.as_ref(),
        state.translator.as_ref(),
        &state.terms,
        body,
    )
    .await?;
    info!(
        success = res.success,
        results = res.search_info.total_results,
        "recipe search"
    );
    Ok(Json(res))
}

/// Translates the search input, queries the catalog, and degrades to a
/// single placeholder recipe when the catalog is unavailable.
pub(crate) async fn run_search(
    catalog: &dyn RecipeCatalog,
    translator: &dyn Translator,
    terms: &TermTranslator,
    req: SearchRequest,
) -> Result<SearchResponse, (StatusCode, String)> {
    let mut info = SearchInfo {
        search_type: req.search_type,
        searched_ingredients: Vec::new(),
        query: None,
        translated_query: None,
        total_results: 0,
        translations: Vec::new(),
        fallback: false,
        error: None,
    };

    let found = match req.search_type {
        SearchType::Ingredients => {
            let searched = req.search_terms();
            if searched.is_empty() {
                return Err(bad_request("食材が指定されていません"));
            }
            info.translations = terms.translate_terms(translator, &searched).await;
            info.searched_ingredients = searched;
            let english: Vec<String> = info
                .translations
                .iter()
                .map(|t| t.translated.clone())
                .collect();
            catalog.find_by_ingredients(&english).await
        }
        SearchType::Query => {
            let query = req.query.as_deref().map(str::trim).unwrap_or_default();
            if query.is_empty() {
                return Err(bad_request("検索キーワードが指定されていません"));
            }
            info.translations = terms
                .translate_terms(translator, &[query.to_string()])
                .await;
            let english = info
                .translations
                .first()
                .map(|t| t.translated.clone())
                .unwrap_or_else(|| query.to_string());
            info.query = Some(query.to_string());
            info.translated_query = Some(english.clone());
            catalog.search(&english).await
        }
    };

    match found {
        Ok(recipes) => {
            info.total_results = recipes.len();
            Ok(SearchResponse {
                success: true,
                recipes,
                search_info: info,
            })
        }
        Err(e) => {
            error!(error = %e, "catalog search failed; answering with placeholder");
            let recipes = vec![placeholder_recipe(&req, &info.searched_ingredients)];
            info.total_results = recipes.len();
            info.fallback = true;
            info.error = Some(e.to_string());
            Ok(SearchResponse {
                success: false,
                recipes,
                search_info: info,
            })
        }
    }
}

fn placeholder_recipe(req: &SearchRequest, searched: &[String]) -> CatalogRecipe {
    let query = req.query.as_deref().map(str::trim).unwrap_or_default();
    let (title, description, used) = match req.search_type {
        SearchType::Query => (
            format!("{query}を使った料理"),
            format!("{query}を使ったレシピ"),
            Vec::new(),
        ),
        SearchType::Ingredients => {
            let main = req
                .main_food
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or("食材");
            let listed = if searched.is_empty() {
                "食材".to_string()
            } else {
                searched.join("、")
            };
            (
                format!("{main}を使った料理"),
                format!("{listed}を使ったレシピ"),
                searched.to_vec(),
            )
        }
    };
    CatalogRecipe {
        id: None,
        title,
        description,
        cooking_time: 30,
        servings: 2,
        image_url: "https://via.placeholder.com/300x200?text=Recipe+Not+Found".into(),
        source_url: "#".into(),
        used_ingredient_count: used.len() as u32,
        used_ingredients: used,
        missed_ingredients: Vec::new(),
        missed_ingredient_count: 0,
        likes: 0,
        is_fallback: true,
    }
}

#[instrument(skip(state))]
pub async fn recipe_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DetailResponse>, (StatusCode, String)> {
    let recipe = state.catalog.detail(id).await.map_err(provider_error)?;
    Ok(Json(DetailResponse {
        success: true,
        required_ingredients: recipe.required_ingredients(),
        recipe,
    }))
}

/// Copies a catalog recipe into the local store so it can be planned.
#[instrument(skip(state))]
pub async fn save_catalog_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeRecord>), (StatusCode, String)> {
    let detail = state.catalog.detail(id).await.map_err(provider_error)?;
    let saved = state
        .store
        .create_recipe(detail.to_new_recipe())
        .await
        .map_err(store_error)?;
    info!(catalog_id = id, id = %saved.id, "catalog recipe saved");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[instrument(skip(state, body))]
pub async fn translate_text(
    State(state): State<AppState>,
    Json(body): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, (StatusCode, String)> {
    let text = body.text.trim();
    if text.is_empty() {
        return Err(bad_request("text is required"));
    }
    let translated = state
        .translator
        .translate(text, &body.source_lang, &body.target_lang)
        .await
        .map_err(provider_error)?;
    Ok(Json(TranslateResponse {
        success: true,
        original_text: text.to_string(),
        translated_text: translated,
        source_lang: body.source_lang,
        target_lang: body.target_lang,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::translate::fakes::FakeTranslator;
    use crate::providers::{CatalogRecipeDetail, ProviderError};
    use crate::reconcile::synonyms::SynonymTable;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Records what it was asked and answers with one canned hit, or fails.
    #[derive(Default)]
    struct FakeCatalog {
        fail: bool,
        asked: Mutex<Vec<String>>,
    }

    fn hit(title: &str) -> CatalogRecipe {
        CatalogRecipe {
            id: Some(1),
            title: title.into(),
            description: String::new(),
            cooking_time: 30,
            servings: 2,
            image_url: String::new(),
            source_url: String::new(),
            used_ingredients: Vec::new(),
            missed_ingredients: Vec::new(),
            used_ingredient_count: 0,
            missed_ingredient_count: 0,
            likes: 0,
            is_fallback: false,
        }
    }

    #[async_trait]
    impl RecipeCatalog for FakeCatalog {
        async fn find_by_ingredients(
            &self,
            ingredients: &[String],
        ) -> Result<Vec<CatalogRecipe>, ProviderError> {
            self.asked.lock().unwrap().push(ingredients.join(","));
            if self.fail {
                return Err(ProviderError::NotConfigured("Spoonacular"));
            }
            Ok(vec![hit("Chicken Stir Fry")])
        }

        async fn search(&self, query: &str) -> Result<Vec<CatalogRecipe>, ProviderError> {
            self.asked.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(ProviderError::NotConfigured("Spoonacular"));
            }
            Ok(vec![hit("Fried Rice")])
        }

        async fn detail(&self, _id: i64) -> Result<CatalogRecipeDetail, ProviderError> {
            Err(ProviderError::NotConfigured("Spoonacular"))
        }
    }

    fn terms() -> TermTranslator {
        TermTranslator::new(
            Arc::new(SynonymTable::english_search_terms()),
            Duration::ZERO,
        )
    }

    fn request(
        search_type: SearchType,
        ingredients: &[&str],
        main: Option<&str>,
        query: Option<&str>,
    ) -> SearchRequest {
        SearchRequest {
            search_type,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            main_food: main.map(str::to_string),
            query: query.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn ingredient_search_translates_before_querying() {
        let catalog = FakeCatalog::default();
        let translator = FakeTranslator::default();
        let res = run_search(
            &catalog,
            &translator,
            &terms(),
            request(SearchType::Ingredients, &["鶏肉", "garlic"], Some("玉ねぎ"), None),
        )
        .await
        .unwrap();
        assert!(res.success);
        assert_eq!(res.search_info.total_results, 1);
        assert_eq!(
            res.search_info.searched_ingredients,
            vec!["鶏肉", "garlic", "玉ねぎ"]
        );
        assert_eq!(catalog.asked.lock().unwrap()[0], "chicken,garlic,onion");
    }

    #[test]
    fn main_food_is_not_duplicated() {
        let req = request(SearchType::Ingredients, &["卵", " "], Some("卵"), None);
        assert_eq!(req.search_terms(), vec!["卵"]);
    }

    #[tokio::test]
    async fn keyword_search_uses_translated_query() {
        let catalog = FakeCatalog::default();
        let translator = FakeTranslator::with(&[("親子丼", "oyakodon")]);
        let res = run_search(
            &catalog,
            &translator,
            &terms(),
            request(SearchType::Query, &[], None, Some(" 親子丼 ")),
        )
        .await
        .unwrap();
        assert!(res.success);
        assert_eq!(res.search_info.translated_query.as_deref(), Some("oyakodon"));
        assert_eq!(catalog.asked.lock().unwrap()[0], "oyakodon");
    }

    #[tokio::test]
    async fn missing_input_is_rejected() {
        let catalog = FakeCatalog::default();
        let translator = FakeTranslator::default();
        let (status, _) = run_search(
            &catalog,
            &translator,
            &terms(),
            request(SearchType::Ingredients, &[], None, None),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = run_search(
            &catalog,
            &translator,
            &terms(),
            request(SearchType::Query, &[], None, Some("   ")),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(catalog.asked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn catalog_failure_yields_placeholder() {
        let catalog = FakeCatalog {
            fail: true,
            ..Default::default()
        };
        let translator = FakeTranslator::default();
        let res = run_search(
            &catalog,
            &translator,
            &terms(),
            request(SearchType::Ingredients, &["豚肉", "キャベツ"], Some("豚肉"), None),
        )
        .await
        .unwrap();
        assert!(!res.success);
        assert!(res.search_info.fallback);
        assert_eq!(res.recipes.len(), 1);
        let placeholder = &res.recipes[0];
        assert!(placeholder.is_fallback);
        assert_eq!(placeholder.id, None);
        assert_eq!(placeholder.title, "豚肉を使った料理");
        assert_eq!(placeholder.description, "豚肉、キャベツを使ったレシピ");
        assert_eq!(placeholder.used_ingredient_count, 2);
        assert_eq!(
            res.search_info.error.as_deref(),
            Some("Spoonacular API key not configured")
        );
    }
}
