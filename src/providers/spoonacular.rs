use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{ProviderError, RecipeCatalog};
use crate::recipes::dto::NewRecipe;
use crate::recipes::repo_types::RequiredIngredient;

const PROVIDER: &str = "Spoonacular";
const RESULT_LIMIT: &str = "12";
const SUMMARY_CHARS: usize = 100;
const NO_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";

/// One search hit, already shaped for the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogRecipe {
    /// Catalog id; `None` for the placeholder returned when search fails.
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub cooking_time: i32,
    pub servings: i32,
    pub image_url: String,
    pub source_url: String,
    pub used_ingredients: Vec<String>,
    pub missed_ingredients: Vec<String>,
    pub used_ingredient_count: u32,
    pub missed_ingredient_count: u32,
    pub likes: i64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogIngredient {
    pub id: Option<i64>,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub original: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogRecipeDetail {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub servings: i32,
    pub ready_in_minutes: i32,
    pub summary: String,
    pub instructions: String,
    pub ingredients: Vec<CatalogIngredient>,
    pub source_url: Option<String>,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub dish_types: Vec<String>,
    pub diets: Vec<String>,
}

impl CatalogRecipeDetail {
    /// The ingredient list in the shape the shopping-list engine consumes.
    pub fn required_ingredients(&self) -> Vec<RequiredIngredient> {
        self.ingredients
            .iter()
            .map(|i| RequiredIngredient::new(&i.name, i.amount, &i.unit))
            .collect()
    }

    /// A local copy, so the recipe can be planned and bookmarked.
    pub fn to_new_recipe(&self) -> NewRecipe {
        NewRecipe {
            title: self.title.clone(),
            description: (!self.summary.is_empty()).then(|| self.summary.clone()),
            ingredients: self.required_ingredients(),
            instructions: self.instructions.clone(),
            cooking_time: self.ready_in_minutes,
            servings: self.servings,
            image_url: self.image.clone(),
            source_url: self.source_url.clone(),
            is_favorite: false,
        }
    }
}

pub(crate) fn strip_html(s: &str) -> String {
    lazy_static! {
        static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    }
    TAG_RE.replace_all(s, "").into_owned()
}

fn summarize(html: Option<&str>) -> String {
    match html {
        Some(html) => {
            let text: String = strip_html(html).chars().take(SUMMARY_CHARS).collect();
            format!("{text}...")
        }
        None => "レシピの説明".to_string(),
    }
}

fn fallback_source_url(title: &str, id: i64) -> String {
    let slug = title.split_whitespace().collect::<Vec<_>>().join("-");
    format!("https://spoonacular.com/recipes/{}-{id}", slug.to_lowercase())
}

// --- wire payloads ---

#[derive(Debug, Deserialize)]
struct NamedIngredient {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IngredientHit {
    id: i64,
    #[serde(default)]
    title: String,
    image: Option<String>,
    #[serde(default)]
    used_ingredient_count: u32,
    #[serde(default)]
    missed_ingredient_count: u32,
    #[serde(default)]
    used_ingredients: Vec<NamedIngredient>,
    #[serde(default)]
    missed_ingredients: Vec<NamedIngredient>,
    #[serde(default)]
    likes: i64,
}

impl From<IngredientHit> for CatalogRecipe {
    fn from(h: IngredientHit) -> Self {
        Self {
            id: Some(h.id),
            description: format!(
                "{}個の食材がマッチ、{}個の食材が不足",
                h.used_ingredient_count, h.missed_ingredient_count
            ),
            cooking_time: 30,
            servings: 2,
            image_url: h.image.unwrap_or_else(|| NO_IMAGE.to_string()),
            source_url: fallback_source_url(&h.title, h.id),
            used_ingredients: h.used_ingredients.into_iter().map(|i| i.name).collect(),
            missed_ingredients: h.missed_ingredients.into_iter().map(|i| i.name).collect(),
            used_ingredient_count: h.used_ingredient_count,
            missed_ingredient_count: h.missed_ingredient_count,
            likes: h.likes,
            title: h.title,
            is_fallback: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ComplexSearchPage {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    id: i64,
    #[serde(default)]
    title: String,
    summary: Option<String>,
    ready_in_minutes: Option<i32>,
    servings: Option<i32>,
    image: Option<String>,
    source_url: Option<String>,
    aggregate_likes: Option<i64>,
}

impl From<SearchHit> for CatalogRecipe {
    fn from(h: SearchHit) -> Self {
        Self {
            id: Some(h.id),
            description: summarize(h.summary.as_deref()),
            cooking_time: h.ready_in_minutes.unwrap_or(30),
            servings: h.servings.unwrap_or(2),
            image_url: h.image.unwrap_or_else(|| NO_IMAGE.to_string()),
            source_url: h
                .source_url
                .unwrap_or_else(|| fallback_source_url(&h.title, h.id)),
            used_ingredients: Vec::new(),
            missed_ingredients: Vec::new(),
            used_ingredient_count: 0,
            missed_ingredient_count: 0,
            likes: h.aggregate_likes.unwrap_or(0),
            title: h.title,
            is_fallback: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct InstructionBlock {
    #[serde(default)]
    steps: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    #[serde(default)]
    step: String,
}

#[derive(Debug, Deserialize)]
struct ExtendedIngredient {
    id: Option<i64>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    unit: String,
    #[serde(default, alias = "originalString")]
    original: String,
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Information {
    id: i64,
    #[serde(default)]
    title: String,
    image: Option<String>,
    servings: Option<i32>,
    ready_in_minutes: Option<i32>,
    summary: Option<String>,
    instructions: Option<String>,
    #[serde(default)]
    analyzed_instructions: Vec<InstructionBlock>,
    #[serde(default)]
    extended_ingredients: Vec<ExtendedIngredient>,
    source_url: Option<String>,
    #[serde(default)]
    vegetarian: bool,
    #[serde(default)]
    vegan: bool,
    #[serde(default)]
    gluten_free: bool,
    #[serde(default)]
    dairy_free: bool,
    #[serde(default)]
    dish_types: Vec<String>,
    #[serde(default)]
    diets: Vec<String>,
}

fn instructions_text(info: &Information) -> String {
    match info.analyzed_instructions.first() {
        Some(block) => block
            .steps
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {}", i + 1, s.step))
            .collect::<Vec<_>>()
            .join("\n"),
        None => info
            .instructions
            .as_deref()
            .map(strip_html)
            .unwrap_or_default(),
    }
}

impl From<Information> for CatalogRecipeDetail {
    fn from(info: Information) -> Self {
        let instructions = instructions_text(&info);
        Self {
            id: info.id,
            title: info.title,
            image: info.image,
            servings: info.servings.unwrap_or(2),
            ready_in_minutes: info.ready_in_minutes.unwrap_or(30),
            summary: info.summary.as_deref().map(strip_html).unwrap_or_default(),
            instructions,
            ingredients: info
                .extended_ingredients
                .into_iter()
                .map(|i| CatalogIngredient {
                    id: i.id,
                    name: i.name,
                    amount: i.amount,
                    unit: i.unit,
                    original: i.original,
                    image: i
                        .image
                        .map(|img| format!("https://spoonacular.com/cdn/ingredients_100x100/{img}")),
                })
                .collect(),
            source_url: info.source_url,
            vegetarian: info.vegetarian,
            vegan: info.vegan,
            gluten_free: info.gluten_free,
            dairy_free: info.dairy_free,
            dish_types: info.dish_types,
            diets: info.diets,
        }
    }
}

/// Orders ingredient-search hits: most used ingredients first, then fewest
/// missing.
pub(crate) fn rank_by_match(recipes: &mut [CatalogRecipe]) {
    recipes.sort_by(|a, b| {
        b.used_ingredient_count
            .cmp(&a.used_ingredient_count)
            .then(a.missed_ingredient_count.cmp(&b.missed_ingredient_count))
    });
}

// --- client ---

#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl SpoonacularClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured(PROVIDER))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let key = self.key()?;
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .query(&[("apiKey", key)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                message: body,
            });
        }
        serde_json::from_str(&body).map_err(|e| ProviderError::Payload(e.to_string()))
    }
}

#[async_trait]
impl RecipeCatalog for SpoonacularClient {
    #[instrument(skip(self))]
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<CatalogRecipe>, ProviderError> {
        let joined = ingredients.join(",");
        let hits: Vec<IngredientHit> = self
            .get(
                "/recipes/findByIngredients",
                &[
                    ("ingredients", joined.as_str()),
                    ("number", RESULT_LIMIT),
                    ("ranking", "1"),
                    ("ignorePantry", "true"),
                ],
            )
            .await?;
        debug!(hits = hits.len(), "findByIngredients");
        let mut recipes: Vec<CatalogRecipe> = hits.into_iter().map(Into::into).collect();
        rank_by_match(&mut recipes);
        Ok(recipes)
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<CatalogRecipe>, ProviderError> {
        let page: ComplexSearchPage = self
            .get(
                "/recipes/complexSearch",
                &[
                    ("query", query),
                    ("number", RESULT_LIMIT),
                    ("addRecipeInformation", "true"),
                ],
            )
            .await?;
        debug!(hits = page.results.len(), "complexSearch");
        Ok(page.results.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn detail(&self, id: i64) -> Result<CatalogRecipeDetail, ProviderError> {
        let info: Information = self
            .get(&format!("/recipes/{id}/information"), &[])
            .await?;
        Ok(info.into())
    }
}
