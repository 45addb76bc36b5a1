//! Outbound collaborators: the recipe catalog and the translation service,
//! plus the endpoints that proxy them.

mod dto;
pub mod google;
pub mod handlers;
pub mod spoonacular;
pub mod translate;

use async_trait::async_trait;
use axum::{http::StatusCode, Router};
use thiserror::Error;
use tracing::error;

use crate::state::AppState;
pub use spoonacular::{CatalogRecipe, CatalogRecipeDetail, SpoonacularClient};
pub use translate::{TermTranslator, TranslationResult, TranslationSource};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} API key not configured")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{provider} API error: {status} - {message}")]
    Status {
        provider: &'static str,
        status: u16,
        message: String,
    },
    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// External recipe search. Results are in English; callers translate first.
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<CatalogRecipe>, ProviderError>;
    async fn search(&self, query: &str) -> Result<Vec<CatalogRecipe>, ProviderError>;
    async fn detail(&self, id: i64) -> Result<CatalogRecipeDetail, ProviderError>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError>;
}

pub fn router() -> Router<AppState> {
    handlers::routes()
}

pub(crate) fn provider_error(e: ProviderError) -> (StatusCode, String) {
    error!(error = %e, "provider call failed");
    match e {
        ProviderError::NotConfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
        _ => (StatusCode::BAD_GATEWAY, e.to_string()),
    }
}
