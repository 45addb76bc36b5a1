use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::providers::google::GoogleTranslator;
use crate::providers::{RecipeCatalog, SpoonacularClient, TermTranslator, Translator};
use crate::reconcile::normalizer::DictionaryNormalizer;
use crate::reconcile::synonyms::SynonymTable;
use crate::reconcile::ShoppingListEngine;
use crate::store::{PantryStore, PgStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PantryStore>,
    pub config: Arc<AppConfig>,
    pub catalog: Arc<dyn RecipeCatalog>,
    pub translator: Arc<dyn Translator>,
    pub terms: Arc<TermTranslator>,
    pub engine: Arc<ShoppingListEngine>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = Arc::new(PgStore::connect(&config.database_url).await?) as Arc<dyn PantryStore>;

        let http = reqwest::Client::builder()
            .timeout(config.provider_timeout)
            .build()
            .context("build HTTP client")?;
        let catalog = Arc::new(SpoonacularClient::new(
            http.clone(),
            config.spoonacular.api_key.clone(),
            config.spoonacular.base_url.clone(),
        )) as Arc<dyn RecipeCatalog>;
        let translator = Arc::new(GoogleTranslator::new(
            http,
            config.google_translate.api_key.clone(),
            config.google_translate.base_url.clone(),
        )) as Arc<dyn Translator>;

        if config.spoonacular.api_key.is_none() {
            tracing::warn!("SPOONACULAR_API_KEY not set; recipe search will use placeholders");
        }
        if config.google_translate.api_key.is_none() {
            tracing::warn!("GOOGLE_TRANSLATE_API_KEY not set; translation uses the dictionary only");
        }
        tracing::info!(normalizer = ?config.normalizer, "shopping-list engine ready");

        Ok(Self::from_parts(store, config, catalog, translator))
    }

    /// Wires the engine and term translator around injected collaborators.
    pub fn from_parts(
        store: Arc<dyn PantryStore>,
        config: Arc<AppConfig>,
        catalog: Arc<dyn RecipeCatalog>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let engine = Arc::new(ShoppingListEngine::new(Arc::new(
            DictionaryNormalizer::for_tier(config.normalizer),
        )));
        let terms = Arc::new(TermTranslator::new(
            Arc::new(SynonymTable::english_search_terms()),
            config.translate_delay,
        ));
        Self {
            store,
            config,
            catalog,
            translator,
            terms,
            engine,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// In-memory store and unconfigured providers; nothing leaves the process.
    pub fn fake() -> Self {
        use crate::config::ProviderConfig;
        use crate::reconcile::normalizer::NormalizerTier;
        use crate::store::memory::MemoryStore;
        use std::time::Duration;

        let config = Arc::new(AppConfig {
            database_url: "postgres://unused".into(),
            host: "127.0.0.1".into(),
            port: 0,
            spoonacular: ProviderConfig {
                api_key: None,
                base_url: "http://127.0.0.1:9".into(),
            },
            google_translate: ProviderConfig {
                api_key: None,
                base_url: "http://127.0.0.1:9".into(),
            },
            provider_timeout: Duration::from_secs(1),
            translate_delay: Duration::ZERO,
            normalizer: NormalizerTier::Full,
        });
        let http = reqwest::Client::new();
        let catalog = Arc::new(SpoonacularClient::new(http.clone(), None, "http://127.0.0.1:9"))
            as Arc<dyn RecipeCatalog>;
        let translator = Arc::new(GoogleTranslator::new(http, None, "http://127.0.0.1:9"))
            as Arc<dyn Translator>;
        Self::from_parts(Arc::new(MemoryStore::default()), config, catalog, translator)
    }
}
