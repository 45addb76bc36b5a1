use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use super::Translator;
use crate::reconcile::normalizer::{is_latin_only, DictionaryNormalizer};
use crate::reconcile::synonyms::SynonymTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationSource {
    /// Already English-looking; sent as is.
    Passthrough,
    Dictionary,
    Provider,
    /// Provider failed; dictionary fallback used.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    pub original: String,
    pub translated: String,
    pub was_translated: bool,
    pub source: TranslationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationResult {
    fn new(original: &str, translated: String, source: TranslationSource) -> Self {
        Self {
            was_translated: translated != original,
            original: original.to_string(),
            translated,
            source,
            error: None,
        }
    }
}

/// Turns Japanese search terms into English for the recipe catalog,
/// spending provider calls only on terms the dictionary cannot answer.
pub struct TermTranslator {
    dictionary: Arc<SynonymTable>,
    fallback: DictionaryNormalizer,
    delay: Duration,
}

impl TermTranslator {
    pub fn new(dictionary: Arc<SynonymTable>, delay: Duration) -> Self {
        Self {
            fallback: DictionaryNormalizer::full(dictionary.clone()),
            dictionary,
            delay,
        }
    }

    /// Best offline answer: exact entry, then first containment match,
    /// then the term itself.
    pub fn fallback(&self, term: &str) -> String {
        let term = term.trim();
        if is_latin_only(term) {
            return term.to_string();
        }
        match self.fallback.resolve(term) {
            Some(english) => english,
            None => {
                warn!(term, "no dictionary entry");
                term.to_string()
            }
        }
    }

    /// Translates each term in order. Never fails: a provider error on one
    /// term degrades that term to the dictionary fallback.
    pub async fn translate_terms(
        &self,
        provider: &dyn Translator,
        terms: &[String],
    ) -> Vec<TranslationResult> {
        let mut out = Vec::with_capacity(terms.len());
        let mut called_provider = false;
        for raw in terms {
            let term = raw.trim();
            if is_latin_only(term) {
                out.push(TranslationResult::new(
                    term,
                    term.to_string(),
                    TranslationSource::Passthrough,
                ));
                continue;
            }
            if let Some(english) = self.dictionary.lookup(term) {
                debug!(term, english, "dictionary translation");
                out.push(TranslationResult::new(
                    term,
                    english.to_string(),
                    TranslationSource::Dictionary,
                ));
                continue;
            }

            if called_provider && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            called_provider = true;
            match provider.translate(term, "ja", "en").await {
                Ok(english) => {
                    debug!(term, english = %english, "provider translation");
                    out.push(TranslationResult::new(
                        term,
                        english,
                        TranslationSource::Provider,
                    ));
                }
                Err(e) => {
                    warn!(term, error = %e, "translation failed; using dictionary fallback");
                    let mut result = TranslationResult::new(
                        term,
                        self.fallback(term),
                        TranslationSource::Fallback,
                    );
                    result.error = Some(e.to_string());
                    out.push(result);
                }
            }
        }
        out
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::FakeTranslator;
    use super::*;

    fn translator() -> TermTranslator {
        TermTranslator::new(
            Arc::new(SynonymTable::english_search_terms()),
            Duration::ZERO,
        )
    }

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn latin_terms_pass_through_untouched() {
        let provider = FakeTranslator::default();
        let out = translator()
            .translate_terms(&provider, &terms(&[" olive oil "]))
            .await;
        assert_eq!(out[0].translated, "olive oil");
        assert_eq!(out[0].source, TranslationSource::Passthrough);
        assert!(!out[0].was_translated);
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn dictionary_hits_skip_the_provider() {
        let provider = FakeTranslator::default();
        let out = translator()
            .translate_terms(&provider, &terms(&["鶏肉", "豆腐"]))
            .await;
        assert_eq!(out[0].translated, "chicken");
        assert_eq!(out[1].translated, "tofu");
        assert!(out.iter().all(|r| r.source == TranslationSource::Dictionary));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_terms_go_to_the_provider() {
        let provider = FakeTranslator::with(&[("パクチー", "cilantro")]);
        let out = translator()
            .translate_terms(&provider, &terms(&["パクチー"]))
            .await;
        assert_eq!(out[0].translated, "cilantro");
        assert_eq!(out[0].source, TranslationSource::Provider);
        assert_eq!(provider.calls(), vec!["パクチー"]);
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_containment_then_identity() {
        let provider = FakeTranslator::default();
        let out = translator()
            .translate_terms(&provider, &terms(&["鶏肉のから揚げ", "ドラゴンフルーツ"]))
            .await;
        assert_eq!(out[0].source, TranslationSource::Fallback);
        assert_eq!(out[0].translated, "chicken");
        assert!(out[0].error.is_some());
        assert_eq!(out[1].translated, "ドラゴンフルーツ");
        assert!(!out[1].was_translated);
        assert_eq!(provider.calls().len(), 2);
    }
}
