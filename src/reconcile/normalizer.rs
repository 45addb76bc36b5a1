use std::str::FromStr;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use super::synonyms::SynonymTable;

/// Maps a free-text ingredient name onto the key used to join required and
/// on-hand quantities. Implementations must be total: any input, including
/// the empty string, yields a key.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}

/// Which normalizer the application injects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerTier {
    /// Full vocabulary plus substring containment matching.
    Full,
    /// Small vocabulary, exact matches only.
    Basic,
}

impl FromStr for NormalizerTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "basic" => Ok(Self::Basic),
            other => anyhow::bail!("unknown normalizer tier: {other}"),
        }
    }
}

pub(crate) fn is_latin_only(s: &str) -> bool {
    lazy_static! {
        static ref LATIN_RE: Regex = Regex::new(r"^[a-zA-Z\s\-']+$").unwrap();
    }
    LATIN_RE.is_match(s)
}

/// Dictionary-driven normalizer.
///
/// 1. trim and lowercase (a no-op for kana and kanji)
/// 2. exact lookup in the synonym table
/// 3. (full tier) containment: the first table entry, in table order, where
///    the input contains the surface form or the surface form contains the
///    input. No longest-match rule is applied.
/// 4. otherwise the trimmed, lowercased input itself
#[derive(Debug, Clone)]
pub struct DictionaryNormalizer {
    table: Arc<SynonymTable>,
    containment: bool,
}

impl DictionaryNormalizer {
    pub fn full(table: Arc<SynonymTable>) -> Self {
        Self {
            table,
            containment: true,
        }
    }

    pub fn basic(table: Arc<SynonymTable>) -> Self {
        Self {
            table,
            containment: false,
        }
    }

    /// Builds the tier with its stock vocabulary.
    pub fn for_tier(tier: NormalizerTier) -> Self {
        match tier {
            NormalizerTier::Full => Self::full(Arc::new(SynonymTable::ingredients())),
            NormalizerTier::Basic => Self::basic(Arc::new(SynonymTable::basic_ingredients())),
        }
    }

    fn containment_match(&self, key: &str) -> Option<&str> {
        self.table
            .iter()
            .find(|(surface, _)| key.contains(surface) || surface.contains(key))
            .map(|(_, canonical)| canonical)
    }
}

impl Normalizer for DictionaryNormalizer {
    fn normalize(&self, raw: &str) -> String {
        let key = raw.trim().to_lowercase();
        self.resolve(&key).unwrap_or(key)
    }
}

impl DictionaryNormalizer {
    /// The table's answer for `raw`, or `None` when neither an exact nor
    /// (full tier) a containment match exists.
    pub fn resolve(&self, raw: &str) -> Option<String> {
        let key = raw.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        if let Some(canonical) = self.table.lookup(&key) {
            return Some(canonical.to_string());
        }
        if self.containment {
            return self.containment_match(&key).map(str::to_string);
        }
        None
    }
}
