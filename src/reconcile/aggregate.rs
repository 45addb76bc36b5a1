use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::normalizer::Normalizer;

/// One `(name, quantity, unit)` entry tagged with where it came from: a
/// recipe title on the required side, the pantry entry's own name on the
/// on-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub source: String,
}

impl IngredientLine {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateEntry {
    pub key: String,
    /// First original spelling seen for this key.
    pub display_name: String,
    pub total_quantity: f64,
    /// Unit of the first entry; later units are not reconciled.
    pub unit: String,
    /// Every contributing source in arrival order, duplicates kept.
    pub sources: Vec<String>,
}

/// Canonical key → summed entry, iterated in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    entries: Vec<AggregateEntry>,
    index: HashMap<String, usize>,
}

impl Aggregate {
    pub fn get(&self, key: &str) -> Option<&AggregateEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Summed quantity for `key`, or 0 when absent.
    pub fn total(&self, key: &str) -> f64 {
        self.get(key).map_or(0.0, |e| e.total_quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregateEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add(&mut self, key: String, line: IngredientLine) {
        let quantity = contribution(line.quantity);
        match self.index.get(&key) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.total_quantity += quantity;
                entry.sources.push(line.source);
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(AggregateEntry {
                    key,
                    display_name: line.name,
                    total_quantity: quantity,
                    unit: line.unit,
                    sources: vec![line.source],
                });
            }
        }
    }
}

/// Quantities that are negative, NaN or infinite count as 0.
fn contribution(quantity: f64) -> f64 {
    if quantity.is_finite() && quantity > 0.0 {
        quantity
    } else {
        0.0
    }
}

/// Groups lines by normalized name and sums their quantities. Lines whose
/// name normalizes to the empty key carry nothing to match on and are
/// dropped.
pub fn aggregate<I>(normalizer: &dyn Normalizer, lines: I) -> Aggregate
where
    I: IntoIterator<Item = IngredientLine>,
{
    let mut out = Aggregate::default();
    for line in lines {
        let key = normalizer.normalize(&line.name);
        if key.is_empty() {
            debug!(source = %line.source, "skipping ingredient line without a name");
            continue;
        }
        out.add(key, line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::normalizer::{DictionaryNormalizer, NormalizerTier};

    fn normalizer() -> DictionaryNormalizer {
        DictionaryNormalizer::for_tier(NormalizerTier::Full)
    }

    #[test]
    fn spellings_of_one_ingredient_are_summed() {
        let agg = aggregate(
            &normalizer(),
            vec![
                IngredientLine::new("たまねぎ", 1.0, "個", "カレー"),
                IngredientLine::new("玉ねぎ", 2.0, "個", "肉じゃが"),
            ],
        );
        assert_eq!(agg.len(), 1);
        let entry = agg.get("たまねぎ").unwrap();
        assert_eq!(entry.total_quantity, 3.0);
        assert_eq!(entry.display_name, "たまねぎ");
        assert_eq!(entry.sources, vec!["カレー", "肉じゃが"]);
    }

    #[test]
    fn first_seen_name_and_unit_are_kept() {
        let agg = aggregate(
            &normalizer(),
            vec![
                IngredientLine::new("人参", 1.0, "本", "a"),
                IngredientLine::new("carrot", 100.0, "g", "b"),
            ],
        );
        let entry = agg.get("にんじん").unwrap();
        assert_eq!(entry.display_name, "人参");
        assert_eq!(entry.unit, "本");
        // mixed units are summed as-is
        assert_eq!(entry.total_quantity, 101.0);
    }

    #[test]
    fn sources_are_not_deduplicated_here() {
        let agg = aggregate(
            &normalizer(),
            vec![
                IngredientLine::new("トマト", 1.0, "個", "サラダ"),
                IngredientLine::new("とまと", 1.0, "個", "サラダ"),
            ],
        );
        assert_eq!(agg.get("トマト").unwrap().sources, vec!["サラダ", "サラダ"]);
    }

    #[test]
    fn invalid_quantities_contribute_nothing() {
        let agg = aggregate(
            &normalizer(),
            vec![
                IngredientLine::new("卵", f64::NAN, "個", "a"),
                IngredientLine::new("たまご", -3.0, "個", "b"),
                IngredientLine::new("egg", 2.0, "個", "c"),
                IngredientLine::new("タマゴ", 0.0, "個", "d"),
            ],
        );
        let entry = agg.get("卵").unwrap();
        assert_eq!(entry.total_quantity, 2.0);
        assert_eq!(entry.sources.len(), 4);
    }

    #[test]
    fn empty_input_gives_empty_aggregate() {
        let agg = aggregate(&normalizer(), Vec::new());
        assert!(agg.is_empty());
        assert_eq!(agg.total("卵"), 0.0);
    }

    #[test]
    fn nameless_lines_are_dropped() {
        let agg = aggregate(
            &normalizer(),
            vec![
                IngredientLine::new("  ", 1.0, "個", "a"),
                IngredientLine::new("塩", 1.0, "g", "b"),
            ],
        );
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.total("塩"), 1.0);
    }

    #[test]
    fn iteration_follows_first_insertion() {
        let agg = aggregate(
            &normalizer(),
            vec![
                IngredientLine::new("塩", 1.0, "g", "a"),
                IngredientLine::new("砂糖", 1.0, "g", "a"),
                IngredientLine::new("しお", 1.0, "g", "b"),
            ],
        );
        let keys: Vec<&str> = agg.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["塩", "砂糖"]);
    }
}
