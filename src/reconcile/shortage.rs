use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregate::Aggregate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: Uuid,
    pub name: String,
    /// Shortage rounded up to the next whole unit.
    pub quantity: u64,
    pub unit: String,
    pub recipes: Vec<String>,
    /// Client-side tick mark; never written back to the store.
    #[serde(default)]
    pub checked: bool,
}

impl ShoppingListItem {
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}

/// Emits one item per required key whose required total exceeds the
/// on-hand total. Items follow the insertion order of `required`; keys
/// only present on hand are surplus and never reported.
pub fn compute_shortfall(required: &Aggregate, on_hand: &Aggregate) -> Vec<ShoppingListItem> {
    required
        .iter()
        .filter_map(|entry| {
            let shortage = entry.total_quantity - on_hand.total(&entry.key);
            if shortage <= 0.0 {
                return None;
            }
            Some(ShoppingListItem {
                id: Uuid::new_v4(),
                name: entry.display_name.clone(),
                quantity: shortage.ceil() as u64,
                unit: entry.unit.clone(),
                recipes: dedup_in_order(&entry.sources),
                checked: false,
            })
        })
        .collect()
}

fn dedup_in_order(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|v| seen.insert(v.as_str()))
        .cloned()
        .collect()
}
