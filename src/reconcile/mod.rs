//! Shopping-list reconciliation: normalize ingredient names, sum what the
//! plan needs and what the pantry holds, and report the difference.

pub mod aggregate;
pub mod normalizer;
pub mod report;
pub mod requirements;
pub mod shortage;
pub mod synonyms;

use std::sync::Arc;

use tracing::debug;

use crate::meal_plans::repo_types::MealPlanEntry;
use crate::pantry::repo_types::IngredientRecord;
use crate::recipes::repo_types::RequiredIngredient;

use aggregate::{aggregate, Aggregate, IngredientLine};
use normalizer::Normalizer;
use requirements::{extract_required, recipe_lines, RecipeLookup, UnresolvedRecipe};
use shortage::{compute_shortfall, ShoppingListItem};

#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    pub items: Vec<ShoppingListItem>,
    pub unresolved: Vec<UnresolvedRecipe>,
}

impl ShoppingList {
    pub fn summary(&self) -> String {
        if self.items.is_empty() {
            "この期間の献立に必要な食材は全て揃っています！".to_string()
        } else {
            format!("{}個のアイテムを買い物リストに追加しました", self.items.len())
        }
    }
}

/// Single reconciliation path shared by the calendar and recipe views.
#[derive(Clone)]
pub struct ShoppingListEngine {
    normalizer: Arc<dyn Normalizer>,
}

impl ShoppingListEngine {
    pub fn new(normalizer: Arc<dyn Normalizer>) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &dyn Normalizer {
        self.normalizer.as_ref()
    }

    /// On-hand totals; each pantry entry is its own source.
    pub fn on_hand(&self, pantry: &[IngredientRecord]) -> Aggregate {
        let lines = pantry
            .iter()
            .map(|r| IngredientLine::new(&r.name, r.quantity, &r.unit, &r.name));
        aggregate(self.normalizer(), lines)
    }

    /// Shortfall for every recipe planned in `plans` against `pantry`.
    pub fn for_meal_plans<L>(
        &self,
        plans: &[MealPlanEntry],
        recipes: &L,
        pantry: &[IngredientRecord],
    ) -> ShoppingList
    where
        L: RecipeLookup + ?Sized,
    {
        let required = extract_required(plans, recipes);
        let items = self.reconcile(required.lines, pantry);
        debug!(
            plans = plans.len(),
            items = items.len(),
            unresolved = required.unresolved.len(),
            "reconciled meal plans"
        );
        ShoppingList {
            items,
            unresolved: required.unresolved,
        }
    }

    /// Shortfall for a single recipe, saved or not.
    pub fn for_recipe(
        &self,
        title: &str,
        ingredients: &[RequiredIngredient],
        pantry: &[IngredientRecord],
    ) -> ShoppingList {
        let items = self.reconcile(recipe_lines(title, ingredients), pantry);
        ShoppingList {
            items,
            unresolved: Vec::new(),
        }
    }

    fn reconcile(
        &self,
        required: Vec<IngredientLine>,
        pantry: &[IngredientRecord],
    ) -> Vec<ShoppingListItem> {
        let required = aggregate(self.normalizer(), required);
        compute_shortfall(&required, &self.on_hand(pantry))
    }
}
