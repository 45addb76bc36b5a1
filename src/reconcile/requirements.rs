use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use super::aggregate::IngredientLine;
use crate::meal_plans::repo_types::MealPlanEntry;
use crate::recipes::repo_types::{RecipeRecord, RequiredIngredient};

/// Resolves a recipe id against an already-fetched snapshot.
pub trait RecipeLookup {
    fn find_recipe(&self, id: Uuid) -> Option<&RecipeRecord>;
}

impl RecipeLookup for HashMap<Uuid, RecipeRecord> {
    fn find_recipe(&self, id: Uuid) -> Option<&RecipeRecord> {
        self.get(&id)
    }
}

impl RecipeLookup for [RecipeRecord] {
    fn find_recipe(&self, id: Uuid) -> Option<&RecipeRecord> {
        self.iter().find(|r| r.id == id)
    }
}

/// A meal plan pointing at a recipe that no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedRecipe {
    pub meal_plan_id: Uuid,
    pub recipe_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct Requirements {
    pub lines: Vec<IngredientLine>,
    pub unresolved: Vec<UnresolvedRecipe>,
}

/// Flattens a recipe's ingredient list into lines tagged with `title`.
pub fn recipe_lines(title: &str, ingredients: &[RequiredIngredient]) -> Vec<IngredientLine> {
    ingredients
        .iter()
        .map(|i| IngredientLine::new(&i.name, i.quantity, &i.unit, title))
        .collect()
}

/// Expands every recipe-backed meal plan into ingredient lines, once per
/// plan entry: a recipe cooked twice in the range is counted twice.
/// Freeform entries contribute nothing. Unresolvable recipe ids are
/// reported and skipped; the rest of the batch still goes through.
pub fn extract_required<L>(entries: &[MealPlanEntry], recipes: &L) -> Requirements
where
    L: RecipeLookup + ?Sized,
{
    let mut out = Requirements::default();
    for entry in entries {
        let Some(recipe_id) = entry.recipe_id else {
            continue;
        };
        match recipes.find_recipe(recipe_id) {
            Some(recipe) => out
                .lines
                .extend(recipe_lines(&recipe.title, &recipe.ingredients)),
            None => {
                warn!(
                    meal_plan_id = %entry.id,
                    %recipe_id,
                    date = %entry.date,
                    "meal plan references a missing recipe; skipping"
                );
                out.unresolved.push(UnresolvedRecipe {
                    meal_plan_id: entry.id,
                    recipe_id,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal_plans::repo_types::MealSlot;
    use time::{macros::date, OffsetDateTime};

    fn recipe(title: &str, ingredients: Vec<RequiredIngredient>) -> RecipeRecord {
        RecipeRecord {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            ingredients,
            instructions: String::new(),
            cooking_time: 30,
            servings: 2,
            image_url: None,
            source_url: None,
            is_favorite: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn plan(recipe_id: Option<Uuid>, slot: MealSlot) -> MealPlanEntry {
        MealPlanEntry {
            id: Uuid::new_v4(),
            date: date!(2024 - 06 - 03),
            slot,
            recipe_id,
            recipe_title: None,
            notes: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn each_plan_occurrence_expands_the_recipe() {
        let curry = recipe("カレー", vec![RequiredIngredient::new("にんじん", 1.0, "本")]);
        let plans = vec![
            plan(Some(curry.id), MealSlot::Lunch),
            plan(Some(curry.id), MealSlot::Dinner),
        ];
        let req = extract_required(&plans, &[curry][..]);
        assert_eq!(req.lines.len(), 2);
        assert!(req.lines.iter().all(|l| l.source == "カレー"));
    }

    #[test]
    fn freeform_plans_contribute_nothing() {
        let req = extract_required(&[plan(None, MealSlot::Breakfast)], &[][..]);
        assert!(req.lines.is_empty());
        assert!(req.unresolved.is_empty());
    }

    #[test]
    fn recipes_without_ingredients_contribute_nothing() {
        let toast = recipe("トースト", Vec::new());
        let req = extract_required(&[plan(Some(toast.id), MealSlot::Breakfast)], &[toast][..]);
        assert!(req.lines.is_empty());
        assert!(req.unresolved.is_empty());
    }

    #[test]
    fn missing_recipes_are_reported_not_fatal() {
        let salad = recipe("サラダ", vec![RequiredIngredient::new("レタス", 1.0, "個")]);
        let curry = recipe("カレー", vec![RequiredIngredient::new("トマト", 2.0, "個")]);
        let gone = Uuid::new_v4();
        let plans = vec![
            plan(Some(gone), MealSlot::Lunch),
            plan(Some(salad.id), MealSlot::Dinner),
            plan(Some(curry.id), MealSlot::Breakfast),
        ];
        let lookup: HashMap<Uuid, RecipeRecord> =
            [(salad.id, salad), (curry.id, curry)].into_iter().collect();
        let req = extract_required(&plans, &lookup);
        let sources: Vec<_> = req.lines.iter().map(|l| l.source.as_str()).collect();
        assert_eq!(sources, vec!["サラダ", "カレー"]);
        assert_eq!(req.unresolved.len(), 1);
        assert_eq!(req.unresolved[0].recipe_id, gone);
        assert_eq!(req.unresolved[0].meal_plan_id, plans[0].id);
    }
}
