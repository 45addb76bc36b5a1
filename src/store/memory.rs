use std::sync::Mutex;

use async_trait::async_trait;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::PantryStore;
use crate::error::StoreError;
use crate::meal_plans::dto::{MealPlanPatch, NewMealPlan};
use crate::meal_plans::repo_types::{MealPlanEntry, MealSlot};
use crate::pantry::dto::{IngredientPatch, NewIngredient};
use crate::pantry::repo_types::IngredientRecord;
use crate::recipes::dto::NewRecipe;
use crate::recipes::repo_types::RecipeRecord;

/// In-process store for tests; same ordering rules as Postgres.
#[derive(Default)]
pub struct MemoryStore {
    ingredients: Mutex<Vec<IngredientRecord>>,
    recipes: Mutex<Vec<RecipeRecord>>,
    meal_plans: Mutex<Vec<MealPlanEntry>>,
}

#[async_trait]
impl PantryStore for MemoryStore {
    async fn list_ingredients(&self) -> Result<Vec<IngredientRecord>, StoreError> {
        let mut out = self.ingredients.lock().unwrap().clone();
        out.reverse();
        Ok(out)
    }

    async fn create_ingredient(&self, new: NewIngredient) -> Result<IngredientRecord, StoreError> {
        let now = OffsetDateTime::now_utc();
        let record = IngredientRecord {
            id: Uuid::new_v4(),
            name: new.name.trim().to_string(),
            quantity: new.quantity,
            unit: new.unit,
            category: new.category,
            expiry_date: new.expiry_date,
            created_at: now,
            updated_at: now,
        };
        self.ingredients.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_ingredient(
        &self,
        id: Uuid,
        patch: IngredientPatch,
    ) -> Result<IngredientRecord, StoreError> {
        let mut rows = self.ingredients.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound("ingredient"))?;
        if let Some(name) = patch.name {
            row.name = name.trim().to_string();
        }
        if let Some(q) = patch.quantity {
            row.quantity = q;
        }
        if let Some(unit) = patch.unit {
            row.unit = unit;
        }
        if let Some(category) = patch.category {
            row.category = category;
        }
        if patch.expiry_date.is_some() {
            row.expiry_date = patch.expiry_date;
        }
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }

    async fn delete_ingredient(&self, id: Uuid) -> Result<(), StoreError> {
        let mut rows = self.ingredients.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound("ingredient"));
        }
        Ok(())
    }

    async fn list_recipes(&self, favorites_only: bool) -> Result<Vec<RecipeRecord>, StoreError> {
        let rows = self.recipes.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .filter(|r| !favorites_only || r.is_favorite)
            .cloned()
            .collect())
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<RecipeRecord>, StoreError> {
        let rows = self.recipes.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn get_recipes(&self, ids: &[Uuid]) -> Result<Vec<RecipeRecord>, StoreError> {
        let rows = self.recipes.lock().unwrap();
        Ok(rows.iter().filter(|r| ids.contains(&r.id)).cloned().collect())
    }

    async fn create_recipe(&self, new: NewRecipe) -> Result<RecipeRecord, StoreError> {
        let record = RecipeRecord {
            id: Uuid::new_v4(),
            title: new.title.trim().to_string(),
            description: new.description,
            ingredients: new.ingredients,
            instructions: new.instructions,
            cooking_time: new.cooking_time,
            servings: new.servings,
            image_url: new.image_url,
            source_url: new.source_url,
            is_favorite: new.is_favorite,
            created_at: OffsetDateTime::now_utc(),
        };
        self.recipes.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn set_favorite(&self, id: Uuid, is_favorite: bool) -> Result<RecipeRecord, StoreError> {
        let mut rows = self.recipes.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound("recipe"))?;
        row.is_favorite = is_favorite;
        Ok(row.clone())
    }

    async fn delete_recipe(&self, id: Uuid) -> Result<(), StoreError> {
        let mut rows = self.recipes.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound("recipe"));
        }
        Ok(())
    }

    async fn meal_plans_in_range(
        &self,
        start: Date,
        end: Date,
    ) -> Result<Vec<MealPlanEntry>, StoreError> {
        let rows = self.meal_plans.lock().unwrap();
        let mut out: Vec<MealPlanEntry> = rows
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect();
        out.sort_by_key(|e| (e.date, e.slot));
        Ok(out)
    }

    async fn create_meal_plan(&self, new: NewMealPlan) -> Result<MealPlanEntry, StoreError> {
        let entry = MealPlanEntry {
            id: Uuid::new_v4(),
            date: new.date,
            slot: new.slot,
            recipe_id: new.recipe_id,
            recipe_title: new.recipe_title,
            notes: new.notes,
            created_at: OffsetDateTime::now_utc(),
        };
        self.meal_plans.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn update_meal_plan(
        &self,
        id: Uuid,
        patch: MealPlanPatch,
    ) -> Result<MealPlanEntry, StoreError> {
        let mut rows = self.meal_plans.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound("meal plan"))?;
        if patch.recipe_id.is_some() {
            row.recipe_id = patch.recipe_id;
        }
        if patch.recipe_title.is_some() {
            row.recipe_title = patch.recipe_title;
        }
        if patch.notes.is_some() {
            row.notes = patch.notes;
        }
        Ok(row.clone())
    }

    async fn delete_meal_plan(&self, id: Uuid) -> Result<(), StoreError> {
        let mut rows = self.meal_plans.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| e.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound("meal plan"));
        }
        Ok(())
    }

    async fn delete_meal_plans_at(&self, date: Date, slot: MealSlot) -> Result<u64, StoreError> {
        let mut rows = self.meal_plans.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| !(e.date == date && e.slot == slot));
        Ok((before - rows.len()) as u64)
    }
}
