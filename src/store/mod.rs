use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use crate::error::StoreError;
use crate::meal_plans::dto::{MealPlanPatch, NewMealPlan};
use crate::meal_plans::repo_types::{MealPlanEntry, MealSlot};
use crate::pantry::dto::{IngredientPatch, NewIngredient};
use crate::pantry::repo_types::IngredientRecord;
use crate::recipes::dto::NewRecipe;
use crate::recipes::repo_types::RecipeRecord;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// Record store behind every handler. Reads hand back owned snapshots; the
/// shopping-list engine only ever sees those.
#[async_trait]
pub trait PantryStore: Send + Sync {
    async fn list_ingredients(&self) -> Result<Vec<IngredientRecord>, StoreError>;
    async fn create_ingredient(&self, new: NewIngredient) -> Result<IngredientRecord, StoreError>;
    async fn update_ingredient(
        &self,
        id: Uuid,
        patch: IngredientPatch,
    ) -> Result<IngredientRecord, StoreError>;
    async fn delete_ingredient(&self, id: Uuid) -> Result<(), StoreError>;

    async fn list_recipes(&self, favorites_only: bool) -> Result<Vec<RecipeRecord>, StoreError>;
    async fn get_recipe(&self, id: Uuid) -> Result<Option<RecipeRecord>, StoreError>;
    async fn get_recipes(&self, ids: &[Uuid]) -> Result<Vec<RecipeRecord>, StoreError>;
    async fn create_recipe(&self, new: NewRecipe) -> Result<RecipeRecord, StoreError>;
    async fn set_favorite(&self, id: Uuid, is_favorite: bool) -> Result<RecipeRecord, StoreError>;
    async fn delete_recipe(&self, id: Uuid) -> Result<(), StoreError>;

    async fn meal_plans_in_range(
        &self,
        start: Date,
        end: Date,
    ) -> Result<Vec<MealPlanEntry>, StoreError>;
    async fn create_meal_plan(&self, new: NewMealPlan) -> Result<MealPlanEntry, StoreError>;
    async fn update_meal_plan(
        &self,
        id: Uuid,
        patch: MealPlanPatch,
    ) -> Result<MealPlanEntry, StoreError>;
    async fn delete_meal_plan(&self, id: Uuid) -> Result<(), StoreError>;
    async fn delete_meal_plans_at(&self, date: Date, slot: MealSlot) -> Result<u64, StoreError>;
}
