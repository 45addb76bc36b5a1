use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use time::Date;
use uuid::Uuid;

use super::PantryStore;
use crate::error::StoreError;
use crate::meal_plans::{
    self,
    dto::{MealPlanPatch, NewMealPlan},
    repo_types::{MealPlanEntry, MealSlot},
};
use crate::pantry::{
    self,
    dto::{IngredientPatch, NewIngredient},
    repo_types::IngredientRecord,
};
use crate::recipes::{self, dto::NewRecipe, repo_types::RecipeRecord};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }
}

#[async_trait]
impl PantryStore for PgStore {
    async fn list_ingredients(&self) -> Result<Vec<IngredientRecord>, StoreError> {
        pantry::repo::list(&self.db).await
    }

    async fn create_ingredient(&self, new: NewIngredient) -> Result<IngredientRecord, StoreError> {
        pantry::repo::create(&self.db, &new).await
    }

    async fn update_ingredient(
        &self,
        id: Uuid,
        patch: IngredientPatch,
    ) -> Result<IngredientRecord, StoreError> {
        pantry::repo::update(&self.db, id, &patch).await
    }

    async fn delete_ingredient(&self, id: Uuid) -> Result<(), StoreError> {
        pantry::repo::delete(&self.db, id).await
    }

    async fn list_recipes(&self, favorites_only: bool) -> Result<Vec<RecipeRecord>, StoreError> {
        recipes::repo::list(&self.db, favorites_only).await
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<RecipeRecord>, StoreError> {
        recipes::repo::get(&self.db, id).await
    }

    async fn get_recipes(&self, ids: &[Uuid]) -> Result<Vec<RecipeRecord>, StoreError> {
        recipes::repo::get_many(&self.db, ids).await
    }

    async fn create_recipe(&self, new: NewRecipe) -> Result<RecipeRecord, StoreError> {
        recipes::repo::create(&self.db, &new).await
    }

    async fn set_favorite(&self, id: Uuid, is_favorite: bool) -> Result<RecipeRecord, StoreError> {
        recipes::repo::set_favorite(&self.db, id, is_favorite).await
    }

    async fn delete_recipe(&self, id: Uuid) -> Result<(), StoreError> {
        recipes::repo::delete(&self.db, id).await
    }

    async fn meal_plans_in_range(
        &self,
        start: Date,
        end: Date,
    ) -> Result<Vec<MealPlanEntry>, StoreError> {
        meal_plans::repo::list_in_range(&self.db, start, end).await
    }

    async fn create_meal_plan(&self, new: NewMealPlan) -> Result<MealPlanEntry, StoreError> {
        meal_plans::repo::create(&self.db, &new).await
    }

    async fn update_meal_plan(
        &self,
        id: Uuid,
        patch: MealPlanPatch,
    ) -> Result<MealPlanEntry, StoreError> {
        meal_plans::repo::update(&self.db, id, &patch).await
    }

    async fn delete_meal_plan(&self, id: Uuid) -> Result<(), StoreError> {
        meal_plans::repo::delete(&self.db, id).await
    }

    async fn delete_meal_plans_at(&self, date: Date, slot: MealSlot) -> Result<u64, StoreError> {
        meal_plans::repo::delete_at(&self.db, date, slot).await
    }
}
