use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::dto::{MealPlanPatch, NewMealPlan};
use super::repo_types::{MealPlanEntry, MealPlanRow, MealSlot};
use crate::error::StoreError;

const COLUMNS: &str = "id, date, meal_type, recipe_id, recipe_title, notes, created_at";

fn convert(rows: Vec<MealPlanRow>) -> Result<Vec<MealPlanEntry>, StoreError> {
    let mut out: Vec<MealPlanEntry> = rows
        .into_iter()
        .map(MealPlanEntry::try_from)
        .collect::<Result<_, _>>()?;
    out.sort_by_key(|e| (e.date, e.slot));
    Ok(out)
}

/// Entries with `start <= date <= end`, ordered by date then slot.
pub async fn list_in_range(
    db: &PgPool,
    start: Date,
    end: Date,
) -> Result<Vec<MealPlanEntry>, StoreError> {
    let rows = sqlx::query_as::<_, MealPlanRow>(&format!(
        r#"
        SELECT {COLUMNS}
          FROM meal_plans
         WHERE date >= $1 AND date <= $2
         ORDER BY date ASC, created_at ASC
        "#
    ))
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    convert(rows)
}

pub async fn create(db: &PgPool, new: &NewMealPlan) -> Result<MealPlanEntry, StoreError> {
    let row = sqlx::query_as::<_, MealPlanRow>(&format!(
        r#"
        INSERT INTO meal_plans (id, date, meal_type, recipe_id, recipe_title, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.date)
    .bind(new.slot.as_str())
    .bind(new.recipe_id)
    .bind(new.recipe_title.as_deref())
    .bind(new.notes.as_deref())
    .fetch_one(db)
    .await?;
    row.try_into()
}

pub async fn update(
    db: &PgPool,
    id: Uuid,
    patch: &MealPlanPatch,
) -> Result<MealPlanEntry, StoreError> {
    let row = sqlx::query_as::<_, MealPlanRow>(&format!(
        r#"
        UPDATE meal_plans
           SET recipe_id    = COALESCE($2, recipe_id),
               recipe_title = COALESCE($3, recipe_title),
               notes        = COALESCE($4, notes)
         WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(patch.recipe_id)
    .bind(patch.recipe_title.as_deref())
    .bind(patch.notes.as_deref())
    .fetch_optional(db)
    .await?;
    row.ok_or(StoreError::NotFound("meal plan"))?.try_into()
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let done = sqlx::query("DELETE FROM meal_plans WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    if done.rows_affected() == 0 {
        return Err(StoreError::NotFound("meal plan"));
    }
    Ok(())
}

/// Removes whatever is planned at one (date, slot); returns how many rows went.
pub async fn delete_at(db: &PgPool, date: Date, slot: MealSlot) -> Result<u64, StoreError> {
    let done = sqlx::query("DELETE FROM meal_plans WHERE date = $1 AND meal_type = $2")
        .bind(date)
        .bind(slot.as_str())
        .execute(db)
        .await?;
    Ok(done.rows_affected())
}
