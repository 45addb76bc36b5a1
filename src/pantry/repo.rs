use sqlx::PgPool;
use uuid::Uuid;

use super::dto::{IngredientPatch, NewIngredient};
use super::repo_types::{IngredientRecord, IngredientRow};
use crate::error::StoreError;

const COLUMNS: &str = "id, name, quantity, unit, category, expiry_date, created_at, updated_at";

/// All pantry entries, newest first.
pub async fn list(db: &PgPool) -> Result<Vec<IngredientRecord>, StoreError> {
    let rows = sqlx::query_as::<_, IngredientRow>(&format!(
        "SELECT {COLUMNS} FROM ingredients ORDER BY created_at DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn create(db: &PgPool, new: &NewIngredient) -> Result<IngredientRecord, StoreError> {
    let row = sqlx::query_as::<_, IngredientRow>(&format!(
        r#"
        INSERT INTO ingredients (id, name, quantity, unit, category, expiry_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.name.trim())
    .bind(new.quantity)
    .bind(&new.unit)
    .bind(new.category.label())
    .bind(new.expiry_date)
    .fetch_one(db)
    .await?;
    Ok(row.into())
}

pub async fn update(
    db: &PgPool,
    id: Uuid,
    patch: &IngredientPatch,
) -> Result<IngredientRecord, StoreError> {
    let row = sqlx::query_as::<_, IngredientRow>(&format!(
        r#"
        UPDATE ingredients
           SET name        = COALESCE($2, name),
               quantity    = COALESCE($3, quantity),
               unit        = COALESCE($4, unit),
               category    = COALESCE($5, category),
               expiry_date = COALESCE($6, expiry_date),
               updated_at  = now()
         WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(patch.name.as_deref().map(str::trim))
    .bind(patch.quantity)
    .bind(patch.unit.as_deref())
    .bind(patch.category.map(|c| c.label()))
    .bind(patch.expiry_date)
    .fetch_optional(db)
    .await?;
    row.map(Into::into).ok_or(StoreError::NotFound("ingredient"))
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let done = sqlx::query("DELETE FROM ingredients WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    if done.rows_affected() == 0 {
        return Err(StoreError::NotFound("ingredient"));
    }
    Ok(())
}
