use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::dto::NewRecipe;
use super::repo_types::{RecipeRecord, RecipeRow};
use crate::error::StoreError;

const COLUMNS: &str = "id, title, description, ingredients_needed, instructions, \
                       cooking_time, servings, image_url, source_url, is_favorite, created_at";

/// Saved recipes, newest first; optionally only favorites.
pub async fn list(db: &PgPool, favorites_only: bool) -> Result<Vec<RecipeRecord>, StoreError> {
    let rows = sqlx::query_as::<_, RecipeRow>(&format!(
        r#"
        SELECT {COLUMNS}
          FROM recipes
         WHERE ($1 = false OR is_favorite = true)
         ORDER BY created_at DESC
        "#
    ))
    .bind(favorites_only)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<RecipeRecord>, StoreError> {
    let row = sqlx::query_as::<_, RecipeRow>(&format!(
        "SELECT {COLUMNS} FROM recipes WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(Into::into))
}

/// Recipes whose id is in `ids`; unknown ids are simply absent.
pub async fn get_many(db: &PgPool, ids: &[Uuid]) -> Result<Vec<RecipeRecord>, StoreError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, RecipeRow>(&format!(
        "SELECT {COLUMNS} FROM recipes WHERE id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn create(db: &PgPool, new: &NewRecipe) -> Result<RecipeRecord, StoreError> {
    let row = sqlx::query_as::<_, RecipeRow>(&format!(
        r#"
        INSERT INTO recipes (id, title, description, ingredients_needed, instructions,
                             cooking_time, servings, image_url, source_url, is_favorite)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.title.trim())
    .bind(new.description.as_deref())
    .bind(Json(&new.ingredients))
    .bind(&new.instructions)
    .bind(new.cooking_time)
    .bind(new.servings)
    .bind(new.image_url.as_deref())
    .bind(new.source_url.as_deref())
    .bind(new.is_favorite)
    .fetch_one(db)
    .await?;
    Ok(row.into())
}

pub async fn set_favorite(
    db: &PgPool,
    id: Uuid,
    is_favorite: bool,
) -> Result<RecipeRecord, StoreError> {
    let row = sqlx::query_as::<_, RecipeRow>(&format!(
        "UPDATE recipes SET is_favorite = $2 WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(is_favorite)
    .fetch_optional(db)
    .await?;
    row.map(Into::into).ok_or(StoreError::NotFound("recipe"))
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let done = sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    if done.rows_affected() == 0 {
        return Err(StoreError::NotFound("recipe"));
    }
    Ok(())
}
