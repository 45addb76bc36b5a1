use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::serde_helpers::{lenient_quantity, lenient_text};

fn default_unit() -> String {
    "適量".into()
}

/// Missing, null, blank or non-string units all read as `適量`.
fn lenient_unit<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let unit = lenient_text(d)?;
    Ok(if unit.trim().is_empty() {
        default_unit()
    } else {
        unit
    })
}

/// One line of a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredIngredient {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, alias = "amount", deserialize_with = "lenient_quantity")]
    pub quantity: f64,
    #[serde(default = "default_unit", deserialize_with = "lenient_unit")]
    pub unit: String,
}

impl RequiredIngredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RequiredIngredient>,
    #[serde(default)]
    pub instructions: String,
    pub cooking_time: i32,
    pub servings: i32,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub is_favorite: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub ingredients_needed: Option<Json<Value>>,
    pub instructions: Option<String>,
    pub cooking_time: Option<i32>,
    pub servings: Option<i32>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub is_favorite: bool,
    pub created_at: OffsetDateTime,
}

/// Decodes a stored ingredient list line by line. A non-array value or an
/// unreadable line is logged and dropped; the rest of the recipe survives.
fn stored_ingredients(recipe_id: Uuid, stored: Option<Json<Value>>) -> Vec<RequiredIngredient> {
    let lines = match stored.map(|j| j.0) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(lines)) => lines,
        Some(other) => {
            warn!(%recipe_id, value = %other, "ingredients_needed is not an array; ignoring");
            return Vec::new();
        }
    };
    lines
        .into_iter()
        .filter_map(|line| match serde_json::from_value(line) {
            Ok(ingredient) => Some(ingredient),
            Err(e) => {
                warn!(%recipe_id, error = %e, "skipping unreadable ingredient line");
                None
            }
        })
        .collect()
}

impl From<RecipeRow> for RecipeRecord {
    fn from(r: RecipeRow) -> Self {
        Self {
            ingredients: stored_ingredients(r.id, r.ingredients_needed),
            id: r.id,
            title: r.title,
            description: r.description,
            instructions: r.instructions.unwrap_or_default(),
            cooking_time: r.cooking_time.unwrap_or(0),
            servings: r.servings.unwrap_or(0),
            image_url: r.image_url,
            source_url: r.source_url,
            is_favorite: r.is_favorite,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_lines_accept_catalog_and_local_shapes() {
        let lines: Vec<RequiredIngredient> = serde_json::from_str(
            r#"[
                {"name": "玉ねぎ", "quantity": 1, "unit": "個"},
                {"name": "onion", "amount": "0.5", "unit": "cup"},
                {"name": "塩"},
                {"quantity": 3}
            ]"#,
        )
        .unwrap();
        assert_eq!(lines[0], RequiredIngredient::new("玉ねぎ", 1.0, "個"));
        assert_eq!(lines[1].quantity, 0.5);
        assert_eq!(lines[2], RequiredIngredient::new("塩", 0.0, "適量"));
        assert_eq!(lines[3].name, "");
    }

    #[test]
    fn null_fields_do_not_sink_the_list() {
        let lines: Vec<RequiredIngredient> = serde_json::from_str(
            r#"[
                {"name": "塩", "quantity": 1, "unit": null},
                {"name": null, "quantity": 2, "unit": "本"},
                {"name": "玉ねぎ", "quantity": 1, "unit": ""}
            ]"#,
        )
        .unwrap();
        assert_eq!(lines[0], RequiredIngredient::new("塩", 1.0, "適量"));
        assert_eq!(lines[1], RequiredIngredient::new("", 2.0, "本"));
        assert_eq!(lines[2], RequiredIngredient::new("玉ねぎ", 1.0, "適量"));
    }

    fn row(ingredients_needed: Option<Value>) -> RecipeRow {
        RecipeRow {
            id: Uuid::new_v4(),
            title: "カレー".into(),
            description: None,
            ingredients_needed: ingredients_needed.map(Json),
            instructions: None,
            cooking_time: None,
            servings: None,
            image_url: None,
            source_url: None,
            is_favorite: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn stored_lists_keep_readable_lines() {
        let record = RecipeRecord::from(row(Some(serde_json::json!([
            "にんじん",
            {"name": "玉ねぎ", "quantity": 2, "unit": "個"},
            {"name": null, "unit": null}
        ]))));
        assert_eq!(
            record.ingredients,
            vec![
                RequiredIngredient::new("玉ねぎ", 2.0, "個"),
                RequiredIngredient::new("", 0.0, "適量"),
            ]
        );
    }

    #[test]
    fn non_array_ingredient_lists_read_as_empty() {
        assert!(RecipeRecord::from(row(Some(serde_json::json!({"name": "塩"}))))
            .ingredients
            .is_empty());
        assert!(RecipeRecord::from(row(Some(Value::Null))).ingredients.is_empty());
        assert!(RecipeRecord::from(row(None)).ingredients.is_empty());
    }
}
