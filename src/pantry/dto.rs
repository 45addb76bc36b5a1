use serde::Deserialize;
use time::Date;

use super::repo_types::Category;
use crate::serde_helpers::{iso_date, lenient_quantity, lenient_quantity_opt};

#[derive(Debug, Clone, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    pub category: Category,
    #[serde(default, with = "iso_date::option")]
    pub expiry_date: Option<Date>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_quantity_opt")]
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<Category>,
    #[serde(default, with = "iso_date::option")]
    pub expiry_date: Option<Date>,
}
