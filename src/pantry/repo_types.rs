use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::serde_helpers::iso_date;

/// Pantry shelf a record is filed under. Serialized with its Japanese label;
/// unknown labels read as [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Vegetable,
    Meat,
    Seafood,
    Dairy,
    Seasoning,
    Grain,
    Other,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetable => "野菜",
            Self::Meat => "肉類",
            Self::Seafood => "魚介類",
            Self::Dairy => "乳製品",
            Self::Seasoning => "調味料",
            Self::Grain => "穀物",
            Self::Other => "その他",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "野菜" => Self::Vegetable,
            "肉類" => Self::Meat,
            "魚介類" => Self::Seafood,
            "乳製品" => Self::Dairy,
            "調味料" => Self::Seasoning,
            "穀物" => Self::Grain,
            _ => Self::Other,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::from_label(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.label().to_string()
    }
}

/// Pantry entry as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
    #[serde(default, with = "iso_date::option")]
    pub expiry_date: Option<Date>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub struct IngredientRow {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub expiry_date: Option<Date>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<IngredientRow> for IngredientRecord {
    fn from(r: IngredientRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            quantity: r.quantity,
            unit: r.unit,
            category: Category::from_label(&r.category),
            expiry_date: r.expiry_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
