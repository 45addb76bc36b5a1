use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use super::repo_types::MealSlot;
use crate::serde_helpers::iso_date;

#[derive(Debug, Clone, Deserialize)]
pub struct NewMealPlan {
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(rename = "meal_type")]
    pub slot: MealSlot,
    pub recipe_id: Option<Uuid>,
    pub recipe_title: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealPlanPatch {
    pub recipe_id: Option<Uuid>,
    pub recipe_title: Option<String>,
    pub notes: Option<String>,
}

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DateRange {
    #[serde(with = "iso_date")]
    pub start: Date,
    #[serde(with = "iso_date")]
    pub end: Date,
}

impl DateRange {
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}
