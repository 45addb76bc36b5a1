use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::error::StoreError;
use crate::serde_helpers::iso_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            other => Err(format!("unknown meal slot: {other}")),
        }
    }
}

/// A recipe (or a freeform title) planned for one date and meal slot.
///
/// At most one entry per (date, slot) is expected, but the store does not
/// enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub id: Uuid,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(rename = "meal_type")]
    pub slot: MealSlot,
    pub recipe_id: Option<Uuid>,
    pub recipe_title: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub struct MealPlanRow {
    pub id: Uuid,
    pub date: Date,
    pub meal_type: String,
    pub recipe_id: Option<Uuid>,
    pub recipe_title: Option<String>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

impl TryFrom<MealPlanRow> for MealPlanEntry {
    type Error = StoreError;

    fn try_from(r: MealPlanRow) -> Result<Self, Self::Error> {
        let slot = r
            .meal_type
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("meal plan {}: {e}", r.id)))?;
        Ok(Self {
            id: r.id,
            date: r.date,
            slot,
            recipe_id: r.recipe_id,
            recipe_title: r.recipe_title,
            notes: r.notes,
            created_at: r.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn row(meal_type: &str) -> MealPlanRow {
        MealPlanRow {
            id: Uuid::new_v4(),
            date: date!(2024 - 05 - 01),
            meal_type: meal_type.into(),
            recipe_id: None,
            recipe_title: Some("おにぎり".into()),
            notes: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn rows_with_known_slots_convert() {
        let entry = MealPlanEntry::try_from(row("dinner")).unwrap();
        assert_eq!(entry.slot, MealSlot::Dinner);
        assert_eq!(entry.recipe_title.as_deref(), Some("おにぎり"));
    }

    #[test]
    fn unknown_slot_is_a_corrupt_record() {
        let err = MealPlanEntry::try_from(row("brunch")).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
        assert!(err.to_string().contains("brunch"));
    }

    #[test]
    fn entries_serialize_with_wire_names() {
        let entry = MealPlanEntry::try_from(row("lunch")).unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["meal_type"], "lunch");
        assert_eq!(json["date"], "2024-05-01");
    }
}
