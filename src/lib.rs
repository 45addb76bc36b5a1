//! Meal-planning backend: pantry, recipes and a weekly meal calendar, with
//! a shopping list reconciled from what the plan needs and what is on hand.

pub mod app;
pub mod config;
pub mod error;
pub mod meal_plans;
pub mod pantry;
pub mod providers;
pub mod recipes;
pub mod reconcile;
mod serde_helpers;
pub mod shopping;
pub mod state;
pub mod store;
