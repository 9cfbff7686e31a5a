//! Application store module.
//!
//! This module contains the domain core of the application, including:
//! - The `Store` struct that owns every collection of domain data
//! - Domain record types (habits, logs, goals, planner tasks, settings)
//! - The XP curve and aggregate-level arithmetic
//! - Store error handling
//!
//! The store is the single source of truth. UI components read through its
//! accessors and mutate exclusively through its action methods.

mod error;
mod leveling;
mod models;

pub use error::StoreError;
pub use leveling::{player_level_for, progress_xp, xp_for_level};
pub use models::{
    AntiScrollLog, CompletedGoal, CompletedPlannerTask, Goal, GoalUpdate, Habit, HabitLog,
    HabitUpdate, Icon, PlannerTask, PlannerTaskUpdate, Settings, SettingsUpdate, SubGoal,
    SubGoalUpdate, ThemeChoice,
};

// Re-export implementation from store_impl.rs
// Store struct, actions and Default impl are in store_impl.rs
#[path = "store_impl.rs"]
mod store_impl;

// Re-export Store
pub use store_impl::{LevelUpReport, Store};
