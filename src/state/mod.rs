//! Application state management module.
//!
//! This module contains the interface-facing state for the application,
//! including:
//! - Main `State` struct that wraps the domain store with per-view selections
//! - Navigation types (View, Focus, DeleteTarget)
//! - Form editing types for the create/edit modals
//!
//! All domain mutations flow through `State` into the store, followed by an
//! autosave request.

mod form;
mod navigation;

pub use form::{
    AntiScrollForm, GoalForm, GoalFormField, HabitForm, HabitFormField, LogProgressForm,
    SubGoalForm, TaskForm, TaskFormField, COLOR_CHOICES,
};
pub use navigation::{DeleteTarget, Focus, View};

// Re-export implementation from state_impl.rs
// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

// Re-export State
pub use state_impl::{DashboardPanel, SettingsRow, State};
