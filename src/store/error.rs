//! Store-specific error types.

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Habit not found in store
    #[error("Habit not found: {id}")]
    #[allow(dead_code)]
    HabitNotFound { id: String },

    /// Goal not found in store
    #[error("Goal not found: {id}")]
    #[allow(dead_code)]
    GoalNotFound { id: String },

    /// Planner task not found in store
    #[error("Planner task not found: {id}")]
    #[allow(dead_code)]
    PlannerTaskNotFound { id: String },

    /// Generic store error
    #[error("Store error: {0}")]
    #[allow(dead_code)]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let error = StoreError::HabitNotFound {
            id: "habit_123".to_string(),
        };
        assert!(error.to_string().contains("Habit not found"));
        assert!(error.to_string().contains("habit_123"));

        let error = StoreError::GoalNotFound {
            id: "goal_456".to_string(),
        };
        assert!(error.to_string().contains("Goal not found"));
        assert!(error.to_string().contains("goal_456"));

        let error = StoreError::PlannerTaskNotFound {
            id: "task_789".to_string(),
        };
        assert!(error.to_string().contains("Planner task not found"));

        let error = StoreError::Other("Generic error".to_string());
        assert!(error.to_string().contains("Store error"));
        assert!(error.to_string().contains("Generic error"));
    }
}
