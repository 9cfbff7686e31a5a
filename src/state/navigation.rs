//! Navigation types: views, focus, and deletion targets.

/// Specify the different application views, in tab order.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Goals,
    Planner,
    AntiScroll,
    Analytics,
    Settings,
}

impl View {
    /// All views, in tab order.
    ///
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::Goals,
        View::Planner,
        View::AntiScroll,
        View::Analytics,
        View::Settings,
    ];

    /// Return the tab title for this view.
    ///
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "DASHBOARD",
            View::Goals => "GOALS",
            View::Planner => "PLANNER",
            View::AntiScroll => "ANTI-SCROLL",
            View::Analytics => "ANALYTICS",
            View::Settings => "SYSTEM CONFIG",
        }
    }

    /// Activate the next view tab.
    ///
    pub fn next(&self) -> View {
        let index = View::ALL
            .iter()
            .position(|v| v == self)
            .expect("view is always in the tab order");
        View::ALL[(index + 1) % View::ALL.len()]
    }

    /// Activate the previous view tab.
    ///
    pub fn previous(&self) -> View {
        let index = View::ALL
            .iter()
            .position(|v| v == self)
            .expect("view is always in the tab order");
        View::ALL[(index + View::ALL.len() - 1) % View::ALL.len()]
    }
}

/// Specify whether input is directed at the tab bar or the view content.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Menu,
    View,
}

/// Specify the record a pending delete confirmation refers to.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteTarget {
    Habit(String),
    Log(String),
    Goal(String),
    CompletedGoal(String),
    PlannerTask(String),
}
