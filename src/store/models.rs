//! Domain data structures persisted in the application document.

use chrono::{DateTime, NaiveDate, Utc};
use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Generate an opaque record identifier: a prefix, the creation instant in
/// unix milliseconds, and a short random suffix.
///
pub(crate) fn generate_id(prefix: &str) -> String {
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}

/// Defines the enumerated set of habit icons.
///
/// Icons are a fixed identifier set mapped to glyphs through a lookup table
/// rather than resolved dynamically by name.
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Dumbbell,
    Book,
    Code,
    Brain,
    Heart,
    Droplet,
    Moon,
    Pen,
    Music,
    Target,
}

impl Icon {
    /// All selectable icons, in display order.
    ///
    pub const ALL: [Icon; 10] = [
        Icon::Dumbbell,
        Icon::Book,
        Icon::Code,
        Icon::Brain,
        Icon::Heart,
        Icon::Droplet,
        Icon::Moon,
        Icon::Pen,
        Icon::Music,
        Icon::Target,
    ];

    /// Return the terminal glyph for this icon.
    ///
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Dumbbell => "◆",
            Icon::Book => "▤",
            Icon::Code => "⌨",
            Icon::Brain => "◉",
            Icon::Heart => "♥",
            Icon::Droplet => "●",
            Icon::Moon => "☾",
            Icon::Pen => "✎",
            Icon::Music => "♪",
            Icon::Target => "◎",
        }
    }

    /// Return the human-readable label for this icon.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Icon::Dumbbell => "dumbbell",
            Icon::Book => "book",
            Icon::Code => "code",
            Icon::Brain => "brain",
            Icon::Heart => "heart",
            Icon::Droplet => "droplet",
            Icon::Moon => "moon",
            Icon::Pen => "pen",
            Icon::Music => "music",
            Icon::Target => "target",
        }
    }
}

/// Defines habit data structure.
///
/// XP within the current level always satisfies `xp < xp_to_next_level`;
/// overflow at mutation time is converted into level-ups. `longest_streak`
/// never falls below `streak`.
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub icon: Icon,
    pub color: String,
    pub target: f64,
    pub unit: String,
    pub level: u32,
    pub xp: f64,
    pub xp_to_next_level: f64,
    pub streak: u32,
    pub longest_streak: u32,
    pub created_at: DateTime<Utc>,
    pub last_completed_at: Option<NaiveDate>,
}

/// Defines a single recorded progress entry against a habit.
///
/// `xp_gained` is fixed at creation time; later multiplier changes never
/// rewrite history.
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLog {
    pub id: String,
    pub habit_id: String,
    pub value: f64,
    pub date: NaiveDate,
    pub timestamp: i64,
    pub xp_gained: f64,
}

/// Defines a record of time resisted from scrolling, attributed to the habit
/// done instead.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntiScrollLog {
    pub id: String,
    pub date: NaiveDate,
    pub time_resisted: u32,
    pub habit_chosen: String,
    pub timestamp: i64,
}

/// Defines a longer-term goal with a date range and sub-goals.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reward: Option<String>,
    pub sub_goals: Vec<SubGoal>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Defines a sub-goal embedded in its parent goal.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubGoal {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Defines an archived goal: the goal snapshot plus its completion instant.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedGoal {
    #[serde(flatten)]
    pub goal: Goal,
    pub completed_at: DateTime<Utc>,
}

/// Defines a calendar task on the planner.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerTask {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub color: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Defines a completed planner task: the task snapshot plus its completion
/// instant.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPlannerTask {
    #[serde(flatten)]
    pub task: PlannerTask,
    pub completed_at: DateTime<Utc>,
}

/// Defines the selectable color themes.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    Cyberpunk,
    Matrix,
    Neon,
}

impl ThemeChoice {
    /// Cycle to the next theme choice.
    ///
    pub fn next(&self) -> ThemeChoice {
        match self {
            ThemeChoice::Cyberpunk => ThemeChoice::Matrix,
            ThemeChoice::Matrix => ThemeChoice::Neon,
            ThemeChoice::Neon => ThemeChoice::Cyberpunk,
        }
    }

    /// Return the display name for this theme choice.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            ThemeChoice::Cyberpunk => "cyberpunk",
            ThemeChoice::Matrix => "matrix",
            ThemeChoice::Neon => "neon",
        }
    }
}

/// Defines user-adjustable settings.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: ThemeChoice,
    pub xp_multiplier: f64,
    pub sound_enabled: bool,
    pub daily_goal_time: String,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            theme: ThemeChoice::Cyberpunk,
            xp_multiplier: 1.0,
            sound_enabled: true,
            daily_goal_time: "00:00".to_string(),
        }
    }
}

/// Partial update applied to a habit. Unset fields are left unchanged.
///
#[derive(Clone, Debug, Default)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub icon: Option<Icon>,
    pub color: Option<String>,
    pub target: Option<f64>,
    pub unit: Option<String>,
    pub level: Option<u32>,
}

/// Partial update applied to a goal. Identity, creation time, and completion
/// state are not updatable through this path.
///
#[derive(Clone, Debug, Default)]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reward: Option<Option<String>>,
}

/// Partial update applied to a sub-goal. Setting `completed` here does not
/// touch `completed_at`; only toggling manages the completion instant.
///
#[derive(Clone, Debug, Default)]
pub struct SubGoalUpdate {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Partial update applied to a planner task.
///
#[derive(Clone, Debug, Default)]
pub struct PlannerTaskUpdate {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<Option<String>>,
    pub color: Option<String>,
}

/// Partial update applied to settings.
///
#[derive(Clone, Debug, Default)]
pub struct SettingsUpdate {
    pub theme: Option<ThemeChoice>,
    pub xp_multiplier: Option<f64>,
    pub sound_enabled: Option<bool>,
    pub daily_goal_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_id_shape() {
        let id = generate_id("habit");
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "habit");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn generate_id_unique() {
        let first = generate_id("log");
        let second = generate_id("log");
        assert_ne!(first, second);
    }

    #[test]
    fn icon_lookup_covers_all() {
        for icon in Icon::ALL {
            assert!(!icon.glyph().is_empty());
            assert!(!icon.label().is_empty());
        }
    }

    #[test]
    fn theme_choice_cycles() {
        let start = ThemeChoice::Cyberpunk;
        assert_eq!(start.next(), ThemeChoice::Matrix);
        assert_eq!(start.next().next(), ThemeChoice::Neon);
        assert_eq!(start.next().next().next(), ThemeChoice::Cyberpunk);
    }

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme, ThemeChoice::Cyberpunk);
        assert_eq!(settings.xp_multiplier, 1.0);
        assert!(settings.sound_enabled);
        assert_eq!(settings.daily_goal_time, "00:00");
    }

    #[test]
    fn habit_serializes_camel_case() {
        let habit = Habit {
            id: "habit_1_abcdefghi".to_string(),
            name: "Read".to_string(),
            icon: Icon::Book,
            color: "#00ff41".to_string(),
            target: 30.0,
            unit: "pages".to_string(),
            level: 1,
            xp: 0.0,
            xp_to_next_level: 100.0,
            streak: 0,
            longest_streak: 0,
            created_at: Utc::now(),
            last_completed_at: None,
        };
        let json = serde_json::to_value(&habit).unwrap();
        assert!(json.get("xpToNextLevel").is_some());
        assert!(json.get("lastCompletedAt").is_some());
        assert_eq!(json["icon"], "book");
    }
}
