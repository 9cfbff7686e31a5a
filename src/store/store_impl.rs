use chrono::{Duration, Local, NaiveDate, Utc};
use log::*;
use serde::{Deserialize, Serialize};

use super::leveling;
use super::models::{
    generate_id, AntiScrollLog, CompletedGoal, CompletedPlannerTask, Goal, GoalUpdate, Habit,
    HabitLog, HabitUpdate, Icon, PlannerTask, PlannerTaskUpdate, Settings, SettingsUpdate, SubGoal,
    SubGoalUpdate,
};

/// Reported back to the caller after a progress entry so the UI can react to
/// level-ups. This is the only externally observable signal beyond the state
/// mutation itself.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUpReport {
    pub leveled_up: bool,
    pub new_level: u32,
}

/// Owns all domain data and mutates it through a fixed set of actions.
///
/// The store is a plain value: construct one per test, or one per
/// application, and pass it by reference. Serialization of the whole store is
/// the persisted document layout, so every collection field defaults to empty
/// when absent from an older document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Store {
    habits: Vec<Habit>,
    logs: Vec<HabitLog>,
    anti_scroll_logs: Vec<AntiScrollLog>,
    goals: Vec<Goal>,
    completed_goals: Vec<CompletedGoal>,
    planner_tasks: Vec<PlannerTask>,
    completed_planner_tasks: Vec<CompletedPlannerTask>,
    settings: Settings,
    #[serde(rename = "totalXP")]
    total_xp: f64,
    player_level: u32,
}

/// Defines the empty store with default settings.
///
impl Default for Store {
    fn default() -> Store {
        Store {
            habits: vec![],
            logs: vec![],
            anti_scroll_logs: vec![],
            goals: vec![],
            completed_goals: vec![],
            planner_tasks: vec![],
            completed_planner_tasks: vec![],
            settings: Settings::default(),
            total_xp: 0.0,
            player_level: 1,
        }
    }
}

impl Store {
    /// Return a new empty instance.
    ///
    pub fn new() -> Store {
        Store::default()
    }

    // Accessors

    /// Return all habits.
    ///
    pub fn get_habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Return the habit with the given id, if present.
    ///
    pub fn get_habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Return all progress logs.
    ///
    pub fn get_logs(&self) -> &[HabitLog] {
        &self.logs
    }

    /// Return all anti-scroll logs.
    ///
    pub fn get_anti_scroll_logs(&self) -> &[AntiScrollLog] {
        &self.anti_scroll_logs
    }

    /// Return all active goals.
    ///
    pub fn get_goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Return the active goal with the given id, if present.
    ///
    pub fn get_goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Return all archived goals.
    ///
    pub fn get_completed_goals(&self) -> &[CompletedGoal] {
        &self.completed_goals
    }

    /// Return all open planner tasks.
    ///
    pub fn get_planner_tasks(&self) -> &[PlannerTask] {
        &self.planner_tasks
    }

    /// Return all completed planner tasks.
    ///
    pub fn get_completed_planner_tasks(&self) -> &[CompletedPlannerTask] {
        &self.completed_planner_tasks
    }

    /// Return the current settings.
    ///
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Return lifetime XP across all recorded progress.
    ///
    pub fn get_total_xp(&self) -> f64 {
        self.total_xp
    }

    /// Return the aggregate player level.
    ///
    pub fn get_player_level(&self) -> u32 {
        self.player_level
    }

    // Habit lifecycle

    /// Add a new habit at level 1 with no recorded progress. Empty names and
    /// non-positive targets are rejected as a no-op.
    ///
    pub fn add_habit(&mut self, name: &str, icon: Icon, color: &str, target: f64, unit: &str) {
        if name.trim().is_empty() || target <= 0.0 {
            warn!("Ignoring habit with empty name or non-positive target");
            return;
        }
        let habit = Habit {
            id: generate_id("habit"),
            name: name.to_string(),
            icon,
            color: color.to_string(),
            target,
            unit: unit.to_string(),
            level: 1,
            xp: 0.0,
            xp_to_next_level: leveling::xp_for_level(1),
            streak: 0,
            longest_streak: 0,
            created_at: Utc::now(),
            last_completed_at: None,
        };
        info!("Adding habit '{}' ({})", habit.name, habit.id);
        self.habits.push(habit);
    }

    /// Merge the given fields into the matching habit. No-op if the id is not
    /// found. Level thresholds are never recomputed here, even when the level
    /// field itself is updated.
    ///
    pub fn update_habit(&mut self, id: &str, updates: HabitUpdate) {
        let habit = match self.habits.iter_mut().find(|h| h.id == id) {
            Some(habit) => habit,
            None => return,
        };
        if let Some(name) = updates.name {
            habit.name = name;
        }
        if let Some(icon) = updates.icon {
            habit.icon = icon;
        }
        if let Some(color) = updates.color {
            habit.color = color;
        }
        if let Some(target) = updates.target {
            habit.target = target;
        }
        if let Some(unit) = updates.unit {
            habit.unit = unit;
        }
        if let Some(level) = updates.level {
            habit.level = level;
        }
    }

    /// Remove the habit and cascade removal of its progress logs and any
    /// anti-scroll logs attributed to it, so no orphans remain.
    ///
    pub fn delete_habit(&mut self, id: &str) {
        info!("Deleting habit {} and its logs", id);
        self.habits.retain(|h| h.id != id);
        self.logs.retain(|l| l.habit_id != id);
        self.anti_scroll_logs.retain(|l| l.habit_chosen != id);
    }

    // Progress logging & leveling

    /// Record progress against a habit: award XP (scaled by the settings
    /// multiplier), convert any overflow into level-ups, append a log entry
    /// dated today, accrue lifetime XP, and recompute streaks.
    ///
    /// Returns whether at least one level-up occurred and the resulting
    /// level. Logging against an unknown habit records nothing.
    ///
    pub fn log_progress(&mut self, habit_id: &str, value: f64) -> LevelUpReport {
        let multiplier = self.settings.xp_multiplier;
        let today = Local::now().date_naive();

        let habit = match self.habits.iter_mut().find(|h| h.id == habit_id) {
            Some(habit) => habit,
            None => {
                warn!("Ignoring progress for unknown habit {}", habit_id);
                return LevelUpReport {
                    leveled_up: false,
                    new_level: 1,
                };
            }
        };

        let xp_gained = leveling::progress_xp(value, habit.target) * multiplier;

        // A single entry can clear several thresholds.
        let mut remaining = habit.xp + xp_gained;
        let mut level = habit.level;
        let mut threshold = habit.xp_to_next_level;
        let mut leveled_up = false;
        while remaining >= threshold {
            remaining -= threshold;
            level += 1;
            leveled_up = true;
            threshold = leveling::xp_for_level(level);
        }

        habit.xp = remaining;
        habit.level = level;
        habit.xp_to_next_level = threshold;
        habit.last_completed_at = Some(today);

        self.logs.push(HabitLog {
            id: generate_id("log"),
            habit_id: habit_id.to_string(),
            value,
            date: today,
            timestamp: Utc::now().timestamp_millis(),
            xp_gained,
        });
        self.total_xp += xp_gained;
        self.player_level = leveling::player_level_for(self.total_xp);

        self.update_streaks();

        debug!(
            "Logged {} for habit {} (+{} XP, level {})",
            value, habit_id, xp_gained, level
        );
        LevelUpReport {
            leveled_up,
            new_level: level,
        }
    }

    /// Remove a single progress log by id. The XP and streak effects of the
    /// entry are intentionally left in place.
    ///
    pub fn delete_log(&mut self, log_id: &str) {
        self.logs.retain(|l| l.id != log_id);
    }

    /// Record time resisted from scrolling, attributed to the habit chosen
    /// instead.
    ///
    pub fn log_anti_scroll(&mut self, time_resisted: u32, habit_id: &str) {
        self.anti_scroll_logs.push(AntiScrollLog {
            id: generate_id("antiscroll"),
            date: Local::now().date_naive(),
            time_resisted,
            habit_chosen: habit_id.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        });
    }

    // Streaks

    /// Recompute streaks for every habit against today's date. Runs after
    /// every progress entry and once at application start; the recomputation
    /// is full rather than incremental, so it is idempotent for an unchanged
    /// log set and date.
    ///
    pub fn update_streaks(&mut self) {
        self.update_streaks_on(Local::now().date_naive());
    }

    fn update_streaks_on(&mut self, today: NaiveDate) {
        let Store { habits, logs, .. } = self;
        for habit in habits.iter_mut() {
            let new_streak = match habit.last_completed_at {
                None => 0,
                Some(last_completed) => {
                    let days_diff = (today - last_completed).num_days();
                    if days_diff == 0 {
                        // Completed today: start a streak if none was running
                        // or yesterday had a qualifying entry.
                        let yesterday = today - Duration::days(1);
                        let has_yesterday_log = logs
                            .iter()
                            .any(|l| l.habit_id == habit.id && l.date == yesterday);
                        if has_yesterday_log || habit.streak == 0 {
                            habit.streak.max(1)
                        } else {
                            habit.streak
                        }
                    } else if days_diff == 1 {
                        // Still on pace; today's entry just hasn't landed yet.
                        habit.streak
                    } else {
                        0
                    }
                }
            };
            habit.streak = new_streak;
            habit.longest_streak = habit.longest_streak.max(new_streak);
        }
    }

    // Goals

    /// Add a new goal with no sub-goals.
    ///
    pub fn add_goal(
        &mut self,
        title: &str,
        description: Option<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reward: Option<String>,
    ) {
        let goal = Goal {
            id: generate_id("goal"),
            title: title.to_string(),
            description,
            start_date,
            end_date,
            reward,
            sub_goals: vec![],
            completed: false,
            created_at: Utc::now(),
        };
        info!("Adding goal '{}' ({})", goal.title, goal.id);
        self.goals.push(goal);
    }

    /// Merge the given fields into the matching active goal. No-op if the id
    /// is not found.
    ///
    pub fn update_goal(&mut self, id: &str, updates: GoalUpdate) {
        let goal = match self.goals.iter_mut().find(|g| g.id == id) {
            Some(goal) => goal,
            None => return,
        };
        if let Some(title) = updates.title {
            goal.title = title;
        }
        if let Some(description) = updates.description {
            goal.description = description;
        }
        if let Some(start_date) = updates.start_date {
            goal.start_date = start_date;
        }
        if let Some(end_date) = updates.end_date {
            goal.end_date = end_date;
        }
        if let Some(reward) = updates.reward {
            goal.reward = reward;
        }
    }

    /// Remove an active goal outright.
    ///
    pub fn delete_goal(&mut self, id: &str) {
        self.goals.retain(|g| g.id != id);
    }

    /// Move a goal from the active list into the archive, stamping the
    /// completion instant. One-way; there is no reopen. Sub-goal state is not
    /// checked here — callers that care enforce it before calling.
    ///
    pub fn complete_goal(&mut self, id: &str) {
        let position = match self.goals.iter().position(|g| g.id == id) {
            Some(position) => position,
            None => return,
        };
        let mut goal = self.goals.remove(position);
        goal.completed = true;
        info!("Completing goal '{}' ({})", goal.title, goal.id);
        self.completed_goals.push(CompletedGoal {
            goal,
            completed_at: Utc::now(),
        });
    }

    /// Permanently remove an archived goal.
    ///
    pub fn delete_completed_goal(&mut self, id: &str) {
        self.completed_goals.retain(|g| g.goal.id != id);
    }

    /// Append a sub-goal to the matching active goal.
    ///
    pub fn add_sub_goal(&mut self, goal_id: &str, title: &str) {
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) {
            goal.sub_goals.push(SubGoal {
                id: generate_id("subgoal"),
                title: title.to_string(),
                completed: false,
                completed_at: None,
            });
        }
    }

    /// Merge the given fields into a sub-goal of the matching active goal.
    ///
    pub fn update_sub_goal(&mut self, goal_id: &str, sub_goal_id: &str, updates: SubGoalUpdate) {
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) {
            if let Some(sub_goal) = goal.sub_goals.iter_mut().find(|s| s.id == sub_goal_id) {
                if let Some(title) = updates.title {
                    sub_goal.title = title;
                }
                if let Some(completed) = updates.completed {
                    sub_goal.completed = completed;
                }
            }
        }
    }

    /// Remove a sub-goal from the matching active goal.
    ///
    pub fn delete_sub_goal(&mut self, goal_id: &str, sub_goal_id: &str) {
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) {
            goal.sub_goals.retain(|s| s.id != sub_goal_id);
        }
    }

    /// Flip a sub-goal's completion, stamping or clearing its completion
    /// instant to match.
    ///
    pub fn toggle_sub_goal(&mut self, goal_id: &str, sub_goal_id: &str) {
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) {
            if let Some(sub_goal) = goal.sub_goals.iter_mut().find(|s| s.id == sub_goal_id) {
                sub_goal.completed = !sub_goal.completed;
                sub_goal.completed_at = if sub_goal.completed {
                    Some(Utc::now())
                } else {
                    None
                };
            }
        }
    }

    // Planner

    /// Add a planner task on the given calendar day.
    ///
    pub fn add_planner_task(
        &mut self,
        title: &str,
        date: NaiveDate,
        time: Option<String>,
        color: &str,
    ) {
        self.planner_tasks.push(PlannerTask {
            id: generate_id("task"),
            title: title.to_string(),
            date,
            time,
            color: color.to_string(),
            completed: false,
            created_at: Utc::now(),
        });
    }

    /// Merge the given fields into the matching open planner task.
    ///
    pub fn update_planner_task(&mut self, id: &str, updates: PlannerTaskUpdate) {
        let task = match self.planner_tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => task,
            None => return,
        };
        if let Some(title) = updates.title {
            task.title = title;
        }
        if let Some(date) = updates.date {
            task.date = date;
        }
        if let Some(time) = updates.time {
            task.time = time;
        }
        if let Some(color) = updates.color {
            task.color = color;
        }
    }

    /// Flip a planner task's completion: open tasks move into the completed
    /// list with a completion instant; completed tasks move back, clearing
    /// it. Unlike goals, this transition runs both ways.
    ///
    pub fn toggle_planner_task(&mut self, id: &str) {
        if let Some(position) = self.planner_tasks.iter().position(|t| t.id == id) {
            let mut task = self.planner_tasks.remove(position);
            task.completed = true;
            self.completed_planner_tasks.push(CompletedPlannerTask {
                task,
                completed_at: Utc::now(),
            });
        } else if let Some(position) = self
            .completed_planner_tasks
            .iter()
            .position(|t| t.task.id == id)
        {
            let mut task = self.completed_planner_tasks.remove(position).task;
            task.completed = false;
            self.planner_tasks.push(task);
        }
    }

    /// Remove a planner task from whichever list holds it.
    ///
    pub fn delete_planner_task(&mut self, id: &str) {
        self.planner_tasks.retain(|t| t.id != id);
        self.completed_planner_tasks.retain(|t| t.task.id != id);
    }

    // Settings & reset

    /// Shallow-merge the given fields into settings. The XP multiplier
    /// affects future entries only; recorded `xp_gained` values are never
    /// rewritten.
    ///
    pub fn update_settings(&mut self, updates: SettingsUpdate) {
        if let Some(theme) = updates.theme {
            self.settings.theme = theme;
        }
        if let Some(xp_multiplier) = updates.xp_multiplier {
            self.settings.xp_multiplier = xp_multiplier;
        }
        if let Some(sound_enabled) = updates.sound_enabled {
            self.settings.sound_enabled = sound_enabled;
        }
        if let Some(daily_goal_time) = updates.daily_goal_time {
            self.settings.daily_goal_time = daily_goal_time;
        }
    }

    /// Clear every collection and restore default settings and zeroed
    /// aggregates. Irreversible.
    ///
    pub fn reset_all(&mut self) {
        warn!("Resetting all application data");
        *self = Store::default();
    }

    // Derived queries

    /// Return all logs recorded against the given habit.
    ///
    pub fn logs_for_habit(&self, habit_id: &str) -> Vec<&HabitLog> {
        self.logs
            .iter()
            .filter(|l| l.habit_id == habit_id)
            .collect()
    }

    /// Return all logs dated within the inclusive range.
    ///
    pub fn logs_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&HabitLog> {
        self.logs
            .iter()
            .filter(|l| l.date >= start && l.date <= end)
            .collect()
    }

    /// Per-day log counts over a trailing window ending today, oldest day
    /// first. Days with no entries are present with a zero count.
    ///
    pub fn heatmap(&self, days_back: i64) -> Vec<(NaiveDate, usize)> {
        let today = Local::now().date_naive();
        (0..=days_back)
            .rev()
            .map(|offset| {
                let day = today - Duration::days(offset);
                let count = self.logs.iter().filter(|l| l.date == day).count();
                (day, count)
            })
            .collect()
    }

    /// Total minutes resisted across all anti-scroll logs.
    ///
    pub fn total_time_resisted(&self) -> u64 {
        self.anti_scroll_logs
            .iter()
            .map(|l| l.time_resisted as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::ThemeChoice;
    use fake::{Fake, Faker};

    fn store_with_habit(target: f64) -> (Store, String) {
        let mut store = Store::new();
        store.add_habit("Read", Icon::Book, "#00ff41", target, "pages");
        let id = store.get_habits()[0].id.clone();
        (store, id)
    }

    #[test]
    fn add_habit_initializes_fields() {
        let (store, _) = store_with_habit(30.0);
        let habit = &store.get_habits()[0];
        assert_eq!(habit.level, 1);
        assert_eq!(habit.xp, 0.0);
        assert_eq!(habit.xp_to_next_level, 100.0);
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.longest_streak, 0);
        assert!(habit.last_completed_at.is_none());
    }

    #[test]
    fn add_habit_rejects_invalid_input() {
        let mut store = Store::new();
        store.add_habit("", Icon::Book, "#00ff41", 10.0, "pages");
        store.add_habit("   ", Icon::Book, "#00ff41", 10.0, "pages");
        store.add_habit("Read", Icon::Book, "#00ff41", 0.0, "pages");
        store.add_habit("Read", Icon::Book, "#00ff41", -3.0, "pages");
        assert!(store.get_habits().is_empty());
    }

    #[test]
    fn update_habit_merges_fields() {
        let (mut store, id) = store_with_habit(30.0);
        store.update_habit(
            &id,
            HabitUpdate {
                name: Some("Read more".to_string()),
                target: Some(50.0),
                ..HabitUpdate::default()
            },
        );
        let habit = store.get_habit(&id).unwrap();
        assert_eq!(habit.name, "Read more");
        assert_eq!(habit.target, 50.0);
        assert_eq!(habit.unit, "pages");
    }

    #[test]
    fn update_habit_unknown_id_is_noop() {
        let (mut store, _) = store_with_habit(30.0);
        let before = store.clone();
        store.update_habit(
            "habit_missing",
            HabitUpdate {
                name: Some("x".to_string()),
                ..HabitUpdate::default()
            },
        );
        assert_eq!(before, store);
    }

    #[test]
    fn update_habit_does_not_recompute_threshold() {
        let (mut store, id) = store_with_habit(30.0);
        store.update_habit(
            &id,
            HabitUpdate {
                level: Some(5),
                ..HabitUpdate::default()
            },
        );
        let habit = store.get_habit(&id).unwrap();
        assert_eq!(habit.level, 5);
        // Threshold stays at the level-1 value until the next progress entry.
        assert_eq!(habit.xp_to_next_level, 100.0);
    }

    #[test]
    fn delete_habit_cascades_logs() {
        let (mut store, id) = store_with_habit(10.0);
        store.add_habit("Stretch", Icon::Heart, "#ff6d92", 5.0, "mins");
        let other_id = store.get_habits()[1].id.clone();
        store.log_progress(&id, 10.0);
        store.log_progress(&other_id, 5.0);
        store.log_anti_scroll(30, &id);
        store.log_anti_scroll(15, &other_id);

        store.delete_habit(&id);

        assert!(store.get_habit(&id).is_none());
        assert!(store.get_logs().iter().all(|l| l.habit_id != id));
        assert!(store
            .get_anti_scroll_logs()
            .iter()
            .all(|l| l.habit_chosen != id));
        // The other habit's records survive.
        assert_eq!(store.get_logs().len(), 1);
        assert_eq!(store.get_anti_scroll_logs().len(), 1);
    }

    #[test]
    fn log_progress_at_target_levels_up() {
        let (mut store, id) = store_with_habit(10.0);
        let report = store.log_progress(&id, 10.0);

        assert_eq!(
            report,
            LevelUpReport {
                leveled_up: true,
                new_level: 2
            }
        );
        let habit = store.get_habit(&id).unwrap();
        assert_eq!(habit.level, 2);
        assert_eq!(habit.xp, 0.0);
        assert_eq!(habit.xp_to_next_level, 150.0);
        assert_eq!(store.get_logs()[0].xp_gained, 100.0);
    }

    #[test]
    fn log_progress_applies_multiplier_and_bonus() {
        let (mut store, id) = store_with_habit(10.0);
        store.update_settings(SettingsUpdate {
            xp_multiplier: Some(2.0),
            ..SettingsUpdate::default()
        });
        store.log_progress(&id, 15.0);
        // floor(1.5 * 100) + floor(5 * 10) = 200, doubled by the multiplier.
        assert_eq!(store.get_logs()[0].xp_gained, 400.0);
        assert_eq!(store.get_total_xp(), 400.0);
    }

    #[test]
    fn log_progress_can_clear_several_levels() {
        let (mut store, id) = store_with_habit(1.0);
        // 100 units over a target of 1: 10000 base + 990 bonus XP.
        let report = store.log_progress(&id, 100.0);
        assert!(report.leveled_up);
        assert!(report.new_level > 2);
        let habit = store.get_habit(&id).unwrap();
        assert_eq!(habit.level, report.new_level);
        assert!(habit.xp < habit.xp_to_next_level);
        assert_eq!(habit.xp_to_next_level, leveling::xp_for_level(habit.level));
    }

    #[test]
    fn log_progress_unknown_habit_records_nothing() {
        let mut store = Store::new();
        let report = store.log_progress("habit_missing", 10.0);
        assert_eq!(
            report,
            LevelUpReport {
                leveled_up: false,
                new_level: 1
            }
        );
        assert!(store.get_logs().is_empty());
        assert_eq!(store.get_total_xp(), 0.0);
    }

    #[test]
    fn total_xp_is_sum_of_gained() {
        let (mut store, id) = store_with_habit(10.0);
        store.log_progress(&id, 4.0);
        store.log_progress(&id, 10.0);
        store.log_progress(&id, 12.0);
        let sum: f64 = store.get_logs().iter().map(|l| l.xp_gained).sum();
        assert_eq!(store.get_total_xp(), sum);
    }

    #[test]
    fn player_level_follows_total_xp() {
        let (mut store, id) = store_with_habit(10.0);
        store.log_progress(&id, 10.0);
        assert_eq!(
            store.get_player_level(),
            leveling::player_level_for(store.get_total_xp())
        );
    }

    #[test]
    fn delete_log_keeps_xp_effects() {
        let (mut store, id) = store_with_habit(10.0);
        store.log_progress(&id, 10.0);
        let log_id = store.get_logs()[0].id.clone();
        let total_before = store.get_total_xp();
        let level_before = store.get_habit(&id).unwrap().level;

        store.delete_log(&log_id);

        assert!(store.get_logs().is_empty());
        assert_eq!(store.get_total_xp(), total_before);
        assert_eq!(store.get_habit(&id).unwrap().level, level_before);
    }

    #[test]
    fn log_progress_sets_last_completed_and_streak() {
        let (mut store, id) = store_with_habit(10.0);
        store.log_progress(&id, 10.0);
        let habit = store.get_habit(&id).unwrap();
        assert_eq!(habit.last_completed_at, Some(Local::now().date_naive()));
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.longest_streak, 1);
    }

    #[test]
    fn streak_resets_without_completion_date() {
        let (mut store, id) = store_with_habit(10.0);
        if let Some(habit) = store.habits.iter_mut().find(|h| h.id == id) {
            habit.streak = 4;
            habit.longest_streak = 4;
            habit.last_completed_at = None;
        }
        store.update_streaks_on(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let habit = store.get_habit(&id).unwrap();
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.longest_streak, 4);
    }

    #[test]
    fn streak_preserved_when_completed_yesterday() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (mut store, id) = store_with_habit(10.0);
        if let Some(habit) = store.habits.iter_mut().find(|h| h.id == id) {
            habit.streak = 3;
            habit.longest_streak = 3;
            habit.last_completed_at = Some(today - Duration::days(1));
        }
        store.update_streaks_on(today);
        assert_eq!(store.get_habit(&id).unwrap().streak, 3);
    }

    #[test]
    fn streak_breaks_after_two_days() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (mut store, id) = store_with_habit(10.0);
        if let Some(habit) = store.habits.iter_mut().find(|h| h.id == id) {
            habit.streak = 7;
            habit.longest_streak = 7;
            habit.last_completed_at = Some(today - Duration::days(2));
        }
        store.update_streaks_on(today);
        let habit = store.get_habit(&id).unwrap();
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.longest_streak, 7);
    }

    #[test]
    fn streak_continues_with_yesterday_log() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (mut store, id) = store_with_habit(10.0);
        store.logs.push(HabitLog {
            id: generate_id("log"),
            habit_id: id.clone(),
            value: 10.0,
            date: today - Duration::days(1),
            timestamp: 0,
            xp_gained: 100.0,
        });
        if let Some(habit) = store.habits.iter_mut().find(|h| h.id == id) {
            habit.streak = 2;
            habit.longest_streak = 2;
            habit.last_completed_at = Some(today);
        }
        store.update_streaks_on(today);
        assert_eq!(store.get_habit(&id).unwrap().streak, 2);
    }

    #[test]
    fn streaks_recomputation_is_idempotent() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (mut store, id) = store_with_habit(10.0);
        if let Some(habit) = store.habits.iter_mut().find(|h| h.id == id) {
            habit.streak = 5;
            habit.longest_streak = 5;
            habit.last_completed_at = Some(today - Duration::days(1));
        }
        store.update_streaks_on(today);
        let once = store.clone();
        store.update_streaks_on(today);
        assert_eq!(once, store);
    }

    #[test]
    fn longest_streak_never_below_streak() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (mut store, id) = store_with_habit(10.0);
        if let Some(habit) = store.habits.iter_mut().find(|h| h.id == id) {
            habit.streak = 1;
            habit.longest_streak = 0;
            habit.last_completed_at = Some(today);
        }
        store.update_streaks_on(today);
        let habit = store.get_habit(&id).unwrap();
        assert!(habit.longest_streak >= habit.streak);
    }

    fn sample_goal(store: &mut Store) -> String {
        store.add_goal(
            "Ship v1",
            Some("First release".to_string()),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            Some("Pizza night".to_string()),
        );
        store.get_goals().last().unwrap().id.clone()
    }

    #[test]
    fn goal_crud() {
        let mut store = Store::new();
        let id = sample_goal(&mut store);
        store.update_goal(
            &id,
            GoalUpdate {
                title: Some("Ship v1.0".to_string()),
                reward: Some(None),
                ..GoalUpdate::default()
            },
        );
        let goal = store.get_goal(&id).unwrap();
        assert_eq!(goal.title, "Ship v1.0");
        assert!(goal.reward.is_none());

        store.delete_goal(&id);
        assert!(store.get_goals().is_empty());
    }

    #[test]
    fn complete_goal_ignores_incomplete_sub_goals() {
        let mut store = Store::new();
        let id = sample_goal(&mut store);
        store.add_sub_goal(&id, "Write docs");
        store.add_sub_goal(&id, "Cut release");
        let first_sub = store.get_goal(&id).unwrap().sub_goals[0].id.clone();
        store.toggle_sub_goal(&id, &first_sub);

        // One sub-goal still open; the store completes the goal regardless.
        store.complete_goal(&id);

        assert!(store.get_goals().is_empty());
        let completed = &store.get_completed_goals()[0];
        assert!(completed.goal.completed);
        assert_eq!(completed.goal.id, id);
        assert!(!completed.goal.sub_goals[1].completed);
    }

    #[test]
    fn delete_completed_goal_removes_archive_entry() {
        let mut store = Store::new();
        let id = sample_goal(&mut store);
        store.complete_goal(&id);
        store.delete_completed_goal(&id);
        assert!(store.get_completed_goals().is_empty());
    }

    #[test]
    fn toggle_sub_goal_stamps_completion() {
        let mut store = Store::new();
        let id = sample_goal(&mut store);
        store.add_sub_goal(&id, "Write docs");
        let sub_id = store.get_goal(&id).unwrap().sub_goals[0].id.clone();

        store.toggle_sub_goal(&id, &sub_id);
        let sub = &store.get_goal(&id).unwrap().sub_goals[0];
        assert!(sub.completed);
        assert!(sub.completed_at.is_some());

        store.toggle_sub_goal(&id, &sub_id);
        let sub = &store.get_goal(&id).unwrap().sub_goals[0];
        assert!(!sub.completed);
        assert!(sub.completed_at.is_none());
    }

    #[test]
    fn update_and_delete_sub_goal() {
        let mut store = Store::new();
        let id = sample_goal(&mut store);
        store.add_sub_goal(&id, "Write docs");
        let sub_id = store.get_goal(&id).unwrap().sub_goals[0].id.clone();

        store.update_sub_goal(
            &id,
            &sub_id,
            SubGoalUpdate {
                title: Some("Write the docs".to_string()),
                completed: None,
            },
        );
        assert_eq!(
            store.get_goal(&id).unwrap().sub_goals[0].title,
            "Write the docs"
        );

        store.delete_sub_goal(&id, &sub_id);
        assert!(store.get_goal(&id).unwrap().sub_goals.is_empty());
    }

    #[test]
    fn planner_task_toggle_round_trip() {
        let mut store = Store::new();
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        store.add_planner_task("Dentist", date, Some("09:30".to_string()), "#00d9ff");
        let id = store.get_planner_tasks()[0].id.clone();

        store.toggle_planner_task(&id);
        assert!(store.get_planner_tasks().is_empty());
        let completed = &store.get_completed_planner_tasks()[0];
        assert!(completed.task.completed);

        store.toggle_planner_task(&id);
        assert!(store.get_completed_planner_tasks().is_empty());
        assert!(!store.get_planner_tasks()[0].completed);
    }

    #[test]
    fn planner_task_update_and_delete() {
        let mut store = Store::new();
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        store.add_planner_task("Dentist", date, None, "#00d9ff");
        let id = store.get_planner_tasks()[0].id.clone();

        store.update_planner_task(
            &id,
            PlannerTaskUpdate {
                title: Some("Dentist appointment".to_string()),
                time: Some(Some("10:00".to_string())),
                ..PlannerTaskUpdate::default()
            },
        );
        let task = &store.get_planner_tasks()[0];
        assert_eq!(task.title, "Dentist appointment");
        assert_eq!(task.time.as_deref(), Some("10:00"));

        store.toggle_planner_task(&id);
        store.delete_planner_task(&id);
        assert!(store.get_completed_planner_tasks().is_empty());
    }

    #[test]
    fn update_settings_is_not_retroactive() {
        let (mut store, id) = store_with_habit(10.0);
        store.log_progress(&id, 10.0);
        store.update_settings(SettingsUpdate {
            xp_multiplier: Some(3.0),
            ..SettingsUpdate::default()
        });
        // The first entry keeps the XP recorded under the old multiplier.
        assert_eq!(store.get_logs()[0].xp_gained, 100.0);

        store.log_progress(&id, 10.0);
        assert_eq!(store.get_logs()[1].xp_gained, 300.0);
    }

    #[test]
    fn reset_all_restores_defaults() {
        let (mut store, id) = store_with_habit(10.0);
        store.log_progress(&id, 10.0);
        store.log_anti_scroll(20, &id);
        let goal_id = sample_goal(&mut store);
        store.complete_goal(&goal_id);
        sample_goal(&mut store);
        store.add_planner_task(
            "Dentist",
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            None,
            "#00d9ff",
        );
        store.update_settings(SettingsUpdate {
            theme: Some(ThemeChoice::Matrix),
            xp_multiplier: Some(2.5),
            ..SettingsUpdate::default()
        });

        store.reset_all();

        assert_eq!(store, Store::default());
        assert!(store.get_habits().is_empty());
        assert_eq!(store.get_total_xp(), 0.0);
        assert_eq!(store.get_player_level(), 1);
        assert_eq!(*store.get_settings(), Settings::default());
    }

    #[test]
    fn logs_for_habit_filters_by_id() {
        let (mut store, id) = store_with_habit(10.0);
        store.add_habit("Stretch", Icon::Heart, "#ff6d92", 5.0, "mins");
        let other_id = store.get_habits()[1].id.clone();
        store.log_progress(&id, 10.0);
        store.log_progress(&id, 4.0);
        store.log_progress(&other_id, 5.0);

        let hits = store.logs_for_habit(&id);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|l| l.habit_id == id));
    }

    #[test]
    fn logs_between_filters_inclusive() {
        let mut store = Store::new();
        let base = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        for offset in 0..5 {
            store.logs.push(HabitLog {
                id: generate_id("log"),
                habit_id: "habit_x".to_string(),
                value: 1.0,
                date: base + Duration::days(offset),
                timestamp: 0,
                xp_gained: 10.0,
            });
        }
        let hits = store.logs_between(base + Duration::days(1), base + Duration::days(3));
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn heatmap_covers_window_with_zeroes() {
        let (mut store, id) = store_with_habit(10.0);
        store.log_progress(&id, 10.0);
        let map = store.heatmap(6);
        assert_eq!(map.len(), 7);
        // Last cell is today, which holds the single entry.
        assert_eq!(map.last().unwrap().1, 1);
        assert_eq!(map.iter().map(|(_, count)| count).sum::<usize>(), 1);
    }

    #[test]
    fn total_time_resisted_sums_minutes() {
        let (mut store, id) = store_with_habit(10.0);
        store.log_anti_scroll(30, &id);
        store.log_anti_scroll(45, &id);
        assert_eq!(store.total_time_resisted(), 75);
    }

    #[test]
    fn document_round_trip() {
        let mut store = Store::new();
        let habit: Habit = Faker.fake();
        store.habits.push(habit);
        store.total_xp = 420.0;
        let json = serde_json::to_string(&store).unwrap();
        let decoded: Store = serde_json::from_str(&json).unwrap();
        assert_eq!(store, decoded);
    }

    #[test]
    fn older_document_defaults_missing_collections() {
        // Documents written before goals and the planner existed lack those
        // arrays entirely.
        let json = r#"{
            "habits": [],
            "logs": [],
            "antiScrollLogs": [],
            "settings": {
                "theme": "matrix",
                "xpMultiplier": 1.5,
                "soundEnabled": false,
                "dailyGoalTime": "06:00"
            },
            "totalXP": 1234.0,
            "playerLevel": 5
        }"#;
        let store: Store = serde_json::from_str(json).unwrap();
        assert!(store.get_goals().is_empty());
        assert!(store.get_completed_goals().is_empty());
        assert!(store.get_planner_tasks().is_empty());
        assert!(store.get_completed_planner_tasks().is_empty());
        assert_eq!(store.get_total_xp(), 1234.0);
        assert_eq!(store.get_settings().theme, ThemeChoice::Matrix);
    }

    #[test]
    fn empty_document_defaults_everything() {
        let store: Store = serde_json::from_str("{}").unwrap();
        assert_eq!(store, Store::default());
        assert_eq!(store.get_player_level(), 1);
    }
}
