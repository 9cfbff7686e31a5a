use crate::app::StateSaveSender;
use crate::store::{
    GoalUpdate, Habit, HabitUpdate, LevelUpReport, PlannerTask, SettingsUpdate, Store,
};
use crate::ui::Theme;
use crate::utils::dates::Timeframe;
use chrono::{Duration, Local, NaiveDate};
use log::*;
use ratatui::widgets::ListState;

use super::form::{
    AntiScrollForm, GoalForm, HabitForm, LogProgressForm, SubGoalForm, TaskForm,
};
use super::navigation::{DeleteTarget, Focus, View};

/// How many render ticks the level-up banner stays visible.
const BANNER_TICKS: u8 = 50;

/// Specify which dashboard panel has input focus.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardPanel {
    Habits,
    Logs,
}

/// Specify the rows of the settings view, in display order.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsRow {
    Theme,
    XpMultiplier,
    Sound,
    DailyGoalTime,
    Export,
    Reset,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 6] = [
        SettingsRow::Theme,
        SettingsRow::XpMultiplier,
        SettingsRow::Sound,
        SettingsRow::DailyGoalTime,
        SettingsRow::Export,
        SettingsRow::Reset,
    ];
}

/// Step a `HH:MM` clock string by the given number of minutes, wrapping at
/// midnight. Unparseable strings reset to midnight.
///
fn step_clock(time: &str, delta_minutes: i32) -> String {
    let parsed = time.split_once(':').and_then(|(h, m)| {
        let hours: i32 = h.parse().ok()?;
        let minutes: i32 = m.parse().ok()?;
        if (0..24).contains(&hours) && (0..60).contains(&minutes) {
            Some(hours * 60 + minutes)
        } else {
            None
        }
    });
    let total = match parsed {
        Some(total) => (total + delta_minutes).rem_euclid(24 * 60),
        None => 0,
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Houses data representative of application state: the domain store plus
/// everything the interface needs between frames.
///
pub struct State {
    save_sender: Option<StateSaveSender>,
    store: Store,
    current_focus: Focus,
    current_view: View,
    // Dashboard
    dashboard_panel: DashboardPanel,
    habits_list_state: ListState,
    logs_list_state: ListState,
    // Goals
    goals_list_state: ListState,
    selected_sub_goal: usize,
    archive_mode: bool,
    archive_list_state: ListState,
    // Planner
    planner_day: NaiveDate,
    planner_task_index: usize,
    // Anti-scroll
    anti_scroll_list_state: ListState,
    // Analytics
    analytics_timeframe: Timeframe,
    // Settings
    settings_index: usize,
    reset_confirmation: bool,
    export_requested: bool,
    // Modal forms
    habit_form: Option<HabitForm>,
    goal_form: Option<GoalForm>,
    sub_goal_form: Option<SubGoalForm>,
    task_form: Option<TaskForm>,
    log_form: Option<LogProgressForm>,
    anti_scroll_form: Option<AntiScrollForm>,
    delete_confirmation: Option<DeleteTarget>,
    // Level-up banner
    level_up_banner: Option<LevelUpReport>,
    banner_ticks: u8,
    // Debug log view
    debug_mode: bool,
    debug_index: usize,
    debug_entries: Vec<String>,
    theme: Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            save_sender: None,
            store: Store::default(),
            current_focus: Focus::Menu,
            current_view: View::Dashboard,
            dashboard_panel: DashboardPanel::Habits,
            habits_list_state: ListState::default(),
            logs_list_state: ListState::default(),
            goals_list_state: ListState::default(),
            selected_sub_goal: 0,
            archive_mode: false,
            archive_list_state: ListState::default(),
            planner_day: Local::now().date_naive(),
            planner_task_index: 0,
            anti_scroll_list_state: ListState::default(),
            analytics_timeframe: Timeframe::Week,
            settings_index: 0,
            reset_confirmation: false,
            export_requested: false,
            habit_form: None,
            goal_form: None,
            sub_goal_form: None,
            task_form: None,
            log_form: None,
            anti_scroll_form: None,
            delete_confirmation: None,
            level_up_banner: None,
            banner_ticks: 0,
            debug_mode: false,
            debug_index: 0,
            debug_entries: vec![],
            theme: Theme::default(),
        }
    }
}

impl State {
    pub fn new(save_sender: StateSaveSender, store: Store) -> Self {
        let theme = Theme::from_choice(store.get_settings().theme);
        let mut state = State {
            save_sender: Some(save_sender),
            store,
            theme,
            ..State::default()
        };
        if !state.store.get_habits().is_empty() {
            state.habits_list_state.select(Some(0));
        }
        if !state.store.get_goals().is_empty() {
            state.goals_list_state.select(Some(0));
        }
        state
    }

    /// Ask the autosave thread to persist the store.
    ///
    fn request_save(&self) {
        if let Some(sender) = &self.save_sender {
            // A full channel or a dead receiver only costs this save; the
            // next mutation retries.
            let _ = sender.send(());
        }
    }

    /// Return the domain store.
    ///
    pub fn get_store(&self) -> &Store {
        &self.store
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    // Focus & view navigation

    /// Return the current focus.
    ///
    pub fn current_focus(&self) -> &Focus {
        &self.current_focus
    }

    /// Change focus to the tab bar.
    ///
    pub fn focus_menu(&mut self) -> &mut Self {
        self.current_focus = Focus::Menu;
        self
    }

    /// Change focus to the current view.
    ///
    pub fn focus_view(&mut self) -> &mut Self {
        self.current_focus = Focus::View;
        self
    }

    /// Return the current view.
    ///
    pub fn current_view(&self) -> &View {
        &self.current_view
    }

    /// Activate the next view tab.
    ///
    pub fn next_view(&mut self) -> &mut Self {
        self.current_view = self.current_view.next();
        self
    }

    /// Activate the previous view tab.
    ///
    pub fn previous_view(&mut self) -> &mut Self {
        self.current_view = self.current_view.previous();
        self
    }

    /// Check whether any modal (form or confirmation) is open.
    ///
    pub fn has_modal(&self) -> bool {
        self.habit_form.is_some()
            || self.goal_form.is_some()
            || self.sub_goal_form.is_some()
            || self.task_form.is_some()
            || self.log_form.is_some()
            || self.anti_scroll_form.is_some()
            || self.delete_confirmation.is_some()
            || self.reset_confirmation
    }

    // Dashboard

    /// Return the focused dashboard panel.
    ///
    pub fn dashboard_panel(&self) -> DashboardPanel {
        self.dashboard_panel
    }

    /// Switch between the habit list and the recent-logs panel.
    ///
    pub fn toggle_dashboard_panel(&mut self) -> &mut Self {
        self.dashboard_panel = match self.dashboard_panel {
            DashboardPanel::Habits => DashboardPanel::Logs,
            DashboardPanel::Logs => DashboardPanel::Habits,
        };
        self
    }

    /// Return the habits list state.
    ///
    pub fn get_habits_list_state(&mut self) -> &mut ListState {
        &mut self.habits_list_state
    }

    /// Return the recent-logs list state.
    ///
    pub fn get_logs_list_state(&mut self) -> &mut ListState {
        &mut self.logs_list_state
    }

    /// Activate the next habit.
    ///
    pub fn next_habit(&mut self) -> &mut Self {
        let len = self.store.get_habits().len();
        advance(&mut self.habits_list_state, len, 1);
        self
    }

    /// Activate the previous habit.
    ///
    pub fn previous_habit(&mut self) -> &mut Self {
        let len = self.store.get_habits().len();
        advance(&mut self.habits_list_state, len, -1);
        self
    }

    /// Return the selected habit.
    ///
    pub fn selected_habit(&self) -> Option<&Habit> {
        self.habits_list_state
            .selected()
            .and_then(|index| self.store.get_habits().get(index))
    }

    /// Activate the next recent log entry.
    ///
    pub fn next_log(&mut self) -> &mut Self {
        let len = self.store.get_logs().len();
        advance(&mut self.logs_list_state, len, 1);
        self
    }

    /// Activate the previous recent log entry.
    ///
    pub fn previous_log(&mut self) -> &mut Self {
        let len = self.store.get_logs().len();
        advance(&mut self.logs_list_state, len, -1);
        self
    }

    /// Return the id of the selected recent log, newest first.
    ///
    pub fn selected_log_id(&self) -> Option<String> {
        let logs = self.store.get_logs();
        self.logs_list_state
            .selected()
            .and_then(|index| logs.iter().rev().nth(index))
            .map(|log| log.id.to_owned())
    }

    // Habit form

    /// Open the habit form for creation.
    ///
    pub fn open_habit_form(&mut self) -> &mut Self {
        self.habit_form = Some(HabitForm::new());
        self
    }

    /// Open the habit form pre-populated with the selected habit.
    ///
    pub fn open_edit_habit_form(&mut self) -> &mut Self {
        if let Some(habit) = self.selected_habit() {
            self.habit_form = Some(HabitForm::for_habit(habit));
        }
        self
    }

    pub fn habit_form(&self) -> Option<&HabitForm> {
        self.habit_form.as_ref()
    }

    pub fn habit_form_mut(&mut self) -> Option<&mut HabitForm> {
        self.habit_form.as_mut()
    }

    pub fn close_habit_form(&mut self) -> &mut Self {
        self.habit_form = None;
        self
    }

    /// Validate and submit the habit form. Invalid input keeps the form open
    /// with an error message; the store itself never sees it.
    ///
    pub fn submit_habit_form(&mut self) -> &mut Self {
        let form = match self.habit_form.take() {
            Some(form) => form,
            None => return self,
        };
        let target: f64 = form.target.parse().unwrap_or(0.0);
        if form.name.trim().is_empty() || target <= 0.0 {
            let mut form = form;
            form.error = Some("Name and a positive target are required".to_string());
            self.habit_form = Some(form);
            return self;
        }
        let unit = if form.unit.trim().is_empty() {
            "times".to_string()
        } else {
            form.unit.trim().to_string()
        };
        match &form.editing_id {
            Some(id) => {
                self.store.update_habit(
                    id,
                    HabitUpdate {
                        name: Some(form.name.trim().to_string()),
                        icon: Some(form.icon()),
                        color: Some(form.color().to_string()),
                        target: Some(target),
                        unit: Some(unit),
                        ..HabitUpdate::default()
                    },
                );
            }
            None => {
                self.store
                    .add_habit(form.name.trim(), form.icon(), form.color(), target, &unit);
                let len = self.store.get_habits().len();
                self.habits_list_state.select(Some(len.saturating_sub(1)));
            }
        }
        self.request_save();
        self
    }

    // Progress logging

    /// Open the log-progress form for the selected habit.
    ///
    pub fn open_log_form(&mut self) -> &mut Self {
        if let Some(habit) = self.selected_habit() {
            self.log_form = Some(LogProgressForm::new(habit));
        }
        self
    }

    pub fn log_form(&self) -> Option<&LogProgressForm> {
        self.log_form.as_ref()
    }

    pub fn log_form_mut(&mut self) -> Option<&mut LogProgressForm> {
        self.log_form.as_mut()
    }

    pub fn close_log_form(&mut self) -> &mut Self {
        self.log_form = None;
        self
    }

    /// Validate and submit the log-progress form. A level-up raises the
    /// celebratory banner.
    ///
    pub fn submit_log_form(&mut self) -> &mut Self {
        let form = match self.log_form.take() {
            Some(form) => form,
            None => return self,
        };
        let value: f64 = form.value.parse().unwrap_or(0.0);
        if value <= 0.0 {
            let mut form = form;
            form.error = Some("Enter a positive value".to_string());
            self.log_form = Some(form);
            return self;
        }
        let report = self.store.log_progress(&form.habit_id, value);
        if report.leveled_up {
            info!(
                "Habit {} reached level {}",
                form.habit_name, report.new_level
            );
            self.level_up_banner = Some(report);
            self.banner_ticks = BANNER_TICKS;
        }
        self.request_save();
        self
    }

    /// Return the active level-up banner, if any.
    ///
    pub fn level_up_banner(&self) -> Option<&LevelUpReport> {
        self.level_up_banner.as_ref()
    }

    /// Advance banner time-out on every render tick.
    ///
    pub fn tick(&mut self) -> &mut Self {
        if self.banner_ticks > 0 {
            self.banner_ticks -= 1;
            if self.banner_ticks == 0 {
                self.level_up_banner = None;
            }
        }
        self
    }

    // Delete confirmations

    /// Ask for confirmation before deleting the given record.
    ///
    pub fn request_delete(&mut self, target: DeleteTarget) -> &mut Self {
        self.delete_confirmation = Some(target);
        self
    }

    /// Check if there's a pending delete confirmation.
    ///
    pub fn has_delete_confirmation(&self) -> bool {
        self.delete_confirmation.is_some()
    }

    /// Return the pending delete target.
    ///
    pub fn delete_confirmation(&self) -> Option<&DeleteTarget> {
        self.delete_confirmation.as_ref()
    }

    /// Cancel delete confirmation.
    ///
    pub fn cancel_delete_confirmation(&mut self) -> &mut Self {
        self.delete_confirmation = None;
        self
    }

    /// Execute the pending deletion.
    ///
    pub fn confirm_delete(&mut self) -> &mut Self {
        let target = match self.delete_confirmation.take() {
            Some(target) => target,
            None => return self,
        };
        match target {
            DeleteTarget::Habit(id) => {
                self.store.delete_habit(&id);
                clamp(&mut self.habits_list_state, self.store.get_habits().len());
            }
            DeleteTarget::Log(id) => {
                self.store.delete_log(&id);
                clamp(&mut self.logs_list_state, self.store.get_logs().len());
            }
            DeleteTarget::Goal(id) => {
                self.store.delete_goal(&id);
                clamp(&mut self.goals_list_state, self.store.get_goals().len());
            }
            DeleteTarget::CompletedGoal(id) => {
                self.store.delete_completed_goal(&id);
                clamp(
                    &mut self.archive_list_state,
                    self.store.get_completed_goals().len(),
                );
            }
            DeleteTarget::PlannerTask(id) => {
                self.store.delete_planner_task(&id);
                self.planner_task_index = 0;
            }
        }
        self.request_save();
        self
    }

    // Goals

    /// Return the goals list state.
    ///
    pub fn get_goals_list_state(&mut self) -> &mut ListState {
        &mut self.goals_list_state
    }

    /// Return the archived-goals list state.
    ///
    pub fn get_archive_list_state(&mut self) -> &mut ListState {
        &mut self.archive_list_state
    }

    /// Activate the next goal.
    ///
    pub fn next_goal(&mut self) -> &mut Self {
        if self.archive_mode {
            let len = self.store.get_completed_goals().len();
            advance(&mut self.archive_list_state, len, 1);
        } else {
            let len = self.store.get_goals().len();
            advance(&mut self.goals_list_state, len, 1);
            self.selected_sub_goal = 0;
        }
        self
    }

    /// Activate the previous goal.
    ///
    pub fn previous_goal(&mut self) -> &mut Self {
        if self.archive_mode {
            let len = self.store.get_completed_goals().len();
            advance(&mut self.archive_list_state, len, -1);
        } else {
            let len = self.store.get_goals().len();
            advance(&mut self.goals_list_state, len, -1);
            self.selected_sub_goal = 0;
        }
        self
    }

    /// Return the selected active goal.
    ///
    pub fn selected_goal(&self) -> Option<&crate::store::Goal> {
        self.goals_list_state
            .selected()
            .and_then(|index| self.store.get_goals().get(index))
    }

    /// Return the id of the selected archived goal.
    ///
    pub fn selected_completed_goal_id(&self) -> Option<String> {
        self.archive_list_state
            .selected()
            .and_then(|index| self.store.get_completed_goals().get(index))
            .map(|g| g.goal.id.to_owned())
    }

    /// Check whether the archive panel is active.
    ///
    pub fn is_archive_mode(&self) -> bool {
        self.archive_mode
    }

    /// Switch between active goals and the archive.
    ///
    pub fn toggle_archive_mode(&mut self) -> &mut Self {
        self.archive_mode = !self.archive_mode;
        if self.archive_mode && !self.store.get_completed_goals().is_empty() {
            self.archive_list_state.select(Some(0));
        }
        self
    }

    /// Return the selected sub-goal index.
    ///
    pub fn selected_sub_goal(&self) -> usize {
        self.selected_sub_goal
    }

    /// Activate the next sub-goal of the selected goal.
    ///
    pub fn next_sub_goal(&mut self) -> &mut Self {
        if let Some(goal) = self.selected_goal() {
            let len = goal.sub_goals.len();
            if len > 0 {
                self.selected_sub_goal = (self.selected_sub_goal + 1) % len;
            }
        }
        self
    }

    /// Activate the previous sub-goal of the selected goal.
    ///
    pub fn previous_sub_goal(&mut self) -> &mut Self {
        if let Some(goal) = self.selected_goal() {
            let len = goal.sub_goals.len();
            if len > 0 {
                self.selected_sub_goal = (self.selected_sub_goal + len - 1) % len;
            }
        }
        self
    }

    /// Flip the selected sub-goal's completion.
    ///
    pub fn toggle_selected_sub_goal(&mut self) -> &mut Self {
        let target = self.selected_goal().and_then(|goal| {
            goal.sub_goals
                .get(self.selected_sub_goal)
                .map(|sub| (goal.id.to_owned(), sub.id.to_owned()))
        });
        if let Some((goal_id, sub_goal_id)) = target {
            self.store.toggle_sub_goal(&goal_id, &sub_goal_id);
            self.request_save();
        }
        self
    }

    /// Delete the selected sub-goal outright.
    ///
    pub fn delete_selected_sub_goal(&mut self) -> &mut Self {
        let target = self.selected_goal().and_then(|goal| {
            goal.sub_goals
                .get(self.selected_sub_goal)
                .map(|sub| (goal.id.to_owned(), sub.id.to_owned()))
        });
        if let Some((goal_id, sub_goal_id)) = target {
            self.store.delete_sub_goal(&goal_id, &sub_goal_id);
            let remaining = self
                .selected_goal()
                .map(|g| g.sub_goals.len())
                .unwrap_or(0);
            if self.selected_sub_goal >= remaining {
                self.selected_sub_goal = remaining.saturating_sub(1);
            }
            self.request_save();
        }
        self
    }

    /// Complete the selected goal. The interface only allows this once every
    /// sub-goal is complete; the store itself would accept it regardless.
    ///
    pub fn complete_selected_goal(&mut self) -> &mut Self {
        let goal = match self.selected_goal() {
            Some(goal) => goal,
            None => return self,
        };
        if goal.sub_goals.iter().any(|sub| !sub.completed) {
            warn!("Goal '{}' still has open sub-goals", goal.title);
            return self;
        }
        let id = goal.id.to_owned();
        self.store.complete_goal(&id);
        clamp(&mut self.goals_list_state, self.store.get_goals().len());
        self.request_save();
        self
    }

    // Goal form

    /// Open the goal form for creation.
    ///
    pub fn open_goal_form(&mut self) -> &mut Self {
        self.goal_form = Some(GoalForm::new(Local::now().date_naive()));
        self
    }

    /// Open the goal form pre-populated with the selected goal.
    ///
    pub fn open_edit_goal_form(&mut self) -> &mut Self {
        if let Some(goal) = self.selected_goal() {
            self.goal_form = Some(GoalForm::for_goal(goal));
        }
        self
    }

    pub fn goal_form(&self) -> Option<&GoalForm> {
        self.goal_form.as_ref()
    }

    pub fn goal_form_mut(&mut self) -> Option<&mut GoalForm> {
        self.goal_form.as_mut()
    }

    pub fn close_goal_form(&mut self) -> &mut Self {
        self.goal_form = None;
        self
    }

    /// Validate and submit the goal form.
    ///
    pub fn submit_goal_form(&mut self) -> &mut Self {
        let form = match self.goal_form.take() {
            Some(form) => form,
            None => return self,
        };
        let start = NaiveDate::parse_from_str(form.start_date.trim(), "%Y-%m-%d");
        let end = NaiveDate::parse_from_str(form.end_date.trim(), "%Y-%m-%d");
        let (start, end) = match (start, end) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                let mut form = form;
                form.error = Some("Dates must be YYYY-MM-DD".to_string());
                self.goal_form = Some(form);
                return self;
            }
        };
        if form.title.trim().is_empty() {
            let mut form = form;
            form.error = Some("A title is required".to_string());
            self.goal_form = Some(form);
            return self;
        }
        let description = {
            let text = form.description_text();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        };
        let reward = if form.reward.trim().is_empty() {
            None
        } else {
            Some(form.reward.trim().to_string())
        };
        match &form.editing_id {
            Some(id) => {
                self.store.update_goal(
                    id,
                    GoalUpdate {
                        title: Some(form.title.trim().to_string()),
                        description: Some(description),
                        start_date: Some(start),
                        end_date: Some(end),
                        reward: Some(reward),
                    },
                );
            }
            None => {
                self.store
                    .add_goal(form.title.trim(), description, start, end, reward);
                let len = self.store.get_goals().len();
                self.goals_list_state.select(Some(len.saturating_sub(1)));
            }
        }
        self.request_save();
        self
    }

    // Sub-goal form

    /// Open the sub-goal form for the selected goal.
    ///
    pub fn open_sub_goal_form(&mut self) -> &mut Self {
        if let Some(goal) = self.selected_goal() {
            self.sub_goal_form = Some(SubGoalForm {
                goal_id: goal.id.to_owned(),
                title: String::new(),
            });
        }
        self
    }

    pub fn sub_goal_form(&self) -> Option<&SubGoalForm> {
        self.sub_goal_form.as_ref()
    }

    pub fn sub_goal_form_mut(&mut self) -> Option<&mut SubGoalForm> {
        self.sub_goal_form.as_mut()
    }

    pub fn close_sub_goal_form(&mut self) -> &mut Self {
        self.sub_goal_form = None;
        self
    }

    /// Submit the sub-goal form; empty titles are dropped.
    ///
    pub fn submit_sub_goal_form(&mut self) -> &mut Self {
        if let Some(form) = self.sub_goal_form.take() {
            if !form.title.trim().is_empty() {
                self.store.add_sub_goal(&form.goal_id, form.title.trim());
                self.request_save();
            }
        }
        self
    }

    // Planner

    /// Return the selected planner day.
    ///
    pub fn planner_day(&self) -> NaiveDate {
        self.planner_day
    }

    /// Move the selected planner day by the given number of days.
    ///
    pub fn move_planner_day(&mut self, days: i64) -> &mut Self {
        self.planner_day += Duration::days(days);
        self.planner_task_index = 0;
        self
    }

    /// Return all tasks on the selected day: open tasks first, completed
    /// after.
    ///
    pub fn tasks_on_selected_day(&self) -> Vec<&PlannerTask> {
        let mut tasks: Vec<&PlannerTask> = self
            .store
            .get_planner_tasks()
            .iter()
            .filter(|t| t.date == self.planner_day)
            .collect();
        tasks.extend(
            self.store
                .get_completed_planner_tasks()
                .iter()
                .filter(|t| t.task.date == self.planner_day)
                .map(|t| &t.task),
        );
        tasks
    }

    /// Return the selected task index within the day.
    ///
    pub fn planner_task_index(&self) -> usize {
        self.planner_task_index
    }

    /// Activate the next task on the selected day.
    ///
    pub fn next_planner_task(&mut self) -> &mut Self {
        let len = self.tasks_on_selected_day().len();
        if len > 0 {
            self.planner_task_index = (self.planner_task_index + 1) % len;
        }
        self
    }

    /// Activate the previous task on the selected day.
    ///
    pub fn previous_planner_task(&mut self) -> &mut Self {
        let len = self.tasks_on_selected_day().len();
        if len > 0 {
            self.planner_task_index = (self.planner_task_index + len - 1) % len;
        }
        self
    }

    /// Return the id of the selected task on the selected day.
    ///
    pub fn selected_planner_task_id(&self) -> Option<String> {
        self.tasks_on_selected_day()
            .get(self.planner_task_index)
            .map(|t| t.id.to_owned())
    }

    /// Flip the selected planner task's completion.
    ///
    pub fn toggle_selected_planner_task(&mut self) -> &mut Self {
        if let Some(id) = self.selected_planner_task_id() {
            self.store.toggle_planner_task(&id);
            self.request_save();
        }
        self
    }

    // Task form

    /// Open the task form for the selected planner day.
    ///
    pub fn open_task_form(&mut self) -> &mut Self {
        self.task_form = Some(TaskForm::new(self.planner_day));
        self
    }

    pub fn task_form(&self) -> Option<&TaskForm> {
        self.task_form.as_ref()
    }

    pub fn task_form_mut(&mut self) -> Option<&mut TaskForm> {
        self.task_form.as_mut()
    }

    pub fn close_task_form(&mut self) -> &mut Self {
        self.task_form = None;
        self
    }

    /// Validate and submit the planner task form.
    ///
    pub fn submit_task_form(&mut self) -> &mut Self {
        let form = match self.task_form.take() {
            Some(form) => form,
            None => return self,
        };
        if form.title.trim().is_empty() {
            let mut form = form;
            form.error = Some("A title is required".to_string());
            self.task_form = Some(form);
            return self;
        }
        let time = if form.time.trim().is_empty() {
            None
        } else {
            Some(form.time.trim().to_string())
        };
        self.store
            .add_planner_task(form.title.trim(), form.date, time, form.color());
        self.request_save();
        self
    }

    // Anti-scroll

    /// Return the anti-scroll logs list state.
    ///
    pub fn get_anti_scroll_list_state(&mut self) -> &mut ListState {
        &mut self.anti_scroll_list_state
    }

    /// Activate the next anti-scroll log entry.
    ///
    pub fn next_anti_scroll_log(&mut self) -> &mut Self {
        let len = self.store.get_anti_scroll_logs().len();
        advance(&mut self.anti_scroll_list_state, len, 1);
        self
    }

    /// Activate the previous anti-scroll log entry.
    ///
    pub fn previous_anti_scroll_log(&mut self) -> &mut Self {
        let len = self.store.get_anti_scroll_logs().len();
        advance(&mut self.anti_scroll_list_state, len, -1);
        self
    }

    /// Open the anti-scroll form.
    ///
    pub fn open_anti_scroll_form(&mut self) -> &mut Self {
        self.anti_scroll_form = Some(AntiScrollForm::new());
        self
    }

    pub fn anti_scroll_form(&self) -> Option<&AntiScrollForm> {
        self.anti_scroll_form.as_ref()
    }

    pub fn anti_scroll_form_mut(&mut self) -> Option<&mut AntiScrollForm> {
        self.anti_scroll_form.as_mut()
    }

    pub fn close_anti_scroll_form(&mut self) -> &mut Self {
        self.anti_scroll_form = None;
        self
    }

    /// Step the habit chooser inside the anti-scroll form.
    ///
    pub fn cycle_anti_scroll_habit(&mut self, forward: bool) -> &mut Self {
        let len = self.store.get_habits().len();
        if let Some(form) = self.anti_scroll_form.as_mut() {
            if len > 0 {
                form.habit_index = if forward {
                    (form.habit_index + 1) % len
                } else {
                    (form.habit_index + len - 1) % len
                };
            }
        }
        self
    }

    /// Validate and submit the anti-scroll form.
    ///
    pub fn submit_anti_scroll_form(&mut self) -> &mut Self {
        let form = match self.anti_scroll_form.take() {
            Some(form) => form,
            None => return self,
        };
        let minutes: u32 = form.minutes.parse().unwrap_or(0);
        let habit_id = self
            .store
            .get_habits()
            .get(form.habit_index)
            .map(|h| h.id.to_owned());
        match habit_id {
            Some(habit_id) if minutes > 0 => {
                self.store.log_anti_scroll(minutes, &habit_id);
                self.request_save();
            }
            _ => {
                let mut form = form;
                form.error = Some("Positive minutes and an existing habit required".to_string());
                self.anti_scroll_form = Some(form);
            }
        }
        self
    }

    // Analytics

    /// Return the analytics timeframe.
    ///
    pub fn analytics_timeframe(&self) -> Timeframe {
        self.analytics_timeframe
    }

    /// Cycle the analytics timeframe.
    ///
    pub fn next_timeframe(&mut self) -> &mut Self {
        self.analytics_timeframe = self.analytics_timeframe.next();
        self
    }

    // Settings

    /// Return the selected settings row.
    ///
    pub fn selected_settings_row(&self) -> SettingsRow {
        SettingsRow::ALL[self.settings_index % SettingsRow::ALL.len()]
    }

    /// Activate the next settings row.
    ///
    pub fn next_settings_row(&mut self) -> &mut Self {
        self.settings_index = (self.settings_index + 1) % SettingsRow::ALL.len();
        self
    }

    /// Activate the previous settings row.
    ///
    pub fn previous_settings_row(&mut self) -> &mut Self {
        self.settings_index =
            (self.settings_index + SettingsRow::ALL.len() - 1) % SettingsRow::ALL.len();
        self
    }

    /// Adjust the selected settings row forward or back: cycle the theme,
    /// step the multiplier by 0.5 within 1.0–3.0, flip sound, step the daily
    /// goal time by 30 minutes.
    ///
    pub fn adjust_setting(&mut self, forward: bool) -> &mut Self {
        let settings = self.store.get_settings();
        let updates = match self.selected_settings_row() {
            SettingsRow::Theme => SettingsUpdate {
                theme: Some(settings.theme.next()),
                ..SettingsUpdate::default()
            },
            SettingsRow::XpMultiplier => {
                let step = if forward { 0.5 } else { -0.5 };
                let multiplier = (settings.xp_multiplier + step).clamp(1.0, 3.0);
                SettingsUpdate {
                    xp_multiplier: Some(multiplier),
                    ..SettingsUpdate::default()
                }
            }
            SettingsRow::Sound => SettingsUpdate {
                sound_enabled: Some(!settings.sound_enabled),
                ..SettingsUpdate::default()
            },
            SettingsRow::DailyGoalTime => {
                let step = if forward { 30 } else { -30 };
                SettingsUpdate {
                    daily_goal_time: Some(step_clock(&settings.daily_goal_time, step)),
                    ..SettingsUpdate::default()
                }
            }
            SettingsRow::Export | SettingsRow::Reset => return self,
        };
        self.apply_settings(updates)
    }

    /// Activate the selected settings row: export and reset live behind
    /// Enter rather than adjustment.
    ///
    pub fn activate_setting(&mut self) -> &mut Self {
        match self.selected_settings_row() {
            SettingsRow::Export => {
                self.export_requested = true;
            }
            SettingsRow::Reset => {
                self.reset_confirmation = true;
            }
            _ => {
                return self.adjust_setting(true);
            }
        }
        self
    }

    fn apply_settings(&mut self, updates: SettingsUpdate) -> &mut Self {
        self.store.update_settings(updates);
        self.theme = Theme::from_choice(self.store.get_settings().theme);
        self.request_save();
        self
    }

    /// Check whether a reset confirmation is pending.
    ///
    pub fn has_reset_confirmation(&self) -> bool {
        self.reset_confirmation
    }

    /// Cancel the pending reset.
    ///
    pub fn cancel_reset(&mut self) -> &mut Self {
        self.reset_confirmation = false;
        self
    }

    /// Execute the pending factory reset.
    ///
    pub fn confirm_reset(&mut self) -> &mut Self {
        if self.reset_confirmation {
            self.reset_confirmation = false;
            self.store.reset_all();
            self.habits_list_state.select(None);
            self.goals_list_state.select(None);
            self.archive_list_state.select(None);
            self.logs_list_state.select(None);
            self.theme = Theme::from_choice(self.store.get_settings().theme);
            self.request_save();
        }
        self
    }

    /// Take a pending export request, if one was raised this frame.
    ///
    pub fn take_export_request(&mut self) -> bool {
        std::mem::take(&mut self.export_requested)
    }

    // Debug log view

    /// Enter debug mode.
    ///
    pub fn enter_debug_mode(&mut self) -> &mut Self {
        self.debug_mode = true;
        self.debug_index = self.debug_entries.len().saturating_sub(1);
        self
    }

    /// Exit debug mode.
    ///
    pub fn exit_debug_mode(&mut self) -> &mut Self {
        self.debug_mode = false;
        self
    }

    /// Check if in debug mode.
    ///
    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Append captured log entries for the debug view.
    ///
    pub fn push_debug_entries(&mut self, entries: Vec<String>) -> &mut Self {
        self.debug_entries.extend(entries);
        self
    }

    /// Return all captured log entries.
    ///
    pub fn get_debug_entries(&self) -> &[String] {
        &self.debug_entries
    }

    /// Return the selected debug entry index.
    ///
    pub fn debug_index(&self) -> usize {
        self.debug_index
    }

    /// Activate the next debug entry.
    ///
    pub fn next_debug(&mut self) -> &mut Self {
        if !self.debug_entries.is_empty() {
            self.debug_index = (self.debug_index + 1).min(self.debug_entries.len() - 1);
        }
        self
    }

    /// Activate the previous debug entry.
    ///
    pub fn previous_debug(&mut self) -> &mut Self {
        self.debug_index = self.debug_index.saturating_sub(1);
        self
    }
}

/// Move a list selection by one step, wrapping at the ends.
///
fn advance(list_state: &mut ListState, len: usize, step: i64) {
    if len == 0 {
        list_state.select(None);
        return;
    }
    let current = list_state.selected().unwrap_or(0) as i64;
    let next = (current + step).rem_euclid(len as i64) as usize;
    list_state.select(Some(next));
}

/// Keep a list selection in bounds after the collection shrank.
///
fn clamp(list_state: &mut ListState, len: usize) {
    if len == 0 {
        list_state.select(None);
    } else if let Some(selected) = list_state.selected() {
        if selected >= len {
            list_state.select(Some(len - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Icon, ThemeChoice};

    fn state_with_habit() -> State {
        let mut state = State::default();
        state
            .store
            .add_habit("Read", Icon::Book, "#00ff41", 10.0, "pages");
        state.habits_list_state.select(Some(0));
        state
    }

    #[test]
    fn focus_menu_and_view() {
        let mut state = State::default();
        assert_eq!(*state.current_focus(), Focus::Menu);
        state.focus_view();
        assert_eq!(*state.current_focus(), Focus::View);
        state.focus_menu();
        assert_eq!(*state.current_focus(), Focus::Menu);
    }

    #[test]
    fn view_tab_navigation() {
        let mut state = State::default();
        state.next_view();
        assert_eq!(*state.current_view(), View::Goals);
        state.previous_view();
        state.previous_view();
        assert_eq!(*state.current_view(), View::Settings);
    }

    #[test]
    fn habit_navigation_wraps() {
        let mut state = state_with_habit();
        state
            .store
            .add_habit("Stretch", Icon::Heart, "#ff6d92", 5.0, "mins");
        state.next_habit();
        assert_eq!(state.habits_list_state.selected(), Some(1));
        state.next_habit();
        assert_eq!(state.habits_list_state.selected(), Some(0));
        state.previous_habit();
        assert_eq!(state.habits_list_state.selected(), Some(1));
    }

    #[test]
    fn submit_habit_form_creates_habit() {
        let mut state = State::default();
        state.open_habit_form();
        {
            let form = state.habit_form_mut().unwrap();
            for c in "Run".chars() {
                form.push_char(c);
            }
            form.field = super::super::form::HabitFormField::Target;
            form.push_char('5');
        }
        state.submit_habit_form();
        assert!(state.habit_form().is_none());
        assert_eq!(state.get_store().get_habits().len(), 1);
        assert_eq!(state.get_store().get_habits()[0].name, "Run");
        // The unit falls back to a sane default when left blank.
        assert_eq!(state.get_store().get_habits()[0].unit, "times");
    }

    #[test]
    fn submit_habit_form_rejects_invalid_input() {
        let mut state = State::default();
        state.open_habit_form();
        state.submit_habit_form();
        // Form stays open with an error; nothing was created.
        assert!(state.habit_form().is_some());
        assert!(state.habit_form().unwrap().error.is_some());
        assert!(state.get_store().get_habits().is_empty());
    }

    #[test]
    fn submit_edit_habit_form_updates() {
        let mut state = state_with_habit();
        state.open_edit_habit_form();
        {
            let form = state.habit_form_mut().unwrap();
            form.name = "Read more".to_string();
        }
        state.submit_habit_form();
        assert_eq!(state.get_store().get_habits().len(), 1);
        assert_eq!(state.get_store().get_habits()[0].name, "Read more");
    }

    #[test]
    fn submit_log_form_raises_banner_on_level_up() {
        let mut state = state_with_habit();
        state.open_log_form();
        {
            let form = state.log_form_mut().unwrap();
            form.push_char('1');
            form.push_char('0');
        }
        state.submit_log_form();
        assert!(state.log_form().is_none());
        assert!(state.level_up_banner().is_some());
        assert_eq!(state.level_up_banner().unwrap().new_level, 2);
        assert_eq!(state.get_store().get_logs().len(), 1);
    }

    #[test]
    fn submit_log_form_rejects_non_positive_value() {
        let mut state = state_with_habit();
        state.open_log_form();
        state.submit_log_form();
        assert!(state.log_form().is_some());
        assert!(state.get_store().get_logs().is_empty());
    }

    #[test]
    fn banner_expires_after_ticks() {
        let mut state = state_with_habit();
        state.open_log_form();
        state.log_form_mut().unwrap().push_char('9');
        state.log_form_mut().unwrap().push_char('9');
        state.submit_log_form();
        assert!(state.level_up_banner().is_some());
        for _ in 0..BANNER_TICKS {
            state.tick();
        }
        assert!(state.level_up_banner().is_none());
    }

    #[test]
    fn delete_confirmation_flow() {
        let mut state = state_with_habit();
        let id = state.get_store().get_habits()[0].id.to_owned();
        state.request_delete(DeleteTarget::Habit(id.clone()));
        assert!(state.has_delete_confirmation());

        state.cancel_delete_confirmation();
        assert!(!state.has_delete_confirmation());
        assert_eq!(state.get_store().get_habits().len(), 1);

        state.request_delete(DeleteTarget::Habit(id));
        state.confirm_delete();
        assert!(state.get_store().get_habits().is_empty());
        assert_eq!(state.habits_list_state.selected(), None);
    }

    #[test]
    fn complete_goal_requires_all_sub_goals_done() {
        let mut state = State::default();
        state.store.add_goal(
            "Ship",
            None,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            None,
        );
        let goal_id = state.store.get_goals()[0].id.to_owned();
        state.store.add_sub_goal(&goal_id, "Docs");
        state.goals_list_state.select(Some(0));

        // Sub-goal still open: the interface refuses.
        state.complete_selected_goal();
        assert_eq!(state.get_store().get_goals().len(), 1);

        state.toggle_selected_sub_goal();
        state.complete_selected_goal();
        assert!(state.get_store().get_goals().is_empty());
        assert_eq!(state.get_store().get_completed_goals().len(), 1);
    }

    #[test]
    fn submit_goal_form_parses_dates() {
        let mut state = State::default();
        state.open_goal_form();
        {
            let form = state.goal_form_mut().unwrap();
            form.title = "Ship v1".to_string();
            form.start_date = "2024-06-01".to_string();
            form.end_date = "2024-06-30".to_string();
        }
        state.submit_goal_form();
        assert!(state.goal_form().is_none());
        let goal = &state.get_store().get_goals()[0];
        assert_eq!(goal.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn submit_goal_form_rejects_bad_dates() {
        let mut state = State::default();
        state.open_goal_form();
        {
            let form = state.goal_form_mut().unwrap();
            form.title = "Ship v1".to_string();
            form.start_date = "junk".to_string();
        }
        state.submit_goal_form();
        assert!(state.goal_form().is_some());
        assert!(state.get_store().get_goals().is_empty());
    }

    #[test]
    fn planner_day_movement_resets_task_index() {
        let mut state = State::default();
        let day = state.planner_day();
        state.planner_task_index = 2;
        state.move_planner_day(7);
        assert_eq!(state.planner_day(), day + Duration::days(7));
        assert_eq!(state.planner_task_index(), 0);
    }

    #[test]
    fn submit_task_form_adds_task_on_selected_day() {
        let mut state = State::default();
        state.open_task_form();
        {
            let form = state.task_form_mut().unwrap();
            for c in "Dentist".chars() {
                form.push_char(c);
            }
        }
        state.submit_task_form();
        assert_eq!(state.tasks_on_selected_day().len(), 1);
        assert_eq!(state.get_store().get_planner_tasks()[0].title, "Dentist");
    }

    #[test]
    fn toggle_selected_planner_task_round_trips() {
        let mut state = State::default();
        state
            .store
            .add_planner_task("Dentist", state.planner_day(), None, "#00d9ff");
        state.toggle_selected_planner_task();
        assert!(state.get_store().get_planner_tasks().is_empty());
        // Completed tasks stay listed on the day and can be reopened.
        assert_eq!(state.tasks_on_selected_day().len(), 1);
        state.toggle_selected_planner_task();
        assert_eq!(state.get_store().get_planner_tasks().len(), 1);
    }

    #[test]
    fn submit_anti_scroll_form_records_log() {
        let mut state = state_with_habit();
        state.open_anti_scroll_form();
        {
            let form = state.anti_scroll_form_mut().unwrap();
            form.push_char('3');
            form.push_char('0');
        }
        state.submit_anti_scroll_form();
        assert!(state.anti_scroll_form().is_none());
        assert_eq!(state.get_store().get_anti_scroll_logs().len(), 1);
        assert_eq!(state.get_store().total_time_resisted(), 30);
    }

    #[test]
    fn submit_anti_scroll_form_requires_habit() {
        let mut state = State::default();
        state.open_anti_scroll_form();
        state.anti_scroll_form_mut().unwrap().push_char('5');
        state.submit_anti_scroll_form();
        assert!(state.anti_scroll_form().is_some());
        assert!(state.get_store().get_anti_scroll_logs().is_empty());
    }

    #[test]
    fn adjust_multiplier_clamps_to_range() {
        let mut state = State::default();
        state.settings_index = 1; // XpMultiplier
        for _ in 0..10 {
            state.adjust_setting(true);
        }
        assert_eq!(state.get_store().get_settings().xp_multiplier, 3.0);
        for _ in 0..10 {
            state.adjust_setting(false);
        }
        assert_eq!(state.get_store().get_settings().xp_multiplier, 1.0);
    }

    #[test]
    fn adjust_theme_updates_palette() {
        let mut state = State::default();
        state.settings_index = 0; // Theme
        state.adjust_setting(true);
        assert_eq!(state.get_store().get_settings().theme, ThemeChoice::Matrix);
        assert_eq!(state.get_theme().name, "matrix");
    }

    #[test]
    fn reset_flow_requires_confirmation() {
        let mut state = state_with_habit();
        state.settings_index = 5; // Reset
        state.activate_setting();
        assert!(state.has_reset_confirmation());
        assert_eq!(state.get_store().get_habits().len(), 1);

        state.cancel_reset();
        assert!(!state.has_reset_confirmation());
        assert_eq!(state.get_store().get_habits().len(), 1);

        state.activate_setting();
        state.confirm_reset();
        assert!(state.get_store().get_habits().is_empty());
        assert_eq!(state.get_store().get_settings().xp_multiplier, 1.0);
    }

    #[test]
    fn export_request_is_taken_once() {
        let mut state = State::default();
        state.settings_index = 4; // Export
        state.activate_setting();
        assert!(state.take_export_request());
        assert!(!state.take_export_request());
    }

    #[test]
    fn debug_mode_navigation() {
        let mut state = State::default();
        state.push_debug_entries(vec!["one".to_string(), "two".to_string()]);
        state.enter_debug_mode();
        assert!(state.is_debug_mode());
        assert_eq!(state.debug_index(), 1);
        state.previous_debug();
        assert_eq!(state.debug_index(), 0);
        state.previous_debug();
        assert_eq!(state.debug_index(), 0);
        state.next_debug();
        assert_eq!(state.debug_index(), 1);
        state.exit_debug_mode();
        assert!(!state.is_debug_mode());
    }

    #[test]
    fn step_clock_wraps_midnight() {
        assert_eq!(step_clock("00:00", 30), "00:30");
        assert_eq!(step_clock("23:45", 30), "00:15");
        assert_eq!(step_clock("00:00", -30), "23:30");
        assert_eq!(step_clock("garbage", 30), "00:00");
    }

    #[test]
    fn selected_log_id_is_newest_first() {
        let mut state = state_with_habit();
        let habit_id = state.get_store().get_habits()[0].id.to_owned();
        state.store.log_progress(&habit_id, 1.0);
        state.store.log_progress(&habit_id, 2.0);
        state.logs_list_state.select(Some(0));
        let newest = state.get_store().get_logs().last().unwrap().id.to_owned();
        assert_eq!(state.selected_log_id(), Some(newest));
    }
}
