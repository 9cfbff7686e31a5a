//! Form editing types for the create/edit modals.

use crate::store::{Goal, Habit, Icon};
use tui_textarea::TextArea;

/// Accent colors offered by the forms, as hex strings.
///
pub const COLOR_CHOICES: [&str; 6] = [
    "#00ff41", "#00d9ff", "#c900ff", "#ffd700", "#ff6d92", "#ff8c00",
];

/// Specify the fields of the habit form, in navigation order.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HabitFormField {
    Name,
    Icon,
    Color,
    Target,
    Unit,
}

impl HabitFormField {
    pub fn next(&self) -> HabitFormField {
        match self {
            HabitFormField::Name => HabitFormField::Icon,
            HabitFormField::Icon => HabitFormField::Color,
            HabitFormField::Color => HabitFormField::Target,
            HabitFormField::Target => HabitFormField::Unit,
            HabitFormField::Unit => HabitFormField::Name,
        }
    }

    pub fn previous(&self) -> HabitFormField {
        match self {
            HabitFormField::Name => HabitFormField::Unit,
            HabitFormField::Icon => HabitFormField::Name,
            HabitFormField::Color => HabitFormField::Icon,
            HabitFormField::Target => HabitFormField::Color,
            HabitFormField::Unit => HabitFormField::Target,
        }
    }
}

/// Form state for creating or editing a habit.
///
pub struct HabitForm {
    pub editing_id: Option<String>,
    pub name: String,
    pub icon_index: usize,
    pub color_index: usize,
    pub target: String,
    pub unit: String,
    pub field: HabitFormField,
    pub error: Option<String>,
}

impl HabitForm {
    /// Return an empty form for creating a habit.
    ///
    pub fn new() -> HabitForm {
        HabitForm {
            editing_id: None,
            name: String::new(),
            icon_index: 0,
            color_index: 0,
            target: String::new(),
            unit: String::new(),
            field: HabitFormField::Name,
            error: None,
        }
    }

    /// Return a form pre-populated from an existing habit.
    ///
    pub fn for_habit(habit: &Habit) -> HabitForm {
        HabitForm {
            editing_id: Some(habit.id.to_owned()),
            name: habit.name.to_owned(),
            icon_index: Icon::ALL
                .iter()
                .position(|i| *i == habit.icon)
                .unwrap_or(0),
            color_index: COLOR_CHOICES
                .iter()
                .position(|c| *c == habit.color)
                .unwrap_or(0),
            target: habit.target.to_string(),
            unit: habit.unit.to_owned(),
            field: HabitFormField::Name,
            error: None,
        }
    }

    /// Return the icon currently selected.
    ///
    pub fn icon(&self) -> Icon {
        Icon::ALL[self.icon_index % Icon::ALL.len()]
    }

    /// Return the color currently selected.
    ///
    pub fn color(&self) -> &'static str {
        COLOR_CHOICES[self.color_index % COLOR_CHOICES.len()]
    }

    /// Route a typed character to the focused text field.
    ///
    pub fn push_char(&mut self, c: char) {
        self.error = None;
        match self.field {
            HabitFormField::Name => self.name.push(c),
            HabitFormField::Target => {
                if c.is_ascii_digit() || c == '.' {
                    self.target.push(c);
                }
            }
            HabitFormField::Unit => self.unit.push(c),
            HabitFormField::Icon | HabitFormField::Color => (),
        }
    }

    /// Remove the last character from the focused text field.
    ///
    pub fn pop_char(&mut self) {
        match self.field {
            HabitFormField::Name => {
                self.name.pop();
            }
            HabitFormField::Target => {
                self.target.pop();
            }
            HabitFormField::Unit => {
                self.unit.pop();
            }
            HabitFormField::Icon | HabitFormField::Color => (),
        }
    }

    /// Step the focused choice field (icon or color) forward or back.
    ///
    pub fn cycle_choice(&mut self, forward: bool) {
        let step = |index: usize, len: usize| {
            if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            }
        };
        match self.field {
            HabitFormField::Icon => self.icon_index = step(self.icon_index, Icon::ALL.len()),
            HabitFormField::Color => {
                self.color_index = step(self.color_index, COLOR_CHOICES.len())
            }
            _ => (),
        }
    }
}

/// Specify the fields of the goal form, in navigation order.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalFormField {
    Title,
    Description,
    StartDate,
    EndDate,
    Reward,
}

impl GoalFormField {
    pub fn next(&self) -> GoalFormField {
        match self {
            GoalFormField::Title => GoalFormField::Description,
            GoalFormField::Description => GoalFormField::StartDate,
            GoalFormField::StartDate => GoalFormField::EndDate,
            GoalFormField::EndDate => GoalFormField::Reward,
            GoalFormField::Reward => GoalFormField::Title,
        }
    }

    pub fn previous(&self) -> GoalFormField {
        match self {
            GoalFormField::Title => GoalFormField::Reward,
            GoalFormField::Description => GoalFormField::Title,
            GoalFormField::StartDate => GoalFormField::Description,
            GoalFormField::EndDate => GoalFormField::StartDate,
            GoalFormField::Reward => GoalFormField::EndDate,
        }
    }
}

/// Form state for creating or editing a goal. Dates are edited as
/// `YYYY-MM-DD` text and parsed on submit.
///
pub struct GoalForm {
    pub editing_id: Option<String>,
    pub title: String,
    pub description: TextArea<'static>,
    pub start_date: String,
    pub end_date: String,
    pub reward: String,
    pub field: GoalFormField,
    pub error: Option<String>,
}

impl GoalForm {
    /// Return an empty form spanning the next thirty days.
    ///
    pub fn new(start: chrono::NaiveDate) -> GoalForm {
        GoalForm {
            editing_id: None,
            title: String::new(),
            description: TextArea::default(),
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: (start + chrono::Duration::days(30))
                .format("%Y-%m-%d")
                .to_string(),
            reward: String::new(),
            field: GoalFormField::Title,
            error: None,
        }
    }

    /// Return a form pre-populated from an existing goal.
    ///
    pub fn for_goal(goal: &Goal) -> GoalForm {
        let description = goal.description.clone().unwrap_or_default();
        GoalForm {
            editing_id: Some(goal.id.to_owned()),
            title: goal.title.to_owned(),
            description: TextArea::from(description.lines().collect::<Vec<_>>()),
            start_date: goal.start_date.format("%Y-%m-%d").to_string(),
            end_date: goal.end_date.format("%Y-%m-%d").to_string(),
            reward: goal.reward.clone().unwrap_or_default(),
            field: GoalFormField::Title,
            error: None,
        }
    }

    /// Return the description text, empty lines trimmed away at the edges.
    ///
    pub fn description_text(&self) -> String {
        self.description
            .lines()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Route a typed character to the focused text field. Description input
    /// goes through the textarea widget instead.
    ///
    pub fn push_char(&mut self, c: char) {
        self.error = None;
        match self.field {
            GoalFormField::Title => self.title.push(c),
            GoalFormField::StartDate => self.start_date.push(c),
            GoalFormField::EndDate => self.end_date.push(c),
            GoalFormField::Reward => self.reward.push(c),
            GoalFormField::Description => (),
        }
    }

    /// Remove the last character from the focused text field.
    ///
    pub fn pop_char(&mut self) {
        match self.field {
            GoalFormField::Title => {
                self.title.pop();
            }
            GoalFormField::StartDate => {
                self.start_date.pop();
            }
            GoalFormField::EndDate => {
                self.end_date.pop();
            }
            GoalFormField::Reward => {
                self.reward.pop();
            }
            GoalFormField::Description => (),
        }
    }
}

/// Form state for adding a sub-goal to a goal.
///
pub struct SubGoalForm {
    pub goal_id: String,
    pub title: String,
}

/// Specify the fields of the planner task form, in navigation order.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskFormField {
    Title,
    Time,
    Color,
}

impl TaskFormField {
    pub fn next(&self) -> TaskFormField {
        match self {
            TaskFormField::Title => TaskFormField::Time,
            TaskFormField::Time => TaskFormField::Color,
            TaskFormField::Color => TaskFormField::Title,
        }
    }
}

/// Form state for adding a task to the planner on a chosen day.
///
pub struct TaskForm {
    pub date: chrono::NaiveDate,
    pub title: String,
    pub time: String,
    pub color_index: usize,
    pub field: TaskFormField,
    pub error: Option<String>,
}

impl TaskForm {
    pub fn new(date: chrono::NaiveDate) -> TaskForm {
        TaskForm {
            date,
            title: String::new(),
            time: String::new(),
            color_index: 0,
            field: TaskFormField::Title,
            error: None,
        }
    }

    /// Return the color currently selected.
    ///
    pub fn color(&self) -> &'static str {
        COLOR_CHOICES[self.color_index % COLOR_CHOICES.len()]
    }

    pub fn push_char(&mut self, c: char) {
        self.error = None;
        match self.field {
            TaskFormField::Title => self.title.push(c),
            TaskFormField::Time => {
                if c.is_ascii_digit() || c == ':' {
                    self.time.push(c);
                }
            }
            TaskFormField::Color => (),
        }
    }

    pub fn pop_char(&mut self) {
        match self.field {
            TaskFormField::Title => {
                self.title.pop();
            }
            TaskFormField::Time => {
                self.time.pop();
            }
            TaskFormField::Color => (),
        }
    }

    pub fn cycle_color(&mut self, forward: bool) {
        if self.field == TaskFormField::Color {
            let len = COLOR_CHOICES.len();
            self.color_index = if forward {
                (self.color_index + 1) % len
            } else {
                (self.color_index + len - 1) % len
            };
        }
    }
}

/// Form state for logging progress against a habit.
///
pub struct LogProgressForm {
    pub habit_id: String,
    pub habit_name: String,
    pub unit: String,
    pub value: String,
    pub error: Option<String>,
}

impl LogProgressForm {
    pub fn new(habit: &Habit) -> LogProgressForm {
        LogProgressForm {
            habit_id: habit.id.to_owned(),
            habit_name: habit.name.to_owned(),
            unit: habit.unit.to_owned(),
            value: String::new(),
            error: None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' {
            self.error = None;
            self.value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.value.pop();
    }
}

/// Form state for logging resisted scrolling time against a chosen habit.
///
pub struct AntiScrollForm {
    pub minutes: String,
    pub habit_index: usize,
    pub error: Option<String>,
}

impl AntiScrollForm {
    pub fn new() -> AntiScrollForm {
        AntiScrollForm {
            minutes: String::new(),
            habit_index: 0,
            error: None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.error = None;
            self.minutes.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.minutes.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    #[test]
    fn habit_form_field_cycle_round_trips() {
        let mut field = HabitFormField::Name;
        for _ in 0..5 {
            field = field.next();
        }
        assert_eq!(field, HabitFormField::Name);
        assert_eq!(HabitFormField::Name.previous(), HabitFormField::Unit);
    }

    #[test]
    fn habit_form_routes_chars_by_field() {
        let mut form = HabitForm::new();
        form.push_char('R');
        form.push_char('u');
        form.push_char('n');
        assert_eq!(form.name, "Run");

        form.field = HabitFormField::Target;
        form.push_char('3');
        form.push_char('x');
        form.push_char('0');
        assert_eq!(form.target, "30");

        form.pop_char();
        assert_eq!(form.target, "3");
    }

    #[test]
    fn habit_form_cycles_choices() {
        let mut form = HabitForm::new();
        form.field = HabitFormField::Icon;
        form.cycle_choice(true);
        assert_eq!(form.icon_index, 1);
        form.cycle_choice(false);
        form.cycle_choice(false);
        assert_eq!(form.icon(), Icon::ALL[Icon::ALL.len() - 1]);
    }

    #[test]
    fn habit_form_prefills_from_habit() {
        let mut habit: Habit = Faker.fake();
        habit.icon = Icon::ALL[3];
        habit.color = COLOR_CHOICES[2].to_string();
        let form = HabitForm::for_habit(&habit);
        assert_eq!(form.editing_id.as_deref(), Some(habit.id.as_str()));
        assert_eq!(form.name, habit.name);
        assert_eq!(form.icon(), Icon::ALL[3]);
        assert_eq!(form.color(), COLOR_CHOICES[2]);
    }

    #[test]
    fn goal_form_defaults_thirty_day_range() {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let form = GoalForm::new(start);
        assert_eq!(form.start_date, "2024-06-01");
        assert_eq!(form.end_date, "2024-07-01");
    }

    #[test]
    fn log_form_accepts_numeric_input_only() {
        let habit: Habit = Faker.fake();
        let mut form = LogProgressForm::new(&habit);
        form.push_char('1');
        form.push_char('a');
        form.push_char('.');
        form.push_char('5');
        assert_eq!(form.value, "1.5");
    }

    #[test]
    fn task_form_time_accepts_clock_chars() {
        let mut form = TaskForm::new(chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        form.field = TaskFormField::Time;
        form.push_char('0');
        form.push_char('9');
        form.push_char(':');
        form.push_char('3');
        form.push_char('0');
        form.push_char('x');
        assert_eq!(form.time, "09:30");
    }
}
