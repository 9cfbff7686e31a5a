use super::Frame;
use crate::state::{
    DeleteTarget, GoalFormField, HabitFormField, State, TaskFormField,
};
use crate::ui::widgets::styling::{accent_color, centered_rect, titled_block};
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

/// Render whichever modal is open on top of the current view.
///
pub fn overlays(frame: &mut Frame, size: Rect, state: &mut State) {
    if state.habit_form().is_some() {
        habit_form(frame, size, state);
    } else if state.goal_form().is_some() {
        goal_form(frame, size, state);
    } else if state.sub_goal_form().is_some() {
        sub_goal_form(frame, size, state);
    } else if state.task_form().is_some() {
        task_form(frame, size, state);
    } else if state.log_form().is_some() {
        log_form(frame, size, state);
    } else if state.anti_scroll_form().is_some() {
        anti_scroll_form(frame, size, state);
    } else if state.has_delete_confirmation() {
        delete_confirmation(frame, size, state);
    } else if state.has_reset_confirmation() {
        reset_confirmation(frame, size, state);
    }
}

/// One labeled form line, highlighted when focused.
///
fn field_line<'a>(label: &'a str, value: String, focused: bool, theme: &Theme) -> Line<'a> {
    let value_style = if focused {
        Style::default()
            .fg(theme.highlight_fg.to_color())
            .bg(theme.highlight_bg.to_color())
    } else {
        Style::default().fg(theme.text.to_color())
    };
    let shown = if focused { format!("{}_", value) } else { value };
    Line::from(vec![
        Span::styled(
            format!(" {:<10}", label),
            Style::default().fg(theme.text_secondary.to_color()),
        ),
        Span::styled(shown, value_style),
    ])
}

fn error_line<'a>(error: &Option<String>, theme: &Theme) -> Line<'a> {
    match error {
        Some(message) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(theme.error.to_color()),
        )),
        None => Line::from(""),
    }
}

fn habit_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let form = match state.habit_form() {
        Some(form) => form,
        None => return,
    };
    let area = centered_rect(55, 55, size);
    frame.render_widget(Clear, area);

    let title = if form.editing_id.is_some() {
        " EDIT HABIT "
    } else {
        " NEW HABIT "
    };
    let lines = vec![
        field_line(
            "Name",
            form.name.to_owned(),
            form.field == HabitFormField::Name,
            &theme,
        ),
        Line::from(vec![
            Span::styled(
                " Icon      ",
                Style::default().fg(theme.text_secondary.to_color()),
            ),
            Span::styled(
                format!("{} {}", form.icon().glyph(), form.icon().label()),
                if form.field == HabitFormField::Icon {
                    Style::default()
                        .fg(theme.highlight_fg.to_color())
                        .bg(theme.highlight_bg.to_color())
                } else {
                    Style::default().fg(theme.text.to_color())
                },
            ),
            Span::styled(
                "  (h/l to cycle)",
                Style::default().fg(theme.text_muted.to_color()),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                " Color     ",
                Style::default().fg(theme.text_secondary.to_color()),
            ),
            Span::styled(
                format!("■ {}", form.color()),
                if form.field == HabitFormField::Color {
                    Style::default()
                        .bg(theme.highlight_bg.to_color())
                        .fg(accent_color(form.color(), &theme))
                } else {
                    Style::default().fg(accent_color(form.color(), &theme))
                },
            ),
        ]),
        field_line(
            "Target",
            form.target.to_owned(),
            form.field == HabitFormField::Target,
            &theme,
        ),
        field_line(
            "Unit",
            form.unit.to_owned(),
            form.field == HabitFormField::Unit,
            &theme,
        ),
        error_line(&form.error, &theme),
        Line::from(Span::styled(
            " Tab: next field  Enter: save  Esc: cancel",
            Style::default().fg(theme.text_muted.to_color()),
        )),
    ];
    let panel = Paragraph::new(lines)
        .block(titled_block(title, true, &theme))
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

fn goal_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let form = match state.goal_form() {
        Some(form) => form,
        None => return,
    };
    let area = centered_rect(60, 65, size);
    frame.render_widget(Clear, area);

    let title = if form.editing_id.is_some() {
        " EDIT GOAL "
    } else {
        " NEW GOAL "
    };
    let block = titled_block(title, true, &theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(field_line(
            "Title",
            form.title.to_owned(),
            form.field == GoalFormField::Title,
            &theme,
        )),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " Description (multi-line)",
            Style::default().fg(if form.field == GoalFormField::Description {
                theme.secondary.to_color()
            } else {
                theme.text_secondary.to_color()
            }),
        ))),
        rows[1],
    );
    frame.render_widget(form.description.widget(), rows[2]);
    frame.render_widget(
        Paragraph::new(field_line(
            "Start",
            form.start_date.to_owned(),
            form.field == GoalFormField::StartDate,
            &theme,
        )),
        rows[3],
    );
    frame.render_widget(
        Paragraph::new(field_line(
            "End",
            form.end_date.to_owned(),
            form.field == GoalFormField::EndDate,
            &theme,
        )),
        rows[4],
    );
    frame.render_widget(
        Paragraph::new(field_line(
            "Reward",
            form.reward.to_owned(),
            form.field == GoalFormField::Reward,
            &theme,
        )),
        rows[5],
    );
    frame.render_widget(Paragraph::new(error_line(&form.error, &theme)), rows[6]);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " Tab: next field  Enter: save  Esc: cancel",
            Style::default().fg(theme.text_muted.to_color()),
        ))),
        rows[7],
    );
}

fn sub_goal_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let form = match state.sub_goal_form() {
        Some(form) => form,
        None => return,
    };
    let area = centered_rect(45, 22, size);
    frame.render_widget(Clear, area);

    let lines = vec![
        field_line("Title", form.title.to_owned(), true, &theme),
        Line::from(""),
        Line::from(Span::styled(
            " Enter: add  Esc: cancel",
            Style::default().fg(theme.text_muted.to_color()),
        )),
    ];
    let panel = Paragraph::new(lines).block(titled_block(" NEW SUB-GOAL ", true, &theme));
    frame.render_widget(panel, area);
}

fn task_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let form = match state.task_form() {
        Some(form) => form,
        None => return,
    };
    let area = centered_rect(50, 40, size);
    frame.render_widget(Clear, area);

    let title = format!(" NEW TASK — {} ", form.date.format("%Y-%m-%d"));
    let lines = vec![
        field_line(
            "Title",
            form.title.to_owned(),
            form.field == TaskFormField::Title,
            &theme,
        ),
        field_line(
            "Time",
            form.time.to_owned(),
            form.field == TaskFormField::Time,
            &theme,
        ),
        Line::from(vec![
            Span::styled(
                " Color     ",
                Style::default().fg(theme.text_secondary.to_color()),
            ),
            Span::styled(
                format!("■ {}", form.color()),
                if form.field == TaskFormField::Color {
                    Style::default()
                        .bg(theme.highlight_bg.to_color())
                        .fg(accent_color(form.color(), &theme))
                } else {
                    Style::default().fg(accent_color(form.color(), &theme))
                },
            ),
            Span::styled(
                "  (h/l to cycle)",
                Style::default().fg(theme.text_muted.to_color()),
            ),
        ]),
        error_line(&form.error, &theme),
        Line::from(Span::styled(
            " Tab: next field  Enter: save  Esc: cancel",
            Style::default().fg(theme.text_muted.to_color()),
        )),
    ];
    let panel = Paragraph::new(lines).block(titled_block(&title, true, &theme));
    frame.render_widget(panel, area);
}

fn log_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let form = match state.log_form() {
        Some(form) => form,
        None => return,
    };
    let area = centered_rect(45, 28, size);
    frame.render_widget(Clear, area);

    let title = format!(" LOG PROGRESS — {} ", form.habit_name);
    let lines = vec![
        field_line(
            &form.unit,
            form.value.to_owned(),
            true,
            &theme,
        ),
        error_line(&form.error, &theme),
        Line::from(Span::styled(
            " Enter: record  Esc: cancel",
            Style::default().fg(theme.text_muted.to_color()),
        )),
    ];
    let panel = Paragraph::new(lines).block(titled_block(&title, true, &theme));
    frame.render_widget(panel, area);
}

fn anti_scroll_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let form = match state.anti_scroll_form() {
        Some(form) => form,
        None => return,
    };
    let habit_name = state
        .get_store()
        .get_habits()
        .get(form.habit_index)
        .map(|h| h.name.to_owned())
        .unwrap_or_else(|| "(no habits yet)".to_string());
    let area = centered_rect(50, 32, size);
    frame.render_widget(Clear, area);

    let lines = vec![
        field_line("Minutes", form.minutes.to_owned(), true, &theme),
        Line::from(vec![
            Span::styled(
                " Instead   ",
                Style::default().fg(theme.text_secondary.to_color()),
            ),
            Span::styled(habit_name, Style::default().fg(theme.secondary.to_color())),
            Span::styled(
                "  (h/l to cycle)",
                Style::default().fg(theme.text_muted.to_color()),
            ),
        ]),
        error_line(&form.error, &theme),
        Line::from(Span::styled(
            " Enter: record  Esc: cancel",
            Style::default().fg(theme.text_muted.to_color()),
        )),
    ];
    let panel = Paragraph::new(lines).block(titled_block(" RESISTED SCROLLING ", true, &theme));
    frame.render_widget(panel, area);
}

fn delete_confirmation(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let target = match state.delete_confirmation() {
        Some(target) => target,
        None => return,
    };
    let what = match target {
        DeleteTarget::Habit(_) => "habit (and all of its logs)",
        DeleteTarget::Log(_) => "log entry",
        DeleteTarget::Goal(_) => "goal",
        DeleteTarget::CompletedGoal(_) => "archived goal",
        DeleteTarget::PlannerTask(_) => "planner task",
    };
    let area = centered_rect(45, 22, size);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            format!(" Delete this {}?", what),
            Style::default().fg(theme.text.to_color()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Enter: delete  Esc: cancel",
            Style::default().fg(theme.error.to_color()),
        )),
    ];
    let panel = Paragraph::new(lines).block(titled_block(" CONFIRM DELETE ", true, &theme));
    frame.render_widget(panel, area);
}

fn reset_confirmation(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let area = centered_rect(50, 25, size);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            " Wipe ALL data and restore defaults?",
            Style::default()
                .fg(theme.error.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " This cannot be undone.",
            Style::default().fg(theme.text_secondary.to_color()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Enter: reset  Esc: cancel",
            Style::default().fg(theme.error.to_color()),
        )),
    ];
    let panel = Paragraph::new(lines).block(titled_block(" FACTORY RESET ", true, &theme));
    frame.render_widget(panel, area);
}
