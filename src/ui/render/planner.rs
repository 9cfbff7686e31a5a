use super::Frame;
use crate::state::{Focus, State};
use crate::ui::widgets::styling::{accent_color, titled_block};
use crate::utils::dates::days_of_month;
use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

const CELL_WIDTH: usize = 5;

/// Render the planner: a month grid with task markers and the task list for
/// the selected day.
///
pub fn planner(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(8)])
        .split(size);

    month_grid(frame, rows[0], state);
    day_tasks(frame, rows[1], state);
}

fn month_grid(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let active = *state.current_focus() == Focus::View;
    let selected = state.planner_day();
    let today = chrono::Local::now().date_naive();
    let store = state.get_store();

    let mut lines = vec![Line::from(
        ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"]
            .iter()
            .map(|d| {
                Span::styled(
                    format!("{:^width$}", d, width = CELL_WIDTH),
                    Style::default().fg(theme.secondary.to_color()),
                )
            })
            .collect::<Vec<_>>(),
    )];

    let days = days_of_month(selected);
    let leading = days
        .first()
        .map(|d| d.weekday().num_days_from_monday() as usize)
        .unwrap_or(0);

    let mut week: Vec<Span> = Vec::new();
    if leading > 0 {
        week.push(Span::raw(" ".repeat(CELL_WIDTH * leading)));
    }
    for day in &days {
        let open = store
            .get_planner_tasks()
            .iter()
            .filter(|t| t.date == *day)
            .count();
        let done = store
            .get_completed_planner_tasks()
            .iter()
            .filter(|t| t.task.date == *day)
            .count();
        let marker = if open > 0 {
            "•"
        } else if done > 0 {
            "✔"
        } else {
            " "
        };
        let mut style = Style::default().fg(theme.text.to_color());
        if *day == today {
            style = style
                .fg(theme.secondary.to_color())
                .add_modifier(Modifier::BOLD);
        }
        if *day == selected {
            style = style
                .bg(theme.highlight_bg.to_color())
                .fg(theme.highlight_fg.to_color())
                .add_modifier(Modifier::BOLD);
        }
        week.push(Span::styled(
            format!("{:>3}{} ", day.day(), marker),
            style,
        ));
        if day.weekday().num_days_from_monday() == 6 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }

    let title = format!(" PLANNER — {} ", selected.format("%B %Y"));
    let grid = Paragraph::new(lines).block(titled_block(&title, active, &theme));
    frame.render_widget(grid, size);
}

fn day_tasks(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let selected_index = state.planner_task_index();
    let tasks = state.tasks_on_selected_day();

    let mut lines = vec![];
    for (index, task) in tasks.iter().enumerate() {
        let cursor = if index == selected_index { "> " } else { "  " };
        let mut style = Style::default().fg(theme.text.to_color());
        if task.completed {
            style = style
                .fg(theme.text_muted.to_color())
                .add_modifier(Modifier::CROSSED_OUT);
        }
        let time = task.time.as_deref().unwrap_or("--:--");
        lines.push(Line::from(vec![
            Span::styled(cursor, Style::default().fg(theme.primary.to_color())),
            Span::styled("■ ", Style::default().fg(accent_color(&task.color, &theme))),
            Span::styled(format!("{} ", time), Style::default().fg(theme.secondary.to_color())),
            Span::styled(task.title.to_owned(), style),
        ]));
    }
    if tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            " Nothing scheduled. Press 'n' to add a task.",
            Style::default().fg(theme.text_muted.to_color()),
        )));
    }

    let title = format!(" {} ", state.planner_day().format("%A %Y-%m-%d"));
    let panel = Paragraph::new(lines)
        .block(titled_block(&title, false, &theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, size);
}
