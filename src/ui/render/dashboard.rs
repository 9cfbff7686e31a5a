use super::Frame;
use crate::state::{DashboardPanel, Focus, State};
use crate::ui::widgets::styling::{
    accent_color, highlight_style, level_color, streak_glyph, titled_block,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, Paragraph},
};

/// Render the dashboard: habit roster, selected habit detail, recent logs.
///
pub fn dashboard(frame: &mut Frame, size: Rect, state: &mut State) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(size);
    let right_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Percentage(45)])
        .split(columns[1]);

    habits_list(frame, columns[0], state);
    habit_detail(frame, right_rows[0], state);
    recent_logs(frame, right_rows[1], state);
}

fn habits_list(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let active = *state.current_focus() == Focus::View
        && state.dashboard_panel() == DashboardPanel::Habits;

    let items: Vec<ListItem> = state
        .get_store()
        .get_habits()
        .iter()
        .map(|habit| {
            let accent = accent_color(&habit.color, &theme);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", habit.icon.glyph()), Style::default().fg(accent)),
                Span::styled(
                    format!("{:<20}", habit.name),
                    Style::default().fg(theme.text.to_color()),
                ),
                Span::styled(
                    format!(" LV.{:<3}", habit.level),
                    Style::default().fg(level_color(habit.level)),
                ),
                Span::styled(
                    format!(" {} {:<3}", streak_glyph(habit.streak), habit.streak),
                    Style::default().fg(theme.warning.to_color()),
                ),
                Span::styled(
                    format!(
                        " {}/{} XP",
                        habit.xp.floor() as i64,
                        habit.xp_to_next_level.floor() as i64
                    ),
                    Style::default().fg(theme.text_muted.to_color()),
                ),
            ]))
        })
        .collect();

    let title = format!(" HABITS [{}] ", items.len());
    let list = List::new(items)
        .block(titled_block(&title, active, &theme))
        .highlight_style(highlight_style(&theme))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, size, state.get_habits_list_state());
}

fn habit_detail(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let block = titled_block(" STATUS ", false, &theme);

    let habit = match state.selected_habit() {
        Some(habit) => habit.clone(),
        None => {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                " No habit selected. Press 'n' to create one.",
                Style::default().fg(theme.text_muted.to_color()),
            )))
            .block(block);
            frame.render_widget(placeholder, size);
            return;
        }
    };

    let inner = block.inner(size);
    frame.render_widget(block, size);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(2)])
        .split(inner);

    let last_completed = habit
        .last_completed_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "never".to_string());
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} {}", habit.icon.glyph(), habit.name),
                Style::default()
                    .fg(accent_color(&habit.color, &theme))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  target {}{}/day", habit.target, habit.unit),
                Style::default().fg(theme.text_secondary.to_color()),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "streak {} ({} best)   last completed {}",
                habit.streak, habit.longest_streak, last_completed
            ),
            Style::default().fg(theme.text.to_color()),
        )),
        Line::from(Span::styled(
            format!(
                "since {}   {} entries",
                habit.created_at.format("%Y-%m-%d"),
                state.get_store().logs_for_habit(&habit.id).len()
            ),
            Style::default().fg(theme.text_muted.to_color()),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), rows[0]);

    let ratio = if habit.xp_to_next_level > 0.0 {
        (habit.xp / habit.xp_to_next_level).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .ratio(ratio)
        .label(format!(
            "LV.{}  {}/{} XP",
            habit.level,
            habit.xp.floor() as i64,
            habit.xp_to_next_level.floor() as i64
        ))
        .gauge_style(
            Style::default()
                .fg(level_color(habit.level))
                .bg(theme.surface.to_color()),
        );
    frame.render_widget(gauge, rows[1]);
}

fn recent_logs(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let active =
        *state.current_focus() == Focus::View && state.dashboard_panel() == DashboardPanel::Logs;

    let store = state.get_store();
    let items: Vec<ListItem> = store
        .get_logs()
        .iter()
        .rev()
        .map(|log| {
            let habit_name = store
                .get_habit(&log.habit_id)
                .map(|h| h.name.as_str())
                .unwrap_or("(deleted)");
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", log.date.format("%m-%d")),
                    Style::default().fg(theme.text_muted.to_color()),
                ),
                Span::styled(
                    format!("{:<16}", habit_name),
                    Style::default().fg(theme.text.to_color()),
                ),
                Span::styled(
                    format!(" {:>6}", log.value),
                    Style::default().fg(theme.secondary.to_color()),
                ),
                Span::styled(
                    format!("  +{} XP", log.xp_gained.floor() as i64),
                    Style::default().fg(theme.success.to_color()),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(titled_block(" RECENT LOGS ", active, &theme))
        .highlight_style(highlight_style(&theme))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, size, state.get_logs_list_state());
}
