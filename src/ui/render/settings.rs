use super::Frame;
use crate::state::{Focus, SettingsRow, State};
use crate::ui::widgets::styling::titled_block;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the settings view: adjustable rows plus system information.
///
pub fn settings(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(4)])
        .split(size);

    options(frame, rows[0], state);
    system_info(frame, rows[1], state);
}

fn options(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let active = *state.current_focus() == Focus::View;
    let settings = state.get_store().get_settings().clone();
    let selected = state.selected_settings_row();

    let rows: Vec<(SettingsRow, String, String)> = vec![
        (
            SettingsRow::Theme,
            "Theme".to_string(),
            settings.theme.label().to_string(),
        ),
        (
            SettingsRow::XpMultiplier,
            "XP multiplier".to_string(),
            format!("x{:.1}", settings.xp_multiplier),
        ),
        (
            SettingsRow::Sound,
            "Sound".to_string(),
            if settings.sound_enabled { "on" } else { "off" }.to_string(),
        ),
        (
            SettingsRow::DailyGoalTime,
            "Day reset time".to_string(),
            settings.daily_goal_time.to_owned(),
        ),
        (
            SettingsRow::Export,
            "Export backup".to_string(),
            "press Enter".to_string(),
        ),
        (
            SettingsRow::Reset,
            "Factory reset".to_string(),
            "press Enter".to_string(),
        ),
    ];

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(row, label, value)| {
            let is_selected = row == selected;
            let cursor = if is_selected { "> " } else { "  " };
            let mut label_style = Style::default().fg(theme.text.to_color());
            if is_selected {
                label_style = label_style
                    .fg(theme.highlight_fg.to_color())
                    .bg(theme.highlight_bg.to_color())
                    .add_modifier(Modifier::BOLD);
            }
            let value_style = if row == SettingsRow::Reset {
                Style::default().fg(theme.error.to_color())
            } else {
                Style::default().fg(theme.secondary.to_color())
            };
            Line::from(vec![
                Span::styled(cursor, Style::default().fg(theme.primary.to_color())),
                Span::styled(format!("{:<16}", label), label_style),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines).block(titled_block(" SYSTEM CONFIG ", active, &theme));
    frame.render_widget(panel, size);
}

fn system_info(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let store = state.get_store();

    let lines = vec![
        info_line("Total habits", store.get_habits().len(), &theme),
        info_line("Total logs", store.get_logs().len(), &theme),
        info_line(
            "Active goals",
            store.get_goals().len(),
            &theme,
        ),
        info_line(
            "Planner tasks",
            store.get_planner_tasks().len() + store.get_completed_planner_tasks().len(),
            &theme,
        ),
    ];
    let panel = Paragraph::new(lines).block(titled_block(" SYSTEM INFORMATION ", false, &theme));
    frame.render_widget(panel, size);
}

fn info_line<'a>(label: &'a str, value: usize, theme: &crate::ui::Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {:<16}", label),
            Style::default().fg(theme.text_secondary.to_color()),
        ),
        Span::styled(
            value.to_string(),
            Style::default().fg(theme.primary.to_color()),
        ),
    ])
}
