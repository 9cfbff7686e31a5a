use super::Frame;
use crate::state::{Focus, State, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

/// Render the banner row and the view tab bar.
///
pub fn header(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(size);

    let store = state.get_store();
    let banner = Line::from(vec![
        Span::styled(
            " LIFEOS ",
            Style::default()
                .fg(theme.background.to_color())
                .bg(theme.primary.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  OPERATOR LV.{}", store.get_player_level()),
            Style::default()
                .fg(theme.secondary.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} XP", store.get_total_xp().floor() as i64),
            Style::default().fg(theme.text_secondary.to_color()),
        ),
        Span::styled(
            format!("  {}", chrono::Local::now().format("%A %Y-%m-%d")),
            Style::default().fg(theme.text_muted.to_color()),
        ),
    ]);
    frame.render_widget(Paragraph::new(banner).alignment(Alignment::Left), rows[0]);

    let selected = View::ALL
        .iter()
        .position(|v| v == state.current_view())
        .unwrap_or(0);
    let titles: Vec<Line> = View::ALL.iter().map(|v| Line::from(v.title())).collect();
    let tabs_active = *state.current_focus() == Focus::Menu;
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme.text_muted.to_color()))
        .highlight_style(
            Style::default()
                .fg(if tabs_active {
                    theme.primary.to_color()
                } else {
                    theme.secondary.to_color()
                })
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border_normal.to_color())),
        );
    frame.render_widget(tabs, rows[1]);
}
