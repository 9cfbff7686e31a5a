use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling::{centered_rect, level_color};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the transient level-up celebration over everything else.
///
pub fn banner(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let report = match state.level_up_banner() {
        Some(report) => *report,
        None => return,
    };

    let area = centered_rect(36, 18, size);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "▲ LEVEL UP ▲",
            Style::default()
                .fg(level_color(report.new_level))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("now level {}", report.new_level),
            Style::default().fg(theme.text.to_color()),
        )),
    ];
    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(level_color(report.new_level))),
    );
    frame.render_widget(widget, area);
}
